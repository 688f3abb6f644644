use anyhow::Context;
use clap::Parser;
use popular_videos::cli::Cli;
use popular_videos::collection::run;
use popular_videos::configuration::get_configuration;
use popular_videos::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing telemetry.
    let subscriber = get_subscriber("popular-videos".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Get config settings, then let the command line override them
    let mut configuration = get_configuration().context("Failed to read configuration.")?;
    cli.apply(&mut configuration);
    configuration
        .validate()
        .context("Invalid settings after command-line overrides.")?;

    let summary = run(&configuration, chrono::Local::now()).await?;

    let failed = summary.failed();
    if failed.is_empty() {
        tracing::info!("All {} regions collected.", summary.reports.len());
        Ok(())
    } else {
        let failed: Vec<_> = failed.iter().map(ToString::to_string).collect();
        anyhow::bail!("Failed to collect regions: {}", failed.join(", "))
    }
}
