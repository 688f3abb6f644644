use crate::configuration::{MAX_RESULTS_LIMIT, Settings};
use crate::domain::RegionCode;
use clap::Parser;
use std::path::PathBuf;

/// Save a region's most popular YouTube videos as CSV.
///
/// Every flag is optional and overrides the value from `configuration/`.
#[derive(Parser, Debug)]
#[command(name = "popular-videos", version, about)]
pub struct Cli {
    /// Region codes to collect, e.g. `KR,US`
    #[arg(short, long = "region", value_delimiter = ',')]
    pub regions: Vec<RegionCode>,

    /// Videos per region (1-50)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=MAX_RESULTS_LIMIT as i64))]
    pub max_results: Option<u8>,

    /// Directory the files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also save the unmodified API response as JSON
    #[arg(long)]
    pub raw_json: bool,
}

impl Cli {
    pub fn apply(self, settings: &mut Settings) {
        let application = &mut settings.application;
        if !self.regions.is_empty() {
            application.regions = self.regions;
        }
        if let Some(max_results) = self.max_results {
            application.max_results = max_results;
        }
        if let Some(output_dir) = self.output_dir {
            application.output_dir = output_dir;
        }
        if self.raw_json {
            application.save_raw_json = true;
        }
    }
}
