use crate::configuration::{ApplicationSettings, Settings};
use crate::domain::{RegionCode, VideoRecord};
use crate::output::{self, OutputError, RawSnapshot};
use crate::youtube_api::{self, ApiError, YouTubeClient};
use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Video #{index} of the response doesn't match the expected schema")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed write to {path:?}")]
    Output {
        path: PathBuf,
        #[source]
        source: OutputError,
    },
}

/// What was written for one region.
#[derive(Debug, Default)]
pub struct RegionOutcome {
    pub videos: usize,
    /// `None` when the chart came back empty and nothing was written.
    pub csv_path: Option<PathBuf>,
    pub raw_path: Option<PathBuf>,
}

pub struct RegionReport {
    pub region: RegionCode,
    pub result: Result<RegionOutcome, CollectionError>,
}

pub struct RunSummary {
    pub reports: Vec<RegionReport>,
}

impl RunSummary {
    pub fn failed(&self) -> Vec<&RegionCode> {
        self.reports
            .iter()
            .filter(|report| report.result.is_err())
            .map(|report| &report.region)
            .collect()
    }
}

fn to_records(items: &[serde_json::Value]) -> Result<Vec<VideoRecord>, CollectionError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            youtube_api::to_record(item).map_err(|source| CollectionError::Item { index, source })
        })
        .collect()
}

/// Fetches one region's chart and writes it under `settings.output_dir`.
#[tracing::instrument(
    name = "Collecting popular videos",
    skip(client, settings, region, collected_at),
    fields(region = %region, max_results = settings.max_results)
)]
pub async fn collect_region(
    client: &YouTubeClient,
    settings: &ApplicationSettings,
    region: &RegionCode,
    collected_at: &DateTime<Local>,
) -> Result<RegionOutcome, CollectionError> {
    let items = client.most_popular(region, settings.max_results).await?;
    if items.is_empty() {
        tracing::warn!("No videos to save for region {}", region);
        return Ok(RegionOutcome::default());
    }

    let raw_path = if settings.save_raw_json {
        let path = settings
            .output_dir
            .join(output::raw_file_name(region, collected_at));
        let snapshot = RawSnapshot {
            collected_at: *collected_at,
            region_code: region,
            videos: &items,
        };
        output::save_raw_snapshot(&snapshot, &path).map_err(|source| CollectionError::Output {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Raw response saved to {:?}", path);
        Some(path)
    } else {
        None
    };

    let records = to_records(&items)?;
    let csv_path = settings
        .output_dir
        .join(output::csv_file_name(region, collected_at));
    output::save_videos_csv(&records, &csv_path).map_err(|source| CollectionError::Output {
        path: csv_path.clone(),
        source,
    })?;
    tracing::info!("Successfully wrote {} videos to {:?}", records.len(), csv_path);

    Ok(RegionOutcome {
        videos: records.len(),
        csv_path: Some(csv_path),
        raw_path,
    })
}

/// Collects every configured region in turn. A failing region is logged and
/// does not stop the ones after it.
pub async fn run(
    settings: &Settings,
    collected_at: DateTime<Local>,
) -> Result<RunSummary, ApiError> {
    let client = settings.youtube.client()?;
    let mut reports = Vec::with_capacity(settings.application.regions.len());

    for region in &settings.application.regions {
        tracing::info!(
            "Fetching {} popular videos for region {}",
            settings.application.max_results,
            region
        );
        let result = collect_region(&client, &settings.application, region, &collected_at).await;
        if let Err(e) = &result {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to collect region {}",
                region
            );
        }
        reports.push(RegionReport {
            region: region.clone(),
            result,
        });
    }

    Ok(RunSummary { reports })
}
