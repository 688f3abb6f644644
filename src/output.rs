use crate::domain::{RegionCode, VideoRecord};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: [&str; 9] = [
    "video_id",
    "published_at",
    "title",
    "channel_title",
    "category_id",
    "tags",
    "view_count",
    "like_count",
    "comment_count",
];

/// Lets spreadsheet software detect UTF-8, so that Hangul titles aren't garbled.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("File writing error")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize row")]
    Csv(#[from] csv::Error),
    #[error("Serialization error")]
    Json(#[from] serde_json::Error),
}

/// Everything a single API call returned, kept verbatim for later reprocessing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot<'a> {
    pub collected_at: DateTime<Local>,
    pub region_code: &'a RegionCode,
    pub videos: &'a [serde_json::Value],
}

fn file_stem(region: &RegionCode, collected_at: &DateTime<Local>) -> String {
    format!("popular_{}_{}", region, collected_at.format("%m%d_%H%M"))
}

/// Name of the CSV file for a region, e.g. `popular_KR_1110_1619.csv`.
pub fn csv_file_name(region: &RegionCode, collected_at: &DateTime<Local>) -> String {
    format!("{}.csv", file_stem(region, collected_at))
}

pub fn raw_file_name(region: &RegionCode, collected_at: &DateTime<Local>) -> String {
    format!("{}.json", file_stem(region, collected_at))
}

/// Writes a BOM, the header and one CRLF-terminated row per video.
pub fn write_videos_csv(videos: &[VideoRecord], mut sink: impl Write) -> Result<(), OutputError> {
    sink.write_all(UTF8_BOM)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);
    writer.write_record(CSV_HEADER)?;
    videos
        .iter()
        .try_for_each(|video| writer.serialize(video))?;
    writer.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>, OutputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

pub fn save_videos_csv(
    videos: &[VideoRecord],
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let file = create_file(path.as_ref())?;
    write_videos_csv(videos, file)
}

pub fn save_raw_snapshot(
    snapshot: &RawSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let mut file = create_file(path.as_ref())?;
    serde_json::to_writer_pretty(&mut file, snapshot)?;
    file.flush()?;
    Ok(())
}
