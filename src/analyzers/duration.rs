//! Total and mean trip duration.

use crate::analyzers::types::DurationStats;
use crate::dataset::CityDataset;
use crate::error::EmptySequenceError;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn duration_stats(dataset: &CityDataset) -> Result<DurationStats, EmptySequenceError> {
    if dataset.is_empty() {
        return Err(EmptySequenceError);
    }

    let total_seconds: f64 = dataset.iter().map(|r| r.duration_seconds).sum();
    let mean_seconds = total_seconds / dataset.len() as f64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
    })
}

/// Renders a duration as `"D days, H hours, M minutes, S seconds."`.
///
/// Fractional seconds are truncated before splitting; negative or NaN
/// input renders as zero.
pub fn format_duration(seconds: f64) -> String {
    // Saturating float-to-int cast: NaN and negatives become 0.
    let whole = seconds.trunc() as u64;

    let days = whole / SECONDS_PER_DAY;
    let rem = whole % SECONDS_PER_DAY;
    let hours = rem / SECONDS_PER_HOUR;
    let rem = rem % SECONDS_PER_HOUR;
    let minutes = rem / SECONDS_PER_MINUTE;
    let secs = rem % SECONDS_PER_MINUTE;

    format!("{days} days, {hours} hours, {minutes} minutes, {secs} seconds.")
}
