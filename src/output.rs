//! Text and JSON rendering of analysis results.
//!
//! The line wording is what the interactive CLI prints for each section.

use anyhow::Result;
use tracing::debug;

use crate::analyzers::duration::format_duration;
use crate::analyzers::report::Report;
use crate::analyzers::stations::StationStats;
use crate::analyzers::time::TimeStats;
use crate::analyzers::types::{DurationStats, UserStats};
use crate::dataset::{Schema, TripRecord};

pub const NO_GENDER: &str = "This datafile does not contain any gender information.";
pub const NO_BIRTH: &str = "This datafile does not contain any birth information.";

pub fn time_lines(stats: &TimeStats) -> Vec<String> {
    vec![
        format!(
            "The most common month was {} with {} rides.",
            stats.month.value, stats.month.count
        ),
        format!(
            "The most common day of the week was {} with {} rides.",
            stats.weekday.value, stats.weekday.count
        ),
        format!(
            "The most common hour is {} with {} rides.",
            stats.hour.value, stats.hour.count
        ),
    ]
}

pub fn station_lines(stats: &StationStats) -> Vec<String> {
    vec![
        format!(
            "The most commonly used start station was {} with {} rides.",
            stats.start_station.value, stats.start_station.count
        ),
        format!(
            "The most commonly used end station was {} with {} rides.",
            stats.end_station.value, stats.end_station.count
        ),
        format!(
            "Most frequent start/end station trip was {} to {} with {} rides.",
            stats.trip.start, stats.trip.end, stats.trip.count
        ),
    ]
}

pub fn duration_lines(stats: &DurationStats) -> Vec<String> {
    vec![
        format!("Total travel time is: {}", format_duration(stats.total_seconds)),
        format!("Mean travel time is: {}", format_duration(stats.mean_seconds)),
    ]
}

pub fn user_lines(stats: &UserStats) -> Vec<String> {
    let mut lines: Vec<String> = stats
        .user_types
        .iter()
        .map(|(t, n)| format!("Count of {t} is {n}."))
        .collect();

    match &stats.genders {
        Some(genders) => lines.extend(genders.iter().map(|(g, n)| format!("Count of {g} is {n}."))),
        None => lines.push(NO_GENDER.to_string()),
    }

    match &stats.birth_years {
        Some(b) => {
            lines.push(format!("Earliest year of birth:  {}", b.earliest));
            lines.push(format!("Most recent year of birth:  {}", b.most_recent));
            lines.push(format!("Most common year of birth:  {}", b.most_common));
        }
        None => lines.push(NO_BIRTH.to_string()),
    }

    lines
}

/// Renders records as a fixed-width table with a header row.
///
/// Optional columns appear only when the schema has them.
pub fn render_records(records: &[TripRecord], schema: Schema) -> String {
    let mut header = vec![
        "Start Time".to_string(),
        "End Time".to_string(),
        "Trip Duration".to_string(),
        "Start Station".to_string(),
        "End Station".to_string(),
        "User Type".to_string(),
    ];
    if schema.has_gender {
        header.push("Gender".to_string());
    }
    if schema.has_birth_year {
        header.push("Birth Year".to_string());
    }

    let mut rows = vec![header];
    for r in records {
        let mut row = vec![
            r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            r.end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            r.duration_seconds.to_string(),
            r.start_station.clone(),
            r.end_station.clone(),
            r.user_type.clone(),
        ];
        if schema.has_gender {
            row.push(r.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            row.push(r.birth_year.unwrap_or(0).to_string());
        }
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|row| row[c].chars().count()).max().unwrap_or(0))
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serializes a report as pretty-printed JSON.
pub fn report_json(report: &Report) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    debug!(bytes = json.len(), "Report serialized");
    Ok(json)
}
