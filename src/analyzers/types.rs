//! Result types shared across the statistic families.

use serde::Serialize;

/// A most-frequent value together with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequent<T> {
    pub value: T,
    pub count: usize,
}

impl<T> From<(T, usize)> for Frequent<T> {
    fn from((value, count): (T, usize)) -> Self {
        Self { value, count }
    }
}

/// The most frequent (start, end) route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
    pub count: usize,
}

/// Sum and arithmetic mean of trip durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

/// Birth-year range over riders with a recorded year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    /// Integer-truncated mean of the recorded years, reported as the
    /// "most common" year.
    pub most_common: i32,
}

/// Rider breakdown for a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the city does not record gender.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the city does not record birth years or no rider has one.
    pub birth_years: Option<BirthYearStats>,
}
