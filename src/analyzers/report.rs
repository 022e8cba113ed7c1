//! All statistic families for one filtered dataset, in a serializable form.

use serde::Serialize;

use crate::analyzers::demographics::user_stats;
use crate::analyzers::duration::duration_stats;
use crate::analyzers::stations::{StationStats, station_stats};
use crate::analyzers::time::{TimeStats, time_stats};
use crate::analyzers::types::{DurationStats, UserStats};
use crate::city::City;
use crate::dataset::{CityDataset, Schema};
use crate::error::EmptySequenceError;
use crate::filter::{DayFilter, MonthFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
    pub schema: Schema,
    pub trips: usize,
    pub times: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl Report {
    /// Runs every analyzer over an already-filtered dataset.
    ///
    /// # Errors
    ///
    /// [`EmptySequenceError`] when the dataset has no records.
    pub fn build(
        dataset: &CityDataset,
        month: MonthFilter,
        day: DayFilter,
    ) -> Result<Self, EmptySequenceError> {
        Ok(Self {
            city: dataset.city(),
            month,
            day,
            schema: dataset.schema(),
            trips: dataset.len(),
            times: time_stats(dataset)?,
            stations: station_stats(dataset)?,
            durations: duration_stats(dataset)?,
            users: user_stats(dataset),
        })
    }
}
