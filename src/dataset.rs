//! In-memory trip records and the per-city collection that holds them.

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::city::City;

/// One trip from a city's log, with time fields derived at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    /// `None` when the city has no gender column or the cell was blank.
    pub gender: Option<String>,
    /// `None` when the city has no birth-year column; blank cells are `Some(0)`.
    pub birth_year: Option<i32>,

    pub hour: u32,
    pub month: Month,
    pub weekday: Weekday,
}

impl TripRecord {
    /// Builds a record and derives hour, month and weekday from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            hour: start_time.hour(),
            month: month_of(&start_time),
            weekday: start_time.weekday(),
        }
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// Full English month name, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }

    /// Full English weekday name, e.g. `"Tuesday"`.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

fn month_of(t: &NaiveDateTime) -> Month {
    // `month()` is always 1..=12
    Month::try_from(t.month() as u8).unwrap_or(Month::January)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Which optional columns a city's log carries.
///
/// Fixed for the lifetime of a dataset and shared by all its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Ordered trip records for one city plus their schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDataset {
    city: City,
    schema: Schema,
    records: Vec<TripRecord>,
}

impl CityDataset {
    pub fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a CityDataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
