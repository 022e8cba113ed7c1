//! Month and weekday filters over a loaded dataset.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::dataset::{CityDataset, weekday_name};
use crate::error::InvalidFilterError;

/// Months covered by the published trip logs.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn matches(self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case(ALL) {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(value))
            .map(MonthFilter::Only)
            .ok_or_else(|| InvalidFilterError::Month(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(ALL),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == day,
        }
    }
}

impl FromStr for DayFilter {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case(ALL) {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(value))
            .map(DayFilter::Only)
            .ok_or_else(|| InvalidFilterError::Day(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(ALL),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Returns a new dataset holding only the records that match both filters.
///
/// Row order and schema are preserved; the input is left untouched.
#[tracing::instrument(skip(dataset), fields(city = %dataset.city(), rows_in = dataset.len()))]
pub fn filter(dataset: &CityDataset, month: MonthFilter, day: DayFilter) -> CityDataset {
    let records: Vec<_> = dataset
        .iter()
        .filter(|r| month.matches(r.month) && day.matches(r.weekday))
        .cloned()
        .collect();

    debug!(rows_out = records.len(), "Filter applied");

    CityDataset::new(dataset.city(), dataset.schema(), records)
}

/// Parses raw month/day strings and filters with them.
///
/// # Errors
///
/// [`InvalidFilterError`] when either value is outside the accepted set.
pub fn apply_filters(
    dataset: &CityDataset,
    month: &str,
    day: &str,
) -> Result<CityDataset, InvalidFilterError> {
    let month: MonthFilter = month.parse()?;
    let day: DayFilter = day.parse()?;
    Ok(filter(dataset, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::dataset::Schema;
    use crate::dataset::tests::{at, trip};

    fn sample() -> CityDataset {
        CityDataset::new(
            City::Chicago,
            Schema {
                has_gender: true,
                has_birth_year: false,
            },
            vec![
                trip(at(2017, 1, 2, 8), "A", "B", 60.0),  // Monday
                trip(at(2017, 3, 6, 9), "B", "C", 120.0), // Monday
                trip(at(2017, 3, 7, 10), "C", "A", 90.0), // Tuesday
                trip(at(2017, 6, 30, 17), "A", "C", 30.0), // Friday
            ],
        )
    }

    #[test]
    fn test_parse_month_filter() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "march".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(Month::March)
        );
        assert_eq!(
            "June".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(Month::June)
        );
    }

    #[test]
    fn test_month_outside_range_rejected() {
        assert_eq!(
            "july".parse::<MonthFilter>(),
            Err(InvalidFilterError::Month("july".into()))
        );
        assert!("".parse::<MonthFilter>().is_err());
        assert!("jan".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_parse_day_filter() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "SUNDAY".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert_eq!(
            "funday".parse::<DayFilter>(),
            Err(InvalidFilterError::Day("funday".into()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for m in MONTHS {
            let f = MonthFilter::Only(m);
            assert_eq!(f.to_string().parse::<MonthFilter>().unwrap(), f);
        }
        for d in WEEKDAYS {
            let f = DayFilter::Only(d);
            assert_eq!(f.to_string().parse::<DayFilter>().unwrap(), f);
        }
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let ds = sample();
        let out = filter(&ds, MonthFilter::All, DayFilter::All);
        assert_eq!(out, ds);
    }

    #[test]
    fn test_month_filter() {
        let ds = sample();
        let out = apply_filters(&ds, "March", "all").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.month_name() == "March"));
        assert_eq!(out.schema(), ds.schema());
    }

    #[test]
    fn test_day_filter_preserves_order() {
        let ds = sample();
        let out = apply_filters(&ds, "all", "monday").unwrap();
        let stations: Vec<_> = out.iter().map(|r| r.start_station.as_str()).collect();
        assert_eq!(stations, vec!["A", "B"]);
    }

    #[test]
    fn test_combined_filter_can_empty_dataset() {
        let ds = sample();
        let out = apply_filters(&ds, "january", "friday").unwrap();
        assert!(out.is_empty());
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_apply_filters_rejects_bad_values() {
        let ds = sample();
        assert!(matches!(
            apply_filters(&ds, "december", "all"),
            Err(InvalidFilterError::Month(_))
        ));
        assert!(matches!(
            apply_filters(&ds, "all", "someday"),
            Err(InvalidFilterError::Day(_))
        ));
    }
}
