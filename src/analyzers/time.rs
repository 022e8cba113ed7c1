//! Most frequent times of travel.

use chrono::{Month, Weekday};
use serde::Serialize;

use crate::analyzers::frequency::mode_count;
use crate::analyzers::types::Frequent;
use crate::dataset::{CityDataset, weekday_name};
use crate::error::EmptySequenceError;

/// Most common month, weekday and start hour across a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Frequent<&'static str>,
    pub weekday: Frequent<&'static str>,
    pub hour: Frequent<u32>,
}

#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn time_stats(dataset: &CityDataset) -> Result<TimeStats, EmptySequenceError> {
    let month = mode_count(dataset.iter().map(|r| r.month))?;
    let weekday = mode_count(dataset.iter().map(|r| r.weekday))?;
    let hour = mode_count(dataset.iter().map(|r| r.hour))?;

    Ok(TimeStats {
        month: month_entry(month),
        weekday: weekday_entry(weekday),
        hour: hour.into(),
    })
}

fn month_entry((m, count): (Month, usize)) -> Frequent<&'static str> {
    Frequent {
        value: m.name(),
        count,
    }
}

fn weekday_entry((d, count): (Weekday, usize)) -> Frequent<&'static str> {
    Frequent {
        value: weekday_name(d),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::dataset::Schema;
    use crate::dataset::tests::{at, trip};

    #[test]
    fn test_time_stats() {
        let ds = CityDataset::new(
            City::NewYorkCity,
            Schema::default(),
            vec![
                trip(at(2017, 3, 6, 8), "A", "B", 60.0),
                trip(at(2017, 3, 7, 8), "A", "B", 60.0),
                trip(at(2017, 6, 30, 17), "A", "B", 60.0),
                trip(at(2017, 1, 2, 17), "A", "B", 60.0),
                trip(at(2017, 3, 13, 8), "A", "B", 60.0),
            ],
        );

        let stats = time_stats(&ds).unwrap();
        assert_eq!(stats.month.value, "March");
        assert_eq!(stats.month.count, 3);
        // 03-06, 01-02 and 03-13 are Mondays
        assert_eq!(stats.weekday.value, "Monday");
        assert_eq!(stats.weekday.count, 3);
        assert_eq!(stats.hour, Frequent { value: 8, count: 3 });
    }

    #[test]
    fn test_time_stats_empty() {
        let ds = CityDataset::new(City::Chicago, Schema::default(), vec![]);
        assert_eq!(time_stats(&ds), Err(EmptySequenceError));
    }
}
