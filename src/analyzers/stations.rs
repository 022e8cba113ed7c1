//! Most popular stations and routes.

use serde::Serialize;

use crate::analyzers::frequency::mode_count;
use crate::analyzers::types::{Frequent, StationPair};
use crate::dataset::CityDataset;
use crate::error::EmptySequenceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: Frequent<String>,
    pub end_station: Frequent<String>,
    pub trip: StationPair,
}

#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn station_stats(dataset: &CityDataset) -> Result<StationStats, EmptySequenceError> {
    let (start, start_count) = mode_count(dataset.iter().map(|r| r.start_station.as_str()))?;
    let (end, end_count) = mode_count(dataset.iter().map(|r| r.end_station.as_str()))?;

    Ok(StationStats {
        start_station: Frequent {
            value: start.to_string(),
            count: start_count,
        },
        end_station: Frequent {
            value: end.to_string(),
            count: end_count,
        },
        trip: most_frequent_pair(dataset)?,
    })
}

/// Finds the most frequent (start station, end station) combination.
///
/// Ties go to the pair seen first in the dataset.
pub fn most_frequent_pair(dataset: &CityDataset) -> Result<StationPair, EmptySequenceError> {
    let ((start, end), count) = mode_count(
        dataset
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    )?;

    Ok(StationPair {
        start: start.to_string(),
        end: end.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::dataset::Schema;
    use crate::dataset::tests::{at, trip};

    fn dataset(routes: &[(&str, &str)]) -> CityDataset {
        let records = routes
            .iter()
            .map(|(a, b)| trip(at(2017, 2, 1, 12), a, b, 300.0))
            .collect();
        CityDataset::new(City::Washington, Schema::default(), records)
    }

    #[test]
    fn test_station_stats() {
        let ds = dataset(&[
            ("Canal St", "Clark St"),
            ("Canal St", "Lake St"),
            ("Clark St", "Lake St"),
            ("Canal St", "Clark St"),
        ]);
        let stats = station_stats(&ds).unwrap();
        assert_eq!(stats.start_station.value, "Canal St");
        assert_eq!(stats.start_station.count, 3);
        assert_eq!(stats.end_station.value, "Clark St");
        assert_eq!(stats.end_station.count, 2);
        assert_eq!(
            stats.trip,
            StationPair {
                start: "Canal St".into(),
                end: "Clark St".into(),
                count: 2,
            }
        );
    }

    #[test]
    fn test_pair_is_ordered() {
        // A->B and B->A are different routes.
        let ds = dataset(&[("A", "B"), ("B", "A"), ("B", "A")]);
        let pair = most_frequent_pair(&ds).unwrap();
        assert_eq!((pair.start.as_str(), pair.end.as_str()), ("B", "A"));
        assert_eq!(pair.count, 2);
    }

    #[test]
    fn test_pair_tie_goes_to_first_seen() {
        let ds = dataset(&[("X", "Y"), ("A", "B"), ("A", "B"), ("X", "Y")]);
        let pair = most_frequent_pair(&ds).unwrap();
        assert_eq!(pair.start, "X");
        assert_eq!(pair.end, "Y");
    }

    #[test]
    fn test_empty_dataset() {
        let ds = dataset(&[]);
        assert_eq!(most_frequent_pair(&ds), Err(EmptySequenceError));
        assert_eq!(station_stats(&ds), Err(EmptySequenceError));
    }
}
