//! CSV loader for a city's trip log.
//!
//! Reads every row, parses timestamps, derives hour/month/weekday and
//! detects the optional `Gender` and `Birth Year` columns from the header
//! row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::city::{City, CitySources};
use crate::dataset::{CityDataset, Schema, TripRecord};
use crate::error::DataSourceError;

const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];
const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// A single row as it appears in the CSV file.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Loads the dataset for a city key such as `"new york city"`.
///
/// # Errors
///
/// [`DataSourceError::UnknownCity`] for a key outside the known set, or any
/// error from [`load`].
pub fn load_city(sources: &CitySources, key: &str) -> Result<CityDataset, DataSourceError> {
    let city: City = key.parse()?;
    load(sources, city)
}

/// Loads the dataset for `city` from the file configured in `sources`.
pub fn load(sources: &CitySources, city: City) -> Result<CityDataset, DataSourceError> {
    load_path(city, sources.path(city))
}

/// Loads a city's dataset from an explicit CSV path.
#[tracing::instrument(skip_all, fields(city = %city, path = %path.display()))]
pub fn load_path(city: City, path: &Path) -> Result<CityDataset, DataSourceError> {
    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(city, path, file)
}

/// Loads a city's dataset from any CSV byte source.
///
/// `origin` only labels errors.
pub fn load_reader<R: Read>(
    city: City,
    origin: &Path,
    reader: R,
) -> Result<CityDataset, DataSourceError> {
    let csv_err = |source: csv::Error| DataSourceError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let schema = detect_schema(&headers, origin)?;
    debug!(?schema, columns = headers.len(), "Header row parsed");

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_err)?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawTrip = row.deserialize(Some(&headers)).map_err(csv_err)?;
        records.push(normalize(raw, schema, origin, line)?);
    }

    info!(
        city = %city,
        rows = records.len(),
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Trip log loaded"
    );

    Ok(CityDataset::new(city, schema, records))
}

/// Checks mandatory columns and reports which optional ones are present.
fn detect_schema(headers: &StringRecord, origin: &Path) -> Result<Schema, DataSourceError> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(column) = REQUIRED_COLUMNS.into_iter().find(|c| !has(c)) {
        return Err(DataSourceError::MissingColumn {
            path: origin.to_path_buf(),
            column,
        });
    }

    Ok(Schema {
        has_gender: has(GENDER_COLUMN),
        has_birth_year: has(BIRTH_YEAR_COLUMN),
    })
}

fn normalize(
    raw: RawTrip,
    schema: Schema,
    origin: &Path,
    row: u64,
) -> Result<TripRecord, DataSourceError> {
    let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| {
        DataSourceError::InvalidTimestamp {
            path: origin.to_path_buf(),
            row,
            column: "Start Time",
            value: raw.start_time.clone(),
        }
    })?;
    let end_time =
        parse_timestamp(&raw.end_time).ok_or_else(|| DataSourceError::InvalidTimestamp {
            path: origin.to_path_buf(),
            row,
            column: "End Time",
            value: raw.end_time.clone(),
        })?;

    if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
        return Err(DataSourceError::InvalidDuration {
            path: origin.to_path_buf(),
            row,
            value: raw.trip_duration,
        });
    }

    let gender = if schema.has_gender { raw.gender } else { None };
    // Blank birth years become 0 so they can be excluded with `> 0` later.
    let birth_year = match (schema.has_birth_year, raw.birth_year) {
        (false, _) => None,
        (true, None) => Some(0),
        (true, Some(y)) if y.is_finite() && (0.0..=i32::MAX as f64).contains(&y) => {
            Some(y.trunc() as i32)
        }
        (true, Some(y)) => {
            return Err(DataSourceError::InvalidBirthYear {
                path: origin.to_path_buf(),
                row,
                value: y,
            });
        }
    };

    Ok(TripRecord::new(
        start_time,
        end_time,
        raw.trip_duration,
        raw.start_station,
        raw.end_station,
        raw.user_type,
    )
    .with_gender(gender)
    .with_birth_year(birth_year))
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    fn load_str(city: City, csv: &str) -> Result<CityDataset, DataSourceError> {
        load_reader(city, Path::new("test.csv"), csv.as_bytes())
    }

    #[test]
    fn test_load_detects_optional_columns() {
        let ds = load_str(City::Chicago, CHICAGO_CSV).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.schema().has_gender);
        assert!(ds.schema().has_birth_year);

        let ds = load_str(City::Washington, WASHINGTON_CSV).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(!ds.schema().has_gender);
        assert!(!ds.schema().has_birth_year);
        assert_eq!(ds.records()[0].gender, None);
        assert_eq!(ds.records()[0].birth_year, None);
    }

    #[test]
    fn test_load_normalizes_birth_year() {
        let ds = load_str(City::Chicago, CHICAGO_CSV).unwrap();
        let years: Vec<_> = ds.iter().map(|r| r.birth_year).collect();
        assert_eq!(years, vec![Some(1992), Some(0), Some(0)]);
    }

    #[test]
    fn test_load_blank_gender_is_none() {
        let ds = load_str(City::Chicago, CHICAGO_CSV).unwrap();
        assert_eq!(ds.records()[0].gender.as_deref(), Some("Male"));
        assert_eq!(ds.records()[2].gender, None);
    }

    #[test]
    fn test_load_derives_time_fields() {
        let ds = load_str(City::Chicago, CHICAGO_CSV).unwrap();
        let first = &ds.records()[0];
        assert_eq!(first.hour, 15);
        assert_eq!(first.month, Month::June);
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.duration_seconds, 321.0);
    }

    #[test]
    fn test_load_fractional_duration() {
        let ds = load_str(City::Washington, WASHINGTON_CSV).unwrap();
        assert!((ds.records()[0].duration_seconds - 489.066).abs() < 1e-9);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Start Time,End Time,Start Station,End Station,User Type\n";
        let err = load_str(City::Chicago, csv).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::MissingColumn {
                column: "Trip Duration",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_timestamp() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
yesterday,2017-06-21 08:44:43,60,A,B,Subscriber
";
        let err = load_str(City::Washington, csv).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::InvalidTimestamp {
                column: "Start Time",
                row: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_duration() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,long,A,B,Subscriber
";
        let err = load_str(City::Washington, csv).unwrap_err();
        assert!(matches!(err, DataSourceError::Csv { .. }));
    }

    #[test]
    fn test_negative_duration() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,-5,A,B,Subscriber
";
        let err = load_str(City::Washington, csv).unwrap_err();
        assert!(matches!(err, DataSourceError::InvalidDuration { .. }));
    }

    #[test]
    fn test_non_finite_duration() {
        for duration in ["NaN", "inf", "-inf"] {
            let csv = format!(
                "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                 2017-06-21 08:36:34,2017-06-21 08:44:43,{duration},A,B,Subscriber\n"
            );
            let err = load_str(City::Washington, &csv).unwrap_err();
            assert!(
                matches!(err, DataSourceError::InvalidDuration { row: 2, .. }),
                "{duration} accepted: {err}"
            );
        }
    }

    #[test]
    fn test_out_of_range_birth_year() {
        for year in ["1e12", "-1985", "NaN"] {
            let csv = format!(
                "Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n\
                 2017-06-23 15:09:32,2017-06-23 15:14:53,321,A,B,Subscriber,Male,{year}\n"
            );
            let err = load_str(City::Chicago, &csv).unwrap_err();
            assert!(
                matches!(err, DataSourceError::InvalidBirthYear { row: 2, .. }),
                "{year} accepted: {err}"
            );
        }
    }

    #[test]
    fn test_unknown_city_key() {
        let sources = CitySources::new(".");
        let err = load_city(&sources, "springfield").unwrap_err();
        assert!(matches!(err, DataSourceError::UnknownCity { .. }));
    }

    #[test]
    fn test_missing_file() {
        let sources = CitySources::new("/nonexistent/bikeshare");
        let err = load_city(&sources, "chicago").unwrap_err();
        assert!(matches!(err, DataSourceError::Io { .. }));
    }

    #[test]
    fn test_parse_timestamp_with_fraction() {
        assert!(parse_timestamp("2017-01-01 00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 00:07:57.123").is_some());
        assert!(parse_timestamp("01/01/2017").is_none());
    }
}
