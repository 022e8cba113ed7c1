//! Rider demographics: user types, gender and birth years.

use tracing::debug;

use crate::analyzers::frequency::value_counts;
use crate::analyzers::types::{BirthYearStats, UserStats};
use crate::dataset::CityDataset;

/// Breaks riders down by user type, gender and birth year.
///
/// Never fails: a city without gender or birth-year columns yields `None`
/// for that part, and an empty dataset yields empty counts.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn user_stats(dataset: &CityDataset) -> UserStats {
    let schema = dataset.schema();

    let user_types = owned(value_counts(dataset.iter().map(|r| r.user_type.as_str())));

    let genders = schema
        .has_gender
        .then(|| owned(value_counts(dataset.iter().filter_map(|r| r.gender.as_deref()))));

    let birth_years = if schema.has_birth_year {
        birth_year_stats(dataset.iter().filter_map(|r| r.birth_year))
    } else {
        None
    };

    debug!(
        user_types = user_types.len(),
        has_genders = genders.is_some(),
        has_birth_years = birth_years.is_some(),
        "User stats computed"
    );

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

/// Earliest, latest and truncated-mean year over strictly positive years.
///
/// Zero marks a missing year and is skipped. Returns `None` when no
/// positive year remains.
pub fn birth_year_stats(years: impl IntoIterator<Item = i32>) -> Option<BirthYearStats> {
    let mut earliest = i32::MAX;
    let mut most_recent = i32::MIN;
    let mut sum = 0i64;
    let mut n = 0i64;

    for y in years.into_iter().filter(|y| *y > 0) {
        earliest = earliest.min(y);
        most_recent = most_recent.max(y);
        sum += i64::from(y);
        n += 1;
    }

    if n == 0 {
        return None;
    }

    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common: (sum / n) as i32,
    })
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}
