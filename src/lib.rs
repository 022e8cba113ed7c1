pub mod analyzers;
pub mod city;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod paginator;

use crate::city::CitySources;
use crate::dataset::CityDataset;

/// Loads a city by key and narrows it by month and day in one step.
///
/// # Errors
///
/// [`error::Error::DataSource`] or [`error::Error::InvalidFilter`].
pub fn load_filtered(
    sources: &CitySources,
    city: &str,
    month: &str,
    day: &str,
) -> error::Result<CityDataset> {
    let month: filter::MonthFilter = month.parse()?;
    let day: filter::DayFilter = day.parse()?;
    let dataset = loader::load_city(sources, city)?;
    Ok(filter::filter(&dataset, month, day))
}
