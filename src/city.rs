//! The fixed set of cities and where each city's trip log lives.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::DataSourceError;

/// Cities with a published trip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase key used at the prompt and in source maps.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's log inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Position of the city in [`City::ALL`].
    fn index(self) -> usize {
        match self {
            City::Chicago => 0,
            City::NewYorkCity => 1,
            City::Washington => 2,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for City {
    type Err = DataSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        City::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| DataSourceError::UnknownCity {
                key: s.to_string(),
            })
    }
}

/// Read-only map from each [`City`] to its CSV file.
///
/// Built once at startup and handed to the loader. Entries are stored in
/// [`City::ALL`] order.
#[derive(Debug, Clone)]
pub struct CitySources {
    entries: [PathBuf; 3],
}

impl CitySources {
    /// Maps every city to its conventional file name under `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            entries: City::ALL.map(|c| dir.join(c.file_name())),
        }
    }

    /// Loads an override map from a JSON object on disk:
    ///
    /// ```json
    /// {
    ///   "chicago": "/data/chicago.csv",
    ///   "washington": "/data/washington.csv"
    /// }
    /// ```
    ///
    /// Cities missing from the file fall back to `data_dir`.
    pub fn from_json_file(
        path: impl AsRef<Path>,
        data_dir: impl AsRef<Path>,
    ) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: HashMap<String, PathBuf> =
            serde_json::from_str(&content).map_err(|e| DataSourceError::InvalidSourceMap {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut sources = Self::new(data_dir);
        for (key, file) in raw {
            let city = key
                .parse::<City>()
                .map_err(|_| DataSourceError::InvalidSourceMap {
                    path: path.to_path_buf(),
                    reason: format!("unknown city '{key}'"),
                })?;
            sources.entries[city.index()] = file;
        }
        Ok(sources)
    }

    /// Returns the file configured for `city`.
    pub fn path(&self, city: City) -> &Path {
        &self.entries[city.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        City::ALL
            .into_iter()
            .zip(self.entries.iter().map(PathBuf::as_path))
    }
}
