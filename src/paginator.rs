//! Five-at-a-time cursor over raw trip records.

use crate::dataset::{CityDataset, TripRecord};

pub const PAGE_SIZE: usize = 5;

/// Read-only view that hands out consecutive pages of records.
#[derive(Debug, Clone)]
pub struct RawDataPaginator<'a> {
    records: &'a [TripRecord],
    offset: usize,
}

impl<'a> RawDataPaginator<'a> {
    pub fn new(dataset: &'a CityDataset) -> Self {
        Self {
            records: dataset.records(),
            offset: 0,
        }
    }

    /// Returns up to [`PAGE_SIZE`] records and advances the cursor.
    ///
    /// An empty slice means there is nothing left to show.
    pub fn next_page(&mut self) -> &'a [TripRecord] {
        let start = self.offset.min(self.records.len());
        let end = (start + PAGE_SIZE).min(self.records.len());
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        &self.records[start..end]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.records.len()
    }
}
