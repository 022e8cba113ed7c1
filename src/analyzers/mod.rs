//! Statistics over a filtered trip dataset.
//!
//! Each family reads the dataset independently; none of them perform I/O
//! or mutate their input.

pub mod demographics;
pub mod duration;
pub mod frequency;
pub mod report;
pub mod stations;
pub mod time;
pub mod types;
