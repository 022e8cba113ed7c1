//! Mode-and-count over a column of categorical values.
//!
//! Shared by the time, station and demographic statistics.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::EmptySequenceError;

/// Counts occurrences of each distinct value.
///
/// The result is ordered by descending count. Values with equal counts
/// keep the order in which they first appeared in the input.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut order: Vec<Option<T>> = Vec::new();

    for value in values {
        let next = counts.len();
        let slot = *index.entry(value).or_insert(next);
        if slot == next {
            counts.push(1);
            order.push(None);
        } else {
            counts[slot] += 1;
        }
    }

    // Move the keys out of the map into their first-seen slots.
    for (value, slot) in index {
        order[slot] = Some(value);
    }

    let mut out: Vec<(T, usize)> = order
        .into_iter()
        .zip(counts)
        .filter_map(|(v, c)| v.map(|v| (v, c)))
        .collect();
    // Stable sort keeps first-seen order among ties.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Returns the most frequent value and how often it occurs.
///
/// On ties the value encountered first in the input wins.
///
/// # Errors
///
/// [`EmptySequenceError`] if `values` yields nothing.
pub fn mode_count<T, I>(values: I) -> Result<(T, usize), EmptySequenceError>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values)
        .into_iter()
        .next()
        .ok_or(EmptySequenceError)
}
