//! Sparse live-cell storage: row index -> set of live columns.
//!
//! Rows with no live cells are never stored, so `rows()` only ever yields
//! non-empty rows and two sets with the same cells compare equal.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::grid::Bounds;

/// Live columns of a single row.
pub type Row = FxHashSet<usize>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<usize, Vec<usize>>", into = "BTreeMap<usize, Vec<usize>>")]
pub struct LiveSet {
    rows: BTreeMap<usize, Row>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark (x, y) alive. Returns false if it already was.
    pub fn insert(&mut self, x: usize, y: usize) -> bool {
        self.rows.entry(y).or_default().insert(x)
    }

    /// Mark (x, y) dead, dropping the row once it empties.
    pub fn remove(&mut self, x: usize, y: usize) -> bool {
        let Some(row) = self.rows.get_mut(&y) else {
            return false;
        };
        let removed = row.remove(&x);
        if row.is_empty() {
            self.rows.remove(&y);
        }
        removed
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.rows.get(&y).is_some_and(|row| row.contains(&x))
    }

    /// Live columns of row `y`, `None` when the row has no live cells.
    #[inline]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(&y)
    }

    /// Non-empty rows in ascending row order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().map(|(&y, row)| (y, row))
    }

    /// Every live (x, y). Column order within a row is unspecified.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&y, row)| row.iter().map(move |&x| (x, y)))
    }

    pub fn population(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with `MalformedLiveSet` on the first cell outside `bounds`.
    pub fn validate(&self, bounds: Bounds) -> Result<()> {
        for (x, y) in self.cells() {
            if !bounds.contains(x, y) {
                return Err(LifeError::MalformedLiveSet {
                    x,
                    y,
                    width: bounds.width(),
                    height: bounds.height(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(usize, usize)> for LiveSet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut live = LiveSet::new();
        for (x, y) in iter {
            live.insert(x, y);
        }
        live
    }
}

impl From<BTreeMap<usize, Vec<usize>>> for LiveSet {
    fn from(raw: BTreeMap<usize, Vec<usize>>) -> Self {
        raw.into_iter()
            .flat_map(|(y, cols)| cols.into_iter().map(move |x| (x, y)))
            .collect()
    }
}

impl From<LiveSet> for BTreeMap<usize, Vec<usize>> {
    fn from(live: LiveSet) -> Self {
        live.rows
            .into_iter()
            .map(|(y, row)| {
                let mut cols: Vec<usize> = row.into_iter().collect();
                cols.sort_unstable();
                (y, cols)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LiveSet {
        [(1, 0), (2, 0), (3, 0), (4, 0), (0, 1), (2, 1), (5, 1), (7, 1)]
            .into_iter()
            .collect()
    }

    #[test]
    fn membership_is_exact() {
        let live = sample();
        assert!(live.is_alive(1, 0));
        assert!(!live.is_alive(1, 1));
        assert!(!live.is_alive(1, 10));
        assert!(!live.is_alive(10, 1));
    }

    #[test]
    fn removing_last_cell_drops_row() {
        let mut live: LiveSet = [(3, 2)].into_iter().collect();
        assert!(live.row(2).is_some());
        assert!(live.remove(3, 2));
        assert!(live.row(2).is_none());
        assert!(live.is_empty());
        assert!(!live.remove(3, 2));
    }

    #[test]
    fn duplicate_inserts_collapse() {
        let mut live = LiveSet::new();
        assert!(live.insert(4, 4));
        assert!(!live.insert(4, 4));
        assert_eq!(live.population(), 1);
    }

    #[test]
    fn validate_reports_out_of_range_cell() {
        let bounds = Bounds::new(8, 2).unwrap();
        assert!(sample().validate(bounds).is_ok());

        let mut live = sample();
        live.insert(8, 1);
        match live.validate(bounds) {
            Err(LifeError::MalformedLiveSet { x: 8, y: 1, .. }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_form_is_row_keyed_object() {
        let live: LiveSet = [(2, 0), (1, 0), (0, 3)].into_iter().collect();
        let json = serde_json::to_string(&live).unwrap();
        assert_eq!(json, r#"{"0":[1,2],"3":[0]}"#);
    }

    #[test]
    fn json_input_drops_empty_rows_and_duplicates() {
        let live: LiveSet = serde_json::from_str(r#"{"0":[1,1,2],"4":[]}"#).unwrap();
        assert_eq!(live.population(), 2);
        assert!(live.row(4).is_none());
        assert_eq!(live, [(1, 0), (2, 0)].into_iter().collect());
    }
}
