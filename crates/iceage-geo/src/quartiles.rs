//! Equal-frequency quartile binning.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four area bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quartile {
    /// Smallest quarter
    Q1,
    /// Second quarter
    Q2,
    /// Third quarter
    Q3,
    /// Largest quarter
    Q4,
}

impl Quartile {
    /// All bins in order.
    pub const ALL: [Quartile; 4] = [Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4];

    /// Zero-based position.
    pub fn index(&self) -> usize {
        match self {
            Quartile::Q1 => 0,
            Quartile::Q2 => 1,
            Quartile::Q3 => 2,
            Quartile::Q4 => 3,
        }
    }

    fn from_index(i: usize) -> Self {
        match i {
            0 => Quartile::Q1,
            1 => Quartile::Q2,
            2 => Quartile::Q3,
            _ => Quartile::Q4,
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.index() + 1)
    }
}

/// Assign each value to a quartile by rank.
///
/// Values are ordered ascending (ties keep input order) and rank `r` of `n`
/// goes to bin `floor(4r / n)`, so bin sizes never differ by more than one.
/// NaN sorts last.
pub fn quartile_bins(values: &[f64]) -> Vec<Quartile> {
    let n = values.len();
    let mut bins = vec![Quartile::Q1; n];
    for (rank, idx) in rank_order(values).into_iter().enumerate() {
        bins[idx] = Quartile::from_index(rank * 4 / n);
    }
    bins
}

/// Input indices per quartile, each group in ascending value order.
pub fn group_by_quartile(values: &[f64]) -> [Vec<usize>; 4] {
    let n = values.len();
    let mut groups: [Vec<usize>; 4] = Default::default();
    for (rank, idx) in rank_order(values).into_iter().enumerate() {
        groups[rank * 4 / n].push(idx);
    }
    groups
}

fn rank_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or_else(|| values[a].is_nan().cmp(&values[b].is_nan()))
            .then(a.cmp(&b))
    });
    order
}
