//! Sorted occupancy potentials with tie-aware rank lookup.
//!
//! The dynamic field ranks every open cell against the cells currently
//! occupied by pedestrians. [`CellOrderIndex`] holds those occupied cells
//! sorted by static potential and answers, for a target potential, where
//! the first exact match sits and how many cells share that value.

use exodus_core::Coord;

/// A cell occupied by an active pedestrian, tagged with the static
/// potential of that cell for the exit being solved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccupiedCell {
    /// Position of the pedestrian.
    pub coord: Coord,
    /// Static potential at `coord`.
    pub potential: f64,
}

/// Result of a tie-aware lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TieLookup {
    /// Smallest index whose potential equals the target, or `None` when no
    /// cell matches exactly.
    pub first: Option<usize>,
    /// Number of cells whose potential equals the target.
    pub ties: usize,
}

impl TieLookup {
    /// Cells ranked strictly below the target. A miss counts as zero.
    pub fn strictly_smaller(&self) -> usize {
        self.first.unwrap_or(0)
    }

    /// Strictly-smaller count plus ties.
    pub fn congestion(&self) -> usize {
        self.strictly_smaller() + self.ties
    }
}

/// Look up `target` in `sorted`, which must be ascending by potential.
///
/// Binary search finds *some* matching index; the run of equal values is
/// then walked linearly to both sides to count ties and find the first
/// one. The walk is O(ties), not O(log n).
pub fn lookup_ties(sorted: &[OccupiedCell], target: f64) -> TieLookup {
    let mut lo = 0;
    let mut hi = sorted.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let value = sorted[mid].potential;
        if value == target {
            let mut left = mid;
            while left > 0 && sorted[left - 1].potential == target {
                left -= 1;
            }
            let mut right = mid + 1;
            while right < sorted.len() && sorted[right].potential == target {
                right += 1;
            }
            return TieLookup {
                first: Some(left),
                ties: right - left,
            };
        }
        if value > target {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    TieLookup {
        first: None,
        ties: 0,
    }
}

/// Occupied cells sorted ascending by potential.
#[derive(Clone, Debug, Default)]
pub struct CellOrderIndex {
    cells: Vec<OccupiedCell>,
}

impl CellOrderIndex {
    /// Sort `cells` in place and take ownership of them.
    ///
    /// Stability is not needed: ties are resolved by [`lookup`](Self::lookup).
    pub fn new(mut cells: Vec<OccupiedCell>) -> Self {
        cells.sort_unstable_by(|a, b| a.potential.total_cmp(&b.potential));
        Self { cells }
    }

    /// Tie-aware lookup of `target`. See [`lookup_ties`].
    pub fn lookup(&self, target: f64) -> TieLookup {
        lookup_ties(&self.cells, target)
    }

    /// The sorted cells.
    pub fn cells(&self) -> &[OccupiedCell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
