//! Cell values held by floor-field matrices.
//!
//! A floor-field cell is either a sentinel or a numeric potential. The
//! sentinels are explicit variants rather than magic numbers so that a
//! wall can never be mistaken for a cost of zero.

/// A cell of a static, final, or combined floor field.
///
/// [`Exit`](Potential::Exit) behaves as a cost of `0.0` wherever a numeric
/// value is needed (propagation, ranking, comparison). [`Wall`](Potential::Wall)
/// and [`Unvisited`](Potential::Unvisited) carry no cost at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Potential {
    /// Impassable cell.
    Wall,
    /// One of the exit's own cells.
    Exit,
    /// Open cell not (yet) reached from the exit.
    Unvisited,
    /// Weighted path cost to the exit.
    Value(f64),
}

impl Potential {
    /// Numeric cost of this cell, if it has one.
    pub fn cost(self) -> Option<f64> {
        match self {
            Self::Exit => Some(0.0),
            Self::Value(v) => Some(v),
            Self::Wall | Self::Unvisited => None,
        }
    }

    /// Returns `true` for [`Potential::Wall`].
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Returns `true` for [`Potential::Exit`].
    pub fn is_exit(self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Returns `true` for [`Potential::Unvisited`].
    pub fn is_unvisited(self) -> bool {
        matches!(self, Self::Unvisited)
    }

    /// Cellwise minimum used when combining the fields of several exits.
    ///
    /// Sentinels never take part in the numeric comparison:
    ///
    /// - an exit cell of either operand wins (cost 0 beats everything),
    /// - otherwise a wall in either operand stays a wall,
    /// - an unvisited cell loses to any costed value.
    pub fn min(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exit, _) | (_, Self::Exit) => Self::Exit,
            (Self::Wall, _) | (_, Self::Wall) => Self::Wall,
            (Self::Value(a), Self::Value(b)) => {
                if b < a {
                    Self::Value(b)
                } else {
                    Self::Value(a)
                }
            }
            (Self::Value(v), Self::Unvisited) | (Self::Unvisited, Self::Value(v)) => Self::Value(v),
            (Self::Unvisited, Self::Unvisited) => Self::Unvisited,
        }
    }

    /// Merge a static potential with its dynamic congestion value.
    ///
    /// Numeric cells become `static + alfa * congestion`; sentinel cells
    /// and ignored congestion leave the static value untouched.
    pub fn with_congestion(self, congestion: Congestion, alfa: f64) -> Self {
        match (self, congestion) {
            (Self::Value(v), Congestion::Count(n)) => Self::Value(v + alfa * f64::from(n)),
            (p, _) => p,
        }
    }
}

/// A cell of a dynamic (congestion) field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Congestion {
    /// Cell excluded from the dynamic field (walls).
    Ignore,
    /// Number of pedestrians estimated to compete for this cell or a
    /// closer one.
    Count(u32),
}

impl Congestion {
    /// The congestion count, or `None` for ignored cells.
    pub fn count(self) -> Option<u32> {
        match self {
            Self::Ignore => None,
            Self::Count(n) => Some(n),
        }
    }
}
