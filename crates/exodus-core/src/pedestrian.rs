//! Pedestrian snapshot consumed by the dynamic field.
//!
//! The floor-field engine never moves pedestrians; it only reads where
//! they are at the start of a time step.

use crate::id::Coord;

/// One agent's state as seen by the floor-field engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pedestrian {
    /// Cell the pedestrian currently occupies.
    pub position: Coord,
    /// Set once the pedestrian has left through an exit. Exited
    /// pedestrians no longer contribute to congestion.
    pub exited: bool,
}

impl Pedestrian {
    /// A pedestrian still inside the environment.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: Coord::new(row, col),
            exited: false,
        }
    }

    /// Mark this pedestrian as having exited.
    pub fn exited(mut self) -> Self {
        self.exited = true;
        self
    }
}

/// Iterate over the pedestrians that have not exited yet.
pub fn active_pedestrians(snapshot: &[Pedestrian]) -> impl Iterator<Item = &Pedestrian> {
    snapshot.iter().filter(|p| !p.exited)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_skips_exited() {
        let snapshot = [
            Pedestrian::new(0, 0),
            Pedestrian::new(1, 1).exited(),
            Pedestrian::new(2, 2),
        ];
        let active: Vec<Coord> = active_pedestrians(&snapshot).map(|p| p.position).collect();
        assert_eq!(active, vec![Coord::new(0, 0), Coord::new(2, 2)]);
    }
}
