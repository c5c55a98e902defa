//! Exit preference: how evenly active pedestrians split between two exits.

use exodus_core::{active_pedestrians, Pedestrian, Potential};

use crate::combine::FieldKind;
use crate::exit::Exit;

/// Slack when comparing two exits' potentials at the same cell.
pub const PREFERENCE_TOLERANCE: f64 = 1e-10;

/// Measure how the active pedestrians split between exits `a` and `b`.
///
/// A pedestrian prefers `b` when both exits have a cost at its cell and
/// `b`'s is within [`PREFERENCE_TOLERANCE`] of `a`'s or lower. Pedestrians
/// on walls, on exit cells of either exit, on cells either exit cannot
/// reach, or off the grid never prefer `b`, but still count toward `n`. With `n_b` pedestrians preferring `b` out of `n`
/// active ones, the result is
///
/// ```text
/// 1 - min(n_b, n - n_b) / max(n_b, n - n_b)
/// ```
///
/// which is 0 for an even split and 1 when every pedestrian prefers the
/// same exit. Returns `None` when no pedestrian is active.
pub fn exit_preference(a: &Exit, b: &Exit, kind: FieldKind, pedestrians: &[Pedestrian]) -> Option<f64> {
    let fa = a.field(kind);
    let fb = b.field(kind);

    let mut total = 0usize;
    let mut prefer_b = 0usize;
    for p in active_pedestrians(pedestrians) {
        total += 1;
        let (Some(pa), Some(pb)) = (fa.get(p.position), fb.get(p.position)) else {
            continue;
        };
        if pa.is_wall() || pa.is_exit() || pb.is_exit() {
            continue;
        }
        if prefers(pa, pb) {
            prefer_b += 1;
        }
    }

    if total == 0 {
        return None;
    }
    let other = total - prefer_b;
    let (lo, hi) = (prefer_b.min(other) as f64, prefer_b.max(other) as f64);
    Some(1.0 - lo / hi)
}

fn prefers(a: Potential, b: Potential) -> bool {
    match (a.cost(), b.cost()) {
        (Some(ca), Some(cb)) => cb <= ca + PREFERENCE_TOLERANCE,
        _ => false,
    }
}
