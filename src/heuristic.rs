use crate::grid::Position;

/// Manhattan distance from `pos` to the nearest of `goals`.
///
/// An empty goal slice yields 0. Distances beyond `u32::MAX` saturate.
pub fn manhattan(pos: Position, goals: &[Position]) -> u32 {
    goals
        .iter()
        .map(|goal| pos.x.abs_diff(goal.x).saturating_add(pos.y.abs_diff(goal.y)))
        .min()
        .unwrap_or(0)
}
