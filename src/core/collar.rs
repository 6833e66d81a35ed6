use crate::core::domain::merge_intervals;
use crate::models::TurnList;

/// C4: the set of forbidden `[b - collar, b + collar]` neighborhoods around
/// every reference turn boundary (both start and end, including the
/// interior boundaries of overlapping turns — see SPEC_FULL.md §9 open
/// question 2), merged into a disjoint list.
pub fn collar_forbidden(ref_turns: &TurnList, collar: f64) -> Vec<(f64, f64)> {
    if collar <= 0.0 {
        return Vec::new();
    }
    let mut intervals = Vec::with_capacity(ref_turns.len() * 2);
    for turn in ref_turns.turns() {
        intervals.push(((turn.start - collar).max(0.0), turn.start + collar));
        intervals.push(((turn.end - collar).max(0.0), turn.end + collar));
    }
    merge_intervals(intervals)
}
