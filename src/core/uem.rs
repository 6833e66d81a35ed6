use crate::core::domain::{merge_intervals, restrict_to_domain};
use crate::models::{Timeline, TurnList};

/// C3: intersect a timeline with the scoring domain (UEM).
///
/// `uem` must already be sorted and disjoint (see [`merge_intervals`]); the
/// result tiles exactly that domain, filling gaps with silence.
pub fn apply_uem(timeline: &Timeline, uem: &[(f64, f64)]) -> Timeline {
    restrict_to_domain(timeline, uem)
}

/// Extract and merge the `(start, end)` extents of a UEM `TurnList`
/// (speaker labels are ignored — a UEM turn is just a scoring interval).
pub fn uem_intervals(uem: &TurnList) -> Vec<(f64, f64)> {
    merge_intervals(uem.turns().iter().map(|t| (t.start, t.end)).collect())
}

/// Synthesize a UEM as `[min start, max end]` over the union of ref and hyp,
/// per §4.2: used when no UEM is supplied.
pub fn synthesize_uem(ref_turns: &TurnList, hyp_turns: &TurnList) -> Vec<(f64, f64)> {
    let extents = [ref_turns.extent(), hyp_turns.extent()];
    let start = extents.iter().flatten().map(|(s, _)| *s).fold(f64::INFINITY, f64::min);
    let end = extents
        .iter()
        .flatten()
        .map(|(_, e)| *e)
        .fold(f64::NEG_INFINITY, f64::max);
    if start.is_finite() && end.is_finite() && start < end {
        vec![(start, end)]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Turn;

    #[test]
    fn synthesizes_union_extent() {
        let ref_turns = TurnList::new(vec![Turn::new("A", 2.0, 5.0).unwrap()]);
        let hyp_turns = TurnList::new(vec![Turn::new("X", 0.0, 3.0).unwrap()]);
        assert_eq!(synthesize_uem(&ref_turns, &hyp_turns), vec![(0.0, 5.0)]);
    }

    #[test]
    fn synthesize_of_empty_inputs_is_empty() {
        assert_eq!(synthesize_uem(&TurnList::empty(), &TurnList::empty()), Vec::new());
    }

    #[test]
    fn uem_intervals_ignore_speaker_labels() {
        let uem = TurnList::new(vec![
            Turn::new("dummy", 0.0, 5.0).unwrap(),
            Turn::new("dummy", 5.0, 10.0).unwrap(),
        ]);
        assert_eq!(uem_intervals(&uem), vec![(0.0, 10.0)]);
    }
}
