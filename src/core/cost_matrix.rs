use std::collections::HashMap;

use crate::core::join::join;
use crate::models::{Timeline, TurnList};

/// The speakers that appear in a turn list, in order of first appearance —
/// the row/column ordering used throughout C6/C7.
pub fn speaker_order(turns: &TurnList) -> Vec<String> {
    let mut order = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for turn in turns.turns() {
        if seen.insert(turn.speaker.clone()) {
            order.push(turn.speaker.clone());
        }
    }
    order
}

/// C6: a dense `|ref speakers| x |hyp speakers|` matrix of overlap-duration
/// totals, plus the label orderings that index it.
pub struct CostMatrix {
    pub ref_labels: Vec<String>,
    pub hyp_labels: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

/// Accumulate overlap duration into `C[r,h]` for every sub-region of the
/// common refinement of the two scoring timelines, for every pair of
/// speakers active there (§4.5: a speaker overlapping itself or another
/// speaker in the same timeline still gets the full duration credited, not
/// a divided share).
pub fn build_cost_matrix(
    ref_turns: &TurnList,
    hyp_turns: &TurnList,
    ref_timeline: &Timeline,
    hyp_timeline: &Timeline,
) -> CostMatrix {
    let ref_labels = speaker_order(ref_turns);
    let hyp_labels = speaker_order(hyp_turns);
    let ref_index: HashMap<&str, usize> = ref_labels
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();
    let hyp_index: HashMap<&str, usize> = hyp_labels
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut data = vec![vec![0.0; hyp_labels.len()]; ref_labels.len()];
    for region in join(ref_timeline, hyp_timeline) {
        if region.ref_speakers.is_empty() || region.hyp_speakers.is_empty() {
            continue;
        }
        let d = region.duration();
        for r in &region.ref_speakers {
            let Some(&ri) = ref_index.get(r.as_str()) else {
                continue;
            };
            for h in &region.hyp_speakers {
                let Some(&hi) = hyp_index.get(h.as_str()) else {
                    continue;
                };
                data[ri][hi] += d;
            }
        }
    }

    CostMatrix {
        ref_labels,
        hyp_labels,
        data,
    }
}
