use std::collections::BTreeMap;

use crate::models::{Region, Timeline, TurnList};

/// C2: turn a [`TurnList`] into a [`Timeline`] whose regions partition the
/// turns' extent and whose speaker sets are piecewise constant.
///
/// Sweep-line over turn endpoints: sort events by time, closings before
/// openings at equal times (so two turns that touch but don't overlap never
/// produce a zero-length overlap region), and maintain a cover count per
/// speaker so that a speaker active in two overlapping turns isn't dropped
/// when the first of the two ends.
pub fn build_timeline(turns: &TurnList) -> Timeline {
    if turns.is_empty() {
        return Timeline::empty();
    }

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Kind {
        Close,
        Open,
    }

    let mut events: Vec<(ordered_time::Time, Kind, &str)> = Vec::with_capacity(turns.len() * 2);
    for turn in turns.turns() {
        events.push((ordered_time::Time(turn.start), Kind::Open, turn.speaker.as_str()));
        events.push((ordered_time::Time(turn.end), Kind::Close, turn.speaker.as_str()));
    }
    events.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut active: BTreeMap<&str, u32> = BTreeMap::new();
    let mut regions = Vec::new();
    let mut cursor = events[0].0 .0;
    let mut i = 0;
    while i < events.len() {
        let time = events[i].0 .0;
        if time > cursor {
            if !active.is_empty() {
                let speakers = active.keys().map(|s| s.to_string()).collect();
                regions.push(Region::new(cursor, time, speakers));
            }
            cursor = time;
        }
        while i < events.len() && events[i].0 .0 == time {
            let (_, kind, speaker) = events[i];
            match kind {
                Kind::Open => *active.entry(speaker).or_insert(0) += 1,
                Kind::Close => {
                    if let Some(count) = active.get_mut(speaker) {
                        *count -= 1;
                        if *count == 0 {
                            active.remove(speaker);
                        }
                    }
                }
            }
            i += 1;
        }
    }

    Timeline::from_sorted(regions)
}

/// `f64` does not implement `Ord`; turn timestamps are always finite
/// (enforced by `Turn::new`), so a total order is safe here.
mod ordered_time {
    #[derive(Clone, Copy, PartialEq)]
    pub struct Time(pub f64);

    impl Eq for Time {}

    impl PartialOrd for Time {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Time {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.total_cmp(&other.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Turn;

    fn turns(pairs: &[(&str, f64, f64)]) -> TurnList {
        TurnList::new(
            pairs
                .iter()
                .map(|(s, a, b)| Turn::new(*s, *a, *b).unwrap())
                .collect(),
        )
    }

    fn speakers_of(region: &Region) -> Vec<&str> {
        region.speakers.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn single_turn_produces_one_region() {
        let timeline = build_timeline(&turns(&[("A", 0.0, 10.0)]));
        assert_eq!(timeline.regions().len(), 1);
        assert_eq!(speakers_of(&timeline.regions()[0]), vec!["A"]);
    }

    #[test]
    fn touching_turns_produce_no_overlap() {
        let timeline = build_timeline(&turns(&[("A", 0.0, 1.0), ("B", 1.0, 2.0)]));
        assert_eq!(timeline.regions().len(), 2);
        assert_eq!(speakers_of(&timeline.regions()[0]), vec!["A"]);
        assert_eq!(speakers_of(&timeline.regions()[1]), vec!["B"]);
    }

    #[test]
    fn overlapping_turns_produce_overlap_region() {
        let timeline = build_timeline(&turns(&[("A", 0.0, 10.0), ("B", 5.0, 10.0)]));
        assert_eq!(timeline.regions().len(), 2);
        assert_eq!(speakers_of(&timeline.regions()[0]), vec!["A"]);
        assert_eq!(speakers_of(&timeline.regions()[1]), vec!["A", "B"]);
        assert_eq!(timeline.regions()[1].start, 5.0);
        assert_eq!(timeline.regions()[1].end, 10.0);
    }

    #[test]
    fn same_speaker_overlapping_itself_stays_active() {
        // Two turns for "A" that overlap: the cover count must reach 2 and
        // drop to 1 (not 0) when the first turn closes.
        let timeline = build_timeline(&turns(&[("A", 0.0, 5.0), ("A", 2.0, 8.0)]));
        assert_eq!(timeline.regions().len(), 1);
        assert_eq!(speakers_of(&timeline.regions()[0]), vec!["A"]);
        assert_eq!(timeline.regions()[0].start, 0.0);
        assert_eq!(timeline.regions()[0].end, 8.0);
    }

    #[test]
    fn empty_turnlist_produces_empty_timeline() {
        let timeline = build_timeline(&TurnList::empty());
        assert!(timeline.is_empty());
    }

    #[test]
    fn gaps_between_turns_are_silence_and_omitted() {
        let timeline = build_timeline(&turns(&[("A", 0.0, 1.0), ("A", 3.0, 4.0)]));
        // The gap [1,3) has no active speakers, so only two regions exist
        // (silence is implicit, not materialized as an empty-set region).
        assert_eq!(timeline.regions().len(), 2);
    }
}
