use crate::models::{RegionFilter, Timeline};

/// C5: the sub-domain of a reference scoring timeline whose regions match
/// `filter`. Evaluated on the reference timeline only (§4.4).
pub fn filtered_domain(ref_timeline: &Timeline, filter: RegionFilter) -> Vec<(f64, f64)> {
    ref_timeline
        .regions()
        .iter()
        .filter(|r| filter.matches(r.speakers.len()))
        .map(|r| (r.start, r.end))
        .collect()
}
