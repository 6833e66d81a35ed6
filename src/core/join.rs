use std::collections::BTreeSet;

use crate::models::{Region, Timeline};

/// One sub-region of the common refinement of two timelines: the coarsest
/// partition of time finer than both.
pub struct JointRegion {
    pub start: f64,
    pub end: f64,
    pub ref_speakers: BTreeSet<String>,
    pub hyp_speakers: BTreeSet<String>,
}

impl JointRegion {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

fn find_region<'a>(regions: &'a [Region], t: f64) -> Option<&'a Region> {
    let idx = regions.partition_point(|r| r.end <= t);
    regions.get(idx).filter(|r| r.start <= t)
}

/// Build the common refinement of `ref_timeline` and `hyp_timeline` by a
/// joint sweep of both timelines' boundary points.
///
/// Points outside a given timeline's coverage are treated as silence for
/// that side, so the two timelines need not share an identical domain —
/// though in the `compute_der` pipeline they always do by construction.
pub fn join(ref_timeline: &Timeline, hyp_timeline: &Timeline) -> Vec<JointRegion> {
    let mut points: Vec<f64> = Vec::with_capacity(
        ref_timeline.regions().len() * 2 + hyp_timeline.regions().len() * 2,
    );
    for r in ref_timeline.regions() {
        points.push(r.start);
        points.push(r.end);
    }
    for r in hyp_timeline.regions() {
        points.push(r.start);
        points.push(r.end);
    }
    points.sort_by(|a, b| a.total_cmp(b));
    points.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);

    let mut out = Vec::new();
    for window in points.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start >= end {
            continue;
        }
        let ref_speakers = find_region(ref_timeline.regions(), start)
            .map(|r| r.speakers.clone())
            .unwrap_or_default();
        let hyp_speakers = find_region(hyp_timeline.regions(), start)
            .map(|r| r.speakers.clone())
            .unwrap_or_default();
        out.push(JointRegion {
            start,
            end,
            ref_speakers,
            hyp_speakers,
        });
    }
    out
}
