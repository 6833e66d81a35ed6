use std::collections::BTreeMap;

use crate::core::join::join;
use crate::models::{Metrics, Timeline};

/// Relabel a hypothesis timeline through `hyp_map`, so that matched
/// speakers share the reference's label namespace and unmatched ones get a
/// "ghost" label that can never collide with a real speaker label.
///
/// `\0` cannot appear in a label parsed from whitespace-separated RTTM/UEM
/// fields, so prefixing with it is enough to guarantee no collision.
fn relabel_hyp_timeline(hyp_timeline: &Timeline, hyp_map: &BTreeMap<String, String>) -> Timeline {
    let regions = hyp_timeline
        .regions()
        .iter()
        .map(|region| {
            let speakers = region
                .speakers
                .iter()
                .map(|h| {
                    hyp_map
                        .get(h)
                        .cloned()
                        .unwrap_or_else(|| format!("\0ghost:{h}"))
                })
                .collect();
            crate::models::Region::new(region.start, region.end, speakers)
        })
        .collect();
    Timeline::from_sorted(regions)
}

/// C8: walk the common refinement of the reference and (relabeled)
/// hypothesis scoring timelines, accumulating miss/false-alarm/confusion
/// per the NIST md-eval convention (§4.6).
pub fn score(
    ref_timeline: &Timeline,
    hyp_timeline: &Timeline,
    ref_map: BTreeMap<String, String>,
    hyp_map: BTreeMap<String, String>,
) -> Metrics {
    let relabeled_hyp = relabel_hyp_timeline(hyp_timeline, &hyp_map);

    let mut duration_total = 0.0;
    let mut miss_total = 0.0;
    let mut falarm_total = 0.0;
    let mut conf_total = 0.0;

    for region in join(ref_timeline, &relabeled_hyp) {
        let d = region.duration();
        let r = region.ref_speakers.len() as f64;
        let h = region.hyp_speakers.len() as f64;
        let inter = region
            .ref_speakers
            .intersection(&region.hyp_speakers)
            .count() as f64;

        duration_total += d * r;
        miss_total += d * (r - h).max(0.0);
        falarm_total += d * (h - r).max(0.0);
        conf_total += d * (r.min(h) - inter);
    }

    Metrics::from_totals(
        duration_total,
        miss_total,
        falarm_total,
        conf_total,
        ref_map,
        hyp_map,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn region(start: f64, end: f64, speakers: &[&str]) -> Region {
        Region::new(start, end, speakers.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn perfect_match_scores_zero() {
        let timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &["A"])]);
        let ref_map = BTreeMap::from([("A".to_string(), "A".to_string())]);
        let hyp_map = BTreeMap::from([("A".to_string(), "A".to_string())]);
        let metrics = score(&timeline, &timeline, ref_map, hyp_map);
        assert_eq!(metrics.duration, 10.0);
        assert_eq!(metrics.der, 0.0);
    }

    #[test]
    fn total_miss_scores_one() {
        let ref_timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &["A"])]);
        let hyp_timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &[])]);
        let metrics = score(&ref_timeline, &hyp_timeline, BTreeMap::new(), BTreeMap::new());
        assert_eq!(metrics.duration, 10.0);
        assert_eq!(metrics.miss, 1.0);
        assert_eq!(metrics.falarm, 0.0);
        assert_eq!(metrics.der, 1.0);
    }

    #[test]
    fn half_confusion() {
        let ref_timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &["A"])]);
        let hyp_timeline = Timeline::from_sorted(vec![
            region(0.0, 5.0, &["A"]),
            region(5.0, 10.0, &["B"]),
        ]);
        let ref_map = BTreeMap::from([("A".to_string(), "A".to_string())]);
        let hyp_map = BTreeMap::from([("A".to_string(), "A".to_string())]);
        let metrics = score(&ref_timeline, &hyp_timeline, ref_map, hyp_map);
        assert_eq!(metrics.miss, 0.0);
        assert_eq!(metrics.falarm, 0.0);
        assert!((metrics.conf - 0.5).abs() < 1e-9);
        assert!((metrics.der - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unmatched_hyp_speaker_becomes_ghost_and_causes_falarm() {
        let ref_timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &[])]);
        let hyp_timeline = Timeline::from_sorted(vec![region(0.0, 10.0, &["X"])]);
        let metrics = score(&ref_timeline, &hyp_timeline, BTreeMap::new(), BTreeMap::new());
        // duration is zero reference speaker-seconds, so by convention all
        // ratios are zero even though there is a false alarm in absolute terms.
        assert_eq!(metrics.duration, 0.0);
        assert_eq!(metrics.der, 0.0);
    }
}
