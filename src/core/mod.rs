pub mod assignment;
pub mod collar;
pub mod cost_matrix;
pub mod domain;
pub mod join;
pub mod region_filter;
pub mod scorer;
pub mod timeline;
pub mod uem;

use tracing::warn;

use crate::error::{DerError, Result};
use crate::models::{Metrics, RegionFilter, TurnList};

/// Compute the Diarization Error Rate between a reference and hypothesis
/// segmentation for a single recording.
///
/// Pure and synchronous: no I/O, no shared state, deterministic in its
/// inputs. See SPEC_FULL.md §4 for the pipeline this function runs
/// (C2 → C3 → C4 → C5 → C6 → C7 → C8).
pub fn compute_der(
    ref_turns: TurnList,
    hyp_turns: TurnList,
    uem: Option<TurnList>,
    regions: RegionFilter,
    collar: f64,
) -> Result<Metrics> {
    if collar < 0.0 || !collar.is_finite() {
        return Err(DerError::InvalidArgument(format!(
            "collar must be >= 0, got {collar}"
        )));
    }

    let uem_was_explicit = uem.is_some();
    let uem_intervals = match &uem {
        Some(u) => uem::uem_intervals(u),
        None => uem::synthesize_uem(&ref_turns, &hyp_turns),
    };

    let ref_timeline = timeline::build_timeline(&ref_turns);
    let hyp_timeline = timeline::build_timeline(&hyp_turns);

    let ref_timeline = uem::apply_uem(&ref_timeline, &uem_intervals);
    let hyp_timeline = uem::apply_uem(&hyp_timeline, &uem_intervals);

    // An explicit UEM can be merely disjoint from the data (nonempty
    // intervals, but no reference speaker ever active within them) rather
    // than literally empty; both leave zero scored duration, so check the
    // retiled timeline rather than the raw interval list.
    if uem_was_explicit && ref_timeline.speaker_seconds() <= 0.0 {
        warn!("{}", DerError::EmptyScoringDomain);
        return Ok(Metrics::zero());
    }

    let forbidden = collar::collar_forbidden(&ref_turns, collar);
    let post_collar_domain = domain::subtract_intervals(&uem_intervals, &forbidden);
    let ref_timeline = domain::restrict_to_domain(&ref_timeline, &post_collar_domain);
    let hyp_timeline = domain::restrict_to_domain(&hyp_timeline, &post_collar_domain);

    let filtered_domain = region_filter::filtered_domain(&ref_timeline, regions);
    let ref_timeline = domain::restrict_to_domain(&ref_timeline, &filtered_domain);
    let hyp_timeline = domain::restrict_to_domain(&hyp_timeline, &filtered_domain);

    let matrix = cost_matrix::build_cost_matrix(&ref_turns, &hyp_turns, &ref_timeline, &hyp_timeline);
    let assignment = assignment::solve_assignment(&matrix);

    Ok(scorer::score(
        &ref_timeline,
        &hyp_timeline,
        assignment.ref_map,
        assignment.hyp_map,
    ))
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

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn scenario_perfect_match() {
        let t = turns(&[("A", 0.0, 10.0)]);
        let metrics = compute_der(t.clone(), t, None, RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.duration, 10.0);
        assert_close(metrics.der, 0.0);
    }

    #[test]
    fn scenario_total_miss() {
        let ref_turns = turns(&[("A", 0.0, 10.0)]);
        let metrics = compute_der(ref_turns, TurnList::empty(), None, RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.duration, 10.0);
        assert_close(metrics.miss, 1.0);
        assert_close(metrics.falarm, 0.0);
        assert_close(metrics.der, 1.0);
    }

    #[test]
    fn uem_disjoint_from_all_data_is_empty_scoring_domain() {
        let ref_turns = turns(&[("A", 0.0, 10.0)]);
        let hyp_turns = turns(&[("A", 0.0, 10.0)]);
        let uem = TurnList::new(vec![Turn::new("dummy", 100.0, 200.0).unwrap()]);
        let metrics = compute_der(ref_turns, hyp_turns, Some(uem), RegionFilter::All, 0.0).unwrap();
        assert_eq!(metrics, Metrics::zero());
    }

    #[test]
    fn scenario_total_false_alarm_with_empty_ref_has_zero_duration() {
        let hyp_turns = turns(&[("X", 0.0, 10.0)]);
        let uem = TurnList::new(vec![Turn::new("dummy", 0.0, 10.0).unwrap()]);
        let metrics =
            compute_der(TurnList::empty(), hyp_turns, Some(uem), RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.duration, 0.0);
        assert_close(metrics.der, 0.0);
    }

    #[test]
    fn scenario_pure_relabeling_scores_zero() {
        let ref_turns = turns(&[("A", 0.0, 5.0), ("B", 5.0, 10.0)]);
        let hyp_turns = turns(&[("X", 0.0, 5.0), ("Y", 5.0, 10.0)]);
        let metrics = compute_der(ref_turns, hyp_turns, None, RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.der, 0.0);
        assert_eq!(metrics.ref_map.get("A").map(String::as_str), Some("X"));
        assert_eq!(metrics.ref_map.get("B").map(String::as_str), Some("Y"));
    }

    #[test]
    fn scenario_half_confusion() {
        let ref_turns = turns(&[("A", 0.0, 10.0)]);
        let hyp_turns = turns(&[("A", 0.0, 5.0), ("B", 5.0, 10.0)]);
        let metrics = compute_der(ref_turns, hyp_turns, None, RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.miss, 0.0);
        assert_close(metrics.falarm, 0.0);
        assert_close(metrics.conf, 0.5);
        assert_close(metrics.der, 0.5);
    }

    #[test]
    fn scenario_collar_forgives_small_boundary_shift() {
        let ref_turns = turns(&[("A", 0.0, 10.0)]);
        let hyp_turns = turns(&[("A", 0.1, 10.0)]);
        let metrics = compute_der(ref_turns, hyp_turns, None, RegionFilter::All, 0.2).unwrap();
        assert!(metrics.der < 1e-9);
    }

    #[test]
    fn scenario_overlap_region_filter() {
        let ref_turns = turns(&[("A", 0.0, 10.0), ("B", 5.0, 10.0)]);
        let hyp_turns = turns(&[("A", 0.0, 10.0)]);
        let metrics = compute_der(ref_turns, hyp_turns, None, RegionFilter::Overlap, 0.0).unwrap();
        assert_close(metrics.duration, 10.0);
        assert_close(metrics.miss, 0.5);
        assert_close(metrics.falarm, 0.0);
        assert_close(metrics.der, 0.5);
    }

    #[test]
    fn identity_property_zero_error_on_self() {
        let t = turns(&[("A", 0.0, 3.0), ("B", 2.0, 5.0), ("C", 6.0, 9.0)]);
        let metrics = compute_der(t.clone(), t, None, RegionFilter::All, 0.0).unwrap();
        assert_close(metrics.miss, 0.0);
        assert_close(metrics.falarm, 0.0);
        assert_close(metrics.conf, 0.0);
        assert!(metrics.duration > 0.0);
    }

    #[test]
    fn relabeling_invariance_property() {
        let ref_turns = turns(&[("A", 0.0, 4.0), ("B", 4.0, 9.0), ("A", 9.0, 12.0)]);
        let hyp_turns = turns(&[("P", 0.0, 4.0), ("Q", 4.0, 9.0), ("P", 9.0, 12.0)]);
        let relabeled_hyp = turns(&[("Q2", 0.0, 4.0), ("P2", 4.0, 9.0), ("Q2", 9.0, 12.0)]);
        let m1 = compute_der(ref_turns.clone(), hyp_turns, None, RegionFilter::All, 0.0).unwrap();
        let m2 = compute_der(ref_turns, relabeled_hyp, None, RegionFilter::All, 0.0).unwrap();
        assert_close(m1.der, m2.der);
        assert_close(m1.miss, m2.miss);
        assert_close(m1.falarm, m2.falarm);
        assert_close(m1.conf, m2.conf);
    }

    #[test]
    fn negative_collar_is_invalid_argument() {
        let t = turns(&[("A", 0.0, 1.0)]);
        let err = compute_der(t.clone(), t, None, RegionFilter::All, -1.0).unwrap_err();
        assert!(matches!(err, DerError::InvalidArgument(_)));
    }

    #[test]
    fn empty_ref_and_hyp_yields_zero_metrics_not_an_error() {
        let metrics = compute_der(
            TurnList::empty(),
            TurnList::empty(),
            None,
            RegionFilter::All,
            0.0,
        )
        .unwrap();
        assert_eq!(metrics, Metrics::zero());
    }
}
