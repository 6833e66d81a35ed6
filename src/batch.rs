use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::compute_der;
use crate::error::{DerError, Result};
use crate::models::{Metrics, RegionFilter, TurnList};

/// The key the duration-weighted aggregate row is stored under.
pub const OVERALL: &str = "Overall";

/// C9: score every recording in `ref_turns` against `hyp_turns`, producing
/// one [`Metrics`] per recording plus an [`OVERALL`] duration-weighted
/// aggregate (§4.8, §6).
///
/// A recording present in `ref_turns` but absent from `hyp_turns` is, under
/// `skip_missing`, logged and dropped from the batch entirely; otherwise it
/// is scored against an empty hypothesis (all reference speech becomes
/// missed speech). A recording present only in `hyp_turns` is always
/// silently ignored — this asymmetry is the original implementation's, not
/// an oversight (SPEC_FULL.md §9 open question 1).
///
/// Each recording's `compute_der` call is independent, so the per-recording
/// map runs as a `rayon` parallel iterator; only the `Overall` reduction is
/// sequential.
pub fn score_batch(
    ref_turns: BTreeMap<String, TurnList>,
    hyp_turns: BTreeMap<String, TurnList>,
    uem_turns: Option<BTreeMap<String, TurnList>>,
    regions: RegionFilter,
    collar: f64,
    skip_missing: bool,
) -> Result<BTreeMap<String, Metrics>> {
    let mut jobs = Vec::with_capacity(ref_turns.len());
    for (recording_id, ref_list) in ref_turns {
        let hyp_list = match hyp_turns.get(&recording_id) {
            Some(list) => list.clone(),
            None if skip_missing => {
                let missing = DerError::MissingRecording(recording_id.clone());
                info!("{missing}: skipping");
                continue;
            }
            None => {
                let missing = DerError::MissingRecording(recording_id.clone());
                warn!("{missing}; scoring as total miss");
                TurnList::empty()
            }
        };
        let uem_list = uem_turns
            .as_ref()
            .and_then(|map| map.get(&recording_id))
            .cloned();
        jobs.push((recording_id, ref_list, hyp_list, uem_list));
    }

    let scored: Vec<(String, Metrics)> = jobs
        .into_par_iter()
        .map(|(recording_id, ref_list, hyp_list, uem_list)| {
            let metrics = compute_der(ref_list, hyp_list, uem_list, regions, collar)?;
            Ok::<_, crate::error::DerError>((recording_id, metrics))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut out: BTreeMap<String, Metrics> = scored.into_iter().collect();

    let total_duration: f64 = out.values().map(|m| m.duration).sum();
    let weighted = |get: fn(&Metrics) -> f64| -> f64 {
        if total_duration <= 0.0 {
            0.0
        } else {
            out.values().map(|m| m.duration * get(m)).sum::<f64>() / total_duration
        }
    };
    let miss = weighted(|m| m.miss);
    let falarm = weighted(|m| m.falarm);
    let conf = weighted(|m| m.conf);
    out.insert(
        OVERALL.to_string(),
        Metrics {
            duration: total_duration,
            miss,
            falarm,
            conf,
            der: miss + falarm + conf,
            ref_map: BTreeMap::new(),
            hyp_map: BTreeMap::new(),
        },
    );

    Ok(out)
}
