use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::DerError;

/// Which reference regions are eligible for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Single,
    Overlap,
    Nonoverlap,
}

impl RegionFilter {
    /// Whether a reference region with this many active speakers matches
    /// the filter.
    pub fn matches(&self, speaker_count: usize) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Single => speaker_count == 1,
            RegionFilter::Overlap => speaker_count >= 2,
            RegionFilter::Nonoverlap => speaker_count <= 1,
        }
    }
}

impl FromStr for RegionFilter {
    type Err = DerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(RegionFilter::All),
            "single" => Ok(RegionFilter::Single),
            "overlap" => Ok(RegionFilter::Overlap),
            "nonoverlap" => Ok(RegionFilter::Nonoverlap),
            other => Err(DerError::InvalidArgument(format!(
                "unknown region filter {other:?}, expected one of: all, single, overlap, nonoverlap"
            ))),
        }
    }
}

/// The result of scoring one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Total scored reference speaker-seconds (after UEM, collar, region filter).
    pub duration: f64,
    pub miss: f64,
    pub falarm: f64,
    pub conf: f64,
    pub der: f64,
    /// Reference speaker label -> matched hypothesis speaker label.
    pub ref_map: BTreeMap<String, String>,
    /// Hypothesis speaker label -> matched reference speaker label.
    pub hyp_map: BTreeMap<String, String>,
}

impl Metrics {
    /// The all-zero metrics returned when there is nothing to score.
    pub fn zero() -> Self {
        Self {
            duration: 0.0,
            miss: 0.0,
            falarm: 0.0,
            conf: 0.0,
            der: 0.0,
            ref_map: BTreeMap::new(),
            hyp_map: BTreeMap::new(),
        }
    }

    /// Build ratios from accumulated speaker-second totals, per §4.6: all
    /// ratios are defined as 0 when `duration` is 0.
    pub fn from_totals(
        duration: f64,
        miss_total: f64,
        falarm_total: f64,
        conf_total: f64,
        ref_map: BTreeMap<String, String>,
        hyp_map: BTreeMap<String, String>,
    ) -> Self {
        if duration <= 0.0 {
            return Self {
                ref_map,
                hyp_map,
                ..Self::zero()
            };
        }
        let miss = miss_total / duration;
        let falarm = falarm_total / duration;
        let conf = conf_total / duration;
        Self {
            duration,
            miss,
            falarm,
            conf,
            der: miss + falarm + conf,
            ref_map,
            hyp_map,
        }
    }
}
