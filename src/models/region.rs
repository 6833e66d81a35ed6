use std::collections::BTreeSet;

/// A span of time during which the set of active speakers is constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub speakers: BTreeSet<String>,
}

impl Region {
    pub fn new(start: f64, end: f64, speakers: BTreeSet<String>) -> Self {
        Self {
            start,
            end,
            speakers,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_silence(&self) -> bool {
        self.speakers.is_empty()
    }
}

/// A sorted, pairwise-disjoint sequence of [`Region`]s, with no two adjacent
/// regions sharing the same speaker set.
///
/// All speaker sets within one `Timeline` are computed from a single
/// [`crate::models::TurnList`] (reference *or* hypothesis) — they never mix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    regions: Vec<Region>,
}

impl Timeline {
    /// Build a timeline from regions that are already sorted and disjoint,
    /// merging adjacent regions that carry the same speaker set.
    pub fn from_sorted(regions: Vec<Region>) -> Self {
        let mut merged: Vec<Region> = Vec::with_capacity(regions.len());
        for region in regions {
            if region.start >= region.end {
                continue;
            }
            match merged.last_mut() {
                Some(prev)
                    if (prev.end - region.start).abs() < f64::EPSILON
                        && prev.speakers == region.speakers =>
                {
                    prev.end = region.end;
                }
                _ => merged.push(region),
            }
        }
        Self { regions: merged }
    }

    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.regions.iter().map(Region::duration).sum()
    }

    /// Sum of `duration * active speaker count` across all regions — zero
    /// exactly when every region in this timeline is silence.
    pub fn speaker_seconds(&self) -> f64 {
        self.regions
            .iter()
            .map(|r| r.duration() * r.speakers.len() as f64)
            .sum()
    }
}
