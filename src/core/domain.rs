use crate::models::{Region, Timeline};

/// Sort and merge a list of (possibly overlapping, possibly unsorted)
/// intervals into a sorted, pairwise-disjoint list.
pub fn merge_intervals(mut intervals: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    intervals.retain(|(a, b)| a < b);
    intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                *last_end = last_end.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Subtract `forbidden` (sorted, disjoint) from `domain` (sorted, disjoint),
/// returning the remaining sorted, disjoint intervals.
pub fn subtract_intervals(domain: &[(f64, f64)], forbidden: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut result = Vec::new();
    let mut j = 0;
    for &(mut start, end) in domain {
        while j < forbidden.len() && forbidden[j].1 <= start {
            j += 1;
        }
        let mut k = j;
        while start < end && k < forbidden.len() && forbidden[k].0 < end {
            let (fs, fe) = forbidden[k];
            if fs > start {
                result.push((start, fs.min(end)));
            }
            start = start.max(fe);
            k += 1;
        }
        if start < end {
            result.push((start, end));
        }
    }
    result
}

/// Re-tile a timeline onto an exact target domain: every sub-interval of
/// `domain` becomes a region, carrying the speaker set of whichever source
/// region covers it (or the empty set — silence — if none does).
///
/// This is the single operation behind C3 (UEM intersection, which fills
/// silence across the whole domain for the first time) and C4/C5 (collar
/// and region-filter restriction, which only ever shrink an already-full
/// domain). Both are "retile onto a smaller/different domain", so one
/// function suffices.
pub fn restrict_to_domain(timeline: &Timeline, domain: &[(f64, f64)]) -> Timeline {
    let regions = timeline.regions();
    let mut out = Vec::new();
    for &(mut start, end) in domain {
        if start >= end {
            continue;
        }
        let mut idx = regions.partition_point(|r| r.end <= start);
        while start < end {
            if idx >= regions.len() || regions[idx].start >= end {
                // No covering region for [start, end): silence.
                out.push(Region::new(start, end, Default::default()));
                break;
            }
            let region = &regions[idx];
            if region.start > start {
                out.push(Region::new(start, region.start, Default::default()));
                start = region.start;
                continue;
            }
            let seg_end = region.end.min(end);
            out.push(Region::new(start, seg_end, region.speakers.clone()));
            start = seg_end;
            idx += 1;
        }
    }
    Timeline::from_sorted(out)
}
