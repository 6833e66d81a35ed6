use std::collections::BTreeMap;

use crate::core::cost_matrix::CostMatrix;

/// C7: the reference-to-hypothesis speaker map and its inverse, chosen to
/// maximize total matched overlap duration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    pub ref_map: BTreeMap<String, String>,
    pub hyp_map: BTreeMap<String, String>,
}

/// Solve the maximum-weight bipartite matching on a [`CostMatrix`] via the
/// classical O(k^3) Hungarian algorithm (`k = max(m, n)`), padding with
/// zero-weight phantom rows/columns for the side with fewer speakers.
///
/// Ties are broken deterministically by lexicographic order of
/// `(ref-label, hyp-label)`: a vanishingly small bias (far below the scale
/// of any real duration difference) nudges the solver toward the
/// lexicographically-earliest optimal assignment when several are tied.
pub fn solve_assignment(cost: &CostMatrix) -> Assignment {
    let m = cost.ref_labels.len();
    let n = cost.hyp_labels.len();
    let k = m.max(n);
    if k == 0 {
        return Assignment::default();
    }

    let ref_rank = lexicographic_ranks(&cost.ref_labels);
    let hyp_rank = lexicographic_ranks(&cost.hyp_labels);

    let max_cost = cost
        .data
        .iter()
        .flatten()
        .cloned()
        .fold(0.0_f64, f64::max);
    let epsilon = if max_cost > 0.0 { max_cost * 1e-9 } else { 1e-9 };
    let denom = (m.max(1) * n.max(1)) as f64;

    let mut padded = vec![vec![0.0_f64; k]; k];
    for (i, row) in padded.iter_mut().enumerate().take(m) {
        for (j, cell) in row.iter_mut().enumerate().take(n) {
            let rank = (ref_rank[i] * n.max(1) + hyp_rank[j]) as f64;
            let bias = epsilon * (1.0 - rank / denom);
            *cell = cost.data[i][j] + bias;
        }
    }

    // Minimize (max_entry - weight) to maximize weight under a square
    // Hungarian solver.
    let max_entry = padded.iter().flatten().cloned().fold(0.0_f64, f64::max);
    let minimize: Vec<Vec<f64>> = padded
        .iter()
        .map(|row| row.iter().map(|&w| max_entry - w).collect())
        .collect();

    let row_of_col = hungarian_min(&minimize);

    let mut ref_map = BTreeMap::new();
    let mut hyp_map = BTreeMap::new();
    for (j, &i) in row_of_col.iter().enumerate() {
        if i < m && j < n {
            ref_map.insert(cost.ref_labels[i].clone(), cost.hyp_labels[j].clone());
            hyp_map.insert(cost.hyp_labels[j].clone(), cost.ref_labels[i].clone());
        }
    }
    Assignment { ref_map, hyp_map }
}

fn lexicographic_ranks(labels: &[String]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by(|&a, &b| labels[a].cmp(&labels[b]));
    let mut rank = vec![0usize; labels.len()];
    for (r, idx) in order.into_iter().enumerate() {
        rank[idx] = r;
    }
    rank
}

/// Textbook O(n^3) Hungarian algorithm for the minimum-cost assignment on a
/// square cost matrix, via primal-dual potentials and shortest augmenting
/// paths. Returns `row_of_col[j]`: the row matched to column `j`.
fn hungarian_min(cost: &[Vec<f64>]) -> Vec<usize> {
    let n = cost.len();
    let inf = f64::INFINITY;
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = inf;
            let mut j1 = 0usize;
            for j in 1..=n {
                if !used[j] {
                    let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                    if cur < minv[j] {
                        minv[j] = cur;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_of_col = vec![0usize; n];
    for (j, slot) in row_of_col.iter_mut().enumerate() {
        *slot = p[j + 1] - 1;
    }
    row_of_col
}
