use std::collections::BTreeMap;

use comfy_table::Table;

use crate::batch::OVERALL;
use crate::models::Metrics;

/// Render the DER table from §6: `Recording, Duration (s), Miss., F.Alarm.,
/// Conf., DER`, percentages at two decimals. When `per_file` is false, only
/// the `Overall` row is shown.
pub fn render_table(metrics: &BTreeMap<String, Metrics>, per_file: bool) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Recording", "Duration (s)", "Miss.", "F.Alarm.", "Conf.", "DER"]);

    let mut rows: Vec<(&str, &Metrics)> = Vec::new();
    if per_file {
        for (id, m) in metrics.iter() {
            if id.as_str() != OVERALL {
                rows.push((id.as_str(), m));
            }
        }
        rows.sort_by(|a, b| a.0.cmp(b.0));
    }
    if let Some(overall) = metrics.get(OVERALL) {
        rows.push((OVERALL, overall));
    }

    for (id, m) in rows {
        table.add_row(vec![
            id.to_string(),
            format!("{:.2}", m.duration),
            format_pct(m.miss),
            format_pct(m.falarm),
            format_pct(m.conf),
            format_pct(m.der),
        ]);
    }

    table.to_string()
}

fn format_pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Render the reference/hypothesis speaker maps for `--print-speaker-map`.
pub fn render_speaker_maps(metrics: &BTreeMap<String, Metrics>) -> String {
    let mut out = String::new();
    for (id, m) in metrics {
        if id.as_str() == OVERALL {
            continue;
        }
        out.push_str(&format!("{id}:\n"));
        out.push_str(&format!("  ref -> hyp: {:?}\n", m.ref_map));
        out.push_str(&format!("  hyp -> ref: {:?}\n", m.hyp_map));
    }
    out
}
