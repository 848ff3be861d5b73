use crate::decision::entries;
use crate::models::{Action, Decision, Metric, Vocabulary};
use super::summary::Summary;

pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::from("## SSVC Summary\n\n| Action | Count |\n|---|---|\n");
    for action in Action::by_urgency() {
        out.push_str(&format!("| {} | {} |\n", action.label(), summary.count(action)));
    }
    out.push_str(&format!(
        "| Invalid rows | {} |\n| **Total** | **{}** |\n",
        summary.invalid, summary.rows
    ));
    out
}

/// The whole decision table as markdown, one line per leaf.
pub fn format_action_table() -> String {
    let mut out = format!(
        "| {} | {} | {} | {} | Action |\n|---|---|---|---|---|\n",
        Metric::Exploitation.label(),
        Metric::Automatable.label(),
        Metric::TechnicalImpact.label(),
        Metric::MissionImpact.label(),
    );
    for entry in entries() {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            entry.exploitation, entry.automatable, entry.technical_impact, entry.mission_impact, entry.action
        ));
    }
    out
}

/// The decision path, one `label: value` pair per line.
pub fn format_decision(decision: &Decision) -> String {
    let lines = [
        (Metric::Exploitation.label(), decision.exploitation.label()),
        (Metric::Automatable.label(), decision.automatable.label()),
        (Metric::TechnicalImpact.label(), decision.technical_impact.label()),
        (Metric::MissionImpact.label(), decision.mission_impact.label()),
        ("Action", decision.action.label()),
    ];
    let width = lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(k, v)| format!("{:<width$}  {}\n", k, v, width = width))
        .collect()
}
