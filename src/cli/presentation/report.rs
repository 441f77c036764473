//! Walk report formatters (scan, check).

use super::shared::{format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::tree::path::display_path;
use crate::tree::report::WalkReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Human-readable walk report: optional visit listing, cycles, failures, summary.
pub fn format_report_text(report: &WalkReport, show_visited: bool, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Walk root: {}\n", display_path(&report.root)));

    if show_visited {
        out.push_str(&format!(
            "\n{}\n",
            format_section_heading(&format!("Visited ({})", report.visited.len()), color)
        ));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Type", "Depth", "Identity"]);
        for visit in &report.visited {
            table.add_row(vec![
                display_path(&visit.path),
                if visit.is_directory { "dir" } else { "file" }.to_string(),
                visit.depth.to_string(),
                visit
                    .identity
                    .as_deref()
                    .map(display_path)
                    .unwrap_or_default(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    out.push_str(&format!(
        "\n{}\n",
        format_section_heading(&format!("Cycles ({})", report.cycles.len()), color)
    ));
    if report.cycles.is_empty() {
        out.push_str("  No cycles found.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Resolves to", "Via"]);
        for cycle in &report.cycles {
            table.add_row(vec![
                display_path(&cycle.path),
                display_path(&cycle.identity),
                if cycle.via_link { "link" } else { "directory" }.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !report.failures.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format_section_heading(&format!("Failures ({})", report.failures.len()), color)
        ));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Kind", "Message"]);
        for failure in &report.failures {
            table.add_row(vec![
                display_path(&failure.path),
                failure.kind.to_string(),
                failure.message.clone(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    let stats = &report.stats;
    let cycles = format!("{} cycles", stats.cycles);
    let cycles = match (color, stats.cycles) {
        (false, _) => cycles,
        (true, 0) => cycles.green().to_string(),
        (true, _) => cycles.red().to_string(),
    };
    out.push_str(&format!(
        "\n{} directories, {} files, {} links followed, {}, {} failures",
        stats.directories, stats.files, stats.links_followed, cycles, stats.failures
    ));
    out
}

pub fn format_report_json(report: &WalkReport) -> Result<String, ApiError> {
    to_pretty_json(report)
}

/// `check` output: nothing when clean, one line per cycle otherwise.
pub fn format_check_result(report: &WalkReport) -> String {
    report
        .cycles
        .iter()
        .map(|cycle| {
            format!(
                "{} -> {}",
                display_path(&cycle.path),
                display_path(&cycle.identity)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
