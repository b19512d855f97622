//! Markdown 报告渲染

use baseline_guard_engine::core::label_for;
use baseline_guard_engine::summarize_unsupported;
use std::fmt::Write;

use super::report::Report;
use crate::targets::group_targets;

/// 转义表格中的 `|`
pub fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

fn targets_section(report: &Report) -> String {
    let grouped = group_targets(&report.targets);
    if grouped.is_empty() {
        return "_No targets_".to_string();
    }
    let mut out = String::from("| Browser | Versions |\n|---------|----------|");
    for (browser, versions) in &grouped {
        let _ = write!(
            out,
            "\n| {} | `{}` |",
            label_for(browser),
            escape_pipes(&versions.join(", "))
        );
    }
    out
}

fn summary_section(report: &Report) -> String {
    let counts = report.sorted_rule_counts();
    if counts.is_empty() {
        return "_No violations_".to_string();
    }
    counts
        .iter()
        .map(|(rule, count)| format!("- `{}`: **{}**", rule, count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn issues_section(report: &Report) -> String {
    if report.problems.is_empty() {
        return "_No issues found_".to_string();
    }
    let mut out = String::from(
        "| File | Line:Col | Rule \u{2192} Feature | Message | Unsupported (browser target < min) |\n\
         |------|---------:|----------------|---------|------------------------------------|",
    );
    for p in &report.problems {
        let unsupported = if p.unsupported.is_empty() {
            p.reason.clone()
        } else {
            summarize_unsupported(&p.unsupported).join("<br>")
        };
        let _ = write!(
            out,
            "\n| `{}` | {}:{} | `{}` \u{2192} `{}` | {} | {} |",
            escape_pipes(&p.file),
            p.line,
            p.col,
            p.rule_id,
            p.feature_id,
            escape_pipes(&p.msg),
            escape_pipes(&unsupported)
        );
    }
    out
}

fn files_section(report: &Report) -> String {
    if report.files_checked.is_empty() {
        return "_None_".to_string();
    }
    report
        .files_checked
        .iter()
        .map(|f| format!("- `{}`", f))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::from("# Baseline Guard Report\n\n");
    let _ = write!(
        out,
        "**Generated:** {}\n\n\
         **Source:** {}  \n\
         **Mode:** {}  \n\
         **Files checked:** {}  \n\
         **Duration:** {} ms\n\n",
        report.generated_at, report.target_source, report.mode, report.file_count, report.duration_ms
    );
    let _ = write!(out, "## Browser Targets\n\n{}\n\n", targets_section(report));
    let _ = write!(out, "## Summary (Violations by Rule)\n\n{}\n\n", summary_section(report));
    let _ = write!(out, "## Issues\n\n{}\n\n", issues_section(report));
    let _ = write!(out, "## Files Checked\n\n{}\n", files_section(report));
    out
}
