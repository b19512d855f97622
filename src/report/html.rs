//! HTML 报告渲染（单文件，内联样式）

use baseline_guard_engine::summarize_unsupported;
use std::fmt::Write;

use super::report::Report;

const STYLE: &str = "\
  body { font-family: ui-sans-serif, system-ui, -apple-system, Roboto, Arial; margin: 24px; }
  h1, h2 { margin: 0.5rem 0; }
  table { border-collapse: collapse; width: 100%; margin-top: 12px; }
  th, td { border: 1px solid #ddd; padding: 8px; vertical-align: top; }
  th { background: #f9fafb; }
  code { background: #f3f4f6; padding: 1px 4px; border-radius: 4px; }
  .meta { color: #555; margin-bottom: 12px; }
";

/// 转义 `&`、`<`、`>`
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn meta_section(report: &Report) -> String {
    let mut out = String::from("  <div class=\"meta\">\n");
    let mut row = |label: &str, value: &str| {
        let _ = writeln!(out, "    <div><strong>{}:</strong> {}</div>", label, escape_html(value));
    };
    row("Generated", &report.generated_at);
    row("Targets", &report.targets.join(", "));
    row("Source", &report.target_source);
    row("Mode", report.mode.as_str());
    row("Files checked", &report.file_count.to_string());
    row("Duration", &format!("{} ms", report.duration_ms));
    out.push_str("  </div>\n");
    out
}

fn summary_items(report: &Report) -> String {
    let counts = report.sorted_rule_counts();
    if counts.is_empty() {
        return "<li>No violations</li>".to_string();
    }
    counts
        .iter()
        .map(|(rule, count)| {
            format!("<li><code>{}</code>: <strong>{}</strong></li>", escape_html(rule), count)
        })
        .collect()
}

fn issue_rows(report: &Report) -> String {
    if report.problems.is_empty() {
        return "      <tr><td colspan=\"5\">No issues found</td></tr>\n".to_string();
    }
    let mut out = String::new();
    for p in &report.problems {
        let reason = if p.unsupported.is_empty() {
            escape_html(&p.reason)
        } else {
            summarize_unsupported(&p.unsupported)
                .iter()
                .map(|line| escape_html(line))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        let _ = writeln!(
            out,
            "      <tr><td>{}</td><td style=\"text-align:right\">{}:{}</td>\
             <td><code>{}</code> \u{2192} <code>{}</code></td><td>{}</td><td>{}</td></tr>",
            escape_html(&p.file),
            p.line,
            p.col,
            escape_html(&p.rule_id),
            escape_html(&p.feature_id),
            escape_html(&p.msg),
            reason
        );
    }
    out
}

fn file_items(report: &Report) -> String {
    report
        .files_checked
        .iter()
        .map(|f| format!("<li><code>{}</code></li>", escape_html(f)))
        .collect()
}

pub fn render_html(report: &Report) -> String {
    let mut out = String::from("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
    out.push_str("<title>Baseline Guard Report</title>\n");
    let _ = write!(out, "<style>\n{}</style>\n</head>\n<body>\n", STYLE);
    out.push_str("  <h1>Baseline Guard Report</h1>\n");
    out.push_str(&meta_section(report));
    let _ = write!(out, "\n  <h2>Summary</h2>\n  <ul>{}</ul>\n", summary_items(report));
    out.push_str(
        "\n  <h2>Issues</h2>\n  <table>\n    <thead>\n      <tr><th>File</th><th>Line:Col</th>\
         <th>Rule \u{2192} Feature</th><th>Message</th><th>Reason</th></tr>\n    </thead>\n    <tbody>\n",
    );
    out.push_str(&issue_rows(report));
    out.push_str("    </tbody>\n  </table>\n");
    let _ = write!(out, "\n  <h2>Files Checked</h2>\n  <ul>{}</ul>\n", file_items(report));
    out.push_str("</body>\n</html>\n");
    out
}
