//! 证据汇总：把逐目标证据按浏览器分组，生成可读摘要
//! 例如 `Safari: requires ≥ 16.4 (your targets include 16–16.3, 2 versions)`

use super::evaluator::UnsupportedTarget;
use super::version::{compare_versions, format_number, parse_number_span};
use crate::core::BrowserKey;

/// 版本区间汇总结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanSummary {
    /// `"16–16.3"`；无法解析的标记（如 `TP`）原样附在后面
    pub range: String,
    pub count: usize,
}

/// 汇总一组版本标记为 “最小–最大” 区间与数量
pub fn summarize_span<S: AsRef<str>>(versions: &[S]) -> SpanSummary {
    let mut bounds: Option<(f64, f64)> = None;
    let mut raw: Vec<&str> = Vec::new();
    for version in versions {
        let Some((lo, hi)) = parse_number_span(version.as_ref()) else {
            if !raw.contains(&version.as_ref()) {
                raw.push(version.as_ref());
            }
            continue;
        };
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        });
    }

    let mut parts: Vec<String> = bounds
        .map(|(lo, hi)| format!("{}\u{2013}{}", format_number(lo), format_number(hi)))
        .into_iter()
        .collect();
    parts.extend(raw.into_iter().map(str::to_string));

    SpanSummary {
        range: parts.join(", "),
        count: versions.len(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// 按浏览器分组输出可读摘要（首次出现顺序）
/// 同一浏览器存在多个最低版本时取最高者
pub fn summarize_unsupported(items: &[UnsupportedTarget]) -> Vec<String> {
    let mut groups: Vec<(BrowserKey, Vec<&str>, Vec<&str>)> = Vec::new();
    for item in items {
        let position = match groups.iter().position(|(browser, _, _)| *browser == item.browser) {
            Some(position) => position,
            None => {
                groups.push((item.browser, Vec::new(), Vec::new()));
                groups.len() - 1
            }
        };
        let (_, targets, mins) = &mut groups[position];
        targets.push(item.target.as_str());
        if let Some(min) = &item.min {
            mins.push(min.as_str());
        }
    }

    groups
        .into_iter()
        .map(|(browser, targets, mins)| {
            let span = summarize_span(&targets);
            let required = mins.into_iter().max_by(|a, b| compare_versions(a, b));
            match required {
                Some(min) => format!(
                    "{}: requires \u{2265} {} (your targets include {}, {} version{})",
                    browser.label(),
                    min,
                    span.range,
                    span.count,
                    plural(span.count)
                ),
                None => format!(
                    "{}: unsupported in your targets ({}, {} version{}; minimum unknown)",
                    browser.label(),
                    span.range,
                    span.count,
                    plural(span.count)
                ),
            }
        })
        .collect()
}
