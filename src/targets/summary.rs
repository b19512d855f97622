//! 目标列表的展示汇总

use baseline_guard_engine::compat::version::{compare_versions, format_number, parse_number_span};
use baseline_guard_engine::core::label_for;
use baseline_guard_engine::{BrowserKey, ResolvedTarget};
use serde::Serialize;
use std::collections::BTreeMap;

/// 单个浏览器的汇总行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummaryRow {
    pub browser: String,
    /// `"16–16.3"`
    pub range: String,
    pub count: usize,
}

/// 按浏览器汇总为 {标签, 最小–最大, 数量}
/// 常用浏览器按固定顺序在前，其余按名称排序
pub fn summarize_targets<S: AsRef<str>>(resolved: &[S]) -> Vec<TargetSummaryRow> {
    let mut groups: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();
    for entry in resolved {
        let Some(target) = ResolvedTarget::parse(entry.as_ref()) else {
            continue;
        };
        let Some((lo, hi)) = parse_number_span(&target.version) else {
            continue;
        };
        let group = groups.entry(target.browser).or_insert((lo, hi, 0));
        group.0 = group.0.min(lo);
        group.1 = group.1.max(hi);
        group.2 += 1;
    }

    let preferred: Vec<String> = BrowserKey::ALL
        .iter()
        .map(|key| key.target_name().to_string())
        .filter(|name| groups.contains_key(name))
        .collect();
    let others: Vec<String> = groups
        .keys()
        .filter(|name| BrowserKey::from_target_name(name).is_none())
        .cloned()
        .collect();

    preferred
        .into_iter()
        .chain(others)
        .filter_map(|name| {
            let (lo, hi, count) = groups.get(&name)?;
            Some(TargetSummaryRow {
                browser: label_for(&name).to_string(),
                range: format!("{}\u{2013}{}", format_number(*lo), format_number(*hi)),
                count: *count,
            })
        })
        .collect()
}

/// 浏览器 → 去重且升序的版本列表
pub fn group_targets<S: AsRef<str>>(resolved: &[S]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in resolved {
        if let Some(target) = ResolvedTarget::parse(entry.as_ref()) {
            grouped.entry(target.browser).or_default().push(target.version);
        }
    }
    for versions in grouped.values_mut() {
        versions.sort_by(|a, b| compare_versions(a, b).then_with(|| a.cmp(b)));
        versions.dedup();
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_order_and_ranges() {
        let rows = summarize_targets(&[
            "samsung 23",
            "safari 16.3",
            "chrome 120",
            "safari 16.0",
            "chrome 119",
            "ios_saf 16.0-16.3",
        ]);
        let browsers: Vec<&str> = rows.iter().map(|r| r.browser.as_str()).collect();
        assert_eq!(browsers, vec!["Chrome", "Safari", "iOS Safari", "samsung"]);
        assert_eq!(rows[0].range, "119\u{2013}120");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[2].range, "16\u{2013}16.3");
    }

    #[test]
    fn test_group_targets_dedup_sorted() {
        let grouped = group_targets(&["chrome 9", "chrome 10", "chrome 9", "edge 114"]);
        assert_eq!(grouped["chrome"], vec!["9".to_string(), "10".to_string()]);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["chrome", "edge"]);
    }
}
