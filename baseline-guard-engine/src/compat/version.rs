//! 版本比较器
//! 版本标记为点分数字（`"16"`、`"16.3"`）或区间（`"16.0-16.3"`）
//! 区间只取上界参与比较：目标区间取上界、最低要求区间同样取上界，两侧都按保守解释
//! 非数字字符在解析前剔除，无任何数字的标记退化为全 0，作为目标版本时总是低于最低要求

use std::borrow::Cow;
use std::cmp::Ordering;

/// 区间分隔符归一：en dash（`–`）替换为 ASCII `-`
pub fn normalize_dash(token: &str) -> Cow<'_, str> {
    if token.contains('\u{2013}') {
        Cow::Owned(token.replace('\u{2013}', "-"))
    } else {
        Cow::Borrowed(token)
    }
}

/// 解析为可比较的数字元组（区间取上界）
pub fn parse_version_tuple(input: &str) -> Vec<u64> {
    let normalized = normalize_dash(input);
    let token = if normalized.contains('-') {
        normalized.split('-').nth(1).unwrap_or("")
    } else {
        &*normalized
    };

    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    cleaned
        .split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}

/// 逐段比较两个版本标记，缺失的尾段视为 0
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    compare_tuples(&parse_version_tuple(a), &parse_version_tuple(b))
}

fn compare_tuples(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// 已解析的版本，`Ord` 与 [`compare_versions`] 一致（`16` == `16.0`）
#[derive(Debug, Clone, Eq)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn parse(token: &str) -> Self {
        Self(parse_version_tuple(token))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_tuples(&self.0, &other.0)
    }
}

/// 解析区间为 (下界, 上界) 浮点数，用于人类可读的汇总
/// `"16"` → (16, 16)，`"16-16.3"` → (16, 16.3)；下界不可解析时返回 None
pub fn parse_number_span(token: &str) -> Option<(f64, f64)> {
    let normalized = normalize_dash(token);
    let mut parts = normalized.splitn(2, '-');
    let lo = parse_leading_float(parts.next().unwrap_or(""))?;
    let hi = parts.next().and_then(parse_leading_float).unwrap_or(lo);
    Some((lo, hi))
}

// 取最长的 “数字[.数字]” 前缀
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in s.char_indices() {
        if ch.is_ascii_digit() {
            end = idx + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    if end == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// 数字格式化：整数原样输出，小数最多保留两位并去掉尾随 0
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{}", n as i64);
    }
    let fixed = format!("{:.2}", n);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ordering() {
        assert_eq!(compare_versions("16.3", "16.4"), Ordering::Less);
        assert_eq!(compare_versions("17", "16.4"), Ordering::Greater);
        assert_eq!(compare_versions("16", "16.0"), Ordering::Equal);
        assert_eq!(compare_versions("16.0.1", "16"), Ordering::Greater);
    }

    #[test]
    fn test_range_uses_upper_bound() {
        assert_eq!(compare_versions("16.0-16.3", "16.4"), Ordering::Less);
        assert_eq!(compare_versions("16.0-16.3", "16.3"), Ordering::Equal);
        assert_eq!(compare_versions("17.2", "17.1-17.4"), Ordering::Less);
        assert_eq!(compare_versions("17.5", "17.1-17.4"), Ordering::Greater);
    }

    #[test]
    fn test_en_dash_range() {
        assert_eq!(compare_versions("16.0\u{2013}16.3", "16.0-16.3"), Ordering::Equal);
    }

    #[test]
    fn test_non_numeric_stripped() {
        assert_eq!(parse_version_tuple("\u{2264}79"), vec![79]);
        assert_eq!(compare_versions("\u{2264}79", "79"), Ordering::Equal);
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert_eq!(parse_version_tuple("TP"), vec![0]);
        assert_eq!(compare_versions("TP", "1"), Ordering::Less);
        assert_eq!(compare_versions("all", "0"), Ordering::Equal);
    }

    #[test]
    fn test_transitivity_sample() {
        let mut versions: Vec<Version> = ["17", "16.0-16.3", "16.4", "16.3.1", "15", "16.3"]
            .iter()
            .map(|v| Version::parse(v))
            .collect();
        versions.sort();
        let sorted: Vec<Vec<u64>> = versions.iter().map(|v| v.components().to_vec()).collect();
        assert_eq!(
            sorted,
            vec![vec![15], vec![16, 3], vec![16, 3], vec![16, 3, 1], vec![16, 4], vec![17]]
        );
        for window in versions.windows(3) {
            assert!(window[0] <= window[1] && window[1] <= window[2] && window[0] <= window[2]);
        }
    }

    #[test]
    fn test_number_span_and_format() {
        assert_eq!(parse_number_span("16"), Some((16.0, 16.0)));
        assert_eq!(parse_number_span("16-16.3"), Some((16.0, 16.3)));
        assert_eq!(parse_number_span("TP"), None);
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(16.3), "16.3");
        assert_eq!(format_number(16.126), "16.13");
    }
}
