//! 最低版本提取：把知识库记录的 support 块归一为按 [`BrowserKey`] 索引的最低版本表

use rustc_hash::FxHashMap;

use crate::core::{BrowserKey, FeatureRecord};

/// 每个浏览器的最低支持版本（版本标记原样保留，可能是区间）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimumVersions {
    entries: FxHashMap<BrowserKey, String>,
}

impl MinimumVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, browser: BrowserKey, version: impl Into<String>) {
        self.entries.insert(browser, version.into());
    }

    /// 链式构建，主要用于测试与手工构造
    pub fn with(mut self, browser: BrowserKey, version: impl Into<String>) -> Self {
        self.insert(browser, version);
        self
    }

    pub fn get(&self, browser: BrowserKey) -> Option<&str> {
        self.entries.get(&browser).map(String::as_str)
    }

    /// 按固定浏览器顺序遍历已知最低版本
    pub fn iter(&self) -> impl Iterator<Item = (BrowserKey, &str)> + '_ {
        BrowserKey::ALL
            .into_iter()
            .filter_map(move |browser| self.get(browser).map(|v| (browser, v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(BrowserKey, String)> for MinimumVersions {
    fn from_iter<I: IntoIterator<Item = (BrowserKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 从记录中提取最低版本表
/// 返回 None：记录完全没有 support 块（调用方需回退到 baseline 判定）
/// 返回 Some 但缺某浏览器：support 块存在、该浏览器无数据（按“支持情况未知”处理）
pub fn extract_minimums(record: &FeatureRecord) -> Option<MinimumVersions> {
    let support = record.support()?;

    let minimums = support
        .iter()
        .filter_map(|(agent, version)| {
            let browser = BrowserKey::from_agent_name(agent)?;
            let version = version.trim();
            (!version.is_empty()).then(|| (browser, version.to_string()))
        })
        .collect();

    Some(minimums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FeatureStatus;

    fn record_with_support(pairs: &[(&str, &str)]) -> FeatureRecord {
        FeatureRecord {
            status: Some(FeatureStatus {
                baseline: None,
                support: Some(
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_support_block_is_none() {
        assert!(extract_minimums(&FeatureRecord::default()).is_none());
        let no_support = FeatureRecord {
            status: Some(FeatureStatus::default()),
            ..Default::default()
        };
        assert!(extract_minimums(&no_support).is_none());
    }

    #[test]
    fn test_agent_names_translated() {
        let record = record_with_support(&[
            ("chrome", "105"),
            ("safari_ios", "15.4"),
            ("chrome_android", "105"),
        ]);
        let mins = extract_minimums(&record).unwrap();
        assert_eq!(mins.get(BrowserKey::Chrome), Some("105"));
        assert_eq!(mins.get(BrowserKey::IosSaf), Some("15.4"));
        assert_eq!(mins.get(BrowserKey::Firefox), None);
        assert_eq!(mins.len(), 2);
    }

    #[test]
    fn test_present_but_empty_block() {
        let mins = extract_minimums(&record_with_support(&[])).unwrap();
        assert!(mins.is_empty());
    }

    #[test]
    fn test_iter_order() {
        let mins = MinimumVersions::new()
            .with(BrowserKey::IosSaf, "16.4")
            .with(BrowserKey::Chrome, "112");
        let order: Vec<BrowserKey> = mins.iter().map(|(b, _)| b).collect();
        assert_eq!(order, vec![BrowserKey::Chrome, BrowserKey::IosSaf]);
    }
}
