use serde::{Deserialize, Serialize};

use super::browser::BrowserKey;

/// 已解析的目标条目：`"<browser> <version-or-range>"`，如 `"safari 16.3"`、`"ios_saf 16.0-16.3"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub browser: String,
    pub version: String,
}

impl ResolvedTarget {
    /// 按第一个空格拆分，浏览器名或版本为空时返回 None
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.trim().splitn(2, ' ');
        let browser = parts.next()?.trim();
        let version = parts.next()?.trim();
        if browser.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self {
            browser: browser.to_string(),
            version: version.to_string(),
        })
    }

    /// 映射到已知浏览器；未知浏览器在安全评估中被静默跳过
    pub fn browser_key(&self) -> Option<BrowserKey> {
        BrowserKey::from_target_name(&self.browser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        let target = ResolvedTarget::parse("ios_saf 16.0-16.3").unwrap();
        assert_eq!(target.browser, "ios_saf");
        assert_eq!(target.version, "16.0-16.3");
        assert_eq!(target.browser_key(), Some(BrowserKey::IosSaf));
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        assert!(ResolvedTarget::parse("safari").is_none());
        assert!(ResolvedTarget::parse("").is_none());
        assert!(ResolvedTarget::parse("safari   ").is_none());
    }

    #[test]
    fn test_unknown_browser_is_inert() {
        let target = ResolvedTarget::parse("op_mini all").unwrap();
        assert_eq!(target.browser_key(), None);
    }
}
