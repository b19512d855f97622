use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 受支持的浏览器枚举
/// 目标侧命名（browserslist 风格，如 `ios_saf`）与知识库侧命名（如 `safari_ios`）在此统一映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKey {
    Chrome,
    Edge,
    Firefox,
    Safari,
    #[serde(rename = "ios_saf")]
    IosSaf,
}

impl BrowserKey {
    /// 固定顺序的全部浏览器，报告/汇总按此顺序输出
    pub const ALL: [BrowserKey; 5] = [
        BrowserKey::Chrome,
        BrowserKey::Edge,
        BrowserKey::Firefox,
        BrowserKey::Safari,
        BrowserKey::IosSaf,
    ];

    /// 从目标侧名称解析（`"ios_saf"` → IosSaf），未知名称返回 None
    pub fn from_target_name(name: &str) -> Option<Self> {
        match name {
            "chrome" => Some(BrowserKey::Chrome),
            "edge" => Some(BrowserKey::Edge),
            "firefox" => Some(BrowserKey::Firefox),
            "safari" => Some(BrowserKey::Safari),
            "ios_saf" => Some(BrowserKey::IosSaf),
            _ => None,
        }
    }

    /// 从知识库侧名称解析（`"safari_ios"` → IosSaf）
    /// 移动端 Chrome/Firefox 等未纳入枚举的 agent 返回 None
    pub fn from_agent_name(name: &str) -> Option<Self> {
        match name {
            "chrome" => Some(BrowserKey::Chrome),
            "edge" => Some(BrowserKey::Edge),
            "firefox" => Some(BrowserKey::Firefox),
            "safari" => Some(BrowserKey::Safari),
            "safari_ios" => Some(BrowserKey::IosSaf),
            _ => None,
        }
    }

    /// 目标侧名称
    pub fn target_name(self) -> &'static str {
        match self {
            BrowserKey::Chrome => "chrome",
            BrowserKey::Edge => "edge",
            BrowserKey::Firefox => "firefox",
            BrowserKey::Safari => "safari",
            BrowserKey::IosSaf => "ios_saf",
        }
    }

    /// 知识库侧名称
    pub fn agent_name(self) -> &'static str {
        match self {
            BrowserKey::IosSaf => "safari_ios",
            other => other.target_name(),
        }
    }

    /// 展示名称
    pub fn label(self) -> &'static str {
        match self {
            BrowserKey::Chrome => "Chrome",
            BrowserKey::Edge => "Edge",
            BrowserKey::Firefox => "Firefox",
            BrowserKey::Safari => "Safari",
            BrowserKey::IosSaf => "iOS Safari",
        }
    }
}

impl Display for BrowserKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.target_name())
    }
}

/// 任意浏览器名称的展示名（未知名称原样返回）
pub fn label_for(name: &str) -> &str {
    BrowserKey::from_target_name(name).map_or(name, |key| key.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ios_mapping_both_directions() {
        assert_eq!(BrowserKey::from_target_name("ios_saf"), Some(BrowserKey::IosSaf));
        assert_eq!(BrowserKey::from_agent_name("safari_ios"), Some(BrowserKey::IosSaf));
        assert_eq!(BrowserKey::IosSaf.agent_name(), "safari_ios");
        assert_eq!(BrowserKey::IosSaf.target_name(), "ios_saf");
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(BrowserKey::from_target_name("opera"), None);
        assert_eq!(BrowserKey::from_agent_name("chrome_android"), None);
        // 目标侧不接受知识库命名
        assert_eq!(BrowserKey::from_target_name("safari_ios"), None);
        assert_eq!(label_for("samsung"), "samsung");
        assert_eq!(label_for("ios_saf"), "iOS Safari");
    }

    #[test]
    fn test_label_for_borrowed_name() {
        let owned = String::from("kaios");
        assert_eq!(label_for(&owned), "kaios");
        let owned = String::from("firefox");
        assert_eq!(label_for(&owned), "Firefox");
    }
}
