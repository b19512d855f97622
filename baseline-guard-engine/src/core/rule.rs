use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 规则可作用的文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Js,
    Ts,
    Tsx,
    Css,
    Html,
}

impl FileKind {
    /// 脚本类文件（推断出的 JS/API 规则作用范围）
    pub const SCRIPT: [FileKind; 3] = [FileKind::Js, FileKind::Ts, FileKind::Tsx];

    /// 按扩展名识别文件类型（大小写不敏感），`jsx` 归入 js
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(FileKind::Js),
            "ts" | "mts" | "cts" => Some(FileKind::Ts),
            "tsx" => Some(FileKind::Tsx),
            "css" => Some(FileKind::Css),
            "html" | "htm" => Some(FileKind::Html),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Js => "js",
            FileKind::Ts => "ts",
            FileKind::Tsx => "tsx",
            FileKind::Css => "css",
            FileKind::Html => "html",
        }
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可序列化的规则形态（配置文件中的内联规则、生成规则的输出格式）
/// 模式以字符串保存，使用前必须编译为 [`Rule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRule {
    pub id: String,
    pub feature_id: String,
    #[serde(default)]
    pub files: Vec<FileKind>,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// 已编译的检测规则，构建后不可变
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub feature_id: String,
    pub files: Vec<FileKind>,
    pub regex: Regex,
    /// 归一化后的标志位（保留 JS 风格的 `g`/`y`/`d`/`v` 以便回写）
    pub flags: String,
    pub message: String,
    pub tags: Vec<String>,
    pub docs: Option<String>,
}

impl Rule {
    pub fn applies_to(&self, kind: FileKind) -> bool {
        self.files.contains(&kind)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// 转回可序列化形态
    pub fn to_wire(&self) -> WireRule {
        WireRule {
            id: self.id.clone(),
            feature_id: self.feature_id.clone(),
            files: self.files.clone(),
            pattern: self.regex.as_str().to_string(),
            flags: Some(self.flags.clone()),
            message: self.message.clone(),
            tags: self.tags.clone(),
            docs: self.docs.clone(),
        }
    }
}

// Regex 无 PartialEq，按模式源码比较
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.feature_id == other.feature_id
            && self.files == other.files
            && self.regex.as_str() == other.regex.as_str()
            && self.flags == other.flags
            && self.message == other.message
            && self.tags == other.tags
            && self.docs == other.docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_extension("JSX"), Some(FileKind::Js));
        assert_eq!(FileKind::from_extension("tsx"), Some(FileKind::Tsx));
        assert_eq!(FileKind::from_extension("scss"), None);
    }

    #[test]
    fn test_wire_rule_camel_case() {
        let wire: WireRule = serde_json::from_str(
            r#"{"id":"x","featureId":"has","files":["css"],"pattern":":has\\(","message":"m","tags":["css"]}"#,
        )
        .unwrap();
        assert_eq!(wire.feature_id, "has");
        assert_eq!(wire.files, vec![FileKind::Css]);
        assert!(wire.flags.is_none());

        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["featureId"], "has");
        assert!(json.get("docs").is_none());
    }
}
