//! web-features 数据集解析
//! 接受 `{"features": {id: record}}` 或裸 `{id: record}` 两种形态

use serde_json::{Map, Value};

use crate::core::{FeatureIndex, FeatureRecord};
use crate::error::{CoreError, CoreResult};

/// web-features 知识库解析器
#[derive(Debug, Clone, Default)]
pub struct WebFeaturesParser;

impl WebFeaturesParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_from_str(&self, content: &str) -> CoreResult<FeatureIndex> {
        let value: Value = serde_json::from_str(content)?;
        self.parse_from_value(value)
    }

    pub fn parse_from_bytes(&self, bytes: &[u8]) -> CoreResult<FeatureIndex> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.parse_from_value(value)
    }

    pub fn parse_from_value(&self, value: Value) -> CoreResult<FeatureIndex> {
        let features = Self::feature_map(value)?;
        let mut records = Vec::with_capacity(features.len());
        for (id, raw) in features {
            let record: FeatureRecord = serde_json::from_value(raw).map_err(|e| {
                CoreError::KnowledgeBaseShapeError(format!("feature \"{}\": {}", id, e))
            })?;
            records.push((id, record));
        }
        // ID 按字典序排列，不依赖 serde_json 的 preserve_order 特性
        records.sort_by(|a, b| a.0.cmp(&b.0));
        FeatureIndex::from_records(records)
    }

    fn feature_map(value: Value) -> CoreResult<Map<String, Value>> {
        let Value::Object(mut root) = value else {
            return Err(CoreError::KnowledgeBaseShapeError(
                "top-level value is not an object".to_string(),
            ));
        };
        match root.remove("features") {
            Some(Value::Object(features)) => Ok(features),
            Some(_) => Err(CoreError::KnowledgeBaseShapeError(
                "\"features\" is not an object".to_string(),
            )),
            None => Ok(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Baseline, FeatureKind};

    const SAMPLE: &str = r#"{
        "features": {
            "has": {
                "name": ":has()",
                "status": {
                    "baseline": "low",
                    "support": {"chrome": "105", "safari": "15.4", "safari_ios": "15.4"}
                },
                "compat_features": ["css.selectors.has"]
            },
            "dialog": {
                "name": "<dialog>",
                "status": {"baseline": "high", "support": {"chrome": "37"}},
                "compat_features": ["html.elements.dialog"]
            },
            "old-name": {"kind": "moved", "redirect_target": "dialog"}
        },
        "groups": {}
    }"#;

    #[test]
    fn test_parse_wrapped() {
        let index = WebFeaturesParser::new().parse_from_str(SAMPLE).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.ids(), &["dialog".to_string(), "has".to_string(), "old-name".to_string()]);

        let has = index.get("has").unwrap();
        assert_eq!(has.baseline(), Some(Baseline::Low));
        assert_eq!(has.support().unwrap().get("safari_ios").map(String::as_str), Some("15.4"));

        let moved = index.get("old-name").unwrap();
        assert_eq!(moved.kind, FeatureKind::Moved);
        assert!(moved.status.is_none());
    }

    #[test]
    fn test_parse_bare_map() {
        let index = WebFeaturesParser::new()
            .parse_from_bytes(br#"{"gap": {"name": "gap", "status": {"baseline": false}}}"#)
            .unwrap();
        assert!(index.contains("gap"));
        assert_eq!(index.get("gap").unwrap().baseline(), None);
    }

    #[test]
    fn test_shape_errors() {
        let parser = WebFeaturesParser::new();
        assert!(matches!(
            parser.parse_from_str("[]"),
            Err(CoreError::KnowledgeBaseShapeError(_))
        ));
        assert!(matches!(
            parser.parse_from_str(r#"{"features": 1}"#),
            Err(CoreError::KnowledgeBaseShapeError(_))
        ));
        assert!(matches!(
            parser.parse_from_str("{not json"),
            Err(CoreError::KnowledgeBaseParseError(_))
        ));
    }
}
