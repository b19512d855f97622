//! 线上规则 → 已编译规则
//! 标志位沿用 JS 写法存储，编译时映射到 RegexBuilder 选项

use regex::{Regex, RegexBuilder};

use crate::core::{Rule, WireRule};
use crate::error::{CoreError, CoreResult};
use crate::utils::log_format::preview_compact;

const KNOWN_FLAGS: &str = "gimsuydv";

/// 标志位归一化：仅保留 `gimsuydv`，保序去重，并确保含 `g`
pub fn normalize_flags(flags: Option<&str>) -> String {
    let mut normalized = String::with_capacity(KNOWN_FLAGS.len());
    for ch in flags.unwrap_or_default().chars() {
        if KNOWN_FLAGS.contains(ch) && !normalized.contains(ch) {
            normalized.push(ch);
        }
    }
    if !normalized.contains('g') {
        normalized.insert(0, 'g');
    }
    normalized
}

/// 按归一化后的标志位编译模式
/// `g`/`y`/`d`/`v` 无对应选项：匹配始终是全局的
pub fn compile_pattern(pattern: &str, flags: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .unicode(true)
        .build()
}

impl WireRule {
    /// 校验并编译为 [`Rule`]
    pub fn compile(&self) -> CoreResult<Rule> {
        let rule_id = self.id.trim();
        if rule_id.is_empty() {
            return Err(CoreError::InvalidRule {
                rule_id: self.id.clone(),
                reason: "missing id".to_string(),
            });
        }
        if self.pattern.is_empty() {
            return Err(CoreError::InvalidRule {
                rule_id: rule_id.to_string(),
                reason: "missing pattern".to_string(),
            });
        }

        let flags = normalize_flags(self.flags.as_deref());
        let regex =
            compile_pattern(&self.pattern, &flags).map_err(|source| CoreError::RuleCompileError {
                rule_id: rule_id.to_string(),
                source,
            })?;

        let feature_id = match self.feature_id.trim() {
            "" => rule_id.to_string(),
            fid => fid.to_string(),
        };

        Ok(Rule {
            id: rule_id.to_string(),
            feature_id,
            files: self.files.clone(),
            regex,
            flags,
            message: self.message.clone(),
            tags: self.tags.clone(),
            docs: self.docs.clone(),
        })
    }
}

/// 批量编译；失败条目记录警告后丢弃，不中断整体流程
pub fn compile_wire_rules(wires: &[WireRule]) -> Vec<Rule> {
    let mut compiled = Vec::with_capacity(wires.len());
    for wire in wires {
        match wire.compile() {
            Ok(rule) => compiled.push(rule),
            Err(e) => log::warn!(
                "Dropping rule: {} (pattern: {})",
                e,
                preview_compact(&wire.pattern, 80)
            ),
        }
    }
    if compiled.len() != wires.len() {
        log::debug!(
            "Compiled {}/{} rules, {} dropped",
            compiled.len(),
            wires.len(),
            wires.len() - compiled.len()
        );
    }
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileKind;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn wire(id: &str, pattern: &str, flags: Option<&str>) -> WireRule {
        WireRule {
            id: id.to_string(),
            feature_id: String::new(),
            files: vec![FileKind::Css],
            pattern: pattern.to_string(),
            flags: flags.map(str::to_string),
            message: "m".to_string(),
            tags: vec!["css".to_string()],
            docs: None,
        }
    }

    #[test]
    fn test_normalize_flags() {
        assert_eq!(normalize_flags(None), "g");
        assert_eq!(normalize_flags(Some("i")), "gi");
        assert_eq!(normalize_flags(Some("mgigx")), "mgi");
        assert_eq!(normalize_flags(Some("gu")), "gu");
    }

    #[test]
    fn test_compile_applies_flags() {
        let rule = wire("x", "HAS", Some("i")).compile().unwrap();
        assert!(rule.regex.is_match(":has("));
        assert_eq!(rule.flags, "gi");
        // 缺省 featureId 回退到规则ID
        assert_eq!(rule.feature_id, "x");

        let multi = wire("m", "^b$", Some("m")).compile().unwrap();
        assert!(multi.regex.is_match("a\nb\nc"));
        let single = wire("s", "^b$", None).compile().unwrap();
        assert!(!single.regex.is_match("a\nb\nc"));
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            wire("bad", "(", None).compile(),
            Err(CoreError::RuleCompileError { rule_id, .. }) if rule_id == "bad"
        ));
        assert!(matches!(
            wire("  ", "a", None).compile(),
            Err(CoreError::InvalidRule { .. })
        ));
        assert!(matches!(
            wire("empty", "", None).compile(),
            Err(CoreError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_batch_drops_invalid() {
        init_logger();
        let rules = compile_wire_rules(&[wire("ok", "a", None), wire("bad", "[", None)]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "ok");
    }

    #[test]
    fn test_to_wire_keeps_pattern() {
        let rule = wire("x", r":has\(", Some("g")).compile().unwrap();
        let back = rule.to_wire();
        assert_eq!(back.pattern, r":has\(");
        assert_eq!(back.flags.as_deref(), Some("g"));
        assert_eq!(back.feature_id, "x");
    }
}
