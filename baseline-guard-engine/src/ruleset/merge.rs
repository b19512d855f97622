use rustc_hash::FxHashMap;

use crate::core::Rule;

/// 内置规则与覆盖规则按ID合并
/// 同ID整体替换（不做字段级合并）且保持内置顺序；新ID按覆盖顺序追加
pub fn merge_rules(builtin: &[Rule], overrides: Vec<Rule>) -> Vec<Rule> {
    let mut merged: Vec<Rule> = builtin.to_vec();
    let mut positions: FxHashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, rule)| (rule.id.clone(), pos))
        .collect();

    let (mut replaced, mut appended) = (0usize, 0usize);
    for rule in overrides {
        match positions.get(&rule.id) {
            Some(&pos) => {
                merged[pos] = rule;
                replaced += 1;
            }
            None => {
                positions.insert(rule.id.clone(), merged.len());
                merged.push(rule);
                appended += 1;
            }
        }
    }

    log::debug!(
        "Merged rules: {} builtin, {} replaced, {} appended",
        builtin.len(),
        replaced,
        appended
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileKind, WireRule};

    fn rule(id: &str, pattern: &str) -> Rule {
        WireRule {
            id: id.to_string(),
            feature_id: id.to_string(),
            files: vec![FileKind::Css],
            pattern: pattern.to_string(),
            flags: None,
            message: format!("{} message", id),
            tags: vec!["css".to_string()],
            docs: None,
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn test_override_replaces_in_place() {
        let builtin = vec![rule("a", "a"), rule("b", "b"), rule("c", "c")];
        let merged = merge_rules(&builtin, vec![rule("b", "bb"), rule("d", "d")]);

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(merged[1].regex.as_str(), "bb");
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_duplicate_overrides_last_wins() {
        let merged = merge_rules(&[], vec![rule("x", "1"), rule("x", "2")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].regex.as_str(), "2");
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let builtin = vec![rule("a", "a")];
        assert_eq!(merge_rules(&builtin, Vec::new()), builtin);
    }
}
