//! 规则加载：内联规则（项目配置）+ 内置规则合并

use baseline_guard_engine::{compile_wire_rules, merge_rules, Rule};
use std::path::Path;

use super::builtin::builtin_rules;
use crate::config::ConfigCache;

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 编译项目配置中的内联规则；无效条目记录警告后丢弃
    pub fn load_inline_rules(root: &Path, cache: &ConfigCache) -> Vec<Rule> {
        let Some(cfg) = cache.get_or_load(root) else {
            return Vec::new();
        };
        match cfg.rules.as_deref() {
            Some(wires) if !wires.is_empty() => {
                let rules = compile_wire_rules(wires);
                log::debug!("Loaded {} inline rules from project config", rules.len());
                rules
            }
            _ => Vec::new(),
        }
    }

    /// 内置规则 + 内联覆盖（同ID整体替换）
    pub fn load_effective_rules(root: &Path, cache: &ConfigCache) -> Vec<Rule> {
        let inline = Self::load_inline_rules(root, cache);
        merge_rules(builtin_rules(), inline)
    }
}
