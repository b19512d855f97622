//! 规则筛选：规则包 → 标签 → 白名单 → 黑名单，依次过滤
//! 每个过滤条件为空时不生效，可任意组合

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::Rule;
use crate::utils::log_format::compress_id_list;

/// 规则筛选条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSelection {
    #[serde(default)]
    pub pack: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub only: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl RuleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pack(mut self, pack: impl Into<String>) -> Self {
        self.pack = Some(pack.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = ids.into_iter().map(Into::into).collect();
        self
    }

    /// 无任何过滤条件
    pub fn is_empty(&self) -> bool {
        self.pack.as_deref().map_or(true, str::is_empty)
            && self.tags.is_empty()
            && self.only.is_empty()
            && self.exclude.is_empty()
    }
}

/// 规则包注册表：包名 → 固定规则ID集合
#[derive(Debug, Clone, Default)]
pub struct PackRegistry {
    packs: FxHashMap<String, Vec<String>>,
}

impl PackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pack<I, S>(mut self, name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, ids);
        self
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packs
            .insert(name.into(), ids.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.packs.get(name).map(Vec::as_slice)
    }

    /// 包名（字典序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn id_set(ids: &[String]) -> FxHashSet<&str> {
    ids.iter().map(String::as_str).collect()
}

/// 按筛选条件过滤规则，保持输入顺序
pub fn select_rules<'a>(
    rules: &'a [Rule],
    selection: &RuleSelection,
    packs: &PackRegistry,
) -> Vec<&'a Rule> {
    let mut selected: Vec<&Rule> = rules.iter().collect();

    if let Some(pack) = selection.pack.as_deref().filter(|p| !p.is_empty()) {
        match packs.get(pack) {
            Some(ids) => {
                let ids = id_set(ids);
                selected.retain(|rule| ids.contains(rule.id.as_str()));
            }
            None => log::warn!("Unknown rule pack \"{}\", keeping all rules", pack),
        }
    }

    if !selection.tags.is_empty() {
        selected.retain(|rule| selection.tags.iter().any(|tag| rule.has_tag(tag)));
    }

    if !selection.only.is_empty() {
        let only = id_set(&selection.only);
        selected.retain(|rule| only.contains(rule.id.as_str()));
    }

    if !selection.exclude.is_empty() {
        let exclude = id_set(&selection.exclude);
        selected.retain(|rule| !exclude.contains(rule.id.as_str()));
    }

    if !selection.is_empty() {
        let ids: Vec<&str> = selected.iter().map(|rule| rule.id.as_str()).collect();
        log::debug!(
            "Selected {}/{} rules: {}",
            selected.len(),
            rules.len(),
            compress_id_list(&ids)
        );
    }
    selected
}
