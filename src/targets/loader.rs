//! 浏览器目标加载
//! 优先级：baseline.config.json → package.json `baseline.targets` → 内置兜底
//! 查询解析在上游完成，这里只接受已展开的 `"<browser> <version>"` 条目

use baseline_guard_engine::ResolvedTarget;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::config::{ConfigCache, Mode, BASELINE_CONFIG_FILENAME};

pub const PACKAGE_JSON_SOURCE: &str = "package.json:baseline";
pub const FALLBACK_SOURCE: &str = "fallback";

/// 兜底目标：chrome/edge ≥ 114, firefox ≥ 115, safari/ios_saf ≥ 17
pub const FALLBACK_TARGETS: [&str; 5] = [
    "chrome 114",
    "edge 114",
    "firefox 115",
    "safari 17.0",
    "ios_saf 17.0",
];

/// 已加载的目标列表及其来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTargets {
    pub source: String,
    pub query: Vec<String>,
    pub resolved: Vec<String>,
    pub mode: Mode,
}

impl ResolvedTargets {
    pub fn fallback() -> Self {
        let query: Vec<String> = FALLBACK_TARGETS.iter().map(|s| s.to_string()).collect();
        Self {
            source: FALLBACK_SOURCE.to_string(),
            resolved: query.clone(),
            query,
            mode: Mode::default(),
        }
    }
}

static BROWSER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_]+$").expect("static browser-name regex"));
static VERSION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d.]+(?:-[\d.]+)?$").expect("static version regex"));

/// 是否为已展开的目标条目
/// 已知浏览器即使版本无法解析（如 `safari TP`）也保留，交给评估器按不支持处理
fn is_resolved(target: &ResolvedTarget) -> bool {
    BROWSER_NAME.is_match(&target.browser)
        && (VERSION_TOKEN.is_match(&target.version) || target.browser_key().is_some())
}

/// 过滤出形如 `"<browser> <version-or-range>"` 的条目，查询语句（`> 0.5%`、`last 2 versions`）被丢弃
pub fn resolve_entries(query: &[String]) -> Vec<String> {
    query
        .iter()
        .filter_map(|entry| {
            let accepted = ResolvedTarget::parse(entry).filter(is_resolved);
            match accepted {
                Some(target) => Some(format!("{} {}", target.browser, target.version)),
                None => {
                    log::warn!("Ignoring unresolved target entry \"{}\"", entry);
                    None
                }
            }
        })
        .collect()
}

fn from_source(source: &str, query: Vec<String>, mode: Mode) -> Option<ResolvedTargets> {
    let resolved = resolve_entries(&query);
    if resolved.is_empty() {
        log::warn!("No usable targets in {}, falling through", source);
        return None;
    }
    Some(ResolvedTargets {
        source: source.to_string(),
        query,
        resolved,
        mode,
    })
}

fn from_package_json(root: &Path) -> Option<ResolvedTargets> {
    let path = root.join("package.json");
    let raw = fs::read_to_string(&path).ok()?;
    let pkg: Value = match serde_json::from_str(&raw) {
        Ok(pkg) => pkg,
        Err(e) => {
            log::warn!("Malformed {} ignored: {}", path.display(), e);
            return None;
        }
    };

    let baseline = pkg.get("baseline")?;
    let query: Vec<String> = baseline
        .get("targets")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    let mode = baseline
        .get("mode")
        .and_then(Mode::from_value)
        .unwrap_or_default();
    from_source(PACKAGE_JSON_SOURCE, query, mode)
}

/// 加载项目的浏览器目标
pub fn load_targets(root: &Path, cache: &ConfigCache) -> ResolvedTargets {
    // 1) baseline.config.json
    if let Some(cfg) = cache.get_or_load(root) {
        if let Some(query) = cfg.targets.clone().filter(|t| !t.is_empty()) {
            if let Some(targets) =
                from_source(BASELINE_CONFIG_FILENAME, query, cfg.mode.unwrap_or_default())
            {
                return targets;
            }
        }
    }

    // 2) package.json:baseline
    if let Some(targets) = from_package_json(root) {
        return targets;
    }

    // 3) 兜底
    log::debug!("Using fallback browser targets");
    ResolvedTargets::fallback()
}
