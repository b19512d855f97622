//! 浏览器目标：加载与汇总
mod loader;
mod summary;

pub use loader::{
    load_targets, resolve_entries, ResolvedTargets, FALLBACK_SOURCE, FALLBACK_TARGETS,
    PACKAGE_JSON_SOURCE,
};
pub use summary::{group_targets, summarize_targets, TargetSummaryRow};
