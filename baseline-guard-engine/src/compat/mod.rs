//! 兼容性判定：版本比较 → 最低版本提取 → 安全评估 → 证据汇总
pub mod version;
mod minima;
mod evaluator;
mod evidence;

pub use evaluator::{
    evaluate_safety, find_unsupported, BaselinePolicy, DecisionBasis, SafetyEvaluator,
    SafetyPolicy, UnknownFeaturePolicy, UnsupportedTarget, Verdict,
};
pub use evidence::{summarize_span, summarize_unsupported, SpanSummary};
pub use minima::{extract_minimums, MinimumVersions};
pub use version::{compare_versions, Version};
