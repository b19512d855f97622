//! baseline-guard 兼容性判定内核
//! 纯计算、无 I/O：知识库索引 + 目标列表 → 判定结论；兼容路径 → 检测规则

// 核心公共结构体+枚举
pub mod core;
// 版本比较 + 最低版本提取 + 安全评估
pub mod compat;
// 兼容路径 → 检测规则推断
pub mod generator;
// 规则编译 + 合并 + 筛选
pub mod ruleset;
// 知识库源解析 (web-features JSON)
pub mod source;
// 日志格式化工具
pub mod utils;
// 错误定义
pub mod error;

// 顶层导出常用类型
pub use crate::compat::{
    evaluate_safety, summarize_unsupported, BaselinePolicy, DecisionBasis, SafetyEvaluator,
    SafetyPolicy, UnknownFeaturePolicy, UnsupportedTarget, Verdict,
};
pub use crate::core::{
    BrowserKey, Baseline, FeatureIndex, FeatureRecord, FileKind, ResolvedTarget, Rule, WireRule,
};
pub use crate::error::{CoreError, CoreResult};
pub use crate::generator::RuleGenerator;
pub use crate::ruleset::{compile_wire_rules, merge_rules, select_rules, PackRegistry, RuleSelection};
pub use crate::source::WebFeaturesParser;
