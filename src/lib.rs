//! baseline-guard - 基于 web-features 知识库的浏览器兼容性检查工具

pub mod config;
pub mod error;
pub mod guard;
pub mod report;
pub mod rule;
pub mod scanner;
pub mod targets;

// 导出全局错误类型
pub use self::error::{GuardError, GuardResult};

// 导出配置模块核心结构体与构建器
pub use crate::config::{BaselineConfig, ConfigCache, GuardOptions, GuardOptionsBuilder, Mode};

// 导出主入口
pub use crate::guard::BaselineGuard;

// 导出规则、扫描、报告核心接口
pub use crate::report::{Report, ReportFormat};
pub use crate::rule::{builtin_packs, builtin_rules, RuleLoader};
pub use crate::scanner::{Finding, ScanOutcome, Scanner};
pub use crate::targets::{load_targets, ResolvedTargets};

// 内核常用类型
pub use baseline_guard_engine::{
    BaselinePolicy, FeatureIndex, Rule, RuleSelection, SafetyPolicy, UnknownFeaturePolicy,
    Verdict, WireRule,
};
