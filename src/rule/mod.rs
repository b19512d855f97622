//! 规则模块：内置规则、规则包与内联规则加载
pub mod builtin;
pub mod loader;

// 导出核心接口
pub use self::builtin::{builtin_packs, builtin_rules, BUILTIN_PACKS, BUILTIN_RULES};
pub use self::loader::RuleLoader;
