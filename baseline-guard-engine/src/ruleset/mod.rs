//! 规则集：编译 → 合并 → 筛选
mod compile;
mod merge;
mod select;

pub use compile::{compile_pattern, compile_wire_rules, normalize_flags};
pub use merge::merge_rules;
pub use select::{select_rules, PackRegistry, RuleSelection};
