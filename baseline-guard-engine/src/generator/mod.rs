//! 规则推断：由知识库中的兼容数据路径合成检测规则
pub mod constants;
mod strategy;
mod rule_generator;

pub use rule_generator::{infer_rule, prioritized_tokens, RuleGenerator};
pub use strategy::{infer_from_token, Guess, InferenceStrategy, Surface, STRATEGIES};
