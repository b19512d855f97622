use super::constants::{GENERATED_TAG, JS_LANGUAGE_SPECIAL};
use super::strategy::{infer_from_token, Guess, Surface};
use crate::core::{FeatureIndex, FeatureRecord, Rule, WireRule};
use crate::utils::log_format::preview_compact;

/// 按技术面优先级（css → html → api → 通用 js）稳定排序兼容路径
/// 无法识别前缀的路径直接丢弃
pub fn prioritized_tokens(tokens: &[String]) -> Vec<&str> {
    let mut ranked: Vec<(u8, &str)> = tokens
        .iter()
        .filter_map(|token| Surface::token_priority(token).map(|rank| (rank, token.as_str())))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, token)| token).collect()
}

fn build_wire_rule(feature_id: &str, record: &FeatureRecord, guess: Guess) -> WireRule {
    WireRule {
        id: feature_id.to_string(),
        feature_id: feature_id.to_string(),
        files: guess.surface.files(),
        pattern: guess.pattern,
        flags: Some(guess.flags.to_string()),
        message: format!(
            "{} may not be supported by your targets.",
            record.display_name(feature_id)
        ),
        tags: vec![guess.surface.tag().to_string(), GENERATED_TAG.to_string()],
        docs: None,
    }
}

/// 为单个特性推断检测规则
/// 手写表优先；否则按优先级逐个尝试兼容路径，首个产出模式的路径生效
pub fn infer_rule(feature_id: &str, record: &FeatureRecord) -> Option<WireRule> {
    if let Some(special) = JS_LANGUAGE_SPECIAL.get(feature_id) {
        let guess = Guess {
            surface: Surface::Js,
            pattern: special.pattern.to_string(),
            flags: special.flags,
        };
        return Some(build_wire_rule(feature_id, record, guess));
    }

    prioritized_tokens(&record.compat_features)
        .into_iter()
        .find_map(infer_from_token)
        .map(|guess| build_wire_rule(feature_id, record, guess))
}

/// 基于知识库索引的规则生成器
#[derive(Debug, Clone, Copy)]
pub struct RuleGenerator<'a> {
    index: &'a FeatureIndex,
}

impl<'a> RuleGenerator<'a> {
    pub fn new(index: &'a FeatureIndex) -> Self {
        Self { index }
    }

    /// 未知特性或无法推断时返回 None
    pub fn generate_wire_rule(&self, feature_id: &str) -> Option<WireRule> {
        let record = self.index.get(feature_id)?;
        infer_rule(feature_id, record)
    }

    /// 遍历整个知识库，仅保留推断成功的特性（索引顺序）
    pub fn generate_all_wire_rules(&self) -> Vec<WireRule> {
        let rules: Vec<WireRule> = self
            .index
            .iter()
            .filter_map(|(id, record)| infer_rule(id, record))
            .collect();
        log::debug!(
            "Generated {} rules from {} features",
            rules.len(),
            self.index.len()
        );
        rules
    }

    pub fn generate_rule(&self, feature_id: &str) -> Option<Rule> {
        let wire = self.generate_wire_rule(feature_id)?;
        compile_generated(wire)
    }

    pub fn generate_all_rules(&self) -> Vec<Rule> {
        self.generate_all_wire_rules()
            .into_iter()
            .filter_map(compile_generated)
            .collect()
    }
}

// 生成模式已转义，编译失败属于异常情况，记录后跳过
fn compile_generated(wire: WireRule) -> Option<Rule> {
    match wire.compile() {
        Ok(rule) => Some(rule),
        Err(e) => {
            log::warn!(
                "Generated rule {} failed to compile: {} (pattern: {})",
                wire.id,
                e,
                preview_compact(&wire.pattern, 80)
            );
            None
        }
    }
}
