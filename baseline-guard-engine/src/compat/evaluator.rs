//! 安全评估器（核心判定函数）
//! 输入：特性ID + 已解析目标列表 + 只读知识库索引；输出：安全/不安全判定 + 结构化证据
//! 判定顺序固定：
//! 1. 未知特性 → 按 [`UnknownFeaturePolicy`] 处理
//! 2. 存在最低版本表 → 逐目标比较，任一目标不满足即不安全
//! 3. 无最低版本表但有 baseline → 按 [`BaselinePolicy`] 处理
//! 4. 二者皆无 → 保守判定为不安全
//! 纯函数，无副作用；“不安全”是正常返回值而非错误

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use super::minima::{extract_minimums, MinimumVersions};
use super::version::compare_versions;
use crate::core::{Baseline, BrowserKey, FeatureIndex, FeatureRecord, ResolvedTarget};

/// 未知特性ID的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFeaturePolicy {
    /// 判为不安全（fail closed）
    #[default]
    Unsafe,
    /// 跳过未知特性，判为安全（减少误报）
    Safe,
}

/// 无最低版本表时的 baseline 接受策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// 仅 `high` 视为安全
    #[default]
    HighOnly,
    /// `high` 与 `low` 均视为安全
    HighOrLow,
}

impl BaselinePolicy {
    pub fn accepts(self, baseline: Baseline) -> bool {
        match (self, baseline) {
            (_, Baseline::High) => true,
            (BaselinePolicy::HighOrLow, Baseline::Low) => true,
            (BaselinePolicy::HighOnly, Baseline::Low) => false,
        }
    }
}

/// 评估策略集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafetyPolicy {
    pub unknown_feature: UnknownFeaturePolicy,
    pub baseline: BaselinePolicy,
}

impl SafetyPolicy {
    /// 严格策略（默认）：未知特性不安全，仅接受 baseline high
    pub fn strict() -> Self {
        Self::default()
    }

    /// 宽松策略：跳过未知特性，接受 baseline low
    pub fn permissive() -> Self {
        Self {
            unknown_feature: UnknownFeaturePolicy::Safe,
            baseline: BaselinePolicy::HighOrLow,
        }
    }

    pub fn with_unknown_feature(mut self, policy: UnknownFeaturePolicy) -> Self {
        self.unknown_feature = policy;
        self
    }

    pub fn with_baseline(mut self, policy: BaselinePolicy) -> Self {
        self.baseline = policy;
        self
    }
}

/// 判定依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "level")]
pub enum DecisionBasis {
    UnknownFeature,
    Minima,
    Baseline(Baseline),
    NoCompatData,
}

/// 单条不满足要求的目标证据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedTarget {
    pub browser: BrowserKey,
    /// 目标版本标记（原样，可能是区间）
    pub target: String,
    /// 最低要求版本；None 表示 support 块中没有该浏览器的数据
    pub min: Option<String>,
}

impl Display for UnsupportedTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.min {
            Some(min) => write!(f, "{} {} (< {})", self.browser, self.target, min),
            None => write!(f, "{} {} (unknown support)", self.browser, self.target),
        }
    }
}

/// 评估结果
/// `unsupported` 是权威证据；`reason` 只是尽力而为的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub safe: bool,
    pub reason: String,
    pub basis: DecisionBasis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<UnsupportedTarget>,
}

impl Verdict {
    fn new(safe: bool, basis: DecisionBasis, reason: impl Into<String>) -> Self {
        Self {
            safe,
            reason: reason.into(),
            basis,
            unsupported: Vec::new(),
        }
    }
}

/// 找出低于最低版本（或最低版本未知）的目标
/// 无法解析的条目和未知浏览器直接跳过，不产生任何证据
pub fn find_unsupported<S: AsRef<str>>(
    targets: &[S],
    minimums: &MinimumVersions,
) -> Vec<UnsupportedTarget> {
    let mut out = Vec::new();
    for entry in targets {
        let Some(target) = ResolvedTarget::parse(entry.as_ref()) else {
            continue;
        };
        let Some(browser) = target.browser_key() else {
            continue;
        };

        match minimums.get(browser) {
            None => out.push(UnsupportedTarget {
                browser,
                target: target.version,
                min: None,
            }),
            Some(min) => {
                if compare_versions(&target.version, min) == Ordering::Less {
                    out.push(UnsupportedTarget {
                        browser,
                        target: target.version,
                        min: Some(min.to_string()),
                    });
                }
            }
        }
    }
    out
}

/// 安全评估器，持有只读索引引用与策略
#[derive(Debug, Clone, Copy)]
pub struct SafetyEvaluator<'a> {
    index: &'a FeatureIndex,
    policy: SafetyPolicy,
}

impl<'a> SafetyEvaluator<'a> {
    pub fn new(index: &'a FeatureIndex, policy: SafetyPolicy) -> Self {
        Self { index, policy }
    }

    pub fn policy(&self) -> SafetyPolicy {
        self.policy
    }

    pub fn index(&self) -> &'a FeatureIndex {
        self.index
    }

    /// 评估单个特性在全部目标下是否安全
    pub fn evaluate<S: AsRef<str>>(&self, feature_id: &str, targets: &[S]) -> Verdict {
        match self.index.get(feature_id) {
            Some(record) => self.evaluate_record(record, targets),
            None => match self.policy.unknown_feature {
                UnknownFeaturePolicy::Unsafe => Verdict::new(
                    false,
                    DecisionBasis::UnknownFeature,
                    format!("Unknown feature \"{}\".", feature_id),
                ),
                UnknownFeaturePolicy::Safe => Verdict::new(
                    true,
                    DecisionBasis::UnknownFeature,
                    format!("Unknown feature \"{}\"; skipped by policy.", feature_id),
                ),
            },
        }
    }

    /// 对已取得的记录执行第 2~4 步
    pub fn evaluate_record<S: AsRef<str>>(&self, record: &FeatureRecord, targets: &[S]) -> Verdict {
        // 1) 优先使用精确的最低版本表
        if let Some(minimums) = extract_minimums(record) {
            let unsupported = find_unsupported(targets, &minimums);
            if unsupported.is_empty() {
                return Verdict::new(
                    true,
                    DecisionBasis::Minima,
                    "All targets meet minimum support versions.",
                );
            }
            let summary = unsupported
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Verdict {
                safe: false,
                reason: format!("Not supported by: {}", summary),
                basis: DecisionBasis::Minima,
                unsupported,
            };
        }

        // 2) 无最低版本表，回退到 baseline
        if let Some(baseline) = record.baseline() {
            return if self.policy.baseline.accepts(baseline) {
                Verdict::new(
                    true,
                    DecisionBasis::Baseline(baseline),
                    format!("Baseline: {} (no per-browser minima found).", baseline.as_str()),
                )
            } else {
                Verdict::new(
                    false,
                    DecisionBasis::Baseline(baseline),
                    format!(
                        "Baseline: {} is not accepted by the current policy (no per-browser minima found).",
                        baseline.as_str()
                    ),
                )
            };
        }

        // 3) 保守默认
        Verdict::new(
            false,
            DecisionBasis::NoCompatData,
            "No compat minima; conservative fail.",
        )
    }
}

/// 函数式入口
pub fn evaluate_safety<S: AsRef<str>>(
    feature_id: &str,
    targets: &[S],
    index: &FeatureIndex,
    policy: SafetyPolicy,
) -> Verdict {
    SafetyEvaluator::new(index, policy).evaluate(feature_id, targets)
}
