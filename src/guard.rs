//! 对外入口：知识库 + 项目配置 + 目标 + 规则 → 扫描 / 判定 / 规则生成

use baseline_guard_engine::{
    select_rules, FeatureIndex, PackRegistry, Rule, RuleGenerator, SafetyEvaluator, Verdict,
    WebFeaturesParser, WireRule,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{inject_rule, ConfigCache, GuardOptions, Mode};
use crate::error::{GuardError, GuardResult};
use crate::report::{Report, REPORT_DIR};
use crate::rule::{builtin_packs, RuleLoader};
use crate::scanner::{collect_files, ScanOutcome, Scanner};
use crate::targets::{load_targets, summarize_targets, ResolvedTargets, TargetSummaryRow};

/// 批量生成规则的默认输出文件名（位于 [`REPORT_DIR`] 下）
pub const GENERATED_RULES_FILENAME: &str = "web-feature-rules.json";

/// baseline-guard 主入口
/// 构建完成后知识库、目标与规则集均不再变化
#[derive(Debug)]
pub struct BaselineGuard {
    index: Arc<FeatureIndex>,
    rules: Vec<Rule>,
    packs: &'static PackRegistry,
    targets: ResolvedTargets,
    options: GuardOptions,
    config_cache: Arc<ConfigCache>,
}

impl BaselineGuard {
    /// 从知识库文件构建（路径见 [`GuardOptions::resolved_features_path`]）
    pub fn new(options: GuardOptions) -> GuardResult<Self> {
        let path = options.resolved_features_path();
        let bytes = fs::read(&path).map_err(|e| {
            GuardError::ConfigError(format!(
                "Failed to read knowledge base {}: {}",
                path.display(),
                e
            ))
        })?;
        let index = WebFeaturesParser::new().parse_from_bytes(&bytes)?;
        log::info!("Loaded {} features from {}", index.len(), path.display());
        Ok(Self::with_index(Arc::new(index), options))
    }

    /// 使用已构建的知识库索引
    pub fn with_index(index: Arc<FeatureIndex>, options: GuardOptions) -> Self {
        let config_cache = options.config_cache.clone().unwrap_or_default();
        let targets = load_targets(&options.root, &config_cache);
        let rules = RuleLoader::load_effective_rules(&options.root, &config_cache);
        log::debug!(
            "Guard ready: {} rules, {} targets from {}",
            rules.len(),
            targets.resolved.len(),
            targets.source
        );

        Self {
            index,
            rules,
            packs: builtin_packs(),
            targets,
            options,
            config_cache,
        }
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn packs(&self) -> &PackRegistry {
        self.packs
    }

    pub fn targets(&self) -> &ResolvedTargets {
        &self.targets
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    pub fn config_cache(&self) -> &Arc<ConfigCache> {
        &self.config_cache
    }

    pub fn evaluator(&self) -> SafetyEvaluator<'_> {
        SafetyEvaluator::new(&self.index, self.options.policy)
    }

    /// 判定单个特性在当前目标下是否安全
    pub fn evaluate(&self, feature_id: &str) -> Verdict {
        self.evaluator().evaluate(feature_id, &self.targets.resolved)
    }

    /// 按选项中的筛选条件挑选规则
    pub fn selected_rules(&self) -> Vec<&Rule> {
        select_rules(&self.rules, &self.options.selection, self.packs)
    }

    pub fn target_summary(&self) -> Vec<TargetSummaryRow> {
        summarize_targets(&self.targets.resolved)
    }

    pub fn scan(&self) -> ScanOutcome {
        let files = collect_files(&self.options.root, &self.options);
        self.scan_files(&files)
    }

    pub fn scan_files(&self, files: &[PathBuf]) -> ScanOutcome {
        let mut scanner = Scanner::new(
            self.selected_rules(),
            &self.targets.resolved,
            self.evaluator(),
        );
        scanner.scan_files(&self.options.root, files)
    }

    pub fn build_report(&self, outcome: &ScanOutcome, started: Instant) -> Report {
        Report::new(
            outcome,
            &self.targets,
            &self.options.root,
            started.elapsed(),
            read_package_version(&self.options.root),
        )
    }

    /// `error` 模式且存在问题
    pub fn should_fail(&self, outcome: &ScanOutcome) -> bool {
        self.targets.mode == Mode::Error && outcome.has_problems()
    }

    pub fn generator(&self) -> RuleGenerator<'_> {
        RuleGenerator::new(&self.index)
    }

    pub fn generate_rule(&self, feature_id: &str) -> Option<Rule> {
        self.generator().generate_rule(feature_id)
    }

    pub fn generate_wire_rule(&self, feature_id: &str) -> Option<WireRule> {
        self.generator().generate_wire_rule(feature_id)
    }

    /// 生成单条规则并写入项目配置 `rules[]`（同ID替换）
    pub fn emit_rule(&self, feature_id: &str) -> GuardResult<PathBuf> {
        let wire = self.generate_wire_rule(feature_id).ok_or_else(|| {
            GuardError::RuleEmitError(format!(
                "No generated rule found for featureId \"{}\"",
                feature_id
            ))
        })?;
        inject_rule(&self.options.root, &wire)
    }

    /// 为整个知识库生成规则并写为 JSON 数组，返回 (输出路径, 规则数)
    /// 默认输出 `<root>/.baseline/web-feature-rules.json`
    pub fn emit_all_rules(&self, out: Option<&Path>) -> GuardResult<(PathBuf, usize)> {
        let path = match out {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.options.root.join(path),
            None => self
                .options
                .root
                .join(REPORT_DIR)
                .join(GENERATED_RULES_FILENAME),
        };

        let generated = self.generator().generate_all_wire_rules();
        let mut contents = serde_json::to_string_pretty(&generated)?;
        contents.push('\n');

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        log::info!("Wrote {} generated rules to {}", generated.len(), path.display());
        Ok((path, generated.len()))
    }
}

/// package.json 中的 version 字段
pub fn read_package_version(root: &Path) -> Option<String> {
    let raw = fs::read_to_string(root.join("package.json")).ok()?;
    let pkg: Value = serde_json::from_str(&raw).ok()?;
    pkg.get("version")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_version() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_package_version(dir.path()), None);
        fs::write(dir.path().join("package.json"), r#"{"version":"2.0.1"}"#).unwrap();
        assert_eq!(read_package_version(dir.path()).as_deref(), Some("2.0.1"));
    }

    #[test]
    fn test_missing_knowledge_base() {
        let dir = tempfile::tempdir().unwrap();
        let options = GuardOptions::builder().root(dir.path()).build();
        assert!(matches!(
            BaselineGuard::new(options),
            Err(GuardError::ConfigError(_))
        ));
    }
}
