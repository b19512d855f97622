//! 词法扫描：逐规则匹配文件文本，对每个命中做安全评估

use baseline_guard_engine::{FileKind, Rule, SafetyEvaluator, UnsupportedTarget, Verdict};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::walker::display_path;

/// 单条问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub file: String,
    /// 1 起始
    pub line: usize,
    /// 1 起始，按字符计
    pub col: usize,
    pub rule_id: String,
    pub feature_id: String,
    pub msg: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<UnsupportedTarget>,
}

/// 一次扫描的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// 已检查文件（相对路径）
    pub files_checked: Vec<String>,
    pub problems: Vec<Finding>,
}

impl ScanOutcome {
    /// 规则ID → 问题数
    pub fn rule_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.problems {
            *counts.entry(finding.rule_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// 行首偏移表，用于把字节偏移换算为行列号
struct LineIndex<'t> {
    text: &'t str,
    starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    fn new(text: &'t str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { text, starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let col = self.text[self.starts[line]..offset].chars().count() + 1;
        (line + 1, col)
    }
}

/// 扫描器：持有已选规则、目标列表与评估器；同一特性的判定结果在实例内复用
pub struct Scanner<'a> {
    rules: Vec<&'a Rule>,
    targets: &'a [String],
    evaluator: SafetyEvaluator<'a>,
    verdicts: FxHashMap<String, Verdict>,
}

impl<'a> Scanner<'a> {
    pub fn new(rules: Vec<&'a Rule>, targets: &'a [String], evaluator: SafetyEvaluator<'a>) -> Self {
        Self {
            rules,
            targets,
            evaluator,
            verdicts: FxHashMap::default(),
        }
    }

    pub fn rules(&self) -> &[&'a Rule] {
        &self.rules
    }

    fn verdict(&mut self, feature_id: &str) -> &Verdict {
        let (evaluator, targets) = (self.evaluator, self.targets);
        self.verdicts
            .entry(feature_id.to_string())
            .or_insert_with(|| evaluator.evaluate(feature_id, targets))
    }

    /// 扫描单个文件文本，返回不安全命中
    pub fn scan_text(&mut self, file: &str, kind: FileKind, text: &str) -> Vec<Finding> {
        let lines = LineIndex::new(text);
        let mut findings = Vec::new();
        let rules = self.rules.clone();

        for rule in rules.into_iter().filter(|rule| rule.applies_to(kind)) {
            for m in rule.regex.find_iter(text) {
                let verdict = self.verdict(&rule.feature_id);
                if verdict.safe {
                    // 同一规则的判定与命中位置无关
                    break;
                }
                let (line, col) = lines.position(m.start());
                findings.push(Finding {
                    file: file.to_string(),
                    line,
                    col,
                    rule_id: rule.id.clone(),
                    feature_id: rule.feature_id.clone(),
                    msg: rule.message.clone(),
                    reason: verdict.reason.clone(),
                    unsupported: verdict.unsupported.clone(),
                });
            }
        }
        findings
    }

    /// 扫描文件列表；无法读取或非 UTF-8 的文件记录警告后跳过
    pub fn scan_files(&mut self, root: &Path, files: &[PathBuf]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for path in files {
            let Some(kind) = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(FileKind::from_extension)
            else {
                log::debug!("Skipping file with unsupported extension: {}", path.display());
                continue;
            };

            let text = match fs::read(path).map(String::from_utf8) {
                Ok(Ok(text)) => text,
                Ok(Err(_)) => {
                    log::warn!("Skipping non UTF-8 file: {}", path.display());
                    continue;
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };

            let shown = display_path(root, path);
            let findings = self.scan_text(&shown, kind, &text);
            outcome.problems.extend(findings);
            outcome.files_checked.push(shown);
        }

        log::info!(
            "Scanned {} files, {} problems",
            outcome.files_checked.len(),
            outcome.problems.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_guard_engine::{FeatureIndex, FeatureRecord, SafetyPolicy, WireRule};
    use baseline_guard_engine::core::FeatureStatus;

    fn rule(id: &str, feature_id: &str, files: Vec<FileKind>, pattern: &str) -> Rule {
        WireRule {
            id: id.to_string(),
            feature_id: feature_id.to_string(),
            files,
            pattern: pattern.to_string(),
            flags: None,
            message: format!("{} used", id),
            tags: Vec::new(),
            docs: None,
        }
        .compile()
        .unwrap()
    }

    fn index() -> FeatureIndex {
        let support = |pairs: &[(&str, &str)]| FeatureRecord {
            status: Some(FeatureStatus {
                baseline: None,
                support: Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()),
            }),
            ..Default::default()
        };
        FeatureIndex::from_records(vec![
            ("has".to_string(), support(&[("chrome", "105"), ("safari", "15.4")])),
            ("nesting".to_string(), support(&[("chrome", "120"), ("safari", "17.2")])),
        ])
        .unwrap()
    }

    #[test]
    fn test_line_index_positions() {
        let lines = LineIndex::new("ab\ncdé\nf");
        assert_eq!(lines.position(0), (1, 1));
        assert_eq!(lines.position(3), (2, 1));
        assert_eq!(lines.position(5), (2, 3));
        // "é" 占两个字节，f 位于第 3 行第 1 列
        assert_eq!(lines.position(8), (3, 1));
    }

    #[test]
    fn test_scan_text_reports_unsafe_only() {
        let index = index();
        let rules = vec![
            rule("css-has", "has", vec![FileKind::Css], r":has\s*\("),
            rule("css-nesting", "nesting", vec![FileKind::Css], r"&\s*\{"),
            rule("js-only", "nesting", vec![FileKind::Js], "a"),
        ];
        let targets = vec!["chrome 110".to_string(), "safari 16.0".to_string()];
        let mut scanner = Scanner::new(
            rules.iter().collect(),
            &targets,
            SafetyEvaluator::new(&index, SafetyPolicy::default()),
        );

        let text = ".a:has(img) {}\n.b {\n  & { color: red }\n}\n.d { & { x: y } }";
        let findings = scanner.scan_text("main.css", FileKind::Css, text);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].rule_id, "css-nesting");
        assert_eq!((findings[0].line, findings[0].col), (3, 3));
        assert_eq!((findings[1].line, findings[1].col), (5, 6));
        assert_eq!(findings[0].unsupported.len(), 2);
        assert!(findings[0].reason.starts_with("Not supported by:"));
    }

    #[test]
    fn test_unknown_feature_fails_closed() {
        let index = index();
        let rules = vec![rule("x", "does-not-exist", vec![FileKind::Html], "<x-el")];
        let targets = vec!["chrome 120".to_string()];
        let mut scanner = Scanner::new(
            rules.iter().collect(),
            &targets,
            SafetyEvaluator::new(&index, SafetyPolicy::default()),
        );
        let findings = scanner.scan_text("a.html", FileKind::Html, "<x-el></x-el>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].reason, "Unknown feature \"does-not-exist\".");
    }

    #[test]
    fn test_rule_counts() {
        let outcome = ScanOutcome {
            files_checked: vec!["a".to_string()],
            problems: vec![
                Finding {
                    file: "a".to_string(),
                    line: 1,
                    col: 1,
                    rule_id: "r1".to_string(),
                    feature_id: "f".to_string(),
                    msg: String::new(),
                    reason: String::new(),
                    unsupported: Vec::new(),
                };
                3
            ],
        };
        assert_eq!(outcome.rule_counts().get("r1"), Some(&3));
        assert!(outcome.has_problems());
    }
}
