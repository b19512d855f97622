//! 扫描报告数据结构与落盘

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::html::render_html;
use super::markdown::render_markdown;
use crate::config::Mode;
use crate::error::{GuardError, GuardResult};
use crate::scanner::{Finding, ScanOutcome};
use crate::targets::ResolvedTargets;

/// 报告默认输出目录（相对项目根目录）
pub const REPORT_DIR: &str = ".baseline";

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Markdown,
    Html,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "html" | "htm" => Ok(ReportFormat::Html),
            other => Err(GuardError::ReportError(format!("unknown report type \"{}\"", other))),
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// 扫描报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// RFC 3339（UTC，毫秒精度）
    pub generated_at: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    pub cwd: String,
    pub target_source: String,
    pub targets: Vec<String>,
    pub mode: Mode,
    pub files_checked: Vec<String>,
    pub file_count: usize,
    pub rule_counts: BTreeMap<String, usize>,
    pub problems: Vec<Finding>,
}

impl Report {
    pub fn new(
        outcome: &ScanOutcome,
        targets: &ResolvedTargets,
        cwd: &Path,
        elapsed: Duration,
        package_version: Option<String>,
    ) -> Self {
        Self::with_timestamp(outcome, targets, cwd, elapsed, package_version, Utc::now())
    }

    pub fn with_timestamp(
        outcome: &ScanOutcome,
        targets: &ResolvedTargets,
        cwd: &Path,
        elapsed: Duration,
        package_version: Option<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            package_version,
            cwd: cwd.display().to_string(),
            target_source: targets.source.clone(),
            targets: targets.resolved.clone(),
            mode: targets.mode,
            file_count: outcome.files_checked.len(),
            files_checked: outcome.files_checked.clone(),
            rule_counts: outcome.rule_counts(),
            problems: outcome.problems.clone(),
        }
    }

    /// 按问题数降序（同数按规则ID）
    pub fn sorted_rule_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .rule_counts
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }

    pub fn render(&self, format: ReportFormat) -> GuardResult<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Markdown => Ok(render_markdown(self)),
            ReportFormat::Html => Ok(render_html(self)),
        }
    }

    /// 渲染并写入文件，自动创建父目录
    pub fn write_to(&self, format: ReportFormat, path: &Path) -> GuardResult<()> {
        let contents = self.render(format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        log::info!("Report saved: {}", path.display());
        Ok(())
    }
}

/// `<root>/.baseline/baseline-report-<YYYYMMDD-HHMM>.<ext>`
pub fn default_report_path(root: &Path, format: ReportFormat, now: DateTime<Local>) -> PathBuf {
    root.join(REPORT_DIR).join(format!(
        "baseline-report-{}.{}",
        now.format("%Y%m%d-%H%M"),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn outcome() -> ScanOutcome {
        let finding = |rule_id: &str| Finding {
            file: "src/a.css".to_string(),
            line: 2,
            col: 5,
            rule_id: rule_id.to_string(),
            feature_id: "has".to_string(),
            msg: "m".to_string(),
            reason: "r".to_string(),
            unsupported: Vec::new(),
        };
        ScanOutcome {
            files_checked: vec!["src/a.css".to_string(), "index.html".to_string()],
            problems: vec![finding("b"), finding("a"), finding("b")],
        }
    }

    fn report() -> Report {
        Report::with_timestamp(
            &outcome(),
            &ResolvedTargets::fallback(),
            Path::new("/work"),
            Duration::from_millis(42),
            Some("1.2.3".to_string()),
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn test_report_fields() {
        let report = report();
        assert_eq!(report.generated_at, "2025-01-02T03:04:05.000Z");
        assert_eq!(report.file_count, 2);
        assert_eq!(report.duration_ms, 42);
        assert_eq!(report.sorted_rule_counts(), vec![("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_json_is_camel_case() {
        let json = report().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["targetSource"], "fallback");
        assert_eq!(value["fileCount"], 2);
        assert_eq!(value["ruleCounts"]["b"], 2);
        assert_eq!(value["problems"][0]["ruleId"], "b");
        assert_eq!(value["mode"], "warn");
        assert!(value["problems"][0].get("unsupported").is_none());

        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report());
    }

    #[test]
    fn test_format_parse_and_default_path() {
        assert_eq!("MD".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("html".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert!("pdf".parse::<ReportFormat>().is_err());

        let now = Local.with_ymd_and_hms(2025, 9, 26, 13, 7, 0).unwrap();
        let path = default_report_path(Path::new("/p"), ReportFormat::Json, now);
        assert_eq!(path, PathBuf::from("/p/.baseline/baseline-report-20250926-1307.json"));
    }

    #[test]
    fn test_write_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".baseline/nested/report.md");
        report().write_to(ReportFormat::Markdown, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("# Baseline Guard Report"));

        let now = Local.with_ymd_and_hms(2025, 9, 26, 13, 7, 0).unwrap();
        let html_path = default_report_path(dir.path(), ReportFormat::Html, now);
        report().write_to(ReportFormat::Html, &html_path).unwrap();
        assert!(html_path.ends_with("baseline-report-20250926-1307.html"));
        assert!(fs::read_to_string(&html_path).unwrap().contains("<h2>Files Checked</h2>"));
    }
}
