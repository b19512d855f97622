//! baseline-guard 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use baseline_guard::report::default_report_path;
use baseline_guard::{
    BaselineGuard, BaselinePolicy, GuardOptions, ReportFormat, RuleSelection, SafetyPolicy,
    UnknownFeaturePolicy,
};
use baseline_guard_engine::summarize_unsupported;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "baseline-guard")]
#[command(about = "Flags web-platform features your browser targets may not support")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// web-features knowledge base JSON (default: node_modules/web-features/data.json)
    #[arg(long, global = true)]
    features: Option<PathBuf>,

    /// Project root
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat features missing from the knowledge base as safe
    #[arg(long, global = true)]
    skip_unknown: bool,

    /// Accept Baseline "low" features when no per-browser minima exist
    #[arg(long, global = true)]
    accept_low: bool,
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Rule pack (core, popular, risky, experimental)
    #[arg(long)]
    pack: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Comma-separated rule ids to keep
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Comma-separated rule ids to drop
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
}

impl FilterArgs {
    fn selection(&self) -> RuleSelection {
        let mut selection = RuleSelection::new()
            .tags(self.tags.iter().cloned())
            .only(self.only.iter().cloned())
            .exclude(self.exclude.iter().cloned());
        if let Some(pack) = &self.pack {
            selection = selection.pack(pack.clone());
        }
        selection
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan project files and report unsupported features
    Scan {
        #[command(flatten)]
        filter: FilterArgs,

        /// Save a report
        #[arg(long, value_enum)]
        report: Option<ReportKind>,

        /// Report path (default: .baseline/baseline-report-<timestamp>.<ext>)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List selected rules with their verdict for the current targets
    ListRules {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Check a single feature id against the current targets
    Check { feature_id: String },

    /// Generate a rule for one feature and inject it into baseline.config.json
    EmitRule { feature_id: String },

    /// Generate rules for the whole knowledge base
    EmitAllRules {
        /// Output path (default: .baseline/web-feature-rules.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportKind {
    /// JSON report
    Json,
    /// Markdown report
    Md,
    /// Standalone HTML report
    Html,
}

impl From<ReportKind> for ReportFormat {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Json => ReportFormat::Json,
            ReportKind::Md => ReportFormat::Markdown,
            ReportKind::Html => ReportFormat::Html,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn policy(cli: &Cli) -> SafetyPolicy {
    let mut policy = SafetyPolicy::default();
    if cli.skip_unknown {
        policy = policy.with_unknown_feature(UnknownFeaturePolicy::Safe);
    }
    if cli.accept_low {
        policy = policy.with_baseline(BaselinePolicy::HighOrLow);
    }
    policy
}

fn build_guard(cli: &Cli, selection: RuleSelection) -> Result<BaselineGuard, ExitCode> {
    let mut builder = GuardOptions::builder()
        .root(cli.root.clone())
        .policy(policy(cli))
        .selection(selection);
    if let Some(features) = &cli.features {
        builder = builder.features_path(features.clone());
    }
    BaselineGuard::new(builder.build()).map_err(|e| {
        eprintln!("error: {}", e);
        ExitCode::from(2)
    })
}

fn print_targets(guard: &BaselineGuard) {
    println!("Baseline Guard (source: {})", guard.targets().source);
    println!("Targets (summary):");
    for row in guard.target_summary() {
        println!("  {:<12} {:<16} {}", row.browser, row.range, row.count);
    }
}

fn run_scan(
    guard: &BaselineGuard,
    report: Option<ReportKind>,
    out: Option<PathBuf>,
    started: Instant,
) -> ExitCode {
    print_targets(guard);
    let outcome = guard.scan();
    println!("Scanned {} file(s)", outcome.files_checked.len());
    let data = guard.build_report(&outcome, started);

    if outcome.has_problems() {
        println!("Found {} issue(s):", outcome.problems.len());
        for (rule_id, count) in data.sorted_rule_counts() {
            println!("  {:<24} {}", rule_id, count);
        }
        for p in &outcome.problems {
            println!(
                "{}:{}:{} {} [{} -> {}]",
                p.file, p.line, p.col, p.msg, p.rule_id, p.feature_id
            );
            if p.unsupported.is_empty() {
                println!("  -> {}", p.reason);
            } else {
                println!("  -> Failing targets:");
                for line in summarize_unsupported(&p.unsupported) {
                    println!("     - {}", line);
                }
            }
        }
    } else {
        println!("No errors found");
    }

    if let Some(kind) = report {
        let format = ReportFormat::from(kind);
        let root = &guard.options().root;
        let path = match out {
            Some(path) if path.is_absolute() => path,
            Some(path) => root.join(path),
            None => default_report_path(root, format, chrono::Local::now()),
        };
        if let Err(e) = data.write_to(format, &path) {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
        println!("Report saved: {}", path.display());
    }

    if guard.should_fail(&outcome) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_list_rules(guard: &BaselineGuard) -> ExitCode {
    print_targets(guard);
    let label = guard.options().selection.pack.as_deref().unwrap_or("all");
    println!("Rules (pack: {}):", label);
    for rule in guard.selected_rules() {
        let verdict = guard.evaluate(&rule.feature_id);
        println!(
            "  {:<24} {:<24} {:<6} {}",
            rule.id,
            rule.feature_id,
            if verdict.safe { "ok" } else { "UNSAFE" },
            rule.tags.join(", ")
        );
    }
    ExitCode::SUCCESS
}

fn run_check(guard: &BaselineGuard, feature_id: &str) -> ExitCode {
    let verdict = guard.evaluate(feature_id);
    println!(
        "{}: {}",
        feature_id,
        if verdict.safe { "safe" } else { "unsafe" }
    );
    println!("  {}", verdict.reason);
    for line in summarize_unsupported(&verdict.unsupported) {
        println!("  - {}", line);
    }
    if verdict.safe {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let selection = match &cli.command {
        Command::Scan { filter, .. } | Command::ListRules { filter } => filter.selection(),
        _ => RuleSelection::default(),
    };
    let guard = match build_guard(&cli, selection) {
        Ok(guard) => guard,
        Err(code) => return code,
    };

    match cli.command {
        Command::Scan { report, out, .. } => run_scan(&guard, report, out, started),
        Command::ListRules { .. } => run_list_rules(&guard),
        Command::Check { feature_id } => run_check(&guard, &feature_id),
        Command::EmitRule { feature_id } => match guard.emit_rule(&feature_id) {
            Ok(path) => {
                println!(
                    "Injected rule \"{}\" into {} (rules[])",
                    feature_id,
                    path.display()
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(2)
            }
        },
        Command::EmitAllRules { out } => match guard.emit_all_rules(out.as_deref()) {
            Ok((path, count)) => {
                println!("Wrote {} generated rules to {}", count, path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(2)
            }
        },
    }
}
