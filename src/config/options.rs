//! 扫描选项与链式构建器

use baseline_guard_engine::{RuleSelection, SafetyPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cache::ConfigCache;

/// 默认跳过的目录名
pub const DEFAULT_IGNORED_DIRS: [&str; 4] = ["node_modules", "dist", "build", ".git"];

/// 默认扫描的文件扩展名
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["js", "jsx", "ts", "tsx", "css", "html"];

/// 知识库默认位置（相对项目根目录）
pub const DEFAULT_FEATURES_PATH: &str = "node_modules/web-features/data.json";

/// 扫描与判定选项
#[derive(Debug, Clone)]
pub struct GuardOptions {
    /// 项目根目录（配置文件、package.json、扫描起点）
    pub root: PathBuf,
    /// 知识库 JSON 路径；None 时使用 [`DEFAULT_FEATURES_PATH`]
    pub features_path: Option<PathBuf>,
    pub policy: SafetyPolicy,
    pub selection: RuleSelection,
    pub ignored_dirs: Vec<String>,
    pub extensions: Vec<String>,
    /// 共享的配置缓存；None 时每个实例自建
    pub config_cache: Option<Arc<ConfigCache>>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            features_path: None,
            policy: SafetyPolicy::default(),
            selection: RuleSelection::default(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            config_cache: None,
        }
    }
}

impl GuardOptions {
    pub fn builder() -> GuardOptionsBuilder {
        GuardOptionsBuilder::new()
    }

    /// 知识库文件的实际路径（相对路径按项目根目录解析）
    pub fn resolved_features_path(&self) -> PathBuf {
        match &self.features_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.root.join(path),
            None => self.root.join(DEFAULT_FEATURES_PATH),
        }
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// 选项构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct GuardOptionsBuilder {
    options: GuardOptions,
}

impl GuardOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }

    pub fn features_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.features_path = Some(path.into());
        self
    }

    pub fn policy(mut self, policy: SafetyPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn selection(mut self, selection: RuleSelection) -> Self {
        self.options.selection = selection;
        self
    }

    pub fn ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignored_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn config_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.options.config_cache = Some(cache);
        self
    }

    pub fn build(self) -> GuardOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_guard_engine::UnknownFeaturePolicy;

    #[test]
    fn test_defaults() {
        let options = GuardOptions::default();
        assert!(options.is_ignored_dir("node_modules"));
        assert!(options.is_ignored_dir(".git"));
        assert!(!options.is_ignored_dir("src"));
        assert_eq!(options.policy.unknown_feature, UnknownFeaturePolicy::Unsafe);
        assert_eq!(
            options.resolved_features_path(),
            PathBuf::from(".").join(DEFAULT_FEATURES_PATH)
        );
    }

    #[test]
    fn test_builder_chain() {
        let options = GuardOptions::builder()
            .root("/project")
            .features_path("data/features.json")
            .extensions(["css"])
            .build();
        assert_eq!(
            options.resolved_features_path(),
            PathBuf::from("/project/data/features.json")
        );
        assert!(options.accepts_extension(Path::new("a/b.CSS")));
        assert!(!options.accepts_extension(Path::new("a/b.js")));
        assert!(!options.accepts_extension(Path::new("Makefile")));
    }
}
