//! 项目配置：配置文件解析、配置缓存、扫描选项
pub mod cache;
pub mod options;
pub mod project;

pub use cache::ConfigCache;
pub use options::{GuardOptions, GuardOptionsBuilder};
pub use project::{inject_rule, read_project_config, BaselineConfig, Mode, BASELINE_CONFIG_FILENAME};
