//! 文件扫描：文件收集 + 规则匹配
mod scanner;
mod walker;

pub use scanner::{Finding, ScanOutcome, Scanner};
pub use walker::{collect_files, display_path};
