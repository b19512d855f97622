mod browser;
mod feature;
mod rule;
mod target;

// 导出常用项
pub use browser::{label_for, BrowserKey};
pub use feature::{Baseline, FeatureIndex, FeatureKind, FeatureRecord, FeatureStatus};
pub use rule::{FileKind, Rule, WireRule};
pub use target::ResolvedTarget;
