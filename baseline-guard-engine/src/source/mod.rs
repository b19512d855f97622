// 知识库源解析 (web-features JSON)
pub mod web_features;

pub use web_features::WebFeaturesParser;
