//! baseline-guard-engine 内核错误定义
//! 内核层只对真正的故障返回错误：不安全判定、未知特性、推断失败都属于正常返回值
use thiserror::Error;

use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

/// 内核核心错误枚举
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 规则相关错误 =====================
    /// 规则正则编译失败（携带规则ID，便于定位配置中的具体条目）
    #[error("Invalid regex for rule \"{rule_id}\": {source}")]
    RuleCompileError {
        rule_id: String,
        #[source]
        source: RegexError,
    },

    /// 规则字段不合法（空ID、空模式等）
    #[error("Invalid rule \"{rule_id}\": {reason}")]
    InvalidRule { rule_id: String, reason: String },

    // ===================== 知识库相关错误 =====================
    /// 知识库JSON解析失败
    #[error("Knowledge base parse failed: {0}")]
    KnowledgeBaseParseError(#[from] SerdeJsonError),

    /// 知识库结构不合法（顶层既不是 features 对象也不是ID映射）
    #[error("Knowledge base shape invalid: {0}")]
    KnowledgeBaseShapeError(String),

    /// 同一特性ID出现多条记录
    #[error("Duplicate feature identifier: {0}")]
    DuplicateFeature(String),
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;
