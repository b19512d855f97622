//! 全局错误类型定义
use thiserror::Error;

use baseline_guard_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum GuardError {
    // 内核错误（知识库解析、规则编译等）
    #[error("内核错误：{0}")]
    CoreError(#[from] CoreError),

    // 配置相关错误
    #[error("配置读取失败：{0}")]
    ConfigError(String),

    // 规则相关错误
    #[error("规则生成失败：{0}")]
    RuleEmitError(String),

    // 报告相关错误
    #[error("报告生成失败：{0}")]
    ReportError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type GuardResult<T> = Result<T, GuardError>;
