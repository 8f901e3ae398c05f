//! 工具模块 - 通用工具函数
//!
//! - [`logger`] - tracing 日志初始化
//! - [`validation`] - 输入校验

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
