//! 领域层统一错误定义
//!
//! 这里只收录“异常”类错误：序列化故障、事件处理器失败、类型不匹配、仓储故障等。
//! 业务规则失败与输入校验失败不走这里，而是作为 [`Either`](crate::either::Either)
//! 的 `Failure` 值返回。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/值投影 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 事件系统 ---
    #[error("event handler error: handler={handler}, reason={reason}")]
    EventHandler { handler: String, reason: String },

    // --- 仓储/持久化 ---
    #[error("repository error: {reason}")]
    Repository { reason: String },

    // --- 领域规则/值 ---
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

impl DomainError {
    /// 构造事件处理器错误
    pub fn event_handler(handler: impl Into<String>, reason: impl ToString) -> Self {
        Self::EventHandler {
            handler: handler.into(),
            reason: reason.to_string(),
        }
    }

    pub fn repository(reason: impl ToString) -> Self {
        Self::Repository {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(reason: impl ToString) -> Self {
        Self::InvalidValue {
            reason: reason.to_string(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
