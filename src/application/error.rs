//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::fatal::FatalSignal;
use crate::application::ports::StorageError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(#[from] StorageError),
}

impl ApplicationError {
    /// 是否为进程级致命错误
    pub fn is_fatal(&self) -> bool {
        match self {
            ApplicationError::RepositoryError(e) => e.is_fatal(),
        }
    }

    /// 记录仓储错误并转换；事务无法确定结果时触发致命信号
    pub(crate) fn from_storage(
        operation: &'static str,
        err: StorageError,
        fatal: &FatalSignal,
    ) -> Self {
        if err.is_fatal() {
            tracing::error!(operation, error = %err, "Storage left a transaction unresolved");
            fatal.trip(operation);
        } else {
            tracing::warn!(operation, error = %err, "Storage operation failed");
        }
        Self::RepositoryError(err)
    }
}
