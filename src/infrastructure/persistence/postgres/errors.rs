//! PostgreSQL 错误归类
//!
//! 驱动错误只在这里按 SQLSTATE 转换为 `StorageError`，不向上层泄漏 sqlx 类型。

use crate::application::ports::{ConstraintKind, StatementKind, StorageError};

/// SQLSTATE 错误码
pub(crate) mod sqlstate {
    pub const DUPLICATE_PREPARED_STATEMENT: &str = "42P05";
    pub const INVALID_PREPARED_STATEMENT_DEFINITION: &str = "42P14";
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const NO_ACTIVE_SQL_TRANSACTION: &str = "25P01";
}

/// 将 sqlx 错误归类为存储错误
pub(crate) fn classify(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::no_rows(),
        sqlx::Error::Database(db) => classify_code(db.code().as_deref(), db.message()),
        other => StorageError::unclassified(other.to_string()),
    }
}

/// 按 SQLSTATE 归类数据库返回的错误
pub(crate) fn classify_code(code: Option<&str>, message: &str) -> StorageError {
    match code {
        Some(sqlstate::DUPLICATE_PREPARED_STATEMENT) => {
            StorageError::Statement(StatementKind::DuplicatePreparedStatement)
        }
        Some(sqlstate::INVALID_PREPARED_STATEMENT_DEFINITION) => {
            StorageError::Statement(StatementKind::InvalidPreparedStatementDefinition)
        }
        Some(sqlstate::UNIQUE_VIOLATION) => StorageError::Constraint(ConstraintKind::Unique),
        Some(sqlstate::NOT_NULL_VIOLATION) => StorageError::Constraint(ConstraintKind::NotNull),
        Some(sqlstate::FOREIGN_KEY_VIOLATION) => {
            StorageError::Constraint(ConstraintKind::ForeignKey)
        }
        _ => StorageError::Unclassified {
            code: code.map(str::to_string),
            message: message.to_string(),
        },
    }
}

/// 回滚时事务已提交或已回滚
pub(crate) fn is_no_active_transaction(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.code().as_deref() == Some(sqlstate::NO_ACTIVE_SQL_TRANSACTION)
        }
        _ => false,
    }
}

/// 错误是否由数据库服务端返回（连接仍然可用）
pub(crate) fn is_server_reply(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_codes() {
        assert_eq!(
            classify_code(Some("23505"), "duplicate key"),
            StorageError::Constraint(ConstraintKind::Unique)
        );
        assert_eq!(
            classify_code(Some("23502"), "null value"),
            StorageError::Constraint(ConstraintKind::NotNull)
        );
        assert_eq!(
            classify_code(Some("23503"), "violates foreign key"),
            StorageError::Constraint(ConstraintKind::ForeignKey)
        );
    }

    #[test]
    fn test_prepared_statement_codes() {
        assert_eq!(
            classify_code(Some("42P05"), "prepared statement exists"),
            StorageError::Statement(StatementKind::DuplicatePreparedStatement)
        );
        assert_eq!(
            classify_code(Some("42P14"), "invalid definition"),
            StorageError::Statement(StatementKind::InvalidPreparedStatementDefinition)
        );
    }

    #[test]
    fn test_unknown_code_keeps_code_and_message() {
        assert_eq!(
            classify_code(Some("40001"), "could not serialize access"),
            StorageError::Unclassified {
                code: Some("40001".to_string()),
                message: "could not serialize access".to_string(),
            }
        );
        assert_eq!(
            classify_code(None, "?"),
            StorageError::Unclassified {
                code: None,
                message: "?".to_string(),
            }
        );
    }

    #[test]
    fn test_driver_errors() {
        assert_eq!(classify(sqlx::Error::RowNotFound), StorageError::no_rows());
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            StorageError::Unclassified { code: None, .. }
        ));
        assert!(!is_server_reply(&sqlx::Error::PoolClosed));
        assert!(!is_no_active_transaction(&sqlx::Error::PoolClosed));
    }
}
