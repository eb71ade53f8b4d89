//! Transaction Guard - 可串行化事务的作用域守卫
//!
//! 每个仓储操作都在独立事务中执行，并且恰好以一次提交或一次回滚结束：
//! - `resolve(Ok)` 提交，`resolve(Err)` / `abort` 回滚
//! - 守卫被提前丢弃（panic、请求被取消）时由 sqlx 在归还连接前回滚
//!
//! 结果区分两种失败：操作失败但已干净回滚（原错误原样返回），
//! 以及事务本身无法确定结果（`StorageError::Unresolved`，属于致命错误）。

use sqlx::{PgConnection, Postgres, Transaction};

use super::errors::{classify, is_no_active_transaction, is_server_reply};
use super::DbPool;
use crate::application::ports::StorageError;

pub struct TransactionGuard {
    tx: Transaction<'static, Postgres>,
    operation: &'static str,
}

impl TransactionGuard {
    /// 开启事务并设置为 SERIALIZABLE 隔离级别
    pub async fn begin(pool: &DbPool, operation: &'static str) -> Result<Self, StorageError> {
        let tx = pool.begin().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to begin transaction");
            classify(e)
        })?;

        let mut guard = Self { tx, operation };
        let isolation = sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(guard.conn())
            .await;

        match isolation {
            Ok(_) => Ok(guard),
            Err(e) => Err(guard.abort(classify(e)).await),
        }
    }

    /// 当前事务的连接
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// 根据操作结果提交或回滚
    pub async fn resolve<T>(self, outcome: Result<T, StorageError>) -> Result<T, StorageError> {
        match outcome {
            Ok(value) => self.commit().await.map(|_| value),
            Err(err) => Err(self.abort(err).await),
        }
    }

    async fn commit(self) -> Result<(), StorageError> {
        let operation = self.operation;
        match self.tx.commit().await {
            Ok(()) => Ok(()),
            // 服务端拒绝提交时事务已被服务端回滚
            Err(e) if is_server_reply(&e) => {
                tracing::warn!(operation, error = %e, "Commit rejected, transaction rolled back");
                Err(classify(e))
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "Commit outcome unknown");
                Err(StorageError::Unresolved(format!("{operation}: commit failed: {e}")))
            }
        }
    }

    /// 回滚并返回原错误；回滚本身失败时返回 `Unresolved`
    pub async fn abort(self, err: StorageError) -> StorageError {
        let operation = self.operation;
        match self.tx.rollback().await {
            Ok(()) => {
                tracing::debug!(operation, error = %err, "Transaction rolled back");
                err
            }
            Err(e) if is_no_active_transaction(&e) => {
                tracing::debug!(operation, "Transaction already committed or rolled back");
                err
            }
            Err(e) => {
                tracing::error!(operation, error = %e, cause = %err, "Rollback failed");
                StorageError::Unresolved(format!("{operation}: rollback after `{err}` failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::postgres::database::{test_pool, unique_suffix};

    #[tokio::test]
    async fn test_runs_serializable() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let mut guard = TransactionGuard::begin(&pool, "test").await.unwrap();
        let level: String = sqlx::query_scalar("SHOW transaction_isolation")
            .fetch_one(guard.conn())
            .await
            .unwrap();
        assert_eq!(level, "serializable");
        guard.resolve(Ok(())).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_step_rolls_back_and_keeps_error() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let author = format!("guard-{}", unique_suffix());

        let mut guard = TransactionGuard::begin(&pool, "test").await.unwrap();
        sqlx::query("INSERT INTO books (author, title) VALUES ($1, 'rolled back')")
            .bind(&author)
            .execute(guard.conn())
            .await
            .unwrap();
        let err = guard
            .resolve::<()>(Err(StorageError::no_rows()))
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::no_rows());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author = $1")
            .bind(&author)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_rollback_on_dead_connection_is_unresolved() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let mut guard = TransactionGuard::begin(&pool, "test").await.unwrap();
        // 服务端断开当前连接，回滚无法送达
        let _ = sqlx::query("SELECT pg_terminate_backend(pg_backend_pid())")
            .execute(guard.conn())
            .await;

        let err = guard
            .resolve::<()>(Err(StorageError::no_rows()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Unresolved(_)), "{:?}", err);
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_rollback_without_open_transaction_keeps_error() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let mut guard = TransactionGuard::begin(&pool, "test").await.unwrap();
        sqlx::raw_sql("COMMIT").execute(guard.conn()).await.unwrap();

        let err = guard
            .resolve::<()>(Err(StorageError::no_rows()))
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::no_rows());
        assert!(!err.is_fatal());
    }

    async fn count_then_insert(
        guard: &mut TransactionGuard,
        author: &str,
        title: &str,
    ) -> Result<(), StorageError> {
        let _: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author = $1")
            .bind(author)
            .fetch_one(guard.conn())
            .await
            .map_err(classify)?;
        sqlx::query("INSERT INTO books (author, title) VALUES ($1, $2)")
            .bind(author)
            .bind(title)
            .execute(guard.conn())
            .await
            .map_err(classify)?;
        Ok(())
    }

    #[tokio::test]
    async fn test_write_skew_loser_gets_serialization_failure() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let author = format!("skew-{}", unique_suffix());

        let mut first = TransactionGuard::begin(&pool, "first").await.unwrap();
        let mut second = TransactionGuard::begin(&pool, "second").await.unwrap();
        // 两个事务各自读到空集后写入对方读过的范围
        let first_step = count_then_insert(&mut first, &author, "a").await;
        let second_step = count_then_insert(&mut second, &author, "b").await;
        let first_outcome = first.resolve(first_step).await;
        let second_outcome = second.resolve(second_step).await;

        let outcomes = [first_outcome, second_outcome];
        let committed = outcomes.iter().filter(|o| o.is_ok()).count();
        assert_eq!(committed, 1, "{:?}", outcomes);
        for err in outcomes.iter().filter_map(|o| o.as_ref().err()) {
            let code = match err {
                StorageError::Unclassified { code, .. } => code.as_deref(),
                _ => None,
            };
            assert_eq!(code, Some("40001"), "{:?}", err);
            assert!(!err.is_fatal());
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author = $1")
            .bind(&author)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
