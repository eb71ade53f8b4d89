//! PostgreSQL Persistence - PostgreSQL 数据库持久化实现
//!
//! 每个仓储操作运行在独立的 SERIALIZABLE 事务中（见 `transaction`），
//! 驱动错误在 `errors` 中归类后才离开本模块。

mod article_repo;
mod book_repo;
mod database;
mod entity;
mod errors;
mod search;
mod transaction;

pub use article_repo::*;
pub use book_repo::*;
pub use database::{create_pool, ensure_schema, DatabaseConfig, DbPool};
pub use entity::{ArticleDeclarationRow, ArticleRow, BookRow};
pub use transaction::TransactionGuard;
