//! Persistence Layer - 数据持久化
//!
//! PostgreSQL 存储实现

pub mod postgres;

pub use self::postgres::{PostgresArticleRepository, PostgresBookRepository};
