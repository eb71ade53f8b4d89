//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（PostgreSQL，以及测试用的内存实现）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::library::{Article, Book};

/// 约束冲突类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// 唯一约束
    Unique,
    /// 非空约束
    NotNull,
    /// 外键约束
    ForeignKey,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Unique => "unique_violation",
            ConstraintKind::NotNull => "not_null_violation",
            ConstraintKind::ForeignKey => "foreign_key_violation",
        }
    }
}

/// 预编译语句错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    DuplicatePreparedStatement,
    InvalidPreparedStatementDefinition,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::DuplicatePreparedStatement => "duplicate_prepared_statement",
            StatementKind::InvalidPreparedStatementDefinition => {
                "invalid_prepared_statement_definition"
            }
        }
    }
}

/// 存储错误
///
/// 驱动层错误在存储适配器边界统一归类为以下几种，上层不会见到驱动类型。
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Constraint violation: {}", .0.as_str())]
    Constraint(ConstraintKind),

    #[error("Prepared statement error: {}", .0.as_str())]
    Statement(StatementKind),

    /// 影响（或查到）的行数与预期不符
    #[error("Expected {expected} rows affected, got {actual}")]
    Cardinality { expected: u64, actual: u64 },

    #[error("Database error ({}): {message}", .code.as_deref().unwrap_or("-"))]
    Unclassified {
        code: Option<String>,
        message: String,
    },

    /// 事务本身无法确定提交或回滚，连接状态未知
    #[error("Transaction unresolved: {0}")]
    Unresolved(String),
}

impl StorageError {
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            code: None,
            message: message.into(),
        }
    }

    /// 单行操作未命中
    pub fn no_rows() -> Self {
        Self::Cardinality {
            expected: 1,
            actual: 0,
        }
    }

    /// 要求恰好影响一行
    pub fn expect_one_row(rows_affected: u64) -> Result<(), Self> {
        if rows_affected == 1 {
            Ok(())
        } else {
            Err(Self::Cardinality {
                expected: 1,
                actual: rows_affected,
            })
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::Constraint(ConstraintKind::Unique))
    }

    /// 是否为进程级致命错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, StorageError::Unresolved(_))
    }
}

// ============================================================================
// Article Repository
// ============================================================================

/// Article Repository Port
#[async_trait]
pub trait ArticleRepositoryPort: Send + Sync {
    /// 保存文章，返回新 ID；所属书籍不存在时先创建
    async fn insert(&self, article: &Article) -> Result<i64, StorageError>;

    /// 按 ID 更新文章全部字段
    async fn update(&self, article: &Article, id: i64) -> Result<(), StorageError>;

    /// 删除文章
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// 根据 ID 查找文章
    async fn find_by_id(&self, id: i64) -> Result<Article, StorageError>;

    /// 获取全部文章（不含正文）
    async fn find_all(&self) -> Result<Vec<Article>, StorageError>;

    /// 全文搜索正文（结果不含正文）
    async fn search(&self, keyword: &str) -> Result<Vec<Article>, StorageError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍，返回新 ID
    async fn save(&self, book: &Book) -> Result<i64, StorageError>;

    /// 按 ID 更新作者与书名
    async fn update(&self, book: &Book, id: i64) -> Result<(), StorageError>;

    /// 删除书籍
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// 根据 ID 查找书籍，附带按序号排列的文章目录
    async fn find_by_id(&self, id: i64) -> Result<Book, StorageError>;

    /// 获取指定作者的书籍
    async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, StorageError>;

    /// 获取全部书籍（不含目录）
    async fn find_all(&self) -> Result<Vec<Book>, StorageError>;

    /// 搜索正文包含关键词的书籍
    async fn search(&self, keyword: &str) -> Result<Vec<Book>, StorageError>;
}
