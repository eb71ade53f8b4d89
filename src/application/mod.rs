//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ArticleRepository、BookRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义
//! - fatal: 进程级致命错误信号

pub mod commands;
pub mod error;
pub mod fatal;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Article commands
    CreateArticle,
    DeleteArticle,
    UpdateArticle,
    // Book commands
    CreateBook,
    DeleteBook,
    UpdateBook,
    // Handlers
    handlers::{
        CreateArticleHandler, CreateBookHandler, DeleteArticleHandler, DeleteBookHandler,
        UpdateArticleHandler, UpdateBookHandler,
    },
};

pub use error::ApplicationError;
pub use fatal::FatalSignal;

pub use ports::{
    ArticleRepositoryPort, BookRepositoryPort, ConstraintKind, StatementKind, StorageError,
};

pub use queries::{
    // Article queries
    GetArticle,
    ListArticles,
    SearchArticles,
    // Book queries
    GetBook,
    ListBooks,
    ListBooksByAuthor,
    SearchBooks,
    // Handlers
    handlers::{
        GetArticleHandler, GetBookHandler, ListArticlesHandler, ListBooksByAuthorHandler,
        ListBooksHandler, SearchArticlesHandler, SearchBooksHandler,
    },
};
