//! Library - 电子图书、文章管理系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Library Context: 书籍、文章、书籍目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ArticleRepository, BookRepository）与存储错误分类
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//! - FatalSignal: 事务无法确定结果时的进程级信号
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: PostgreSQL 事务仓储
//! - Memory: 仓储的内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
