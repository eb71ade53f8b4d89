//! Memory Layer - 内存实现
//!
//! 仓储端口的内存替身，与 PostgreSQL 实现可互换

mod library;

pub use library::InMemoryLibrary;
