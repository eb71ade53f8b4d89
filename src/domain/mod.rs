//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Library Context: 书籍与文章

pub mod library;
