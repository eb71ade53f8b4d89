//! Library Context - 图书馆限界上下文
//!
//! 职责:
//! - 书籍与文章的领域模型
//! - 书籍目录（ArticleDeclaration）

mod article;
mod book;

pub use article::Article;
pub use book::{ArticleDeclaration, Book};
