//! Query Handlers 实现

mod article_handlers;
mod book_handlers;

pub use article_handlers::*;
pub use book_handlers::*;
