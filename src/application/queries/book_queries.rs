//! Book Queries

/// 按 ID 获取书籍（含目录）
#[derive(Debug, Clone)]
pub struct GetBook {
    pub id: i64,
}

/// 获取全部书籍
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 获取指定作者的书籍
#[derive(Debug, Clone)]
pub struct ListBooksByAuthor {
    pub author: String,
}

/// 搜索正文包含关键词的书籍
#[derive(Debug, Clone)]
pub struct SearchBooks {
    pub keyword: String,
}
