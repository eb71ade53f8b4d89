//! Article Queries

/// 按 ID 获取文章
#[derive(Debug, Clone)]
pub struct GetArticle {
    pub id: i64,
}

/// 获取全部文章
#[derive(Debug, Clone)]
pub struct ListArticles;

/// 按关键词搜索文章
#[derive(Debug, Clone)]
pub struct SearchArticles {
    pub keyword: String,
}
