//! Article Commands

use crate::domain::library::Article;

/// 新建文章命令
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub article: Article,
}

/// 更新文章命令
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub id: i64,
    pub article: Article,
}

/// 删除文章命令
#[derive(Debug, Clone)]
pub struct DeleteArticle {
    pub id: i64,
}
