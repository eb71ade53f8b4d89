//! Library Context - Book

use serde::{Deserialize, Serialize};

use super::article::is_zero_id;

/// 文章基本信息（书籍目录项）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDeclaration {
    #[serde(default, skip_serializing_if = "is_zero_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// 章节顺序序号
    #[serde(default, skip_serializing_if = "is_zero_serial")]
    pub serial: f64,
}

/// 书籍
///
/// `articles` 只在按 ID 获取时填充，按章节序号升序排列；
/// 列表、搜索结果中为空。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "is_zero_id")]
    pub id: i64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<ArticleDeclaration>,
}

impl Book {
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            author: author.into(),
            title: title.into(),
            articles: Vec::new(),
        }
    }

    /// 作者与书名均不可为空
    pub fn is_complete(&self) -> bool {
        !self.author.trim().is_empty() && !self.title.trim().is_empty()
    }
}

fn is_zero_serial(serial: &f64) -> bool {
    *serial == 0.0
}
