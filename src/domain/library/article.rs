//! Library Context - Article

use serde::{Deserialize, Serialize};

/// 文章（书籍章节）
///
/// 所有字段始终有值，未填写时为零值（空串、0）。
/// `book` 以书名引用所属书籍，与 `author` 共同确定唯一的一本书。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// 由存储分配，新建时为 0
    #[serde(default, skip_serializing_if = "is_zero_id")]
    pub id: i64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// 章节顺序序号
    #[serde(default)]
    pub serial: f64,
}

impl Article {
    pub fn new(
        author: impl Into<String>,
        book: impl Into<String>,
        title: impl Into<String>,
        serial: f64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            author: author.into(),
            book: book.into(),
            title: title.into(),
            content: content.into(),
            serial,
        }
    }

    /// 是否尚未持久化
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

pub(crate) fn is_zero_id(id: &i64) -> bool {
    *id == 0
}
