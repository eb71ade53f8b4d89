//! Entity Mapper - 领域模型与数据行之间的转换
//!
//! 数据行的每一列都可为空；领域模型的字段始终有值。
//! - 领域 → 数据行：所有列都标记为有值，零值（空串、0）也照常写出，不会产生 NULL
//! - 数据行 → 领域：NULL 映射为零值
//!
//! 因此部分字段更新无法通过这一层表达：未填写的字段会以零值写回。

use sqlx::FromRow;

use crate::domain::library::{Article, ArticleDeclaration, Book};

/// articles 表的一行；列表查询不选 content、section_serial 时对应字段为 None
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct ArticleRow {
    #[sqlx(default)]
    pub id: Option<i64>,
    #[sqlx(default)]
    pub book: Option<String>,
    #[sqlx(default)]
    pub author: Option<String>,
    #[sqlx(default)]
    pub title: Option<String>,
    #[sqlx(default)]
    pub section_serial: Option<f64>,
    #[sqlx(default)]
    pub content: Option<String>,
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            id: Some(article.id),
            book: Some(article.book.clone()),
            author: Some(article.author.clone()),
            title: Some(article.title.clone()),
            section_serial: Some(article.serial),
            content: Some(article.content.clone()),
        }
    }
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            author: row.author.unwrap_or_default(),
            book: row.book.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
            serial: row.section_serial.unwrap_or_default(),
        }
    }
}

/// library_view 中的文章目录项
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct ArticleDeclarationRow {
    #[sqlx(default)]
    pub id: Option<i64>,
    #[sqlx(default)]
    pub title: Option<String>,
    #[sqlx(default)]
    pub section_serial: Option<f64>,
}

impl From<&ArticleDeclaration> for ArticleDeclarationRow {
    fn from(declaration: &ArticleDeclaration) -> Self {
        Self {
            id: Some(declaration.id),
            title: Some(declaration.title.clone()),
            section_serial: Some(declaration.serial),
        }
    }
}

impl From<ArticleDeclarationRow> for ArticleDeclaration {
    fn from(row: ArticleDeclarationRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            serial: row.section_serial.unwrap_or_default(),
        }
    }
}

/// books 表的一行，目录单独查询后填入
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct BookRow {
    #[sqlx(default)]
    pub id: Option<i64>,
    #[sqlx(default)]
    pub author: Option<String>,
    #[sqlx(default)]
    pub title: Option<String>,
    #[sqlx(skip)]
    pub articles: Vec<ArticleDeclarationRow>,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            author: Some(book.author.clone()),
            title: Some(book.title.clone()),
            articles: book.articles.iter().map(ArticleDeclarationRow::from).collect(),
        }
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            author: row.author.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            articles: row.articles.into_iter().map(ArticleDeclaration::from).collect(),
        }
    }
}
