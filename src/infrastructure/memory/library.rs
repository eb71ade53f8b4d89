//! In-Memory Library - 仓储端口的内存实现
//!
//! 与 PostgreSQL 实现遵守相同的约束：(author, title) 唯一、文章外键指向书籍、
//! 更新/删除必须恰好命中一行、列表与搜索结果不含正文。用于用例与 HTTP 层测试。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::{
    ArticleRepositoryPort, BookRepositoryPort, ConstraintKind, StorageError,
};
use crate::domain::library::{Article, ArticleDeclaration, Book};

#[derive(Debug, Clone)]
struct BookRecord {
    author: String,
    title: String,
}

#[derive(Debug, Default)]
struct Tables {
    books: BTreeMap<i64, BookRecord>,
    articles: BTreeMap<i64, Article>,
    next_book_id: i64,
    next_article_id: i64,
    fail_next: Option<StorageError>,
}

impl Tables {
    fn book_exists(&self, author: &str, title: &str) -> bool {
        self.books
            .values()
            .any(|b| b.author == author && b.title == title)
    }

    fn insert_book(&mut self, author: &str, title: &str) -> Result<i64, StorageError> {
        if self.book_exists(author, title) {
            return Err(StorageError::Constraint(ConstraintKind::Unique));
        }
        self.next_book_id += 1;
        let id = self.next_book_id;
        self.books.insert(
            id,
            BookRecord {
                author: author.to_string(),
                title: title.to_string(),
            },
        );
        Ok(id)
    }

    fn declarations(&self, book: &BookRecord) -> Vec<ArticleDeclaration> {
        let mut articles: Vec<&Article> = self
            .articles
            .values()
            .filter(|a| a.author == book.author && a.book == book.title)
            .collect();
        articles.sort_by(|a, b| a.serial.total_cmp(&b.serial).then(a.id.cmp(&b.id)));
        articles
            .into_iter()
            .map(|a| ArticleDeclaration {
                id: a.id,
                title: a.title.clone(),
                serial: a.serial,
            })
            .collect()
    }
}

/// 列表投影：不含正文与序号，按作者、书名、序号排序
fn article_listing<'a>(articles: impl Iterator<Item = &'a Article>) -> Vec<Article> {
    let mut selected: Vec<&Article> = articles.collect();
    selected.sort_by(|a, b| {
        a.author
            .cmp(&b.author)
            .then_with(|| a.book.cmp(&b.book))
            .then_with(|| a.serial.total_cmp(&b.serial))
            .then(a.id.cmp(&b.id))
    });
    selected
        .into_iter()
        .map(|a| Article {
            id: a.id,
            author: a.author.clone(),
            book: a.book.clone(),
            title: a.title.clone(),
            content: String::new(),
            serial: 0.0,
        })
        .collect()
}

fn book_listing(id: i64, record: &BookRecord) -> Book {
    Book {
        id,
        author: record.author.clone(),
        title: record.title.clone(),
        articles: Vec::new(),
    }
}

fn sort_books(books: &mut [Book]) {
    books.sort_by(|a, b| a.author.cmp(&b.author).then_with(|| a.title.cmp(&b.title)));
}

/// 正文包含关键词（子串匹配，区分大小写，与 `LIKE '%kw%'` 一致）
fn matches_keyword(content: &str, keyword: &str) -> bool {
    content.contains(keyword)
}

/// 内存书库
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    tables: Mutex<Tables>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 下一次操作返回指定错误
    pub fn fail_next(&self, err: StorageError) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.fail_next = Some(err);
        }
    }

    pub fn book_count(&self) -> usize {
        self.tables.lock().map(|t| t.books.len()).unwrap_or_default()
    }

    pub fn article_count(&self) -> usize {
        self.tables
            .lock()
            .map(|t| t.articles.len())
            .unwrap_or_default()
    }

    fn open(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StorageError::Unresolved("in-memory library poisoned".to_string()))?;
        match tables.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(tables),
        }
    }
}

#[async_trait]
impl ArticleRepositoryPort for InMemoryLibrary {
    async fn insert(&self, article: &Article) -> Result<i64, StorageError> {
        let mut tables = self.open()?;

        match tables.insert_book(&article.author, &article.book) {
            Ok(_) | Err(StorageError::Constraint(ConstraintKind::Unique)) => {}
            Err(e) => return Err(e),
        }

        tables.next_article_id += 1;
        let id = tables.next_article_id;
        tables.articles.insert(
            id,
            Article {
                id,
                ..article.clone()
            },
        );
        Ok(id)
    }

    async fn update(&self, article: &Article, id: i64) -> Result<(), StorageError> {
        let mut tables = self.open()?;

        if !tables.articles.contains_key(&id) {
            return Err(StorageError::no_rows());
        }
        if !tables.book_exists(&article.author, &article.book) {
            return Err(StorageError::Constraint(ConstraintKind::ForeignKey));
        }
        tables.articles.insert(
            id,
            Article {
                id,
                ..article.clone()
            },
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut tables = self.open()?;
        tables
            .articles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(StorageError::no_rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Article, StorageError> {
        let tables = self.open()?;
        tables
            .articles
            .get(&id)
            .cloned()
            .ok_or_else(StorageError::no_rows)
    }

    async fn find_all(&self) -> Result<Vec<Article>, StorageError> {
        let tables = self.open()?;
        Ok(article_listing(tables.articles.values()))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Article>, StorageError> {
        let tables = self.open()?;
        Ok(article_listing(
            tables
                .articles
                .values()
                .filter(|a| matches_keyword(&a.content, keyword)),
        ))
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryLibrary {
    async fn save(&self, book: &Book) -> Result<i64, StorageError> {
        let mut tables = self.open()?;
        tables.insert_book(&book.author, &book.title)
    }

    async fn update(&self, book: &Book, id: i64) -> Result<(), StorageError> {
        let mut tables = self.open()?;

        let old = tables.books.get(&id).cloned().ok_or_else(StorageError::no_rows)?;
        let collides = tables
            .books
            .iter()
            .any(|(other, b)| *other != id && b.author == book.author && b.title == book.title);
        if collides {
            return Err(StorageError::Constraint(ConstraintKind::Unique));
        }

        // ON UPDATE CASCADE
        for article in tables.articles.values_mut() {
            if article.author == old.author && article.book == old.title {
                article.author = book.author.clone();
                article.book = book.title.clone();
            }
        }
        tables.books.insert(
            id,
            BookRecord {
                author: book.author.clone(),
                title: book.title.clone(),
            },
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut tables = self.open()?;

        let record = tables.books.get(&id).ok_or_else(StorageError::no_rows)?;
        let referenced = tables
            .articles
            .values()
            .any(|a| a.author == record.author && a.book == record.title);
        if referenced {
            return Err(StorageError::Constraint(ConstraintKind::ForeignKey));
        }
        tables.books.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Book, StorageError> {
        let tables = self.open()?;
        let record = tables.books.get(&id).ok_or_else(StorageError::no_rows)?;
        Ok(Book {
            articles: tables.declarations(record),
            ..book_listing(id, record)
        })
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, StorageError> {
        let tables = self.open()?;
        let mut books: Vec<Book> = tables
            .books
            .iter()
            .filter(|(_, b)| b.author == author)
            .map(|(id, b)| book_listing(*id, b))
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn find_all(&self) -> Result<Vec<Book>, StorageError> {
        let tables = self.open()?;
        let mut books: Vec<Book> = tables
            .books
            .iter()
            .map(|(id, b)| book_listing(*id, b))
            .collect();
        sort_books(&mut books);
        Ok(books)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Book>, StorageError> {
        let tables = self.open()?;
        let mut books: Vec<Book> = tables
            .books
            .iter()
            .filter(|(_, b)| {
                tables.articles.values().any(|a| {
                    a.author == b.author
                        && a.book == b.title
                        && matches_keyword(&a.content, keyword)
                })
            })
            .map(|(id, b)| book_listing(*id, b))
            .collect();
        sort_books(&mut books);
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching() {
        assert!(matches_keyword("hello world", "world"));
        assert!(matches_keyword("hello world", "wor"));
        assert!(matches_keyword("hello world", ""));
        assert!(!matches_keyword("Hello, World!", "hello world"));
        assert!(!matches_keyword("50% off", "50_"));
    }

    #[tokio::test]
    async fn test_search_finds_words_inside_a_sentence() {
        let library = InMemoryLibrary::new();
        let id = ArticleRepositoryPort::insert(
            &library,
            &Article::new("鲁迅", "呐喊", "狂人日记", 1.0, "今天晚上，很好的月光。"),
        )
        .await
        .unwrap();

        for keyword in ["今天晚上", "月光", "很好"] {
            let found = ArticleRepositoryPort::search(&library, keyword).await.unwrap();
            let ids: Vec<i64> = found.iter().map(|a| a.id).collect();
            assert_eq!(ids, vec![id], "keyword {}", keyword);
        }
        assert!(ArticleRepositoryPort::search(&library, "星光")
            .await
            .unwrap()
            .is_empty());

        let books = BookRepositoryPort::search(&library, "月光").await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "呐喊");
    }

    #[tokio::test]
    async fn test_example_two_articles_one_book() {
        let library = InMemoryLibrary::new();
        ArticleRepositoryPort::insert(&library, &Article::new("A", "B", "T1", 1.0, "x"))
            .await
            .unwrap();
        ArticleRepositoryPort::insert(&library, &Article::new("A", "B", "T2", 2.0, "y"))
            .await
            .unwrap();

        assert_eq!(library.book_count(), 1);
        assert_eq!(library.article_count(), 2);

        let hits = ArticleRepositoryPort::search(&library, "x").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "T1");
    }

    #[tokio::test]
    async fn test_fail_next_applies_once() {
        let library = InMemoryLibrary::new();
        library.fail_next(StorageError::unclassified("boom"));

        assert!(BookRepositoryPort::find_all(&library).await.is_err());
        assert!(BookRepositoryPort::find_all(&library).await.is_ok());
    }

    #[tokio::test]
    async fn test_book_with_articles_cannot_be_deleted() {
        let library = InMemoryLibrary::new();
        let article_id =
            ArticleRepositoryPort::insert(&library, &Article::new("A", "B", "T1", 1.0, "x"))
                .await
                .unwrap();
        let book_id = BookRepositoryPort::find_all(&library).await.unwrap()[0].id;

        assert_eq!(
            BookRepositoryPort::delete(&library, book_id).await,
            Err(StorageError::Constraint(ConstraintKind::ForeignKey))
        );
        ArticleRepositoryPort::delete(&library, article_id)
            .await
            .unwrap();
        BookRepositoryPort::delete(&library, book_id).await.unwrap();
        assert_eq!(
            BookRepositoryPort::delete(&library, book_id).await,
            Err(StorageError::no_rows())
        );
    }
}
