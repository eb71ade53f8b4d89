//! PostgreSQL Article Repository

use async_trait::async_trait;

use super::entity::ArticleRow;
use super::errors::classify;
use super::search::contains_pattern;
use super::transaction::TransactionGuard;
use super::DbPool;
use crate::application::ports::{ArticleRepositoryPort, StorageError};
use crate::domain::library::Article;

const INSERT_BOOK: &str = "INSERT INTO books (author, title) VALUES ($1, $2)";

const INSERT_ARTICLE: &str = r#"
    INSERT INTO articles (book, author, title, section_serial, content)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

const UPDATE_ARTICLE: &str = r#"
    UPDATE articles
    SET book = $1, title = $2, section_serial = $3, content = $4, author = $5
    WHERE id = $6
"#;

const DELETE_ARTICLE: &str = "DELETE FROM articles WHERE id = $1";

const SELECT_ARTICLE: &str =
    "SELECT id, book, author, title, section_serial, content FROM articles WHERE id = $1";

const SELECT_ARTICLES: &str = r#"
    SELECT id, book, author, title FROM articles
    ORDER BY author, book, section_serial
    LIMIT ALL OFFSET $1
"#;

const SEARCH_ARTICLES: &str = r#"
    SELECT id, book, author, title FROM articles
    WHERE content LIKE $1 ESCAPE '\'
    ORDER BY author, book, section_serial
"#;

/// PostgreSQL Article Repository
pub struct PostgresArticleRepository {
    pool: DbPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 确保所属书籍存在（独立事务）
    ///
    /// 唯一约束冲突说明书籍已存在，视为成功。
    async fn ensure_book(&self, author: &str, title: &str) -> Result<(), StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "ensure_book").await?;

        let outcome = sqlx::query(INSERT_BOOK)
            .bind(author)
            .bind(title)
            .execute(tx.conn())
            .await
            .map(|_| ())
            .map_err(classify);

        match tx.resolve(outcome).await {
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(author, title, "Book already exists");
                Ok(())
            }
            Ok(()) => {
                tracing::info!(author, title, "Book created for first article");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ArticleRepositoryPort for PostgresArticleRepository {
    async fn insert(&self, article: &Article) -> Result<i64, StorageError> {
        let row = ArticleRow::from(article);

        self.ensure_book(&article.author, &article.book).await?;

        let mut tx = TransactionGuard::begin(&self.pool, "insert_article").await?;
        let outcome = sqlx::query_scalar::<_, i64>(INSERT_ARTICLE)
            .bind(&row.book)
            .bind(&row.author)
            .bind(&row.title)
            .bind(row.section_serial)
            .bind(&row.content)
            .fetch_one(tx.conn())
            .await
            .map_err(classify);

        tx.resolve(outcome).await
    }

    async fn update(&self, article: &Article, id: i64) -> Result<(), StorageError> {
        let row = ArticleRow::from(article);

        let mut tx = TransactionGuard::begin(&self.pool, "update_article").await?;
        let outcome = sqlx::query(UPDATE_ARTICLE)
            .bind(&row.book)
            .bind(&row.title)
            .bind(row.section_serial)
            .bind(&row.content)
            .bind(&row.author)
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(classify)
            .and_then(|result| StorageError::expect_one_row(result.rows_affected()));

        tx.resolve(outcome).await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "delete_article").await?;
        let outcome = sqlx::query(DELETE_ARTICLE)
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(classify)
            .and_then(|result| StorageError::expect_one_row(result.rows_affected()));

        tx.resolve(outcome).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Article, StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "find_article").await?;
        let outcome = sqlx::query_as::<_, ArticleRow>(SELECT_ARTICLE)
            .bind(id)
            .fetch_one(tx.conn())
            .await
            .map(Article::from)
            .map_err(classify);

        tx.resolve(outcome).await
    }

    async fn find_all(&self) -> Result<Vec<Article>, StorageError> {
        const OFFSET: i64 = 0;

        let mut tx = TransactionGuard::begin(&self.pool, "list_articles").await?;
        let outcome = sqlx::query_as::<_, ArticleRow>(SELECT_ARTICLES)
            .bind(OFFSET)
            .fetch_all(tx.conn())
            .await
            .map(|rows| rows.into_iter().map(Article::from).collect())
            .map_err(classify);

        tx.resolve(outcome).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Article>, StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "search_articles").await?;
        let outcome = sqlx::query_as::<_, ArticleRow>(SEARCH_ARTICLES)
            .bind(contains_pattern(keyword))
            .fetch_all(tx.conn())
            .await
            .map(|rows| rows.into_iter().map(Article::from).collect())
            .map_err(classify);

        tx.resolve(outcome).await
    }
}
