//! PostgreSQL Book Repository

use async_trait::async_trait;

use super::entity::{ArticleDeclarationRow, BookRow};
use super::errors::classify;
use super::search::contains_pattern;
use super::transaction::TransactionGuard;
use super::DbPool;
use crate::application::ports::{BookRepositoryPort, StorageError};
use crate::domain::library::Book;

const INSERT_BOOK: &str = "INSERT INTO books (author, title) VALUES ($1, $2) RETURNING id";

const UPDATE_BOOK: &str = "UPDATE books SET title = $1, author = $2 WHERE id = $3";

const DELETE_BOOK: &str = "DELETE FROM books WHERE id = $1";

const SELECT_BOOK: &str = "SELECT id, author, title FROM books WHERE id = $1";

const SELECT_DECLARATIONS: &str = r#"
    SELECT article_id AS id, title, section_serial FROM library_view
    WHERE book_id = $1 AND article_id IS NOT NULL
    ORDER BY section_serial, article_id
"#;

const SELECT_BOOKS: &str = "SELECT id, author, title FROM books ORDER BY author, title";

const SELECT_BOOKS_BY_AUTHOR: &str =
    "SELECT id, author, title FROM books WHERE author = $1 ORDER BY title";

const SEARCH_BOOKS: &str = r#"
    SELECT DISTINCT book_id AS id, author, book AS title FROM library_view
    WHERE content LIKE $1 ESCAPE '\'
    ORDER BY author, title
"#;

/// PostgreSQL Book Repository
pub struct PostgresBookRepository {
    pool: DbPool,
}

impl PostgresBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_books(
        &self,
        operation: &'static str,
        sql: &'static str,
        filter: Option<&str>,
    ) -> Result<Vec<Book>, StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, operation).await?;

        let mut query = sqlx::query_as::<_, BookRow>(sql);
        if let Some(value) = filter {
            query = query.bind(value);
        }
        let outcome = query
            .fetch_all(tx.conn())
            .await
            .map(|rows| rows.into_iter().map(Book::from).collect())
            .map_err(classify);

        tx.resolve(outcome).await
    }
}

#[async_trait]
impl BookRepositoryPort for PostgresBookRepository {
    async fn save(&self, book: &Book) -> Result<i64, StorageError> {
        let row = BookRow::from(book);

        let mut tx = TransactionGuard::begin(&self.pool, "save_book").await?;
        let outcome = sqlx::query_scalar::<_, i64>(INSERT_BOOK)
            .bind(&row.author)
            .bind(&row.title)
            .fetch_one(tx.conn())
            .await
            .map_err(classify);

        tx.resolve(outcome).await
    }

    async fn update(&self, book: &Book, id: i64) -> Result<(), StorageError> {
        let row = BookRow::from(book);

        let mut tx = TransactionGuard::begin(&self.pool, "update_book").await?;
        let outcome = sqlx::query(UPDATE_BOOK)
            .bind(&row.title)
            .bind(&row.author)
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(classify)
            .and_then(|result| StorageError::expect_one_row(result.rows_affected()));

        tx.resolve(outcome).await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "delete_book").await?;
        let outcome = sqlx::query(DELETE_BOOK)
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(classify)
            .and_then(|result| StorageError::expect_one_row(result.rows_affected()));

        tx.resolve(outcome).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Book, StorageError> {
        let mut tx = TransactionGuard::begin(&self.pool, "find_book").await?;

        let outcome = async {
            let mut row = sqlx::query_as::<_, BookRow>(SELECT_BOOK)
                .bind(id)
                .fetch_one(tx.conn())
                .await
                .map_err(classify)?;

            row.articles = sqlx::query_as::<_, ArticleDeclarationRow>(SELECT_DECLARATIONS)
                .bind(id)
                .fetch_all(tx.conn())
                .await
                .map_err(classify)?;

            Ok::<_, StorageError>(Book::from(row))
        }
        .await;

        tx.resolve(outcome).await
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, StorageError> {
        self.fetch_books("list_books_by_author", SELECT_BOOKS_BY_AUTHOR, Some(author))
            .await
    }

    async fn find_all(&self) -> Result<Vec<Book>, StorageError> {
        self.fetch_books("list_books", SELECT_BOOKS, None).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Book>, StorageError> {
        let pattern = contains_pattern(keyword);
        self.fetch_books("search_books", SEARCH_BOOKS, Some(&pattern))
            .await
    }
}
