//! Book Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::fatal::FatalSignal;
use crate::application::ports::BookRepositoryPort;
use crate::application::queries::{GetBook, ListBooks, ListBooksByAuthor, SearchBooks};
use crate::domain::library::Book;

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, query: GetBook) -> Result<Book, ApplicationError> {
        self.book_repo
            .find_by_id(query.id)
            .await
            .map_err(|e| ApplicationError::from_storage("find_book", e, &self.fatal))
    }
}

/// ListBooks Handler - 书籍目录，不含章节信息
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<Book>, ApplicationError> {
        self.book_repo
            .find_all()
            .await
            .map_err(|e| ApplicationError::from_storage("list_books", e, &self.fatal))
    }
}

/// ListBooksByAuthor Handler
pub struct ListBooksByAuthorHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl ListBooksByAuthorHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, query: ListBooksByAuthor) -> Result<Vec<Book>, ApplicationError> {
        self.book_repo
            .find_by_author(&query.author)
            .await
            .map_err(|e| ApplicationError::from_storage("list_books_by_author", e, &self.fatal))
    }
}

/// SearchBooks Handler - 搜索包含关键词内容文章的所有书籍
pub struct SearchBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl SearchBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, query: SearchBooks) -> Result<Vec<Book>, ApplicationError> {
        self.book_repo
            .search(&query.keyword)
            .await
            .map_err(|e| ApplicationError::from_storage("search_books", e, &self.fatal))
    }
}
