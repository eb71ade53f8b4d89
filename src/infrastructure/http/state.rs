//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateArticleHandler, CreateBookHandler, DeleteArticleHandler, DeleteBookHandler,
    UpdateArticleHandler, UpdateBookHandler,
    // Query handlers
    GetArticleHandler, GetBookHandler, ListArticlesHandler, ListBooksByAuthorHandler,
    ListBooksHandler, SearchArticlesHandler, SearchBooksHandler,
    // Ports
    ArticleRepositoryPort, BookRepositoryPort, FatalSignal,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_article_handler: CreateArticleHandler,
    pub update_article_handler: UpdateArticleHandler,
    pub delete_article_handler: DeleteArticleHandler,
    pub create_book_handler: CreateBookHandler,
    pub update_book_handler: UpdateBookHandler,
    pub delete_book_handler: DeleteBookHandler,

    // ========== Query Handlers ==========
    pub get_article_handler: GetArticleHandler,
    pub list_articles_handler: ListArticlesHandler,
    pub search_articles_handler: SearchArticlesHandler,
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub list_books_by_author_handler: ListBooksByAuthorHandler,
    pub search_books_handler: SearchBooksHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        article_repo: Arc<dyn ArticleRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
        fatal: FatalSignal,
    ) -> Self {
        Self {
            // Command handlers
            create_article_handler: CreateArticleHandler::new(article_repo.clone(), fatal.clone()),
            update_article_handler: UpdateArticleHandler::new(article_repo.clone(), fatal.clone()),
            delete_article_handler: DeleteArticleHandler::new(article_repo.clone(), fatal.clone()),
            create_book_handler: CreateBookHandler::new(book_repo.clone(), fatal.clone()),
            update_book_handler: UpdateBookHandler::new(book_repo.clone(), fatal.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone(), fatal.clone()),

            // Query handlers
            get_article_handler: GetArticleHandler::new(article_repo.clone(), fatal.clone()),
            list_articles_handler: ListArticlesHandler::new(article_repo.clone(), fatal.clone()),
            search_articles_handler: SearchArticlesHandler::new(article_repo, fatal.clone()),
            get_book_handler: GetBookHandler::new(book_repo.clone(), fatal.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone(), fatal.clone()),
            list_books_by_author_handler: ListBooksByAuthorHandler::new(
                book_repo.clone(),
                fatal.clone(),
            ),
            search_books_handler: SearchBooksHandler::new(book_repo, fatal),
        }
    }
}
