//! Book Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateBook, DeleteBook, UpdateBook};
use crate::application::error::ApplicationError;
use crate::application::fatal::FatalSignal;
use crate::application::ports::BookRepositoryPort;

/// CreateBook Handler
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl CreateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, command: CreateBook) -> Result<i64, ApplicationError> {
        let id = self
            .book_repo
            .save(&command.book)
            .await
            .map_err(|e| ApplicationError::from_storage("save_book", e, &self.fatal))?;

        tracing::info!(
            book_id = id,
            author = %command.book.author,
            title = %command.book.title,
            "Book created"
        );

        Ok(id)
    }
}

/// UpdateBook Handler
pub struct UpdateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl UpdateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, command: UpdateBook) -> Result<(), ApplicationError> {
        self.book_repo
            .update(&command.book, command.id)
            .await
            .map_err(|e| ApplicationError::from_storage("update_book", e, &self.fatal))?;

        tracing::info!(book_id = command.id, "Book updated");
        Ok(())
    }
}

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    fatal: FatalSignal,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, fatal: FatalSignal) -> Self {
        Self { book_repo, fatal }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        self.book_repo
            .delete(command.id)
            .await
            .map_err(|e| ApplicationError::from_storage("delete_book", e, &self.fatal))?;

        tracing::info!(book_id = command.id, "Book deleted");
        Ok(())
    }
}
