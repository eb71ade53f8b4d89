//! Book HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateBook, DeleteBook, GetBook, ListBooks, ListBooksByAuthor, SearchBooks, UpdateBook,
};
use crate::domain::library::Book;
use crate::infrastructure::http::dto::{non_empty, ApiResponse, BooksQuery};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

fn validate(book: &Book) -> Result<(), ApiError> {
    if book.is_complete() {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "book author and title are required".to_string(),
        ))
    }
}

/// 获取书籍列表
///
/// search 优先于 author；两者都没有时返回全部书籍。
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BooksQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let Query(query) = query?;

    let books = match (non_empty(query.search), non_empty(query.author)) {
        (Some(keyword), _) => {
            state
                .search_books_handler
                .handle(SearchBooks { keyword })
                .await?
        }
        (None, Some(author)) => {
            state
                .list_books_by_author_handler
                .handle(ListBooksByAuthor { author })
                .await?
        }
        (None, None) => state.list_books_handler.handle(ListBooks).await?,
    };

    Ok(Json(ApiResponse::ok(books)))
}

/// 获取指定书籍及其目录
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let Path(id) = id?;
    let book = state.get_book_handler.handle(GetBook { id }).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// 添加书籍
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<i64>>), ApiError> {
    let Json(book) = body?;
    validate(&book)?;

    if book.id != 0 {
        return Err(ApiError::BadRequest(format!(
            "new book must not carry an id, got {}",
            book.id
        )));
    }

    let id = state.create_book_handler.handle(CreateBook { book }).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(id))))
}

/// 修改书籍作者与书名
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(book) = body?;
    validate(&book)?;
    let Path(id) = id?;

    if book.id != id {
        return Err(ApiError::BadRequest(format!(
            "path id {} does not match body id {}",
            id, book.id
        )));
    }

    state
        .update_book_handler
        .handle(UpdateBook { id, book })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 删除书籍；仍有文章引用时失败
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.delete_book_handler.handle(DeleteBook { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
