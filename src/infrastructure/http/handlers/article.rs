//! Article HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateArticle, DeleteArticle, GetArticle, ListArticles, SearchArticles, UpdateArticle,
};
use crate::domain::library::Article;
use crate::infrastructure::http::dto::{non_empty, ApiResponse, ArticlesQuery};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取文章列表；带 search 参数时按正文子串搜索
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Article>>>, ApiError> {
    let Query(query) = query?;

    let articles = match non_empty(query.search) {
        Some(keyword) => {
            state
                .search_articles_handler
                .handle(SearchArticles { keyword })
                .await?
        }
        None => state.list_articles_handler.handle(ListArticles).await?,
    };

    Ok(Json(ApiResponse::ok(articles)))
}

/// 获取指定文章
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Article>>, ApiError> {
    let Path(id) = id?;
    let article = state.get_article_handler.handle(GetArticle { id }).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// 添加文章，请求体中不应带 ID
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Article>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<i64>>), ApiError> {
    let Json(article) = body?;

    if !article.is_new() {
        return Err(ApiError::BadRequest(format!(
            "new article must not carry an id, got {}",
            article.id
        )));
    }

    let id = state
        .create_article_handler
        .handle(CreateArticle { article })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(id))))
}

/// 修改指定文章，URL 中的 ID 须与请求体一致
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Article>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(article) = body?;
    let Path(id) = id?;

    if article.id != id {
        return Err(ApiError::BadRequest(format!(
            "path id {} does not match body id {}",
            id, article.id
        )));
    }

    state
        .update_article_handler
        .handle(UpdateArticle { id, article })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 删除指定文章
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state
        .delete_article_handler
        .handle(DeleteArticle { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
