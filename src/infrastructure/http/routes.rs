//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET              健康检查
//! - /api/articles          GET|POST         文章列表（?search= 正文搜索）/ 添加文章
//! - /api/articles/:id      GET|PUT|DELETE   获取 / 修改 / 删除文章
//! - /api/books             GET|POST         书籍列表（?search= 或 ?author=）/ 添加书籍
//! - /api/books/:id         GET|PUT|DELETE   获取（含目录）/ 修改 / 删除书籍

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/articles", article_routes())
        .nest("/books", book_routes())
}

/// Article 路由
fn article_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/:id",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/:id",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::{FatalSignal, StorageError};
    use crate::infrastructure::memory::InMemoryLibrary;

    fn app_with(library: Arc<InMemoryLibrary>, fatal: FatalSignal) -> Router {
        let state = AppState::new(library.clone(), library, fatal);
        create_routes().with_state(Arc::new(state))
    }

    fn app() -> (Router, Arc<InMemoryLibrary>) {
        let library = InMemoryLibrary::new().arc();
        (app_with(library.clone(), FatalSignal::new()), library)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn article(author: &str, book: &str, title: &str, serial: f64, content: &str) -> Value {
        json!({
            "author": author,
            "book": book,
            "title": title,
            "serial": serial,
            "content": content,
        })
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OK");
    }

    #[tokio::test]
    async fn test_create_then_get_article() {
        let (app, library) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/articles",
            Some(article("老舍", "茶馆", "第一幕", 1.0, "裕泰 茶馆")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Created");
        let id = body["data"].as_i64().unwrap();
        assert_eq!(library.book_count(), 1);

        let (status, body) = send(&app, "GET", &format!("/api/articles/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["content"], "裕泰 茶馆");
    }

    #[tokio::test]
    async fn test_create_article_with_id_is_rejected() {
        let (app, library) = app();
        let mut payload = article("A", "B", "T", 1.0, "x");
        payload["id"] = json!(9);

        let (status, body) = send(&app, "POST", "/api/articles", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Bad Request"}));
        assert_eq!(library.article_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/articles")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_bad_request() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/api/articles/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Bad Request"}));

        let (status, _) = send(&app, "DELETE", "/api/books/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_article_id_mismatch() {
        let (app, _) = app();
        let (_, body) = send(
            &app,
            "POST",
            "/api/articles",
            Some(article("A", "B", "T", 1.0, "x")),
        )
        .await;
        let id = body["data"].as_i64().unwrap();

        let mut payload = article("A", "B", "T2", 1.0, "y");
        payload["id"] = json!(id + 1);
        let (status, _) = send(&app, "PUT", &format!("/api/articles/{}", id), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut payload = article("A", "B", "T2", 1.0, "y");
        payload["id"] = json!(id);
        let (status, body) =
            send(&app, "PUT", &format!("/api/articles/{}", id), Some(payload)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, body) = send(&app, "GET", &format!("/api/articles/{}", id), None).await;
        assert_eq!(body["data"]["title"], "T2");
    }

    #[tokio::test]
    async fn test_missing_article_is_internal_error() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/api/articles/42", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal Server Error"}));

        let (status, _) = send(&app, "DELETE", "/api/articles/42", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_article_search_and_listing() {
        let (app, _) = app();
        send(&app, "POST", "/api/articles", Some(article("A", "B", "T2", 2.0, "y"))).await;
        send(&app, "POST", "/api/articles", Some(article("A", "B", "T1", 1.0, "x"))).await;

        let (status, body) = send(&app, "GET", "/api/articles?search=x", None).await;
        assert_eq!(status, StatusCode::OK);
        let hits = body["data"].as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "T1");
        assert_eq!(hits[0]["content"], "");

        let (_, body) = send(&app, "GET", "/api/articles?search=", None).await;
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn test_search_matches_inside_unsegmented_text() {
        let (app, _) = app();
        let diary = article("鲁迅", "呐喊", "狂人日记", 1.0, "今天晚上，很好的月光。");
        send(&app, "POST", "/api/articles", Some(diary)).await;

        // ?search=月光
        let uri = "/api/articles?search=%E6%9C%88%E5%85%89";
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let hits = body["data"].as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "狂人日记");
    }

    #[tokio::test]
    async fn test_book_lifecycle() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"author": "老舍", "title": "四世同堂"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/api/books/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "四世同堂");
        assert!(body["data"].get("articles").is_none());

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/books/{}", id),
            Some(json!({"id": id, "author": "老舍", "title": "骆驼祥子"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &format!("/api/books/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &format!("/api/books/{}", id), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_incomplete_book_is_rejected() {
        let (app, library) = app();
        let (status, _) = send(&app, "POST", "/api/books", Some(json!({"author": "老舍"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/books/1",
            Some(json!({"id": 1, "author": "", "title": "茶馆"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(library.book_count(), 0);
    }

    #[tokio::test]
    async fn test_book_query_precedence() {
        let (app, _) = app();
        send(&app, "POST", "/api/articles", Some(article("A", "B", "T1", 1.0, "x"))).await;
        send(&app, "POST", "/api/articles", Some(article("C", "D", "T1", 1.0, "y"))).await;

        let (_, body) = send(&app, "GET", "/api/books", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, "GET", "/api/books?author=C", None).await;
        let books = body["data"].as_array().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0]["title"], "D");

        // search 优先
        let (_, body) = send(&app, "GET", "/api/books?author=C&search=x", None).await;
        let books = body["data"].as_array().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0]["author"], "A");
    }

    #[tokio::test]
    async fn test_book_detail_lists_articles_in_serial_order() {
        let (app, _) = app();
        send(&app, "POST", "/api/articles", Some(article("A", "B", "T2", 2.0, "y"))).await;
        send(&app, "POST", "/api/articles", Some(article("A", "B", "T1", 1.0, "x"))).await;

        let (_, body) = send(&app, "GET", "/api/books", None).await;
        let id = body["data"][0]["id"].as_i64().unwrap();

        let (_, body) = send(&app, "GET", &format!("/api/books/{}", id), None).await;
        let titles: Vec<&str> = body["data"]["articles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn test_unresolved_transaction_trips_fatal_signal() {
        let library = InMemoryLibrary::new().arc();
        let fatal = FatalSignal::new();
        let app = app_with(library.clone(), fatal.clone());

        library.fail_next(StorageError::Unresolved("connection reset".into()));
        let (status, _) = send(&app, "GET", "/api/books", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(fatal.is_tripped());
    }
}
