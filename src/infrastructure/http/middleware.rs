//! HTTP Middleware
//!
//! 请求结果日志与 handler panic 兜底。失败原因由 `ApiError` 记录，
//! 这里只补上请求本身（方法、路径、状态码、耗时）。

use std::any::Any;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::IntoResponse, response::Response};

use super::error::ApiError;

/// 记录未成功的请求：5xx 为 error，4xx 为 warn，其余不记录
pub async fn log_failed_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, elapsed_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, elapsed_ms, "Request rejected");
    }

    response
}

/// handler panic 时返回与其他内部错误相同的 `{message}` 500 响应
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
