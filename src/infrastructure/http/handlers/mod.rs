//! HTTP Handlers
//!
//! 请求绑定与校验在这里完成，之后只调用用例

mod article;
mod book;
mod ping;

pub use article::*;
pub use book::*;
pub use ping::*;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use super::error::ApiError;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
