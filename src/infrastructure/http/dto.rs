//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn ok(data: T) -> Self {
        Self {
            message: "OK",
            data,
        }
    }

    /// 创建成功，data 为新记录 ID
    pub fn created(data: T) -> Self {
        Self {
            message: "Created",
            data,
        }
    }
}

/// 错误响应，只有 message
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
}

// ============================================================================
// Query DTOs
// ============================================================================

/// GET /api/articles 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ArticlesQuery {
    pub search: Option<String>,
}

/// GET /api/books 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct BooksQuery {
    pub search: Option<String>,
    pub author: Option<String>,
}

/// 空串视为未提供
pub(crate) fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::created(7)).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Created", "data": 7}));
    }

    #[test]
    fn test_empty_param_is_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("茶馆".into())), Some("茶馆".into()));
    }
}
