//! HTTP Layer - RESTful API
//!
//! 所有路由挂载在 /api 下，响应统一为 {message, data} 格式

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
