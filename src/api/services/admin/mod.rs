//! Admin API
//!
//! Bearer Token 保护下的运营接口：Provider 维护、CSV 批量导入、
//! 点击分析和邮箱导出。所有响应走统一的 ApiResponse 信封。

pub mod analytics;
pub mod bulk_import;
pub mod error_code;
pub mod helpers;
pub mod provider_ops;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use routes::admin_v1_routes;
pub use types::ApiResponse;
