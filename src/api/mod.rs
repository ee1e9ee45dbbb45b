//! HTTP 层
//!
//! middleware 提供认证与请求追踪，services 按公开 / 跳转 / Admin / 健康检查分组。

pub mod middleware;
pub mod services;
