//! Admin API 路由配置

use actix_web::web;

use super::analytics::{clicks_detail, clicks_summary};
use super::bulk_import::{bulk_import, preview_bulk_import};
use super::provider_ops::{
    create_provider, delete_provider, export_user_emails, search_providers, update_provider,
};

/// Provider 维护路由 `/providers`
///
/// 包含：
/// - POST /providers - 新建
/// - POST /providers/bulk - 批量提交（预览确认后的 JSON 数组）
/// - POST /providers/bulk/preview - 导入预览
/// - GET /providers/search - 按公司名检索
/// - PATCH /providers/{id} - 部分更新
/// - DELETE /providers/{id} - 删除
pub fn providers_routes() -> actix_web::Scope {
    web::scope("/providers")
        .route("", web::post().to(create_provider))
        // Bulk / search routes (must be before /{id})
        .route("/bulk/preview", web::post().to(preview_bulk_import))
        .route("/bulk", web::post().to(bulk_import))
        .route("/search", web::get().to(search_providers))
        .route("/{id}", web::patch().to(update_provider))
        .route("/{id}", web::delete().to(delete_provider))
}

/// 分析路由 `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics")
        .route("/summary", web::get().to(clicks_summary))
        .route("/clicks", web::post().to(clicks_detail))
}

/// 导出路由 `/export`
pub fn export_routes() -> actix_web::Scope {
    web::scope("/export").route("/user-emails", web::get().to(export_user_emails))
}

/// Admin v1 路由总装，挂在 `{admin_prefix}/v1` 下
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(providers_routes())
        .service(analytics_routes())
        .service(export_routes())
}
