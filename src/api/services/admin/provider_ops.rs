//! Admin API Provider 维护操作
//!
//! 全部代理到后端 REST API，本服务不落地数据。

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use tracing::info;

use crate::clients::BackendApi;
use crate::models::{DmeProvider, ProviderUpdate};

use super::helpers::{api_result, error_from_lookup, success_response};
use super::types::ProviderSearchQuery;

/// POST /providers - 新建单个 Provider
pub async fn create_provider(
    backend: web::Data<Arc<dyn BackendApi>>,
    payload: web::Json<DmeProvider>,
) -> impl Responder {
    info!(company = %payload.company_name, "Admin API: create provider");
    api_result(backend.create_provider(&payload).await)
}

/// PATCH /providers/{id} - 部分更新
pub async fn update_provider(
    backend: web::Data<Arc<dyn BackendApi>>,
    path: web::Path<i64>,
    payload: web::Json<ProviderUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    info!(id, "Admin API: update provider");
    api_result(backend.update_provider(id, &payload).await)
}

/// DELETE /providers/{id}
pub async fn delete_provider(
    backend: web::Data<Arc<dyn BackendApi>>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    info!(id, "Admin API: delete provider");
    match backend.delete_provider(id).await {
        Ok(()) => success_response(serde_json::json!({ "deleted": id })),
        Err(e) => error_from_lookup(&e),
    }
}

/// GET /providers/search?name= - 按公司名模糊检索
pub async fn search_providers(
    backend: web::Data<Arc<dyn BackendApi>>,
    query: web::Query<ProviderSearchQuery>,
) -> impl Responder {
    api_result(backend.search_providers(&query.name).await)
}

/// GET /export/user-emails - 邮箱导出（透传后端 CSV）
pub async fn export_user_emails(backend: web::Data<Arc<dyn BackendApi>>) -> impl Responder {
    info!("Admin API: export user emails");
    match backend.export_user_emails().await {
        Ok(csv) => {
            let filename = format!("user_emails_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(csv)
        }
        Err(e) => error_from_lookup(&e),
    }
}
