//! 公开查询 API
//!
//! 前端直接消费的三个端点：州列表、保险公司列表、查询提交。
//! 与 Admin API 不同，这里的响应不走信封，错误用 {"detail": msg}，
//! 保持原有前端契约不变。

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use tracing::debug;

use crate::errors::LookupError;
use crate::models::SearchRequest;
use crate::services::{ReferenceDataService, SearchService};

pub struct PublicService;

impl PublicService {
    /// GET /api/states
    pub async fn get_states(reference: web::Data<Arc<ReferenceDataService>>) -> impl Responder {
        let states = reference.states().await;
        HttpResponse::Ok().json(states.as_ref())
    }

    /// GET /api/insurance-providers
    pub async fn get_insurance_providers(
        reference: web::Data<Arc<ReferenceDataService>>,
    ) -> impl Responder {
        let insurances = reference.insurance_providers().await;
        HttpResponse::Ok().json(insurances.as_ref())
    }

    /// POST /api/search - 提交查询，建立（或复用）会话
    pub async fn submit_search(
        search: web::Data<Arc<SearchService>>,
        payload: web::Json<SearchRequest>,
    ) -> impl Responder {
        if let Err(e) = Self::validate(&payload) {
            return Self::detail_error(&e);
        }

        match search.submit(payload.into_inner()).await {
            Ok((session_id, session)) => {
                debug!(session = %session_id, results = session.providers.len(), "search completed");
                HttpResponse::Ok().json(serde_json::json!({
                    "session_id": session_id,
                    "providers": session.providers,
                }))
            }
            Err(e) => Self::detail_error(&e),
        }
    }

    fn validate(query: &SearchRequest) -> Result<(), LookupError> {
        if query.state.trim().is_empty() {
            return Err(LookupError::validation("state is required"));
        }
        if query.insurance_provider.trim().is_empty() {
            return Err(LookupError::validation("insurance_provider is required"));
        }
        if query.email.trim().is_empty() || !query.email.contains('@') {
            return Err(LookupError::validation("a valid email is required"));
        }
        Ok(())
    }

    /// FastAPI 风格的错误体，前端按 detail 字段展示
    fn detail_error(err: &LookupError) -> HttpResponse {
        HttpResponse::build(err.http_status())
            .json(serde_json::json!({ "detail": err.message() }))
    }
}
