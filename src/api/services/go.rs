//! 出站跳转端点
//!
//! GET /go/{provider_id}?session_id=... 从会话结果取回 Provider，
//! 执行跳转接力，异步上报点击，307 跳出。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{ClickEvent, ClickType};
use crate::services::{ClickTracker, RedirectSequencer, SearchService};

#[derive(Debug, Deserialize)]
pub struct GoQuery {
    pub session_id: String,
    /// 调用方声明的点击类型；合作方接力成功时忽略，始终记 auto_redirect
    #[serde(default)]
    pub click_type: Option<ClickType>,
}

pub struct GoService;

impl GoService {
    pub async fn handle_go(
        req: HttpRequest,
        path: web::Path<i64>,
        query: web::Query<GoQuery>,
        search: web::Data<Arc<SearchService>>,
        sequencer: web::Data<Arc<RedirectSequencer>>,
        clicks: web::Data<Arc<ClickTracker>>,
    ) -> impl Responder {
        let provider_id = path.into_inner();

        // 只认会话内出现过的 Provider，防止 id 枚举
        let (session, provider) = match search.session_provider(&query.session_id, provider_id) {
            Some(found) => found,
            None => {
                debug!(
                    session = %query.session_id,
                    provider = provider_id,
                    "go rejected: provider not in session results"
                );
                return Self::not_found_response();
            }
        };

        let outcome = sequencer
            .resolve(&provider, &session.query, &|phase| {
                info!(message = phase.user_message(), "redirect relay phase");
            })
            .await;

        let click_type = if outcome.partner_handoff {
            outcome.click_type
        } else {
            query.click_type.unwrap_or(outcome.click_type)
        };
        let event = ClickEvent {
            provider_id,
            user_email: session.query.email.clone(),
            search_state: session.query.state.clone(),
            search_insurance: session.query.insurance_provider.clone(),
            click_type,
            session_id: query.session_id.clone(),
            user_agent: Self::header(&req, "User-Agent"),
            referrer: Self::header(&req, "Referer"),
        };
        // fire-and-forget，不等待上报完成
        let _ = clicks.track(event);

        info!(
            provider = provider_id,
            partner_handoff = outcome.partner_handoff,
            "redirecting"
        );
        HttpResponse::TemporaryRedirect()
            .insert_header(("Location", outcome.target))
            .finish()
    }

    fn header(req: &HttpRequest, name: &str) -> String {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("")
            .to_string()
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body("Not Found")
    }
}
