//! 健康检查端点
//!
//! /health/live 只回 200（进程存活），/health/ready 额外探测后端可达性，
//! 给 k8s probe 和负载均衡用。

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;

use crate::clients::BackendApi;

/// 后端探测超时
const BACKEND_PROBE_TIMEOUT_SECS: u64 = 5;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: i64,
    backend: BackendCheck,
}

#[derive(Debug, Serialize)]
struct BackendCheck {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub struct HealthService;

impl HealthService {
    /// GET /health - 整体状态 + 后端探测
    pub async fn health_check(
        backend: web::Data<Arc<dyn BackendApi>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let backend_check = Self::probe_backend(&backend).await;
        let healthy = backend_check.error.is_none();

        let body = HealthResponse {
            status: if healthy { "healthy" } else { "degraded" },
            uptime_secs: (chrono::Utc::now() - app_start_time.start_datetime).num_seconds(),
            backend: backend_check,
        };

        if healthy {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }

    /// GET /health/live - 进程存活探针
    pub async fn liveness() -> impl Responder {
        HttpResponse::Ok().body("OK")
    }

    /// GET /health/ready - 就绪探针（要求后端可达）
    pub async fn readiness(backend: web::Data<Arc<dyn BackendApi>>) -> impl Responder {
        let check = Self::probe_backend(&backend).await;
        match check.error {
            None => HttpResponse::Ok().body("OK"),
            Some(_) => HttpResponse::ServiceUnavailable().body("backend unavailable"),
        }
    }

    async fn probe_backend(backend: &Arc<dyn BackendApi>) -> BackendCheck {
        let probe = tokio::time::timeout(
            Duration::from_secs(BACKEND_PROBE_TIMEOUT_SECS),
            backend.fetch_states(),
        )
        .await;

        match probe {
            Ok(Ok(_)) => BackendCheck {
                status: "healthy",
                error: None,
            },
            Ok(Err(e)) => {
                error!("Backend health check failed: {}", e);
                BackendCheck {
                    status: "unhealthy",
                    error: Some(e.format_simple()),
                }
            }
            Err(_) => {
                error!("Backend health check timeout");
                BackendCheck {
                    status: "unhealthy",
                    error: Some("timeout".to_string()),
                }
            }
        }
    }
}
