//! Server startup
//!
//! Wires clients and services together, configures middleware and routes,
//! and runs the HTTP server.

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, DefaultHeaders},
    web, App, HttpServer,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::middleware::{AdminAuth, RequestIdMiddleware};
use crate::api::services::{
    admin::admin_v1_routes, AppStartTime, GoService, HealthService, PublicService,
};
use crate::clients::{BackendApi, HttpBackendClient, HttpPartnerClient, PartnerApi};
use crate::config::get_config;
use crate::services::{ClickTracker, RedirectSequencer, ReferenceDataService, SearchService};

/// Build CORS middleware from configuration
///
/// 空列表放行所有来源（默认同域部署在 nginx 后面），
/// 否则逐个登记允许的来源。
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "Accept"])
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// 公开查询路由 `/api`
fn public_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/states", web::get().to(PublicService::get_states))
        .route(
            "/insurance-providers",
            web::get().to(PublicService::get_insurance_providers),
        )
        .route("/search", web::post().to(PublicService::submit_search))
}

/// 健康检查路由 `/health`
fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness))
        .route("/ready", web::get().to(HealthService::readiness))
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = get_config();

    // 组装出站客户端和服务
    let backend: Arc<dyn BackendApi> = Arc::new(HttpBackendClient::new(&config.backend));
    let partner: Arc<dyn PartnerApi> = Arc::new(HttpPartnerClient::new(&config.partner));

    let reference = Arc::new(ReferenceDataService::new(backend.clone(), &config.cache));
    let clicks = Arc::new(ClickTracker::new(backend.clone(), &config.cache));
    let search = Arc::new(SearchService::new(
        backend.clone(),
        clicks.clone(),
        &config.cache,
    ));
    let sequencer = Arc::new(RedirectSequencer::new(
        partner.clone(),
        reference.clone(),
        &config.partner,
    ));

    let admin_prefix = config.routes.admin_prefix.clone();
    if config.api.admin_token.is_empty() {
        info!("Admin API is disabled (api.admin_token not set)");
    } else {
        info!("Admin API available at: {}", admin_prefix);
    }

    let allowed_origins = config.api.cors_allowed_origins.clone();
    let cpu_count = config.server.cpu_count.min(32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&allowed_origins);

        App::new()
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(backend.clone()))
            .app_data(web::Data::new(partner.clone()))
            .app_data(web::Data::new(reference.clone()))
            .app_data(web::Data::new(clicks.clone()))
            .app_data(web::Data::new(search.clone()))
            .app_data(web::Data::new(sequencer.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(
                web::scope(&admin_prefix)
                    .wrap(AdminAuth)
                    .service(admin_v1_routes()),
            )
            .service(health_routes())
            .service(public_routes())
            .route("/go/{provider_id}", web::get().to(GoService::handle_go))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    server.bind(bind_address)?.run().await?;

    Ok(())
}
