//! Admin API 集成测试
//!
//! Token 配置为 "test-token"，覆盖认证行为和各运营端点。

mod common;

use std::sync::Arc;

use actix_web::{test, web, App};

use dme_lookup::api::middleware::AdminAuth;
use dme_lookup::api::services::admin::admin_v1_routes;
use dme_lookup::clients::BackendApi;
use dme_lookup::config::{init_config_with, ApiConfig, StaticConfig};

use common::MockBackend;

fn init_test_config() {
    init_config_with(StaticConfig {
        api: ApiConfig {
            admin_token: "test-token".to_string(),
            cors_allowed_origins: Vec::new(),
        },
        ..Default::default()
    });
}

macro_rules! admin_app {
    ($backend:expr) => {{
        init_test_config();
        let backend_dyn: Arc<dyn BackendApi> = $backend.clone();
        test::init_service(
            App::new()
                .app_data(web::Data::new(backend_dyn))
                .service(
                    web::scope("/admin")
                        .wrap(AdminAuth)
                        .service(admin_v1_routes()),
                ),
        )
        .await
    }};
}

fn authed(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("Authorization", "Bearer test-token"))
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = test::TestRequest::get()
        .uri("/admin/v1/analytics/summary")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
}

#[actix_web::test]
async fn wrong_token_is_unauthorized() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = test::TestRequest::get()
        .uri("/admin/v1/analytics/summary")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn options_preflight_passes_without_token() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = test::TestRequest::with_uri("/admin/v1/analytics/summary")
        .method(actix_web::http::Method::OPTIONS)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
}

#[actix_web::test]
async fn clicks_summary_wraps_backend_data() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = authed(test::TestRequest::get().uri("/admin/v1/analytics/summary"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["data"]["total_clicks_all_time"], 42);
}

#[actix_web::test]
async fn clicks_detail_rejects_bad_dates() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = authed(test::TestRequest::post().uri("/admin/v1/analytics/clicks"))
        .set_json(serde_json::json!({
            "start_date": "01/01/2026",
            "end_date": "2026-01-31",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 5001);
}

#[actix_web::test]
async fn provider_crud_proxies_to_backend() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    // 新建
    let req = authed(test::TestRequest::post().uri("/admin/v1/providers"))
        .set_json(serde_json::json!({
            "company_name": "New DME Co",
            "state": "TX",
            "insurance_providers": ["Cigna"],
            "phone_number": "555-0101",
            "email": "new@example.com",
            "weblink": "https://new.example.com",
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["id"], 99);

    // 部分更新
    let req = authed(test::TestRequest::patch().uri("/admin/v1/providers/1"))
        .set_json(serde_json::json!({ "company_name": "Renamed Co" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["company_name"], "Renamed Co");

    // 删除
    let req = authed(test::TestRequest::delete().uri("/admin/v1/providers/1")).to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["deleted"], 1);

    // 检索
    let req = authed(test::TestRequest::get().uri("/admin/v1/providers/search?name=acme"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn bulk_preview_parses_csv_without_submitting() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let csv = "company_name,state,insurance_providers,resupply_available\n\
               Acme Medical,CA,Aetna;Cigna,yes\n\
               Other DME,TX,United,0\n";
    let boundary = "----testboundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"providers.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = boundary,
        csv = csv
    );

    let req = authed(test::TestRequest::post().uri("/admin/v1/providers/bulk/preview"))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(body)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["total"], 2);
    // truthy 宽松解析："yes" → true，"0" → false
    assert_eq!(body["data"]["providers"][0]["resupply_available"], true);
    assert_eq!(body["data"]["providers"][1]["resupply_available"], false);
}

#[actix_web::test]
async fn bulk_import_submits_json_records() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = authed(test::TestRequest::post().uri("/admin/v1/providers/bulk"))
        .set_json(serde_json::json!([
            {
                "company_name": "Acme Medical",
                "state": "CA",
                "insurance_providers": ["Aetna"],
                "phone_number": "555-0100",
                "email": "a@b.c",
                "weblink": "https://a.example"
            }
        ]))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["imported"], 1);

    // 空数组直接拒绝，不打后端
    let req = authed(test::TestRequest::post().uri("/admin/v1/providers/bulk"))
        .set_json(serde_json::json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn export_user_emails_returns_csv_attachment() {
    let backend = Arc::new(MockBackend::default());
    let app = admin_app!(backend);

    let req = authed(test::TestRequest::get().uri("/admin/v1/export/user-emails")).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let content_type = resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("user_emails_"));

    let body = test::read_body(resp).await;
    assert_eq!(body, "email\nmom@example.com\n");
}
