//! /go 跳转端点集成测试

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use actix_web::{test, web, App};

use dme_lookup::api::services::{GoService, PublicService};
use dme_lookup::clients::{BackendApi, PartnerApi};
use dme_lookup::config::{CacheConfig, PartnerConfig};
use dme_lookup::models::RedirectStrategy;
use dme_lookup::services::{
    ClickTracker, RedirectSequencer, ReferenceDataService, SearchService,
};

use common::{provider, search_query, MockBackend, MockPartner};

struct TestCtx {
    backend: Arc<MockBackend>,
    partner: Arc<MockPartner>,
    clicks: Arc<ClickTracker>,
    search: Arc<SearchService>,
    sequencer: Arc<RedirectSequencer>,
}

fn build_ctx(backend: MockBackend, partner: MockPartner) -> TestCtx {
    let backend = Arc::new(backend);
    let partner = Arc::new(partner);
    let backend_dyn: Arc<dyn BackendApi> = backend.clone();
    let partner_dyn: Arc<dyn PartnerApi> = partner.clone();

    let reference = Arc::new(ReferenceDataService::new(
        backend_dyn.clone(),
        &CacheConfig::default(),
    ));
    let clicks = Arc::new(ClickTracker::new(backend_dyn.clone(), &CacheConfig::default()));
    let search = Arc::new(SearchService::new(
        backend_dyn,
        clicks.clone(),
        &CacheConfig::default(),
    ));
    let sequencer = Arc::new(RedirectSequencer::new(
        partner_dyn,
        reference,
        &PartnerConfig::default(),
    ));

    TestCtx {
        backend,
        partner,
        clicks,
        search,
        sequencer,
    }
}

macro_rules! go_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.search.clone()))
                .app_data(web::Data::new($ctx.sequencer.clone()))
                .app_data(web::Data::new($ctx.clicks.clone()))
                .route("/go/{provider_id}", web::get().to(GoService::handle_go)),
        )
        .await
    };
}

#[actix_web::test]
async fn partner_provider_redirects_to_portal() {
    let mut backend = MockBackend::default();
    let mut partner_provider = provider(2, "breastpumps.com");
    partner_provider.redirect_strategy = Some(RedirectStrategy::PartnerOrderApi);
    backend.providers = vec![provider(1, "Acme Medical"), partner_provider];

    let ctx = build_ctx(backend, MockPartner::default());
    let (session_id, _) = ctx.search.submit(search_query(None)).await.unwrap();
    let app = go_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/go/2?session_id={}", session_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 307);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://portal.example.com/?gf_token=abc123"
    );
}

#[actix_web::test]
async fn direct_provider_redirects_to_its_own_link() {
    let ctx = build_ctx(MockBackend::default(), MockPartner::default());
    let (session_id, _) = ctx.search.submit(search_query(None)).await.unwrap();
    let app = go_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/go/1?session_id={}", session_id))
        .insert_header(("User-Agent", "test-agent"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 307);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://1.example.com/order"
    );

    // 点击事件异步上报，等它落地
    tokio::task::yield_now().await;
    for _ in 0..50 {
        if ctx.backend.track_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(ctx.backend.track_calls.load(Ordering::SeqCst), 1);

    let events = ctx.backend.tracked_events.lock().unwrap();
    assert_eq!(events[0].provider_id, 1);
    assert_eq!(events[0].user_email, "mom@example.com");
    assert_eq!(events[0].user_agent, "test-agent");
}

#[actix_web::test]
async fn click_type_param_overrides_direct_click() {
    let ctx = build_ctx(MockBackend::default(), MockPartner::default());
    let (session_id, _) = ctx.search.submit(search_query(None)).await.unwrap();
    let app = go_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/go/1?session_id={}&click_type=auto_redirect",
            session_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 307);

    for _ in 0..50 {
        if ctx.backend.track_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    let events = ctx.backend.tracked_events.lock().unwrap();
    assert_eq!(events[0].click_type, dme_lookup::models::ClickType::AutoRedirect);
}

#[actix_web::test]
async fn unknown_session_or_provider_is_404() {
    let ctx = build_ctx(MockBackend::default(), MockPartner::default());
    let (session_id, _) = ctx.search.submit(search_query(None)).await.unwrap();
    let app = go_app!(ctx);

    // 会话不存在
    let req = test::TestRequest::get()
        .uri("/go/1?session_id=session_0_missing00")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Provider 不在会话结果里
    let req = test::TestRequest::get()
        .uri(&format!("/go/999?session_id={}", session_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // 伪造的 id 不应触发任何出站调用
    assert!(ctx.partner.calls.lock().unwrap().is_empty());
    assert_eq!(ctx.backend.track_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn resubmitting_search_resets_click_dedup() {
    let ctx = build_ctx(MockBackend::default(), MockPartner::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.search.clone()))
            .app_data(web::Data::new(ctx.sequencer.clone()))
            .app_data(web::Data::new(ctx.clicks.clone()))
            .route("/api/search", web::post().to(PublicService::submit_search))
            .route("/go/{provider_id}", web::get().to(GoService::handle_go)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(serde_json::json!({
            "state": "CA",
            "insurance_provider": "Aetna",
            "email": "mom@example.com"
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let go = |session: &str| {
        test::TestRequest::get()
            .uri(&format!("/go/1?session_id={}", session))
            .to_request()
    };

    // 第一次点击计数，同会话重复点击被丢弃
    assert_eq!(test::call_service(&app, go(&session_id)).await.status(), 307);
    for _ in 0..50 {
        if ctx.backend.track_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(test::call_service(&app, go(&session_id)).await.status(), 307);
    assert_eq!(ctx.backend.track_calls.load(Ordering::SeqCst), 1);

    // 同一会话重新提交查询后，去重状态作废，再点击重新计数
    let req = test::TestRequest::post()
        .uri("/api/search")
        .set_json(serde_json::json!({
            "state": "CA",
            "insurance_provider": "Aetna",
            "email": "mom@example.com",
            "session_id": session_id
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["session_id"].as_str().unwrap(), session_id);

    assert_eq!(test::call_service(&app, go(&session_id)).await.status(), 307);
    for _ in 0..50 {
        if ctx.backend.track_calls.load(Ordering::SeqCst) > 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(ctx.backend.track_calls.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn repeated_go_is_deduplicated_within_session() {
    let ctx = build_ctx(MockBackend::default(), MockPartner::default());
    let (session_id, _) = ctx.search.submit(search_query(None)).await.unwrap();
    let app = go_app!(ctx);

    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri(&format!("/go/1?session_id={}", session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 307);
    }

    for _ in 0..50 {
        if ctx.backend.track_calls.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    // 三次跳转仍然只算一次点击
    assert_eq!(ctx.backend.track_calls.load(Ordering::SeqCst), 1);
}
