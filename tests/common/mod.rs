//! 集成测试共用的内存 mock

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dme_lookup::clients::{BackendApi, PartnerApi};
use dme_lookup::errors::{LookupError, Result};
use dme_lookup::models::{
    AnalyticsRange, ClickAnalyticsRow, ClickEvent, ClickSummary, DmeProvider,
    InsuranceProviderRef, PartnerOrder, PartnerOrderReceipt, PartnerProviderEntry,
    PartnerProvidersResponse, ProviderUpdate, SearchRequest, StateRef,
};

pub fn provider(id: i64, company: &str) -> DmeProvider {
    DmeProvider {
        id: Some(id),
        company_name: company.to_string(),
        state: "CA".to_string(),
        insurance_providers: vec!["Aetna".to_string()],
        phone_number: "555-0100".to_string(),
        email: "contact@example.com".to_string(),
        weblink: format!("https://{}.example.com", id),
        dedicated_link: format!("https://{}.example.com/order", id),
        ..Default::default()
    }
}

pub fn search_query(session: Option<&str>) -> SearchRequest {
    SearchRequest {
        state: "CA".to_string(),
        insurance_provider: "Aetna".to_string(),
        email: "mom@example.com".to_string(),
        session_id: session.map(String::from),
    }
}

/// 可编程的后端 mock：记录调用并返回预置数据
pub struct MockBackend {
    pub providers: Vec<DmeProvider>,
    pub states: Vec<StateRef>,
    pub search_calls: AtomicUsize,
    pub track_calls: AtomicUsize,
    pub tracked_events: Mutex<Vec<ClickEvent>>,
    pub last_search: Mutex<Option<SearchRequest>>,
    pub fail_states: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            providers: vec![provider(1, "Acme Medical"), provider(2, "breastpumps.com")],
            states: vec![StateRef {
                id: Some(1),
                name: "California".to_string(),
                abbreviation: "CA".to_string(),
            }],
            search_calls: AtomicUsize::new(0),
            track_calls: AtomicUsize::new(0),
            tracked_events: Mutex::new(Vec::new()),
            last_search: Mutex::new(None),
            fail_states: false,
        }
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn fetch_states(&self) -> Result<Vec<StateRef>> {
        if self.fail_states {
            return Err(LookupError::backend_unreachable("mock backend down"));
        }
        Ok(self.states.clone())
    }

    async fn fetch_insurance_providers(&self) -> Result<Vec<InsuranceProviderRef>> {
        Ok(vec![InsuranceProviderRef {
            id: Some(1),
            name: "Aetna".to_string(),
        }])
    }

    async fn search_dme(&self, query: &SearchRequest) -> Result<Vec<DmeProvider>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(query.clone());
        Ok(self.providers.clone())
    }

    async fn track_click(&self, event: &ClickEvent) -> Result<()> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        self.tracked_events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn create_provider(&self, provider: &DmeProvider) -> Result<DmeProvider> {
        let mut created = provider.clone();
        created.id = Some(99);
        Ok(created)
    }

    async fn create_providers_bulk(
        &self,
        providers: &[DmeProvider],
    ) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "imported": providers.len() }))
    }

    async fn update_provider(&self, id: i64, update: &ProviderUpdate) -> Result<DmeProvider> {
        let mut updated = provider(id, "Acme Medical");
        if let Some(name) = &update.company_name {
            updated.company_name = name.clone();
        }
        Ok(updated)
    }

    async fn delete_provider(&self, _id: i64) -> Result<()> {
        Ok(())
    }

    async fn search_providers(&self, name: &str) -> Result<Vec<DmeProvider>> {
        Ok(self
            .providers
            .iter()
            .filter(|p| p.company_name.to_lowercase().contains(&name.to_lowercase()))
            .cloned()
            .collect())
    }

    async fn clicks_summary(&self) -> Result<ClickSummary> {
        Ok(ClickSummary {
            total_clicks_all_time: 42,
            clicks_last_30_days: 10,
            manual_clicks_last_30_days: 7,
            auto_redirects_last_30_days: 3,
            unique_users_last_30_days: 5,
            period: "30d".to_string(),
        })
    }

    async fn clicks_detail(&self, _range: &AnalyticsRange) -> Result<Vec<ClickAnalyticsRow>> {
        Ok(Vec::new())
    }

    async fn export_user_emails(&self) -> Result<String> {
        Ok("email\nmom@example.com\n".to_string())
    }
}

/// 合作方 mock：按步骤可编程失败，记录调用顺序
pub struct MockPartner {
    pub calls: Mutex<Vec<&'static str>>,
    pub fail_listing: bool,
    pub listing: PartnerProvidersResponse,
    pub fail_order: bool,
    pub resume_token: Option<String>,
    pub last_order: Mutex<Option<PartnerOrder>>,
}

impl Default for MockPartner {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_listing: false,
            listing: PartnerProvidersResponse {
                providers: vec![PartnerProviderEntry {
                    id: Some(7),
                    provider_display_name: "Aetna".to_string(),
                }],
            },
            fail_order: false,
            resume_token: Some("abc123".to_string()),
            last_order: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PartnerApi for MockPartner {
    async fn providers_by_state(&self, _state_abbr: &str) -> Result<PartnerProvidersResponse> {
        self.calls.lock().unwrap().push("providers_by_state");
        if self.fail_listing {
            return Err(LookupError::partner("mock listing failure"));
        }
        Ok(self.listing.clone())
    }

    async fn create_order(&self, order: &PartnerOrder) -> Result<PartnerOrderReceipt> {
        self.calls.lock().unwrap().push("create_order");
        *self.last_order.lock().unwrap() = Some(order.clone());
        if self.fail_order {
            return Err(LookupError::partner("mock order failure"));
        }
        Ok(PartnerOrderReceipt {
            resume_token: self.resume_token.clone(),
        })
    }

    fn redirect_url(&self, token: &str) -> String {
        format!("https://portal.example.com/?gf_token={}", token)
    }
}
