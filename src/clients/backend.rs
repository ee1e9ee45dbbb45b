//! 后端 REST API 客户端实现
//!
//! 同步 ureq Agent + spawn_blocking 包装，所有响应体按 JSON 解析
//! （邮箱导出除外，透传 CSV 文本）。

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use super::{run_blocking, BackendApi};
use crate::config::BackendConfig;
use crate::errors::{LookupError, Result};
use crate::models::{
    AnalyticsRange, ClickAnalyticsRow, ClickEvent, ClickSummary, DmeProvider,
    InsuranceProviderRef, ProviderUpdate, SearchRequest, StateRef,
};

/// 基于 ureq 的后端客户端
pub struct HttpBackendClient {
    agent: Agent,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// ureq 错误到领域错误的映射（同步调用内使用）
    fn map_ureq(context: &str, e: ureq::Error) -> LookupError {
        match e {
            ureq::Error::StatusCode(404) => {
                LookupError::not_found(format!("{}: resource not found", context))
            }
            ureq::Error::StatusCode(code) => {
                LookupError::backend(format!("{} returned status {}", context, code))
            }
            other => LookupError::backend_unreachable(format!("{} failed: {}", context, other)),
        }
    }

    fn get_json_sync<T: DeserializeOwned>(
        agent: Agent,
        url: String,
        context: &'static str,
    ) -> Result<T> {
        let resp = agent
            .get(&url)
            .call()
            .map_err(|e| Self::map_ureq(context, e))?;
        resp.into_body()
            .read_json::<T>()
            .map_err(|e| LookupError::serialization(format!("{}: bad response body: {}", context, e)))
    }

    fn post_json_sync<T: DeserializeOwned>(
        agent: Agent,
        url: String,
        body: serde_json::Value,
        context: &'static str,
    ) -> Result<T> {
        let resp = agent
            .post(&url)
            .send_json(&body)
            .map_err(|e| Self::map_ureq(context, e))?;
        resp.into_body()
            .read_json::<T>()
            .map_err(|e| LookupError::serialization(format!("{}: bad response body: {}", context, e)))
    }
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn fetch_states(&self) -> Result<Vec<StateRef>> {
        let agent = self.agent.clone();
        let url = self.url("/api/states");
        run_blocking(move || Self::get_json_sync(agent, url, "fetch states")).await
    }

    async fn fetch_insurance_providers(&self) -> Result<Vec<InsuranceProviderRef>> {
        let agent = self.agent.clone();
        let url = self.url("/api/insurance-providers");
        run_blocking(move || Self::get_json_sync(agent, url, "fetch insurance providers")).await
    }

    async fn search_dme(&self, query: &SearchRequest) -> Result<Vec<DmeProvider>> {
        let agent = self.agent.clone();
        let url = self.url("/api/search-dme");
        // 后端契约只认这三个字段，session_id 是网关自己的概念
        let body = serde_json::json!({
            "state": query.state,
            "insurance_provider": query.insurance_provider,
            "email": query.email,
        });
        debug!(state = %query.state, insurance = %query.insurance_provider, "searching DME providers");
        run_blocking(move || Self::post_json_sync(agent, url, body, "search DME")).await
    }

    async fn track_click(&self, event: &ClickEvent) -> Result<()> {
        let agent = self.agent.clone();
        let url = self.url("/api/track-click");
        let body = serde_json::to_value(event)?;
        run_blocking(move || {
            agent
                .post(&url)
                .send_json(&body)
                .map_err(|e| Self::map_ureq("track click", e))?;
            Ok(())
        })
        .await
    }

    async fn create_provider(&self, provider: &DmeProvider) -> Result<DmeProvider> {
        let agent = self.agent.clone();
        let url = self.url("/api/dme");
        let body = serde_json::to_value(provider)?;
        run_blocking(move || Self::post_json_sync(agent, url, body, "create provider")).await
    }

    async fn create_providers_bulk(
        &self,
        providers: &[DmeProvider],
    ) -> Result<serde_json::Value> {
        let agent = self.agent.clone();
        let url = self.url("/api/dme/bulk");
        let body = serde_json::to_value(providers)?;
        run_blocking(move || Self::post_json_sync(agent, url, body, "bulk create providers")).await
    }

    async fn update_provider(&self, id: i64, update: &ProviderUpdate) -> Result<DmeProvider> {
        let agent = self.agent.clone();
        let url = self.url(&format!("/api/provider/{}", id));
        let body = serde_json::to_value(update)?;
        run_blocking(move || {
            let resp = agent
                .patch(&url)
                .send_json(&body)
                .map_err(|e| Self::map_ureq("update provider", e))?;
            resp.into_body().read_json::<DmeProvider>().map_err(|e| {
                LookupError::serialization(format!("update provider: bad response body: {}", e))
            })
        })
        .await
    }

    async fn delete_provider(&self, id: i64) -> Result<()> {
        let agent = self.agent.clone();
        let url = self.url(&format!("/api/provider/{}", id));
        run_blocking(move || {
            agent
                .delete(&url)
                .call()
                .map_err(|e| Self::map_ureq("delete provider", e))?;
            Ok(())
        })
        .await
    }

    async fn search_providers(&self, name: &str) -> Result<Vec<DmeProvider>> {
        let agent = self.agent.clone();
        let url = self.url(&format!(
            "/api/providers/search?name={}",
            urlencoding::encode(name)
        ));
        run_blocking(move || Self::get_json_sync(agent, url, "search providers")).await
    }

    async fn clicks_summary(&self) -> Result<ClickSummary> {
        let agent = self.agent.clone();
        let url = self.url("/api/analytics/clicks/summary");
        run_blocking(move || Self::get_json_sync(agent, url, "clicks summary")).await
    }

    async fn clicks_detail(&self, range: &AnalyticsRange) -> Result<Vec<ClickAnalyticsRow>> {
        let agent = self.agent.clone();
        let url = self.url("/api/analytics/clicks");
        let body = serde_json::to_value(range)?;
        run_blocking(move || Self::post_json_sync(agent, url, body, "clicks detail")).await
    }

    async fn export_user_emails(&self) -> Result<String> {
        let agent = self.agent.clone();
        let url = self.url("/api/export/user-emails");
        run_blocking(move || {
            let resp = agent
                .get(&url)
                .call()
                .map_err(|e| Self::map_ureq("export user emails", e))?;
            resp.into_body()
                .read_to_string()
                .map_err(|e| LookupError::file_read(format!("export user emails: {}", e)))
        })
        .await
    }
}
