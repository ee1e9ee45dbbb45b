//! 合作方 WordPress 订单 API 客户端实现
//!
//! 订单创建需要 X-HBE-API-Key 请求头；两个接口都只在跳转接力里使用，
//! 任何失败都由上层降级处理，这里只负责如实上报错误。

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use ureq::Agent;

use super::{run_blocking, PartnerApi};
use crate::config::PartnerConfig;
use crate::errors::{LookupError, Result};
use crate::models::{PartnerOrder, PartnerOrderReceipt, PartnerProvidersResponse};

/// 基于 ureq 的合作方客户端
pub struct HttpPartnerClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

impl HttpPartnerClient {
    pub fn new(config: &PartnerConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn map_ureq(context: &str, e: ureq::Error) -> LookupError {
        match e {
            ureq::Error::StatusCode(code) => {
                LookupError::partner(format!("{} returned status {}", context, code))
            }
            other => LookupError::partner(format!("{} failed: {}", context, other)),
        }
    }
}

#[async_trait]
impl PartnerApi for HttpPartnerClient {
    async fn providers_by_state(&self, state_abbr: &str) -> Result<PartnerProvidersResponse> {
        let agent = self.agent.clone();
        let url = format!(
            "{}/wp-json/hbe/v1/providers-by-state/{}",
            self.base_url,
            urlencoding::encode(state_abbr)
        );
        debug!(state = %state_abbr, "fetching partner providers by state");
        run_blocking(move || {
            let resp = agent
                .get(&url)
                .call()
                .map_err(|e| Self::map_ureq("partner providers-by-state", e))?;
            resp.into_body()
                .read_json::<PartnerProvidersResponse>()
                .map_err(|e| {
                    LookupError::partner(format!("providers-by-state: bad response body: {}", e))
                })
        })
        .await
    }

    async fn create_order(&self, order: &PartnerOrder) -> Result<PartnerOrderReceipt> {
        let agent = self.agent.clone();
        let url = format!("{}/wp-json/hbe/v1/order", self.base_url);
        let api_key = self.api_key.clone();
        let body = serde_json::to_value(order)?;
        debug!(ext_id = %order.ext_id, provider = order.provider, "creating partner order");
        run_blocking(move || {
            let resp = agent
                .post(&url)
                .header("X-HBE-API-Key", &api_key)
                .send_json(&body)
                .map_err(|e| Self::map_ureq("partner order", e))?;
            resp.into_body()
                .read_json::<PartnerOrderReceipt>()
                .map_err(|e| LookupError::partner(format!("order: bad response body: {}", e)))
        })
        .await
    }

    fn redirect_url(&self, token: &str) -> String {
        format!("{}/?gf_token={}", self.base_url, urlencoding::encode(token))
    }
}
