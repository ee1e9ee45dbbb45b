//! 出站跳转接力
//!
//! partner-order-api 策略下按严格顺序执行三步合作方调用：
//! 州内保险公司查询 → 订单创建 → resume token 跳转。
//! 任意一步失败都静默降级到 Provider 自己的出站链接，用户永远能跳出去。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::clients::PartnerApi;
use crate::config::PartnerConfig;
use crate::models::{ClickType, DmeProvider, PartnerOrder, RedirectStrategy, SearchRequest};
use crate::services::ReferenceDataService;

/// 接力过程中对外可见的阶段（前端轮询 / SSE 展示用文案）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPhase {
    ConnectingProvider,
    ConfirmingInfo,
    RedirectingPortal,
}

impl RedirectPhase {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConnectingProvider => "Connecting to insurance provider…",
            Self::ConfirmingInfo => "Confirming your information…",
            Self::RedirectingPortal => "Redirecting to Insurance Portal…",
        }
    }
}

/// 接力结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectOutcome {
    /// 最终跳转地址
    pub target: String,
    pub click_type: ClickType,
    /// true 表示走通了合作方门户
    pub partner_handoff: bool,
}

pub struct RedirectSequencer {
    partner: Arc<dyn PartnerApi>,
    reference: Arc<ReferenceDataService>,
    /// 未下发 redirect_strategy 时按公司名匹配的兼容列表
    partner_names: Vec<String>,
    ext_id_suffix: String,
}

impl RedirectSequencer {
    pub fn new(
        partner: Arc<dyn PartnerApi>,
        reference: Arc<ReferenceDataService>,
        config: &PartnerConfig,
    ) -> Self {
        Self {
            partner,
            reference,
            partner_names: config.provider_names.clone(),
            ext_id_suffix: config.ext_id_suffix.clone(),
        }
    }

    /// Provider 的生效跳转策略：记录自带的标记优先，否则按配置名单匹配
    pub fn strategy_for(&self, provider: &DmeProvider) -> RedirectStrategy {
        if let Some(strategy) = provider.redirect_strategy {
            return strategy;
        }
        let is_partner = self
            .partner_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(provider.company_name.trim()));
        if is_partner {
            RedirectStrategy::PartnerOrderApi
        } else {
            RedirectStrategy::DirectLink
        }
    }

    /// 解析一次跳转，`on_phase` 在每个接力阶段开始时回调
    pub async fn resolve(
        &self,
        provider: &DmeProvider,
        query: &SearchRequest,
        on_phase: &(dyn Fn(RedirectPhase) + Send + Sync),
    ) -> RedirectOutcome {
        if self.strategy_for(provider) == RedirectStrategy::DirectLink {
            return Self::direct(provider);
        }

        // 步骤 1：查出该州合作方侧可用的保险公司
        on_phase(RedirectPhase::ConnectingProvider);
        let listing = match self.partner.providers_by_state(&query.state).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(step = "state_lookup", state = %query.state, "partner relay degraded: {}", e);
                return Self::direct(provider);
            }
        };

        // 步骤 2：按展示名匹配用户选的保险公司。
        // 只看第一条名称命中的记录；它没有 id 也算匹配失败，不再继续往后找。
        let matched = listing.providers.iter().find(|entry| {
            entry
                .provider_display_name
                .trim()
                .eq_ignore_ascii_case(query.insurance_provider.trim())
        });
        let matched_id = match matched.and_then(|entry| entry.id) {
            Some(id) => id,
            None => {
                warn!(
                    step = "insurance_match",
                    insurance = %query.insurance_provider,
                    matched = matched.is_some(),
                    "partner relay degraded: no usable provider match in state listing"
                );
                return Self::direct(provider);
            }
        };

        // 步骤 3：创建订单
        on_phase(RedirectPhase::ConfirmingInfo);
        let order = PartnerOrder {
            ext_id: format!("{}-{}", Utc::now().timestamp(), self.ext_id_suffix),
            mom_email: query.email.clone(),
            provider: matched_id,
            mom_address_state: self.reference.full_state_name(&query.state).await,
            first_name: String::new(),
            last_name: String::new(),
            referral_details: String::new(),
        };
        let receipt = match self.partner.create_order(&order).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(step = "order_create", ext_id = %order.ext_id, "partner relay degraded: {}", e);
                return Self::direct(provider);
            }
        };

        // 步骤 4：resume token 换门户地址
        match receipt.resume_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                on_phase(RedirectPhase::RedirectingPortal);
                info!(ext_id = %order.ext_id, "partner relay completed");
                RedirectOutcome {
                    target: self.partner.redirect_url(&token),
                    click_type: ClickType::AutoRedirect,
                    partner_handoff: true,
                }
            }
            None => {
                warn!(
                    step = "resume_token",
                    ext_id = %order.ext_id,
                    "partner relay degraded: order response carried no resume token"
                );
                Self::direct(provider)
            }
        }
    }

    fn direct(provider: &DmeProvider) -> RedirectOutcome {
        RedirectOutcome {
            target: provider.outbound_link().to_string(),
            click_type: ClickType::Manual,
            partner_handoff: false,
        }
    }
}
