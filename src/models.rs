//! 领域模型定义
//!
//! 字段命名与后端 REST API / 合作方订单 API 的线上契约保持一致。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use ts_rs::TS;

/// 输出目录常量（前端类型生成）
pub const TS_EXPORT_PATH: &str = "../frontend/src/services/types.generated.ts";

/// 出站跳转策略
///
/// REDESIGN: 原实现对 "breastpumps.com" 做了硬编码的名称特判，
/// 这里抽象为挂在 Provider 记录上的能力标记；后端不下发该字段时，
/// 由配置中的 partner.provider_names 列表做兼容解析。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, TS, AsRefStr,
)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RedirectStrategy {
    /// 三步合作方订单接力（state → order → resume token）
    PartnerOrderApi,
    /// 直接打开 Provider 自己的出站链接
    #[default]
    DirectLink,
}

impl std::str::FromStr for RedirectStrategy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "partner-order-api" => Ok(Self::PartnerOrderApi),
            "direct-link" => Ok(Self::DirectLink),
            _ => Err(format!(
                "Invalid redirect strategy: '{}'. Valid: partner-order-api, direct-link",
                s
            )),
        }
    }
}

/// 点击类型：用户手动点击 vs 系统发起的自动跳转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, AsRefStr)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClickType {
    Manual,
    AutoRedirect,
}

/// DME Provider 记录
///
/// 前端视角下除 Admin 编辑/删除外不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct DmeProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub company_name: String,
    /// 两字母州缩写
    pub state: String,
    pub insurance_providers: Vec<String>,
    pub phone_number: String,
    pub email: String,
    pub weblink: String,
    /// 专属出站链接；为空时回落到 weblink
    #[serde(default)]
    pub dedicated_link: String,
    #[serde(default)]
    pub multiple_pump_models: bool,
    #[serde(default)]
    pub upgrade_pumps_available: bool,
    #[serde(default)]
    pub resupply_available: bool,
    #[serde(default)]
    pub accessories_available: bool,
    #[serde(default)]
    pub lactation_services_available: bool,
    /// 后端可选下发；缺省时由配置列表解析
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_strategy: Option<RedirectStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DmeProvider {
    /// Provider 自己的出站链接（fallback 目标）
    pub fn outbound_link(&self) -> &str {
        if self.dedicated_link.trim().is_empty() {
            &self.weblink
        } else {
            &self.dedicated_link
        }
    }
}

/// Provider 部分更新 payload（PATCH 语义，未设置的字段不序列化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct ProviderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_providers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weblink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_pump_models: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_pumps_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resupply_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessories_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lactation_services_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_strategy: Option<RedirectStrategy>,
}

/// 州参考数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct StateRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub abbreviation: String,
}

/// 保险公司参考数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct InsuranceProviderRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// 一次查询提交（每次提交新建，生命周期到会话结束）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct SearchRequest {
    /// 两字母州缩写
    pub state: String,
    pub insurance_provider: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// 点击事件（fire-and-forget，丢失可接受）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub provider_id: i64,
    pub user_email: String,
    pub search_state: String,
    pub search_insurance: String,
    pub click_type: ClickType,
    pub session_id: String,
    pub user_agent: String,
    pub referrer: String,
}

/// 合作方订单 payload（构造一次、发送一次、不落地）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerOrder {
    /// `{unix_timestamp}-{suffix}` 形式的外部单号
    pub ext_id: String,
    pub mom_email: String,
    /// 合作方侧匹配到的保险公司 id
    pub provider: i64,
    /// 州全名（缩写查不到时回落为缩写本身）
    pub mom_address_state: String,
    pub first_name: String,
    pub last_name: String,
    pub referral_details: String,
}

/// 合作方 providers-by-state 响应中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerProviderEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub provider_display_name: String,
}

/// 合作方 providers-by-state 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartnerProvidersResponse {
    #[serde(default)]
    pub providers: Vec<PartnerProviderEntry>,
}

/// 合作方订单响应（只关心 resume_token）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartnerOrderReceipt {
    #[serde(default)]
    pub resume_token: Option<String>,
}

/// 点击分析总览（Admin 面板首屏）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct ClickSummary {
    pub total_clicks_all_time: u64,
    pub clicks_last_30_days: u64,
    pub manual_clicks_last_30_days: u64,
    pub auto_redirects_last_30_days: u64,
    pub unique_users_last_30_days: u64,
    pub period: String,
}

/// 单 Provider 的点击分析明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct ClickAnalyticsRow {
    pub provider_id: i64,
    pub provider_name: String,
    pub total_clicks: u64,
    pub manual_clicks: u64,
    pub auto_redirects: u64,
    pub unique_users: u64,
    pub avg_clicks_per_user: f64,
    #[serde(default)]
    pub top_states: Vec<String>,
    #[serde(default)]
    pub top_insurances: Vec<String>,
}

/// 分析明细查询的日期范围（YYYY-MM-DD）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/services/types.generated.ts")]
pub struct AnalyticsRange {
    pub start_date: String,
    pub end_date: String,
}
