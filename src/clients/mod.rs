//! 外部协作方 HTTP 客户端
//!
//! 两个出站边界：后端 REST API（数据所有者）和合作方 WordPress 订单 API。
//! 均以 trait 暴露，便于测试中用内存 mock 替换。

pub mod backend;
pub mod partner;

use async_trait::async_trait;

use crate::errors::{LookupError, Result};
use crate::models::{
    AnalyticsRange, ClickAnalyticsRow, ClickEvent, ClickSummary, DmeProvider,
    InsuranceProviderRef, PartnerOrder, PartnerOrderReceipt, PartnerProvidersResponse,
    ProviderUpdate, SearchRequest, StateRef,
};

pub use backend::HttpBackendClient;
pub use partner::HttpPartnerClient;

/// 后端 REST API 边界
///
/// 本服务不落地任何业务数据，所有读写都代理到这里。
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn fetch_states(&self) -> Result<Vec<StateRef>>;

    async fn fetch_insurance_providers(&self) -> Result<Vec<InsuranceProviderRef>>;

    /// 按州 + 保险公司查询 DME Provider 列表
    async fn search_dme(&self, query: &SearchRequest) -> Result<Vec<DmeProvider>>;

    /// 上报点击事件（调用方负责 fire-and-forget）
    async fn track_click(&self, event: &ClickEvent) -> Result<()>;

    async fn create_provider(&self, provider: &DmeProvider) -> Result<DmeProvider>;

    /// 批量导入，返回后端的导入摘要原文
    async fn create_providers_bulk(
        &self,
        providers: &[DmeProvider],
    ) -> Result<serde_json::Value>;

    async fn update_provider(&self, id: i64, update: &ProviderUpdate) -> Result<DmeProvider>;

    async fn delete_provider(&self, id: i64) -> Result<()>;

    /// 按公司名模糊检索
    async fn search_providers(&self, name: &str) -> Result<Vec<DmeProvider>>;

    async fn clicks_summary(&self) -> Result<ClickSummary>;

    async fn clicks_detail(&self, range: &AnalyticsRange) -> Result<Vec<ClickAnalyticsRow>>;

    /// 导出用户邮箱，返回 CSV 文本原文
    async fn export_user_emails(&self) -> Result<String>;
}

/// 合作方 WordPress 订单 API 边界
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// 查询某州可用的保险公司列表
    async fn providers_by_state(&self, state_abbr: &str) -> Result<PartnerProvidersResponse>;

    /// 创建订单，期望返回 resume_token
    async fn create_order(&self, order: &PartnerOrder) -> Result<PartnerOrderReceipt>;

    /// 携带 resume token 的门户跳转地址
    fn redirect_url(&self, token: &str) -> String;
}

/// 在 tokio 阻塞线程池中执行同步 HTTP 调用
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| LookupError::backend_unreachable(format!("blocking task failed: {}", e)))?
}
