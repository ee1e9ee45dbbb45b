//! Admin API 类型定义

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::DmeProvider;

/// 输出目录常量
pub const TS_EXPORT_PATH: &str = "../frontend/src/services/types.generated.ts";

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 按公司名检索的查询参数
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ProviderSearchQuery {
    pub name: String,
}

/// 批量导入预览响应
#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BulkPreviewResponse {
    pub total: usize,
    pub providers: Vec<DmeProvider>,
}

#[cfg(test)]
mod tests {
    use ts_rs::TS;

    /// 导出 TypeScript 类型到前端目录
    #[test]
    fn export_typescript_types() {
        use crate::models::{
            AnalyticsRange, ClickAnalyticsRow, ClickSummary, ClickType, DmeProvider,
            InsuranceProviderRef, ProviderUpdate, RedirectStrategy, SearchRequest, StateRef,
        };

        DmeProvider::export().expect("export DmeProvider");
        ProviderUpdate::export().expect("export ProviderUpdate");
        RedirectStrategy::export().expect("export RedirectStrategy");
        ClickType::export().expect("export ClickType");
        StateRef::export().expect("export StateRef");
        InsuranceProviderRef::export().expect("export InsuranceProviderRef");
        SearchRequest::export().expect("export SearchRequest");
        ClickSummary::export().expect("export ClickSummary");
        ClickAnalyticsRow::export().expect("export ClickAnalyticsRow");
        AnalyticsRange::export().expect("export AnalyticsRange");
        super::ProviderSearchQuery::export().expect("export ProviderSearchQuery");
        super::BulkPreviewResponse::export().expect("export BulkPreviewResponse");
        crate::api::services::admin::error_code::ErrorCode::export().expect("export ErrorCode");
    }
}
