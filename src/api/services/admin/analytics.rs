//! Admin API 点击分析
//!
//! 总览直接透传后端；明细先在网关侧校验日期范围再转发，
//! 避免把格式错误的查询打到后端。

use std::sync::Arc;

use actix_web::{web, Responder};
use chrono::NaiveDate;
use tracing::info;

use crate::clients::BackendApi;
use crate::models::AnalyticsRange;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_response};

/// GET /analytics/summary
pub async fn clicks_summary(backend: web::Data<Arc<dyn BackendApi>>) -> impl Responder {
    api_result(backend.clicks_summary().await)
}

/// 日期范围校验：两端都是合法的 YYYY-MM-DD 且 start <= end
fn validate_range(range: &AnalyticsRange) -> Result<(), String> {
    let start = NaiveDate::parse_from_str(&range.start_date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid start_date: '{}'. Use YYYY-MM-DD", range.start_date))?;
    let end = NaiveDate::parse_from_str(&range.end_date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid end_date: '{}'. Use YYYY-MM-DD", range.end_date))?;
    if start > end {
        return Err(format!(
            "start_date {} is after end_date {}",
            range.start_date, range.end_date
        ));
    }
    Ok(())
}

/// POST /analytics/clicks - 按日期范围查询明细
pub async fn clicks_detail(
    backend: web::Data<Arc<dyn BackendApi>>,
    payload: web::Json<AnalyticsRange>,
) -> impl Responder {
    if let Err(msg) = validate_range(&payload) {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            ErrorCode::AnalyticsInvalidDateRange,
            &msg,
        );
    }

    info!(start = %payload.start_date, end = %payload.end_date, "Admin API: clicks detail");
    api_result(backend.clicks_detail(&payload).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> AnalyticsRange {
        AnalyticsRange {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_valid_range() {
        assert!(validate_range(&range("2026-01-01", "2026-01-31")).is_ok());
        assert!(validate_range(&range("2026-01-01", "2026-01-01")).is_ok());
    }

    #[test]
    fn test_invalid_dates_rejected() {
        assert!(validate_range(&range("2026-13-01", "2026-01-31")).is_err());
        assert!(validate_range(&range("01/01/2026", "2026-01-31")).is_err());
        assert!(validate_range(&range("2026-01-31", "2026-01-01")).is_err());
    }
}
