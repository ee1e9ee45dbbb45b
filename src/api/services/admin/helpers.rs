//! Admin API 帮助函数

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::LookupError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LookupError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_lookup(err: &LookupError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err.clone());
    error_response(status, error_code, err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 LookupError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<LookupError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: LookupError = e.into();
            error_from_lookup(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            ErrorCode::from(LookupError::validation("bad")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(LookupError::backend_unreachable("down")),
            ErrorCode::BackendUnreachable
        );
        assert_eq!(
            ErrorCode::from(LookupError::date_parse("bad date")),
            ErrorCode::InvalidDateFormat
        );
    }

    #[test]
    fn test_error_from_lookup_status() {
        let resp = error_from_lookup(&LookupError::not_found("no such provider"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
