//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use super::types::TS_EXPORT_PATH;
use crate::errors::LookupError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 后端代理错误
/// - 3000-3099: 合作方错误
/// - 4000-4099: 导入导出错误
/// - 5000-5099: 分析统计错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    FileTooLarge = 1011,
    InvalidDateFormat = 1012,
    ServiceUnavailable = 1030,

    // 后端代理错误 2000-2099
    BackendError = 2000,
    BackendUnreachable = 2001,

    // 合作方错误 3000-3099
    PartnerError = 3000,

    // 导入导出错误 4000-4099
    ImportFailed = 4000,
    ExportFailed = 4001,
    InvalidMultipartData = 4002,
    FileReadError = 4003,
    CsvFileMissing = 4004,
    CsvParseError = 4005,

    // 分析统计错误 5000-5099
    AnalyticsQueryFailed = 5000,
    AnalyticsInvalidDateRange = 5001,
}

impl From<LookupError> for ErrorCode {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Backend(_) => Self::BackendError,
            LookupError::BackendUnreachable(_) => Self::BackendUnreachable,
            LookupError::Partner(_) => Self::PartnerError,
            LookupError::Validation(_) => Self::BadRequest,
            LookupError::NotFound(_) => Self::NotFound,
            LookupError::Serialization(_) => Self::InternalServerError,
            LookupError::InvalidMultipartData(_) => Self::InvalidMultipartData,
            LookupError::FileRead(_) => Self::FileReadError,
            LookupError::CsvParse(_) => Self::CsvParseError,
            LookupError::DateParse(_) => Self::InvalidDateFormat,
        }
    }
}
