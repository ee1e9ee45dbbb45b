use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LookupError {
    /// 后端 REST API 返回了非成功状态
    Backend(String),
    /// 后端 REST API 网络层不可达
    BackendUnreachable(String),
    /// 合作方订单 API 调用失败（任意步骤）
    Partner(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    InvalidMultipartData(String),
    FileRead(String),
    CsvParse(String),
    DateParse(String),
}

impl LookupError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::Backend(_) => "E001",
            LookupError::BackendUnreachable(_) => "E002",
            LookupError::Partner(_) => "E003",
            LookupError::Validation(_) => "E004",
            LookupError::NotFound(_) => "E005",
            LookupError::Serialization(_) => "E006",
            LookupError::InvalidMultipartData(_) => "E007",
            LookupError::FileRead(_) => "E008",
            LookupError::CsvParse(_) => "E009",
            LookupError::DateParse(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LookupError::Backend(_) => "Backend API Error",
            LookupError::BackendUnreachable(_) => "Backend Unreachable",
            LookupError::Partner(_) => "Partner API Error",
            LookupError::Validation(_) => "Validation Error",
            LookupError::NotFound(_) => "Resource Not Found",
            LookupError::Serialization(_) => "Serialization Error",
            LookupError::InvalidMultipartData(_) => "Invalid Multipart Data",
            LookupError::FileRead(_) => "File Read Error",
            LookupError::CsvParse(_) => "CSV Parse Error",
            LookupError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LookupError::Backend(msg)
            | LookupError::BackendUnreachable(msg)
            | LookupError::Partner(msg)
            | LookupError::Validation(msg)
            | LookupError::NotFound(msg)
            | LookupError::Serialization(msg)
            | LookupError::InvalidMultipartData(msg)
            | LookupError::FileRead(msg)
            | LookupError::CsvParse(msg)
            | LookupError::DateParse(msg) => msg,
        }
    }

    /// 映射为 HTTP 状态码（用于 Admin API 响应）
    pub fn http_status(&self) -> StatusCode {
        match self {
            LookupError::Backend(_) => StatusCode::BAD_GATEWAY,
            LookupError::BackendUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LookupError::Partner(_) => StatusCode::BAD_GATEWAY,
            LookupError::Validation(_)
            | LookupError::InvalidMultipartData(_)
            | LookupError::CsvParse(_)
            | LookupError::DateParse(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Serialization(_) | LookupError::FileRead(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LookupError {}

// 便捷的构造函数
impl LookupError {
    pub fn backend<T: Into<String>>(msg: T) -> Self {
        LookupError::Backend(msg.into())
    }

    pub fn backend_unreachable<T: Into<String>>(msg: T) -> Self {
        LookupError::BackendUnreachable(msg.into())
    }

    pub fn partner<T: Into<String>>(msg: T) -> Self {
        LookupError::Partner(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LookupError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LookupError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LookupError::Serialization(msg.into())
    }

    pub fn invalid_multipart_data<T: Into<String>>(msg: T) -> Self {
        LookupError::InvalidMultipartData(msg.into())
    }

    pub fn file_read<T: Into<String>>(msg: T) -> Self {
        LookupError::FileRead(msg.into())
    }

    pub fn csv_parse<T: Into<String>>(msg: T) -> Self {
        LookupError::CsvParse(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        LookupError::DateParse(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::FileRead(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LookupError {
    fn from(err: chrono::ParseError) -> Self {
        LookupError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for LookupError {
    fn from(err: csv::Error) -> Self {
        LookupError::CsvParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
