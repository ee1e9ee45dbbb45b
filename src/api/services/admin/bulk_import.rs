//! Admin API CSV 批量导入
//!
//! multipart 上传 → 宽容解析 → 预览；确认后按 JSON 数组提交到后端。
//! preview 只解析不提交，给运营在导入前核对的机会。

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, Result as ActixResult};
use futures_util::StreamExt;
use tracing::{error, info};

use crate::clients::BackendApi;
use crate::errors::LookupError;
use crate::services::csv_import::parse_bulk_csv;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_lookup, error_response, success_response};
use super::types::BulkPreviewResponse;

/// 最大导入文件大小 (10MB)
const MAX_IMPORT_FILE_SIZE: usize = 10 * 1024 * 1024;

/// 从 multipart 表单中取出 "file" 字段内容
async fn read_csv_field(payload: &mut Multipart) -> Result<Vec<u8>, HttpResponse> {
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to parse multipart field: {}", e);
                return Err(error_from_lookup(&LookupError::invalid_multipart_data(
                    format!("Invalid multipart data: {}", e),
                )));
            }
        };

        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if data.len() + bytes.len() > MAX_IMPORT_FILE_SIZE {
                        return Err(error_response(
                            actix_web::http::StatusCode::BAD_REQUEST,
                            ErrorCode::FileTooLarge,
                            &format!(
                                "File size exceeds maximum {} MB",
                                MAX_IMPORT_FILE_SIZE / 1024 / 1024
                            ),
                        ));
                    }
                    data.extend_from_slice(&bytes);
                }
                Err(e) => {
                    error!("Failed to read file chunk: {}", e);
                    return Err(error_from_lookup(&LookupError::file_read(format!(
                        "Failed to read file: {}",
                        e
                    ))));
                }
            }
        }
        csv_data = Some(data);
    }

    csv_data.ok_or_else(|| {
        error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            ErrorCode::CsvFileMissing,
            "Missing 'file' field in multipart form",
        )
    })
}

/// POST /providers/bulk/preview - 只解析，返回将要导入的记录
pub async fn preview_bulk_import(mut payload: Multipart) -> ActixResult<impl Responder> {
    info!("Admin API: bulk import preview");

    let data = match read_csv_field(&mut payload).await {
        Ok(d) => d,
        Err(resp) => return Ok(resp),
    };

    match parse_bulk_csv(&data) {
        Ok(providers) => Ok(success_response(BulkPreviewResponse {
            total: providers.len(),
            providers,
        })),
        Err(e) => Ok(error_from_lookup(&e)),
    }
}

/// POST /providers/bulk - 提交预览确认后的记录（JSON 数组）
pub async fn bulk_import(
    payload: web::Json<Vec<crate::models::DmeProvider>>,
    backend: web::Data<Arc<dyn BackendApi>>,
) -> ActixResult<impl Responder> {
    info!("Admin API: bulk import");

    if payload.is_empty() {
        return Ok(error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            ErrorCode::ImportFailed,
            "Import payload contained no records",
        ));
    }

    info!(count = payload.len(), "submitting bulk import to backend");
    Ok(api_result(backend.create_providers_bulk(&payload).await))
}
