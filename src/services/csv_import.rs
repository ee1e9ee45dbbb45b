//! 批量导入 CSV 解析
//!
//! 对编辑手工维护的表格尽量宽容：
//! - 表头按去掉非字母数字后的小写名匹配，列顺序无关
//! - 缺失字段取默认值而不是拒绝整行
//! - 布尔列接受 true / yes / 1（大小写、空白不敏感）
//! - insurance_providers 按分号切分

use std::collections::HashMap;

use tracing::warn;

use crate::errors::{LookupError, Result};
use crate::models::{DmeProvider, RedirectStrategy};

/// 表头名归一化：去掉非字母数字、转小写
fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// 布尔列的宽松解析
fn truthy(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "yes" | "1")
}

fn field<'a>(
    record: &'a csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> &'a str {
    columns
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .unwrap_or("")
}

/// 解析批量导入 CSV，返回待提交的 Provider 列表
pub fn parse_bulk_csv(data: &[u8]) -> Result<Vec<DmeProvider>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| LookupError::csv_parse(format!("unreadable CSV header: {}", e)))?;

    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect();

    let mut providers = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!(row = line + 2, "skipping malformed CSV row: {}", e);
                continue;
            }
        };

        // 整行为空的记录直接跳过
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let insurance_providers: Vec<String> = field(&record, &columns, "insuranceproviders")
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let redirect_strategy = field(&record, &columns, "redirectstrategy")
            .parse::<RedirectStrategy>()
            .ok();

        providers.push(DmeProvider {
            id: None,
            company_name: field(&record, &columns, "companyname").to_string(),
            state: field(&record, &columns, "state").to_string(),
            insurance_providers,
            phone_number: field(&record, &columns, "phonenumber").to_string(),
            email: field(&record, &columns, "email").to_string(),
            weblink: field(&record, &columns, "weblink").to_string(),
            dedicated_link: field(&record, &columns, "dedicatedlink").to_string(),
            multiple_pump_models: truthy(field(&record, &columns, "multiplepumpmodels")),
            upgrade_pumps_available: truthy(field(&record, &columns, "upgradepumpsavailable")),
            resupply_available: truthy(field(&record, &columns, "resupplyavailable")),
            accessories_available: truthy(field(&record, &columns, "accessoriesavailable")),
            lactation_services_available: truthy(field(
                &record,
                &columns,
                "lactationservicesavailable",
            )),
            redirect_strategy,
            created_at: None,
            updated_at: None,
        });
    }

    Ok(providers)
}
