//! 州 / 保险公司参考数据缓存
//!
//! 后端数据变化频率很低，按 TTL 缓存；获取失败时降级为空列表，
//! 失败结果不进缓存，下一次请求会重试。

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::warn;

use crate::clients::BackendApi;
use crate::config::CacheConfig;
use crate::models::{InsuranceProviderRef, StateRef};

pub struct ReferenceDataService {
    backend: Arc<dyn BackendApi>,
    states: Cache<(), Arc<Vec<StateRef>>>,
    insurances: Cache<(), Arc<Vec<InsuranceProviderRef>>>,
}

impl ReferenceDataService {
    pub fn new(backend: Arc<dyn BackendApi>, config: &CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.reference_ttl_secs);
        Self {
            backend,
            states: Cache::builder().time_to_live(ttl).max_capacity(1).build(),
            insurances: Cache::builder().time_to_live(ttl).max_capacity(1).build(),
        }
    }

    /// 州列表（缓存 + 单飞，失败降级为空列表且不缓存）
    pub async fn states(&self) -> Arc<Vec<StateRef>> {
        let result = self
            .states
            .try_get_with((), async {
                self.backend.fetch_states().await.map(Arc::new)
            })
            .await;

        match result {
            Ok(states) => states,
            Err(e) => {
                warn!("states fetch failed, serving empty list: {}", e);
                Arc::new(Vec::new())
            }
        }
    }

    /// 保险公司列表（同上）
    pub async fn insurance_providers(&self) -> Arc<Vec<InsuranceProviderRef>> {
        let result = self
            .insurances
            .try_get_with((), async {
                self.backend.fetch_insurance_providers().await.map(Arc::new)
            })
            .await;

        match result {
            Ok(insurances) => insurances,
            Err(e) => {
                warn!("insurance providers fetch failed, serving empty list: {}", e);
                Arc::new(Vec::new())
            }
        }
    }

    /// 缩写到州全名的解析，查不到时回落为缩写本身
    pub async fn full_state_name(&self, abbr: &str) -> String {
        let states = self.states().await;
        states
            .iter()
            .find(|s| s.abbreviation.eq_ignore_ascii_case(abbr))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| abbr.to_string())
    }
}
