//! 点击事件去重与异步上报
//!
//! 同一会话内对同一 Provider 只上报一次；新查询提交时重置，
//! 不再活跃的会话随 TTL 过期回收。
//! 上报是 fire-and-forget，失败只记日志，不影响跳转。

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::clients::BackendApi;
use crate::config::CacheConfig;
use crate::models::ClickEvent;

pub struct ClickTracker {
    backend: Arc<dyn BackendApi>,
    /// session_id → 已上报的 provider_id 集合。
    /// 与会话结果缓存同样的 TTL/容量上界，点完就消失的会话不会常驻。
    seen: moka::sync::Cache<String, Arc<DashSet<i64>>>,
}

impl ClickTracker {
    pub fn new(backend: Arc<dyn BackendApi>, config: &CacheConfig) -> Self {
        let seen = moka::sync::Cache::builder()
            .time_to_live(Duration::from_secs(config.session_ttl_secs))
            .max_capacity(config.session_max_capacity)
            .build();

        Self { backend, seen }
    }

    /// 上报一次点击
    ///
    /// 返回 None 表示会话内重复点击，被去重丢弃。
    /// 返回的 JoinHandle 仅用于测试同步，生产路径不 await。
    pub fn track(&self, event: ClickEvent) -> Option<JoinHandle<()>> {
        let seen_in_session = self
            .seen
            .get_with(event.session_id.clone(), || Arc::new(DashSet::new()));
        let first_click = seen_in_session.insert(event.provider_id);

        if !first_click {
            debug!(
                session = %event.session_id,
                provider = event.provider_id,
                "duplicate click suppressed"
            );
            return None;
        }

        let backend = self.backend.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = backend.track_click(&event).await {
                debug!(provider = event.provider_id, "click tracking failed: {}", e);
            }
        }))
    }

    /// 新查询提交时调用：同一会话的去重状态作废
    pub fn reset_session(&self, session_id: &str) {
        self.seen.invalidate(session_id);
    }
}
