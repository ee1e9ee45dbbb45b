//! 查询会话服务
//!
//! 一次提交 = 恰好一次后端查询；结果按 session_id 缓存，
//! 供后续 /go 跳转按 provider_id 取回完整记录。

use std::sync::Arc;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::clients::BackendApi;
use crate::config::CacheConfig;
use crate::errors::Result;
use crate::models::{DmeProvider, SearchRequest};
use crate::services::ClickTracker;

/// 一次查询的会话快照
pub struct SessionSearch {
    pub query: SearchRequest,
    pub providers: Vec<DmeProvider>,
}

pub struct SearchService {
    backend: Arc<dyn BackendApi>,
    clicks: Arc<ClickTracker>,
    sessions: moka::sync::Cache<String, Arc<SessionSearch>>,
}

impl SearchService {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        clicks: Arc<ClickTracker>,
        config: &CacheConfig,
    ) -> Self {
        let sessions = moka::sync::Cache::builder()
            .time_to_live(Duration::from_secs(config.session_ttl_secs))
            .max_capacity(config.session_max_capacity)
            .build();

        Self {
            backend,
            clicks,
            sessions,
        }
    }

    /// 提交查询：重置点击去重、调用后端一次、缓存会话
    pub async fn submit(&self, query: SearchRequest) -> Result<(String, Arc<SessionSearch>)> {
        let session_id = query
            .session_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(generate_session_id);

        // 新查询意味着旧结果作废，允许对同一 Provider 再次计数
        self.clicks.reset_session(&session_id);

        let providers = self.backend.search_dme(&query).await?;
        let session = Arc::new(SessionSearch { query, providers });
        self.sessions.insert(session_id.clone(), session.clone());

        Ok((session_id, session))
    }

    pub fn session(&self, session_id: &str) -> Option<Arc<SessionSearch>> {
        self.sessions.get(session_id)
    }

    /// 从会话结果里取回指定 Provider
    pub fn session_provider(
        &self,
        session_id: &str,
        provider_id: i64,
    ) -> Option<(Arc<SessionSearch>, DmeProvider)> {
        let session = self.sessions.get(session_id)?;
        let provider = session
            .providers
            .iter()
            .find(|p| p.id == Some(provider_id))?
            .clone();
        Some((session, provider))
    }
}

/// 会话 id：`session_{毫秒时间戳}_{9 位随机小写字母数字}`
pub fn generate_session_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("session_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}
