use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含基础设施配置：
/// - server: 服务器地址、端口、CPU 数量
/// - backend: 后端 REST API 连接配置
/// - partner: 合作方 WordPress 订单 API 配置
/// - cache: 参考数据 / 会话缓存配置
/// - routes: Admin 路由前缀
/// - api: Admin Token 与 CORS 配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub partner: PartnerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：DME，分隔符：__
    /// 示例：DME__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 DME，分隔符 __
            .add_source(
                Environment::with_prefix("DME")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 后端 REST API 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

/// 合作方 WordPress 订单 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerConfig {
    #[serde(default = "default_partner_base_url")]
    pub base_url: String,
    /// X-HBE-API-Key 请求头的值，空则订单接力直接降级
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
    /// 后端未下发 redirect_strategy 时按公司名匹配的兼容列表
    #[serde(default = "default_partner_provider_names")]
    pub provider_names: Vec<String>,
    /// extId 的尾缀：`{unix_timestamp}-{suffix}`
    #[serde(default = "default_ext_id_suffix")]
    pub ext_id_suffix: String,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 州 / 保险公司参考数据缓存秒数
    #[serde(default = "default_reference_ttl")]
    pub reference_ttl_secs: u64,
    /// 查询会话缓存秒数
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_session_capacity")]
    pub session_max_capacity: u64,
}

/// 路由前缀配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
}

/// API 接入配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Admin Bearer Token，空则整组 Admin 路由返回 404
    #[serde(default)]
    pub admin_token: String,
    /// 为空时放行所有来源
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_backend_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_partner_base_url() -> String {
    "https://insurance-checker.annabella-pump.com".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_partner_provider_names() -> Vec<String> {
    vec!["breastpumps.com".to_string()]
}

fn default_ext_id_suffix() -> String {
    "ANB".to_string()
}

fn default_reference_ttl() -> u64 {
    600
}

fn default_session_ttl() -> u64 {
    1800
}

fn default_session_capacity() -> u64 {
    10_000
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_secs: default_http_timeout(),
        }
    }
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            base_url: default_partner_base_url(),
            api_key: String::new(),
            timeout_secs: default_http_timeout(),
            provider_names: default_partner_provider_names(),
            ext_id_suffix: default_ext_id_suffix(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reference_ttl_secs: default_reference_ttl(),
            session_ttl_secs: default_session_ttl(),
            session_max_capacity: default_session_capacity(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
