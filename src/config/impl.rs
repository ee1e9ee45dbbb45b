use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory.
/// If the file doesn't exist, uses in-memory defaults.
pub fn init_config() {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load()));
}

/// Initialize the global configuration with an explicit value
///
/// Used by integration tests to avoid reading config.toml / environment.
/// Has no effect if the configuration is already initialized.
pub fn init_config_with(config: StaticConfig) {
    let _ = CONFIG.set(Arc::new(config));
}
