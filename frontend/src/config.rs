use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8002/api";
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_PAGE_SIZE: u32 = 15;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw shape accepted from `window.__MIDO_ENV`, `window.__MIDO_CONFIG` or
/// `./config.json`. Every field is optional; gaps fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(alias = "SUBMIT_TIMEOUT_MS")]
    pub submit_timeout_ms: Option<u64>,
    #[serde(alias = "PAGE_SIZE")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub submit_timeout: Duration,
    pub page_size: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        RuntimeConfig::default().resolve()
    }
}

impl RuntimeConfig {
    pub fn resolve(self) -> ConsoleConfig {
        let api_base_url = self
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let submit_timeout_ms = self
            .submit_timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_SUBMIT_TIMEOUT_MS);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        ConsoleConfig {
            api_base_url,
            submit_timeout: Duration::from_millis(submit_timeout_ms),
            page_size,
        }
    }
}

static CONSOLE_CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

fn cache(config: ConsoleConfig) -> ConsoleConfig {
    let _ = CONSOLE_CONFIG.set(config);
    CONSOLE_CONFIG.get().cloned().unwrap_or_default()
}

/// Config snapshot for synchronous callers. Defaults until [`init`] finishes.
pub fn current() -> ConsoleConfig {
    CONSOLE_CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
        serde_json::from_str(&json).ok()
    }

    pub fn snapshot_from_globals() -> Option<RuntimeConfig> {
        // window.__MIDO_ENV (env.js) takes precedence over window.__MIDO_CONFIG
        read_global("__MIDO_ENV").or_else(|| read_global("__MIDO_CONFIG"))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
async fn discover() -> RuntimeConfig {
    if let Some(existing) = browser::snapshot_from_globals() {
        return existing;
    }
    match browser::fetch_runtime_config().await {
        Some(cfg) => cfg,
        None => {
            log::warn!("config.json unavailable, using defaults");
            RuntimeConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn discover() -> RuntimeConfig {
    RuntimeConfig::default()
}

pub async fn load() -> ConsoleConfig {
    if let Some(cached) = CONSOLE_CONFIG.get() {
        return cached.clone();
    }
    cache(discover().await.resolve())
}

pub async fn await_api_base_url() -> String {
    load().await.api_base_url
}

pub async fn init() {
    let config = load().await;
    log::debug!(
        "runtime config: api_base_url={} submit_timeout={:?} page_size={}",
        config.api_base_url,
        config.submit_timeout,
        config.page_size
    );
}
