//! 配置加载：TOML 文件 + 环境变量覆盖

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use edge_ddns_core::services::{DEFAULT_CACHE_TTL, DomainWhitelist};
use edge_ddns_core::types::{ClientOptions, ProviderKind};
use edge_ddns_core::UpdateServiceConfig;
use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "EDGE_DDNS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_DOCS_URL: &str = "https://newfuture.github.io/edge-ddns-proxy";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ddns: DdnsConfig,
    pub upstream: UpstreamConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 0 = one worker per CPU
    pub workers: usize,
    /// Use the socket peer address when the client supplied no IP.
    pub peer_addr_fallback: bool,
    pub docs_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 0,
            peer_addr_fallback: true,
            docs_url: DEFAULT_DOCS_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DdnsConfig {
    /// Provider id or alias; empty disables the fallback.
    pub default_provider: String,
    /// Comma-separated suffix whitelist; empty allows all.
    pub allowed_suffix: String,
    /// Seconds.
    pub cache_ttl: u64,
    pub cache_enabled: bool,
}

impl Default for DdnsConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::Aliyun.id().to_string(),
            allowed_suffix: String::new(),
            cache_ttl: DEFAULT_CACHE_TTL.as_secs(),
            cache_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        let defaults = ClientOptions::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            max_retries: defaults.max_retries,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `edge_ddns_core=debug,info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load from `$EDGE_DDNS_CONFIG` (default `config.toml`), then apply
    /// environment overrides. A missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `ALLOWED_SUFFIX`, `DEFAULT_PROVIDER`, `CACHE_TTL`,
    /// `EDGE_DDNS_HOST`, `EDGE_DDNS_PORT` and `EDGE_DDNS_LOG`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(v) = lookup("ALLOWED_SUFFIX") {
            self.ddns.allowed_suffix = v;
        }
        if let Some(v) = lookup("DEFAULT_PROVIDER") {
            self.ddns.default_provider = v;
        }
        if let Some(v) = lookup("CACHE_TTL") {
            self.ddns.cache_ttl = v
                .trim()
                .parse()
                .with_context(|| format!("CACHE_TTL must be a number of seconds, got '{v}'"))?;
        }
        if let Some(v) = lookup("EDGE_DDNS_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("EDGE_DDNS_PORT") {
            self.server.port = v
                .trim()
                .parse()
                .with_context(|| format!("EDGE_DDNS_PORT must be a port number, got '{v}'"))?;
        }
        if let Some(v) = lookup("EDGE_DDNS_LOG") {
            self.log.level = v;
        }
        Ok(())
    }

    /// Empty or `none` disables the default provider.
    pub fn default_provider(&self) -> anyhow::Result<Option<ProviderKind>> {
        let raw = self.ddns.default_provider.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        match raw.parse() {
            Ok(kind) => Ok(Some(kind)),
            Err(e) => bail!("ddns.default_provider: {e}"),
        }
    }

    pub fn update_service_config(&self) -> anyhow::Result<UpdateServiceConfig> {
        Ok(UpdateServiceConfig {
            whitelist: DomainWhitelist::parse(&self.ddns.allowed_suffix),
            default_provider: self.default_provider()?,
            cache_ttl: Duration::from_secs(self.ddns.cache_ttl),
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            connect_timeout: Duration::from_secs(self.upstream.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.upstream.request_timeout_secs),
            max_retries: self.upstream.max_retries,
        }
    }
}
