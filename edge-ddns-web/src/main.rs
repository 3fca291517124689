//! edge-ddns server entry point

use std::process::ExitCode;

use edge_ddns_web::config::AppConfig;
use edge_ddns_web::state::AppState;
use edge_ddns_web::{logging, run};

#[actix_web::main]
async fn main() -> ExitCode {
    // 日志尚未初始化，配置错误只能写 stderr
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let whitelist = state.service.config().whitelist.suffixes().join(",");
    tracing::info!(
        "Starting edge-ddns (default provider: {}, whitelist: {}, cache: {})",
        state
            .service
            .config()
            .default_provider
            .map_or("none", |k| k.id()),
        if whitelist.is_empty() { "<any>" } else { whitelist.as_str() },
        if config.ddns.cache_enabled {
            format!("{}s", config.ddns.cache_ttl)
        } else {
            "off".to_string()
        },
    );

    if let Err(e) = run(&config, state).await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
