use std::net::SocketAddr;
use std::time::Duration;

use schoolfeed_core::events::DispatchMode;

/// Runtime configuration read from `SF_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow_origins: Vec<String>,
    pub request_timeout: Duration,
    pub event_dispatch: DispatchMode,
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

impl Config {
    pub fn from_env() -> Self {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let listen_addr = std::env::var("SF_LISTEN_ADDR")
            .ok()
            .and_then(|v| match v.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Ignoring invalid SF_LISTEN_ADDR '{}': {}", v, e);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let db_path = std::env::var("SF_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        let cors_allow_origins = std::env::var("SF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout = std::env::var("SF_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));

        let event_dispatch = std::env::var("SF_EVENT_DISPATCH")
            .ok()
            .and_then(|v| match v.parse::<DispatchMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!("Ignoring SF_EVENT_DISPATCH: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            listen_addr,
            db_path,
            cors_allow_origins,
            request_timeout,
            event_dispatch,
        }
    }
}
