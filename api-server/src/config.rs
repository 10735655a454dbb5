use std::{env, path::PathBuf, sync::Arc};

use pew_core::constants::MAX_USED_SESSIONS;
use pew_core::{ReplayGuard, SessionSigner, SubmissionValidator};

use crate::store::ScoreStore;

pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_PORT: u16 = 8080;
pub(crate) const DEFAULT_DATA_DIR: &str = "./data";
pub(crate) const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
// A submission is six short fields; anything near this is not a game client.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024;
pub(crate) const DEV_ANTICHEAT_SECRET: &str = "pew-pew-dev-secret";

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) data_dir: PathBuf,
    pub(crate) secret: Option<String>,
    pub(crate) max_used_sessions: usize,
    pub(crate) leaderboard_limit: usize,
    pub(crate) max_body_bytes: usize,
    pub(crate) http_workers: Option<usize>,
    pub(crate) cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            host: read_env_string("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: read_env_u16("PORT", DEFAULT_PORT),
            data_dir: read_env_string("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            secret: read_env_string("ANTICHEAT_SECRET"),
            max_used_sessions: read_env_usize("MAX_USED_SESSIONS", MAX_USED_SESSIONS),
            leaderboard_limit: read_env_usize("LEADERBOARD_LIMIT", DEFAULT_LEADERBOARD_LIMIT),
            max_body_bytes: read_env_usize("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            http_workers: read_env_optional_usize("HTTP_WORKERS"),
            cors_allowed_origin: read_env_string("CORS_ALLOWED_ORIGIN"),
        }
    }

    pub(crate) fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Signing secret, falling back to a fixed development value.
    pub(crate) fn signer(&self) -> Result<SessionSigner, String> {
        let secret = match &self.secret {
            Some(secret) => secret.as_str(),
            None => {
                tracing::warn!(
                    "ANTICHEAT_SECRET is not set; using the development secret. \
                     Tokens are forgeable."
                );
                DEV_ANTICHEAT_SECRET
            }
        };
        SessionSigner::new(secret).map_err(|e| format!("failed to key session signer: {e}"))
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) scores: Arc<ScoreStore>,
    pub(crate) validator: Arc<SubmissionValidator>,
    pub(crate) leaderboard_limit: usize,
}

impl AppState {
    pub(crate) fn new(config: &ServerConfig, scores: ScoreStore) -> Result<Self, String> {
        Ok(Self {
            scores: Arc::new(scores),
            validator: Arc::new(SubmissionValidator::new(
                config.signer()?,
                ReplayGuard::with_capacity(config.max_used_sessions),
            )),
            leaderboard_limit: config.leaderboard_limit,
        })
    }
}

pub(crate) fn read_env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_optional_usize(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
}

pub(crate) fn read_env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
