use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://webtoons.db".into());

        let secret = std::env::var("SESSION_SECRET")
            .context("SESSION_SECRET must be set (per-deployment, at least 32 bytes)")?;
        anyhow::ensure!(
            secret.len() >= 32,
            "SESSION_SECRET must be at least 32 bytes"
        );

        let session = SessionConfig {
            secret,
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
