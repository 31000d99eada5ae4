use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Kie.ai API key — image generation endpoints return an error when
    /// unset; everything else works without it.
    pub kie_api_key: String,
    /// Kie.ai API base URL (defaults to the public endpoint).
    pub kie_api_base: String,
    /// Allowed CORS origins. "*" means any.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a workable default except the Kie.ai key, which is
    /// only needed for image generation.
    pub fn load() -> Result<Self> {
        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            db_path: env::var("FOLIO_DB_PATH").unwrap_or_else(|_| "./folio.db".to_string()),
            kie_api_key: env::var("KIE_API_KEY").unwrap_or_default(),
            kie_api_base: env::var("KIE_API_BASE")
                .unwrap_or_else(|_| crate::imagegen::client::DEFAULT_KIE_API_BASE.to_string()),
            cors_origins,
        })
    }
}
