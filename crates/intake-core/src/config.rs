//! Configuration module
//!
//! Service configuration is read from the environment (and an optional `.env`
//! file). The metadata store credential is deliberately *not* validated here:
//! a missing or broken credential degrades the store to unavailable at startup
//! instead of aborting the process.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_FIREBASE_DATABASE_URL, DEFAULT_UPLOAD_DIR};
use crate::metadata_types::MetadataBackend;

const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 20;
const METADATA_STORE_TIMEOUT_SECS: u64 = 30;

/// Environment variables checked, in order, for the service-account JSON.
pub const SERVICE_ACCOUNT_ENV_VARS: [&str; 2] = [
    "FIREBASE_SERVICE_ACCOUNT",
    "GOOGLE_APPLICATION_CREDENTIALS_JSON",
];

/// Parse a numeric setting, falling back to `default` when the variable is unset.
/// A value that is set but unparsable is an error.
fn parse_number<T: FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        None => Ok(default),
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    // Local file storage
    pub upload_dir: String,
    pub max_upload_size_bytes: usize,
    /// Overrides the request-derived host when building public file URLs
    pub public_base_url: Option<String>,
    // Metadata store
    pub metadata_backend: MetadataBackend,
    pub firebase_database_url: String,
    pub firebase_service_account: Option<String>,
    pub metadata_store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb: usize = parse_number(
            "MAX_UPLOAD_SIZE_MB",
            env::var("MAX_UPLOAD_SIZE_MB").ok(),
            MAX_UPLOAD_SIZE_MB,
        )?;

        let metadata_backend = match env::var("METADATA_STORE_BACKEND") {
            Ok(s) if !s.trim().is_empty() => s.parse()?,
            _ => MetadataBackend::Firebase,
        };

        let firebase_service_account = SERVICE_ACCOUNT_ENV_VARS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|s| !s.trim().is_empty()));

        let config = Config {
            server_port: parse_number("PORT", env::var("PORT").ok(), SERVER_PORT)?,
            environment,
            cors_origins,
            upload_dir: env::var("UPLOAD_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            metadata_backend,
            firebase_database_url: env::var("FIREBASE_DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FIREBASE_DATABASE_URL.to_string()),
            firebase_service_account,
            metadata_store_timeout_secs: parse_number(
                "METADATA_STORE_TIMEOUT_SECONDS",
                env::var("METADATA_STORE_TIMEOUT_SECONDS").ok(),
                METADATA_STORE_TIMEOUT_SECS,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.metadata_store_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "METADATA_STORE_TIMEOUT_SECONDS must be greater than 0"
            ));
        }

        if self.upload_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.metadata_backend == MetadataBackend::Firebase
            && !self.firebase_database_url.starts_with("https://")
            && !self.firebase_database_url.starts_with("http://")
        {
            return Err(anyhow::anyhow!(
                "FIREBASE_DATABASE_URL must be an http(s) URL"
            ));
        }

        if let Some(base) = &self.public_base_url {
            if !base.starts_with("https://") && !base.starts_with("http://") {
                return Err(anyhow::anyhow!("PUBLIC_BASE_URL must be an http(s) URL"));
            }
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }

    pub fn metadata_backend(&self) -> MetadataBackend {
        self.metadata_backend
    }

    pub fn firebase_database_url(&self) -> &str {
        &self.firebase_database_url
    }

    pub fn firebase_service_account(&self) -> Option<&str> {
        self.firebase_service_account.as_deref()
    }

    pub fn metadata_store_timeout_secs(&self) -> u64 {
        self.metadata_store_timeout_secs
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            public_base_url: None,
            metadata_backend: MetadataBackend::Firebase,
            firebase_database_url: DEFAULT_FIREBASE_DATABASE_URL.to_string(),
            firebase_service_account: None,
            metadata_store_timeout_secs: METADATA_STORE_TIMEOUT_SECS,
        }
    }
}
