//! Configuration management for the service recommender.
//!
//! This module handles loading and validating configuration from environment variables.
//! Nothing is printed to stdout while loading, since stdout carries MCP traffic.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Configuration for the service recommender.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL
    pub supabase_url: String,

    /// Supabase anon key, sent as both `apikey` and bearer token
    pub supabase_key: String,

    /// Directory holding the per-category catalog JSON files (default: "data")
    pub catalog_dir: PathBuf,

    /// How long a mined rule set may be reused for an unchanged snapshot (default: 300).
    /// Zero disables the rule cache.
    pub rule_cache_ttl_seconds: u64,

    /// Minimum itemset support as a fraction of transactions (default: 0.02)
    pub min_support: f64,

    /// Minimum rule confidence (default: 0.1)
    pub min_confidence: f64,

    /// Users with more bookmarks than this are left out of rule mining (default: 50)
    pub max_transaction_len: usize,

    /// Seed for the random fallback stage (default: 42)
    pub random_seed: u64,

    /// Slate size used when a caller does not ask for one (default: 5)
    pub default_top_k: usize,

    /// Largest slate a caller may request (default: 50)
    pub max_top_k: usize,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Base URL of the Supabase project
    /// - `SUPABASE_ANON_KEY`: API key for the REST endpoint
    ///
    /// Optional environment variables:
    /// - `CATALOG_DIR`: Catalog directory (default: "data")
    /// - `RULE_CACHE_TTL_SECONDS`: Rule cache TTL (default: 300)
    /// - `MIN_SUPPORT`: Apriori support threshold (default: 0.02)
    /// - `MIN_CONFIDENCE`: Rule confidence threshold (default: 0.1)
    /// - `MAX_TRANSACTION_LEN`: Largest bookmark set mined as one transaction (default: 50)
    /// - `RANDOM_SEED`: Random fallback seed (default: 42)
    /// - `DEFAULT_TOP_K` / `MAX_TOP_K`: Slate sizes (default: 5 / 50)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_URL".to_string()))?;

        let supabase_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_ANON_KEY".to_string()))?;

        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if supabase_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_ANON_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let catalog_dir =
            PathBuf::from(env::var("CATALOG_DIR").unwrap_or_else(|_| "data".to_string()));

        let rule_cache_ttl_seconds = Self::parse_env_u64("RULE_CACHE_TTL_SECONDS", 300)?;
        let min_support = Self::parse_env_f64("MIN_SUPPORT", 0.02)?;
        let min_confidence = Self::parse_env_f64("MIN_CONFIDENCE", 0.1)?;
        let max_transaction_len = Self::parse_env_usize("MAX_TRANSACTION_LEN", 50)?;
        let random_seed = Self::parse_env_u64("RANDOM_SEED", 42)?;
        let default_top_k = Self::parse_env_usize("DEFAULT_TOP_K", 5)?;
        let max_top_k = Self::parse_env_usize("MAX_TOP_K", 50)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        if !(min_support > 0.0 && min_support <= 1.0) {
            return Err(ConfigError::InvalidValue {
                var: "MIN_SUPPORT".to_string(),
                reason: "Must be in (0, 1]".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConfigError::InvalidValue {
                var: "MIN_CONFIDENCE".to_string(),
                reason: "Must be between 0 and 1".to_string(),
            });
        }

        if max_transaction_len < 2 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_TRANSACTION_LEN".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if default_top_k > max_top_k {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_TOP_K".to_string(),
                reason: format!("Cannot exceed MAX_TOP_K ({})", max_top_k),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            supabase_url,
            supabase_key,
            catalog_dir,
            rule_cache_ttl_seconds,
            min_support,
            min_confidence,
            max_transaction_len,
            random_seed,
            default_top_k,
            max_top_k,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a decimal number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            supabase_url: String::new(),
            supabase_key: String::new(),
            catalog_dir: PathBuf::from("data"),
            rule_cache_ttl_seconds: 300,
            min_support: 0.02,
            min_confidence: 0.1,
            max_transaction_len: 50,
            random_seed: 42,
            default_top_k: 5,
            max_top_k: 50,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
