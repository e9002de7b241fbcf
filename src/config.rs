// src/config.rs
//! Scorer configuration: TOML file with env overrides, sanitized on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/scorer.toml";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_LATENCY_MS: &str = "SENTIMENT_LATENCY_MS";
pub const ENV_REMOTE_URL: &str = "SENTIMENT_REMOTE_URL";

fn default_latency_ms() -> u64 {
    800
}
fn default_jitter_max() -> f64 {
    9.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Simulated latency before each local scoring pass, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Jitter amplitude: draws are uniform over [-jitter_max, +jitter_max].
    #[serde(default = "default_jitter_max")]
    pub jitter_max: f64,
    /// When set, analyses go through the remote classifier at this URL
    /// instead of the local heuristic.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            jitter_max: default_jitter_max(),
            remote_url: None,
        }
    }
}

impl ScorerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading scorer config from {}", path.display()))?;
        let mut cfg: ScorerConfig = toml::from_str(&data)
            .with_context(|| format!("parsing scorer config from {}", path.display()))?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Resolution order: $SENTIMENT_CONFIG_PATH, then `config/scorer.toml`,
    /// then built-in defaults. Per-field env vars win over the file.
    pub fn load_default() -> Self {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            Self::load_from_file(PathBuf::from(&p)).unwrap_or_else(|e| {
                warn!(target: "config", path = %p, error = %e, "falling back to defaults");
                Self::default()
            })
        } else {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                Self::load_from_file(&fallback).unwrap_or_else(|e| {
                    warn!(target: "config", error = %e, "falling back to defaults");
                    Self::default()
                })
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        cfg.sanitize();
        cfg
    }

    fn apply_env_overrides(&mut self) {
        if let Some(ms) = parse_env_u64(ENV_LATENCY_MS) {
            self.latency_ms = ms;
        }
        if let Ok(url) = std::env::var(ENV_REMOTE_URL) {
            let url = url.trim().to_string();
            self.remote_url = if url.is_empty() { None } else { Some(url) };
        }
    }

    fn sanitize(&mut self) {
        if !self.jitter_max.is_finite() || self.jitter_max < 0.0 {
            self.jitter_max = default_jitter_max();
        }
    }
}

fn parse_env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
}
