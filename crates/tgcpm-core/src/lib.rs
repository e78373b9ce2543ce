//! Shared types and configuration for TGCPM.
//!
//! Holds the canonical channel profile model (with per-field provenance and an
//! explicit unknown-vs-zero distinction), the niche taxonomy, and the env-driven
//! application configuration consumed by the other crates.

pub mod app_config;
pub mod config;
pub mod niche;
pub mod profile;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use niche::Niche;
pub use profile::{
    normalize_handle, ChannelProfile, PartialProfile, Provenance, ProviderKind, Sourced,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
