//! Service configuration resolution.
//!
//! Gathers the transit service address, access token, engine mount path, key
//! name, and batch limit from explicit flag values with environment
//! fallbacks, and validates the result. The resolved config is immutable and
//! passed by reference into the pipeline, so a run never touches global
//! state after startup.

use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Validated transit service configuration for one invocation.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Base URL of the service, e.g. `https://vault.example.com:8200`.
    pub addr: String,
    /// Access token attached to every request.
    pub token: String,
    /// Mount path of the transit engine.
    pub engine_path: String,
    /// Name of the key held by the service.
    pub key: String,
    /// Maximum number of items per bulk call.
    pub batch_limit: usize,
}

/// Unresolved configuration inputs, as collected from the command line.
///
/// `addr` and `token` fall back to `VAULT_ADDR` / `VAULT_TOKEN` when absent.
#[derive(Debug, Default)]
pub struct ConfigSources {
    pub addr: Option<String>,
    pub token: Option<String>,
    pub engine_path: String,
    pub key: String,
    pub batch_limit: usize,
}

impl TransitConfig {
    /// Resolve configuration from flag values and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingAddr` before `ConfigError::MissingToken`
    /// when both are absent; `ConfigError::InvalidBatchLimit` for a zero
    /// batch limit.
    pub fn resolve(sources: ConfigSources) -> Result<Self> {
        Self::resolve_with(sources, |name| std::env::var(name).ok())
    }

    /// Resolve with an injected environment lookup.
    ///
    /// The lookup receives the env var name and returns its value, if set.
    /// Empty values are treated as unset, matching how shells commonly
    /// export blank variables.
    pub fn resolve_with(
        sources: ConfigSources,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let lookup = |explicit: Option<String>, var: &str| {
            explicit
                .filter(|v| !v.is_empty())
                .or_else(|| env(var).filter(|v| !v.is_empty()))
        };

        let addr = lookup(sources.addr, constants::ADDR_ENV).ok_or(ConfigError::MissingAddr)?;
        let token = lookup(sources.token, constants::TOKEN_ENV).ok_or(ConfigError::MissingToken)?;

        if sources.batch_limit == 0 {
            return Err(ConfigError::InvalidBatchLimit.into());
        }

        // A trailing slash on the address would double up in request URLs.
        let addr = addr.trim_end_matches('/').to_string();

        debug!(
            addr = %addr,
            engine_path = %sources.engine_path,
            key = %sources.key,
            batch_limit = sources.batch_limit,
            "resolved transit config"
        );

        Ok(Self {
            addr,
            token,
            engine_path: sources.engine_path,
            key: sources.key,
            batch_limit: sources.batch_limit,
        })
    }
}
