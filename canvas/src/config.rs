//! Engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::SIDEBAR_REST_Z;

pub const SIDEBAR_REST_Z_VAR: &str = "BOXBOARD_SIDEBAR_REST_Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Stacking order of the sidebar between drags. Every value allocated
    /// during a drag is strictly greater.
    pub sidebar_rest_z: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { sidebar_rest_z: SIDEBAR_REST_Z }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BOXBOARD_SIDEBAR_REST_Z`: default 1000
    ///
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self { sidebar_rest_z: env_parse(SIDEBAR_REST_Z_VAR, SIDEBAR_REST_Z) }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(var = key, value = %raw, "ignoring unparseable config value");
            default
        }),
        Err(_) => default,
    }
}
