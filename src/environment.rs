use anyhow::{Context, Result};
use std::env;

/// Retrieves a required environment variable, failing with a readable
/// message naming the missing variable.
pub fn require_env_var(var: &str) -> Result<String> {
    env::var(var).with_context(|| format!("Environment variable {} is required", var))
}

/// Retrieves an optional environment variable, falling back to a default.
pub fn env_var_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}
