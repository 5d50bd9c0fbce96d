//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names match; `$${VAR}` escapes to a
//!   literal `${VAR}`.
//! - `COOKBOOK_*` variables that override individual settings.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{ChatConfig, CookbookConfig, ServerConfig};

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const BIND_ENV: &str = "COOKBOOK_BIND";
pub const PORT_ENV: &str = "COOKBOOK_PORT";
pub const CHAT_URL_ENV: &str = "COOKBOOK_CHAT_URL";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config value tree using the process env.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply `COOKBOOK_*` overrides from the process env.
pub fn apply_env_overrides(config: CookbookConfig) -> Result<CookbookConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply `COOKBOOK_*` overrides from a provided map.
pub fn apply_env_overrides_with(
    mut config: CookbookConfig,
    env: &HashMap<String, String>,
) -> Result<CookbookConfig> {
    if let Some(bind) = env.get(BIND_ENV).filter(|v| !v.is_empty()) {
        config
            .server
            .get_or_insert_with(ServerConfig::default)
            .bind_address = Some(bind.clone());
    }
    if let Some(port) = env.get(PORT_ENV).filter(|v| !v.is_empty()) {
        let port: u16 = match port.parse() {
            Ok(p) => p,
            Err(_) => bail!("{PORT_ENV} must be a port number, got {port:?}"),
        };
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(url) = env.get(CHAT_URL_ENV).filter(|v| !v.is_empty()) {
        config.chat.get_or_insert_with(ChatConfig::default).endpoint_url = Some(url.clone());
    }
    Ok(config)
}
