//! `cookbook-config`: runtime configuration for the cookbook app.
//!
//! Provides:
//! - Typed config schema (server, chat endpoint, page text, logging)
//! - YAML loading from `~/.cookbook/config.yaml`
//! - `${ENV_VAR}` substitution and `COOKBOOK_*` overrides
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, resolve_env_vars, resolve_env_vars_with,
    MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_raw_config};
pub use schema::CookbookConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Load, substitute env vars, apply defaults and overrides, then validate.
///
/// This is the main entry point for loading a config at runtime. Nothing is
/// logged here: the caller sets up logging from the returned config, then
/// calls [`ValidationReport::emit`] and [`ValidationReport::check`].
pub async fn load_and_prepare(path: &Path) -> Result<(CookbookConfig, ValidationReport)> {
    let raw = load_raw_config(path).await?;

    let value = resolve_env_vars(&raw).context("Failed to resolve env vars in config")?;

    let config: CookbookConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);
    let config = apply_env_overrides(config)?;

    let report = validate(&config);
    Ok((config, report))
}
