//! Config defaults: applies default values to a parsed config.

use crate::schema::{CookbookConfig, LoggingConfig, ServerConfig, UiConfig};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_TITLE: &str = "TechCollEDGE cookbook";

pub const DEFAULT_SUBTITLE: &str = "Add ingredients, then click for a recipe.";

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: CookbookConfig) -> CookbookConfig {
    let config = apply_server_defaults(config);
    let config = apply_ui_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: CookbookConfig) -> CookbookConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if server.bind_address.is_none() {
        server.bind_address = Some(DEFAULT_BIND_ADDRESS.to_string());
    }
    if server.port.is_none() {
        server.port = Some(DEFAULT_PORT);
    }
    config
}

fn apply_ui_defaults(mut config: CookbookConfig) -> CookbookConfig {
    let ui = config.ui.get_or_insert_with(UiConfig::default);
    if ui.title.is_none() {
        ui.title = Some(DEFAULT_TITLE.to_string());
    }
    if ui.subtitle.is_none() {
        ui.subtitle = Some(DEFAULT_SUBTITLE.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: CookbookConfig) -> CookbookConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.dir.is_none() {
        logging.dir = Some(DEFAULT_LOG_DIR.to_string());
    }
    config
}
