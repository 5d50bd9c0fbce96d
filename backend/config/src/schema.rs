//! Cookbook runtime configuration schema.
//!
//! Every section is optional in the YAML file; `defaults::apply_all_defaults`
//! fills in whatever is missing.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CookbookConfig {
    /// HTTP server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Where recipe requests are sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatConfig>,

    /// Page text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    /// Full URL of the chat endpoint. Unset means the server's own `/api/chat`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// System message every conversation starts with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl CookbookConfig {
    pub fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind_address.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BIND_ADDRESS)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(crate::defaults::DEFAULT_PORT)
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.chat.as_ref().and_then(|c| c.endpoint_url.as_deref())
    }

    /// Custom seed prompt; callers fall back to the built-in one. A blank
    /// prompt counts as unset.
    pub fn seed_prompt(&self) -> Option<&str> {
        self.chat
            .as_ref()
            .and_then(|c| c.seed_prompt.as_deref())
            .filter(|p| !p.trim().is_empty())
    }

    pub fn title(&self) -> &str {
        self.ui
            .as_ref()
            .and_then(|u| u.title.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> &str {
        self.ui
            .as_ref()
            .and_then(|u| u.subtitle.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_SUBTITLE)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_DIR)
    }
}
