//! Config validation with user-friendly error messages.

use crate::schema::CookbookConfig;
use anyhow::{bail, Result};
use thiserror::Error;
use tracing::{error, warn};

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log every warning and error through `tracing`.
    pub fn emit(&self) {
        for warning in &self.warnings {
            warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    /// Fail if any error was found.
    pub fn check(&self) -> Result<()> {
        if let Some(first) = self.errors.first() {
            bail!("{} config error(s), first: {}", self.errors.len(), first);
        }
        Ok(())
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &CookbookConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_chat(config, &mut report);
    validate_ui(config, &mut report);
    report
}

fn validate_server(config: &CookbookConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if server.port == Some(0) {
        report.error("server.port", "Port must be between 1 and 65535");
    }
    if let Some(bind) = &server.bind_address {
        if bind.parse::<std::net::IpAddr>().is_err() {
            report.error(
                "server.bindAddress",
                format!("'{bind}' is not an IP address"),
            );
        }
    }
}

fn validate_chat(config: &CookbookConfig, report: &mut ValidationReport) {
    let Some(chat) = &config.chat else { return };
    if let Some(url) = &chat.endpoint_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error(
                "chat.endpointUrl",
                format!("'{url}' must be an http:// or https:// URL"),
            );
        }
    }
    if chat.seed_prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
        report.warn(
            "chat.seedPrompt",
            "Seed prompt is empty; the built-in prompt is used",
        );
    }
}

fn validate_ui(config: &CookbookConfig, report: &mut ValidationReport) {
    let Some(ui) = &config.ui else { return };
    if ui.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        report.warn("ui.title", "Page title is empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChatConfig, ServerConfig, UiConfig};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory log sink.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn blank_title_and_zero_port() -> CookbookConfig {
        CookbookConfig {
            server: Some(ServerConfig {
                port: Some(0),
                ..Default::default()
            }),
            ui: Some(UiConfig {
                title: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let report = validate(&crate::apply_all_defaults(CookbookConfig::default()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let config = CookbookConfig {
            server: Some(ServerConfig {
                port: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "server.port");
    }

    #[test]
    fn test_non_http_endpoint_is_rejected() {
        let config = CookbookConfig {
            chat: Some(ChatConfig {
                endpoint_url: Some("ftp://kitchen/api/chat".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert!(report.errors[0].to_string().contains("chat.endpointUrl"));
    }

    #[test]
    fn test_empty_title_is_a_warning() {
        let config = CookbookConfig {
            ui: Some(UiConfig {
                title: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_emit_writes_warnings_and_errors_to_the_log() {
        let report = validate(&blank_title_and_zero_port());
        let sink = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || report.emit());

        let logged = sink.contents();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("Page title is empty"));
        assert!(logged.contains("ui.title"));
        assert!(logged.contains("ERROR"));
        assert!(logged.contains("server.port"));
    }

    #[test]
    fn test_check_fails_only_on_errors() {
        assert!(validate(&blank_title_and_zero_port()).check().is_err());

        let warn_only = CookbookConfig {
            chat: Some(ChatConfig {
                seed_prompt: Some(" ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&warn_only);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.check().is_ok());
    }
}
