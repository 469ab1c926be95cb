use crate::config::types::{Config, OutputConfig, RendererConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::Validation(format!(
                "bind-address '{}' is not a valid socket address: {}",
                config.bind_address, e
            ))
        })?;
    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 600, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory_path.is_empty() {
        return Err(ConfigError::Validation(
            "directory-path cannot be empty".to_string(),
        ));
    }

    validate_archive_name(&config.archive_name)?;

    Ok(())
}

/// Validates the archive file name
///
/// The archive name must be a bare `.zip` file name. Path separators are
/// rejected so the download endpoint never serves anything outside the
/// output directory.
fn validate_archive_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "archive-name cannot be empty".to_string(),
        ));
    }

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ConfigError::Validation(format!(
            "archive-name '{}' must be a bare file name without path components",
            name
        )));
    }

    if !name.ends_with(".zip") {
        return Err(ConfigError::Validation(format!(
            "archive-name '{}' must end with .zip",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_bind_address() {
        let mut config = Config::default();
        config.server.bind_address = "127.0.0.1:8080".to_string();
        assert!(validate(&config).is_ok());

        config.server.bind_address = "localhost".to_string();
        assert!(validate(&config).is_err());

        config.server.bind_address = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = Config::default();
        config.renderer.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.renderer.request_timeout_secs = 601;
        assert!(validate(&config).is_err());

        config.renderer.request_timeout_secs = 60;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_user_agent() {
        let mut config = Config::default();
        config.renderer.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_archive_name() {
        assert!(validate_archive_name("crawled_data.zip").is_ok());
        assert!(validate_archive_name("pages.zip").is_ok());

        assert!(validate_archive_name("").is_err());
        assert!(validate_archive_name("pages.tar").is_err());
        assert!(validate_archive_name("../pages.zip").is_err());
        assert!(validate_archive_name("sub/pages.zip").is_err());
        assert!(validate_archive_name("sub\\pages.zip").is_err());
    }

    #[test]
    fn test_validate_directory_path() {
        let mut config = Config::default();
        config.output.directory_path = String::new();
        assert!(validate(&config).is_err());
    }
}
