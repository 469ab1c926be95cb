use serde::Deserialize;

/// Main configuration structure for Site-Harvester
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Trigger API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (host:port)
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

/// Page renderer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Budget for one page fetch, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent string sent with every page request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where content and metadata files are written
    #[serde(rename = "directory-path", default = "default_directory_path")]
    pub directory_path: String,

    /// File name of the packaged archive inside the output directory
    #[serde(rename = "archive-name", default = "default_archive_name")]
    pub archive_name: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("site-harvester/{}", env!("CARGO_PKG_VERSION"))
}

fn default_directory_path() -> String {
    "./crawled-data".to_string()
}

fn default_archive_name() -> String {
    "crawled_data.zip".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory_path: default_directory_path(),
            archive_name: default_archive_name(),
        }
    }
}
