/// CLI configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use users_client::ClientConfig;

const DEFAULT_CONFIG_FILE: &str = "users-cli.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Backend base address. No default.
    #[serde(default)]
    pub url: String,

    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist. Otherwise `users-cli.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (USERS_API_URL, USERS_API_TIMEOUT)
        settings = settings.add_source(
            config::Environment::with_prefix("USERS")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Command-line flag wins over file and environment.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.url = url;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.api.url.clone())
            .with_user_agent(format!("users-cli/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = self.api.timeout {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        client
    }
}
