use crate::domain::error::ConfigError;
use std::env;
use std::fmt::{Debug, Formatter};

pub const FEDORA_SERVER: &str = "FEDORA_SERVER";
pub const FEDORA_USER: &str = "FEDORA_USER";
pub const FEDORA_PASS: &str = "FEDORA_PASS";
pub const THUMBNAIL_SERVER: &str = "THUMBNAIL_SERVER";

/// Read a required environment setting.
pub fn get_env_setting(setting: &str) -> Result<String, ConfigError> {
    env::var(setting).map_err(|_| ConfigError::MissingVariable(setting.to_string()))
}

#[derive(Clone)]
pub struct Config {
    pub fedora_server: String,
    pub fedora_user: String,
    pub fedora_pass: String,
    pub thumbnail_server: String,
}

impl Config {
    /// Builds the configuration from the process environment. The thumbnail
    /// service lives on the repository host unless `THUMBNAIL_SERVER` says
    /// otherwise.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(get_env_setting)
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Result<String, ConfigError>,
    {
        let fedora_server = lookup(FEDORA_SERVER)?;
        let fedora_user = lookup(FEDORA_USER)?;
        let fedora_pass = lookup(FEDORA_PASS)?;
        let thumbnail_server = lookup(THUMBNAIL_SERVER).unwrap_or_else(|_| fedora_server.clone());
        Ok(Config {
            fedora_server,
            fedora_user,
            fedora_pass,
            thumbnail_server,
        })
    }

    pub fn fedora_root(&self) -> String {
        format!("https://{}/fedora/", self.fedora_server)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("fedora_server", &self.fedora_server)
            .field("fedora_user", &self.fedora_user)
            .field("fedora_pass", &"***")
            .field("thumbnail_server", &self.thumbnail_server)
            .finish()
    }
}
