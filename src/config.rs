use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::CredentialFields;
use crate::client::{ClientOptions, DEFAULT_URL};
use crate::error::{PrintNodeError, Result};
use crate::gateway::Gateway;

/// Settings file, by default `<config dir>/printnode/config.json`:
///
/// ```json
/// { "apikey": "...", "child_ref": "customer-17", "timeout_secs": 30 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sslcert: Option<PathBuf>,
    #[serde(rename = "timeout_secs", default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub credentials: CredentialFields,
}

impl Config {
    /// Get path to the default config file
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| PrintNodeError::Config("Could not find config directory".to_string()))?;
        Ok(dir.join("printnode").join("config.json"))
    }

    /// Load an explicitly named file, or the default file if there is one.
    ///
    /// A missing default file yields an empty config; a missing named file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(PrintNodeError::Config(format!(
                        "config file \"{}\" not found",
                        path.display()
                    )));
                }
                Self::read(path)
            }
            None => {
                let path = Self::default_path()?;
                if path.is_file() {
                    Self::read(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PrintNodeError::Config(format!("invalid config file \"{}\": {}", path.display(), e))
        })
    }

    /// Every value set in `overrides` wins, field by field.
    pub fn merge(self, overrides: Config) -> Self {
        Self {
            url: overrides.url.or(self.url),
            sslcert: overrides.sslcert.or(self.sslcert),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
            credentials: self.credentials.merge(overrides.credentials),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            url: self.url.clone().unwrap_or_else(|| DEFAULT_URL.to_string()),
            sslcert: self.sslcert.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn into_gateway(self) -> Result<Gateway> {
        let options = self.client_options();
        Gateway::from_fields(options, self.credentials)
    }
}
