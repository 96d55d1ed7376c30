//! Server configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::korail::{DEFAULT_FORM_URL, KorailConfig};
use crate::nxlogis::{DEFAULT_BASE_URL, NxLogisConfig};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but does not parse
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on, on all interfaces
    pub port: u16,

    /// Directory holding the bundled CSV files
    pub data_dir: PathBuf,

    pub korail: KorailConfig,

    pub nxlogis: NxLogisConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PORT` | 3000 |
    /// | `DATA_DIR` | `data` |
    /// | `KORAIL_URL` | Korail mobile search form |
    /// | `KORAIL_TIMEOUT_SECS` | 30 |
    /// | `NXLOGIS_URL` | nxlogis train API |
    /// | `NXLOGIS_TIMEOUT_SECS` | 10 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; unset or empty values take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => parse("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        let data_dir = get("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let mut korail =
            KorailConfig::new().with_form_url(get("KORAIL_URL").unwrap_or(DEFAULT_FORM_URL.into()));
        if let Some(v) = get("KORAIL_TIMEOUT_SECS") {
            korail = korail.with_step_timeout(Duration::from_secs(parse("KORAIL_TIMEOUT_SECS", &v)?));
        }

        let mut nxlogis =
            NxLogisConfig::new().with_base_url(get("NXLOGIS_URL").unwrap_or(DEFAULT_BASE_URL.into()));
        if let Some(v) = get("NXLOGIS_TIMEOUT_SECS") {
            nxlogis = nxlogis.with_timeout(Duration::from_secs(parse("NXLOGIS_TIMEOUT_SECS", &v)?));
        }

        Ok(Self {
            port,
            data_dir,
            korail,
            nxlogis,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
