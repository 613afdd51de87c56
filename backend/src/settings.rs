//! Service configuration loaded via OrthoConfig.
//!
//! Every value can come from a `STUDENTS_*` environment variable or the
//! matching `--kebab-case` command-line flag. Unset values fall back to the
//! defaults exposed through the accessors.

use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_ELASTIC_HOST: &str = "http://localhost:9200";
const DEFAULT_INDEX_NAME: &str = "students";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings that could be read but not interpreted.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The store host is not a URL.
    #[error("invalid search store URL `{value}`: {source}")]
    ElasticHost {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The bind interface is not an IP address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Runtime configuration for the student search service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct StudentSearchSettings {
    /// Base URL of the search store.
    pub elastic_host: Option<String>,
    /// Index holding student documents.
    pub index_name: Option<String>,
    /// Interface the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Port the HTTP listener binds to.
    pub port: Option<u16>,
    /// Basic-auth user for the search store.
    pub username: Option<String>,
    /// Basic-auth password for the search store.
    pub password: Option<String>,
    /// Upper bound on each search store request, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl StudentSearchSettings {
    /// Parse the configured store URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::ElasticHost`] when the value is not a URL.
    pub fn elastic_url(&self) -> Result<Url, SettingsError> {
        let value = self.elastic_host.as_deref().unwrap_or(DEFAULT_ELASTIC_HOST);
        Url::parse(value).map_err(|source| SettingsError::ElasticHost {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the index holding student documents, falling back to `students`.
    pub fn index_name(&self) -> &str {
        self.index_name.as_deref().unwrap_or(DEFAULT_INDEX_NAME)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the interface is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let ip: IpAddr = value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Credentials for the store, present only when both halves are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    /// Return the per-request store timeout, falling back to 30 seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

impl fmt::Debug for StudentSearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudentSearchSettings")
            .field("elastic_host", &self.elastic_host)
            .field("index_name", &self.index_name)
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
