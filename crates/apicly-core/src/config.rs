// ── Runtime connection configuration ──
//
// These types describe *how* to reach a controller. They carry credential
// data and connection tuning, but never touch disk. The CLI builds a
// `ControllerConfig` and hands it to `Session::acquire`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use apicly_api::{TlsMode, TransportConfig};

/// Default number of devices processed concurrently by the aggregator.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab controllers).
    DangerAcceptInvalid,
}

/// Configuration for one controller session.
///
/// Built by the CLI, passed to `Session::acquire` -- core never reads
/// config files or environment variables.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller root URL (e.g., `https://sandboxapic.cisco.com`).
    pub url: Url,
    /// Username for the ticket request.
    pub username: String,
    /// Password for the ticket request.
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Upper bound on concurrent per-device lookups during fleet aggregation.
    /// `1` processes devices strictly one after another.
    pub concurrency: usize,
}

impl ControllerConfig {
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Translate into the api crate's transport settings.
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
