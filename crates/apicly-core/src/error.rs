// ── Core error types ──
//
// User-facing errors from apicly-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<apicly_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Controller returned an unexpected payload: {message}")]
    MalformedResponse { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Authentication failures abort the run; nothing downstream can succeed.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DeviceNotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<apicly_api::Error> for CoreError {
    fn from(err: apicly_api::Error) -> Self {
        match err {
            apicly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            apicly_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            apicly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            apicly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            apicly_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            apicly_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_maps_to_authentication_failed() {
        let err: CoreError = apicly_api::Error::Authentication {
            message: "bad ticket".into(),
        }
        .into();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn deserialization_maps_to_malformed() {
        let err: CoreError = apicly_api::Error::Deserialization {
            message: "missing field `response`".into(),
            body: "{}".into(),
        }
        .into();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        assert!(!err.is_not_found());
    }
}
