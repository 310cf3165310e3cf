// Controller API HTTP client
//
// Wraps `reqwest::Client` with controller-specific URL construction and
// envelope unwrapping. Endpoint groups (hosts, interfaces, devices,
// licenses) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ApiErrorBody, ApicResponse};
use crate::transport::TransportConfig;

/// Path prefix of the northbound REST API.
pub const API_PREFIX: &str = "/api/v1";

/// Raw HTTP client for the controller's northbound REST API.
///
/// Handles the `{ response, version }` envelope and URL construction. All
/// methods return the unwrapped `response` payload. A client built with
/// [`ApicClient::new`] is unauthenticated and only good for
/// [`request_ticket`](Self::request_ticket); use
/// [`with_ticket`](Self::with_ticket) for everything else.
#[derive(Clone)]
pub struct ApicClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApicClient {
    /// Create an unauthenticated client.
    ///
    /// `base_url` is the controller root (e.g. `https://sandboxapic.cisco.com`);
    /// the `/api/v1` prefix is appended per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/v1/{path}`.
    ///
    /// Path segments coming from user input (IP addresses, device ids) must
    /// be passed through [`segment`] first.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}{API_PREFIX}/{}", path.trim_start_matches('/'));
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    ///
    /// Returns `Ok(None)` when the controller answers 404.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Send a GET with query parameters and unwrap the envelope.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, Error> {
        debug!(?query, "GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{ response, version }` envelope.
    ///
    /// 404 becomes `Ok(None)`, 401 becomes `Error::Authentication`, any
    /// other non-success status becomes `Error::Api` carrying the
    /// controller's own error message when it sent one.
    pub(crate) async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            debug!("controller reported no match (HTTP 404)");
            return Ok(None);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "service ticket expired or invalid".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApicResponse<ApiErrorBody>>(&body)
                .ok()
                .and_then(|env| env.response.describe())
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApicResponse<T> = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(Some(envelope.response))
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApicClient {
        ApicClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn api_url_appends_prefix() {
        let c = client("https://sandboxapic.cisco.com");
        let url = c.api_url("network-device/abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sandboxapic.cisco.com/api/v1/network-device/abc"
        );
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let c = client("https://10.0.0.1:8443/");
        let url = c.api_url("/ticket").unwrap();
        assert_eq!(url.as_str(), "https://10.0.0.1:8443/api/v1/ticket");
    }

    #[test]
    fn segment_escapes_path_separators() {
        assert_eq!(segment("10.1.1.1"), "10.1.1.1");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
