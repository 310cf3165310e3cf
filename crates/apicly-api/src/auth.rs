// Service-ticket authentication
//
// `POST /ticket` trades a username/password for a short-lived service
// ticket. Every later request carries it in the `X-Auth-Token` header,
// which we bake into the client's default headers.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::client::ApicClient;
use crate::error::Error;
use crate::models::{ApiErrorBody, ApicResponse, TicketResponse};
use crate::transport::TransportConfig;

/// Header carrying the service ticket on authenticated requests.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Opaque session credential issued by `POST /ticket`.
///
/// Never refreshed; expiry is only noticed when a later call fails with
/// [`Error::Authentication`].
#[derive(Debug, Clone)]
pub struct ServiceTicket(SecretString);

impl ServiceTicket {
    pub fn new(ticket: impl Into<String>) -> Self {
        Self(SecretString::from(ticket.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl ApicClient {
    /// Request a service ticket with username/password.
    ///
    /// A non-success status, an unparseable body, or a body without
    /// `serviceTicket` is an authentication failure. No retry.
    pub async fn request_ticket(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<ServiceTicket, Error> {
        let url = self.api_url("ticket")?;
        debug!("requesting service ticket at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApicResponse<ApiErrorBody>>(&text)
                .ok()
                .and_then(|env| env.response.describe())
                .unwrap_or_else(|| text.chars().take(200).collect());
            return Err(Error::Authentication {
                message: format!("ticket request failed (HTTP {status}): {detail}"),
            });
        }

        let ticket = serde_json::from_str::<ApicResponse<TicketResponse>>(&text)
            .ok()
            .and_then(|env| env.response.service_ticket)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "controller returned no service ticket".into(),
            })?;

        debug!("service ticket acquired");
        Ok(ServiceTicket::new(ticket))
    }

    /// Build an authenticated client that sends `ticket` on every request.
    pub fn with_ticket(
        base_url: Url,
        ticket: &ServiceTicket,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut value = HeaderValue::from_str(ticket.expose())
            .map_err(|_| Error::Authentication {
                message: "service ticket contains invalid header characters".into(),
            })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self::with_client(http, base_url))
    }
}
