// ── Controller session ──
//
// One service ticket per run. The ticket is obtained once, baked into an
// authenticated client, and never refreshed: if it expires mid-run the next
// call fails with `CoreError::AuthenticationFailed` and the run aborts.

use tracing::{debug, info};

use apicly_api::ApicClient;

use crate::config::ControllerConfig;
use crate::error::CoreError;

/// An authenticated connection to one controller.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Session {
    client: ApicClient,
    concurrency: usize,
}

impl Session {
    /// Trade the configured credentials for a service ticket.
    ///
    /// Fails with `AuthenticationFailed` if the controller rejects the
    /// credentials or returns no ticket, and with `ConnectionFailed` /
    /// `Timeout` if it cannot be reached.
    pub async fn acquire(config: &ControllerConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let anonymous = ApicClient::new(config.url.clone(), &transport)?;

        debug!(controller = %config.url, username = %config.username, "requesting service ticket");
        let ticket = anonymous
            .request_ticket(&config.username, &config.password)
            .await?;

        let client = ApicClient::with_ticket(config.url.clone(), &ticket, &transport)?;
        info!(controller = %config.url, "session established");

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
        })
    }

    pub fn client(&self) -> &ApicClient {
        &self.client
    }

    /// Configured fan-out for fleet aggregation (always at least 1).
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}
