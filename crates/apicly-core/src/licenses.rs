// ── Fleet license aggregation ──
//
// Walks the device inventory and produces one row per device: hostname,
// serial and the set of licenses currently in use. Per-device lookups fan
// out over a bounded number of in-flight requests, but rows always come back
// in inventory order.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};

use apicly_api::{ApicClient, LicenseRecord};

use crate::config::DEFAULT_CONCURRENCY;
use crate::error::CoreError;
use crate::identity::IdentityResolver;
use crate::model::FleetReportRow;
use crate::session::Session;

/// Names of the `INUSE` licenses in `records`, first occurrence wins.
pub fn active_licenses(records: &[LicenseRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut active = Vec::new();
    for record in records.iter().filter(|r| r.is_in_use()) {
        if seen.insert(record.name.as_str()) {
            active.push(record.name.clone());
        }
    }
    active
}

/// Builds the fleet license report.
pub struct LicenseAggregator {
    client: ApicClient,
    identities: Arc<IdentityResolver>,
    concurrency: usize,
}

impl LicenseAggregator {
    pub fn new(session: &Session) -> Self {
        Self {
            client: session.client().clone(),
            identities: Arc::new(IdentityResolver::new(session)),
            concurrency: session.concurrency(),
        }
    }

    /// Override the fan-out. `1` processes devices strictly one at a time.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = if concurrency == 0 {
            DEFAULT_CONCURRENCY
        } else {
            concurrency
        };
        self
    }

    /// Share an identity cache with other workflows.
    #[must_use]
    pub fn with_identities(mut self, identities: Arc<IdentityResolver>) -> Self {
        self.identities = identities;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Device identifiers in inventory order.
    pub async fn device_inventory(&self) -> Result<Vec<String>, CoreError> {
        let devices = self.client.list_devices().await?;
        Ok(devices.into_iter().map(|d| d.id).collect())
    }

    /// Active licenses of one device. Errors propagate.
    pub async fn device_licenses(&self, device_id: &str) -> Result<Vec<String>, CoreError> {
        let records = self.client.device_licenses(device_id).await?;
        Ok(active_licenses(&records))
    }

    /// Report row for a single device queried directly.
    ///
    /// Unlike [`device_row`](Self::device_row) nothing is swallowed: an
    /// unknown device is `DeviceNotFound` and a malformed license payload is
    /// `MalformedResponse`.
    pub async fn single_row(&self, device_id: &str) -> Result<FleetReportRow, CoreError> {
        let identity = self.identities.resolve_by_device_id(device_id).await?;
        let licenses = self.device_licenses(device_id).await?;
        Ok(FleetReportRow {
            device_id: identity.device_id,
            hostname: identity.hostname,
            serial_number: identity.serial_number,
            licenses,
        })
    }

    /// Build the fleet report row for one device.
    ///
    /// Only an authentication failure is returned as an error. A failed
    /// identity lookup falls back to the device id as hostname with an empty
    /// serial; a failed or malformed license lookup yields no licenses.
    pub async fn device_row(&self, device_id: &str) -> Result<FleetReportRow, CoreError> {
        let (hostname, serial_number) = match self.identities.resolve_by_device_id(device_id).await
        {
            Ok(identity) => (identity.hostname, identity.serial_number),
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(e) => {
                warn!(device_id, error = %e, "identity lookup failed, using device id");
                (device_id.to_owned(), String::new())
            }
        };

        let licenses = match self.device_licenses(device_id).await {
            Ok(licenses) => licenses,
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(e) => {
                warn!(device_id, error = %e, "license lookup failed, reporting none");
                Vec::new()
            }
        };

        debug!(device_id, count = licenses.len(), "device row ready");
        Ok(FleetReportRow {
            device_id: device_id.to_owned(),
            hostname,
            serial_number,
            licenses,
        })
    }

    /// Build the full fleet report.
    pub async fn aggregate(&self) -> Result<Vec<FleetReportRow>, CoreError> {
        self.aggregate_with_progress(|_, _| {}).await
    }

    /// Build the full fleet report, calling `progress(completed, total)`
    /// after each row.
    pub async fn aggregate_with_progress<F>(
        &self,
        mut progress: F,
    ) -> Result<Vec<FleetReportRow>, CoreError>
    where
        F: FnMut(usize, usize),
    {
        let ids = self.device_inventory().await?;
        let total = ids.len();
        info!(devices = total, concurrency = self.concurrency, "aggregating licenses");

        let mut completed = 0;
        let rows: Vec<FleetReportRow> = stream::iter(&ids)
            .map(|id| self.device_row(id))
            .buffered(self.concurrency)
            .inspect(|_| {
                completed += 1;
                progress(completed, total);
            })
            .try_collect()
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<LicenseRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_only_in_use_deduplicated() {
        let recs = records(json!([
            {"name": "ipbase", "status": "INUSE"},
            {"name": "ipbase", "status": "INUSE"},
            {"name": "sec", "status": "EXPIRED"}
        ]));
        assert_eq!(active_licenses(&recs), vec!["ipbase"]);
    }

    #[test]
    fn preserves_first_seen_order() {
        let recs = records(json!([
            {"name": "uck9", "status": "INUSE"},
            {"name": "appxk9", "status": "NOTINUSE"},
            {"name": "ipbase", "status": "INUSE"},
            {"name": "uck9", "status": "INUSE"}
        ]));
        assert_eq!(active_licenses(&recs), vec!["uck9", "ipbase"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(active_licenses(&[]).is_empty());
    }
}
