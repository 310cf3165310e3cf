// License endpoints

use tracing::debug;

use crate::client::{ApicClient, segment};
use crate::error::Error;
use crate::models::LicenseRecord;

impl ApicClient {
    /// Raw license list for one device, all statuses included.
    ///
    /// `GET /api/v1/license-info/network-device/{id}`. A 404 yields an
    /// empty list; a payload that is not a list of `{name, status}`
    /// records yields `Error::Deserialization`.
    pub async fn device_licenses(&self, device_id: &str) -> Result<Vec<LicenseRecord>, Error> {
        let url = self.api_url(&format!(
            "license-info/network-device/{}",
            segment(device_id)
        ))?;
        debug!(device_id, "fetching device licenses");
        let licenses: Option<Vec<LicenseRecord>> = self.get(url).await?;
        Ok(licenses.unwrap_or_default())
    }
}
