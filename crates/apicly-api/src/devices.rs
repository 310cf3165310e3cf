// Network device (inventory) endpoints
//
// Identity lookups by id or management IP, plus the full inventory
// listing used for fleet-wide reports.

use tracing::debug;

use crate::client::{ApicClient, segment};
use crate::error::Error;
use crate::models::NetworkDevice;

impl ApicClient {
    /// List every device in the inventory, in controller order.
    ///
    /// `GET /api/v1/network-device`
    pub async fn list_devices(&self) -> Result<Vec<NetworkDevice>, Error> {
        let url = self.api_url("network-device")?;
        debug!("listing network devices");
        let devices: Option<Vec<NetworkDevice>> = self.get(url).await?;
        Ok(devices.unwrap_or_default())
    }

    /// Get a single device by its controller identifier.
    ///
    /// `GET /api/v1/network-device/{id}`. Returns `None` if no device matches.
    pub async fn get_device(&self, id: &str) -> Result<Option<NetworkDevice>, Error> {
        let url = self.api_url(&format!("network-device/{}", segment(id)))?;
        debug!(device_id = id, "fetching device");
        self.get(url).await
    }

    /// Get the device whose management address is `ip`.
    ///
    /// `GET /api/v1/network-device/ip-address/{ip}`. Returns `None` if no
    /// device is managed through that address.
    pub async fn get_device_by_ip(&self, ip: &str) -> Result<Option<NetworkDevice>, Error> {
        let url = self.api_url(&format!("network-device/ip-address/{}", segment(ip)))?;
        debug!(ip, "fetching device by management address");
        self.get(url).await
    }
}
