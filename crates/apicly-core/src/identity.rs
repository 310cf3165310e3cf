// ── Device identity resolution ──
//
// Hostname / type / serial lookups, memoized for the lifetime of one
// resolver. A device is fetched at most once per run.

use std::net::IpAddr;

use dashmap::DashMap;
use tracing::debug;

use apicly_api::ApicClient;

use crate::error::CoreError;
use crate::model::DeviceIdentity;
use crate::session::Session;

/// Memoizing lookup of [`DeviceIdentity`] by device id or management IP.
///
/// Safe to share across concurrent tasks. Only successful lookups are
/// cached; a not-found or a transport failure is retried on the next call.
pub struct IdentityResolver {
    client: ApicClient,
    by_id: DashMap<String, DeviceIdentity>,
    by_ip: DashMap<IpAddr, String>,
}

impl IdentityResolver {
    pub fn new(session: &Session) -> Self {
        Self {
            client: session.client().clone(),
            by_id: DashMap::new(),
            by_ip: DashMap::new(),
        }
    }

    /// Look up a device by its controller identifier.
    pub async fn resolve_by_device_id(&self, device_id: &str) -> Result<DeviceIdentity, CoreError> {
        if let Some(hit) = self.by_id.get(device_id) {
            return Ok(hit.clone());
        }

        let device = self
            .client
            .get_device(device_id)
            .await?
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: device_id.to_owned(),
            })?;

        let identity = DeviceIdentity::from(device);
        debug!(device_id, hostname = %identity.hostname, "resolved device identity");
        self.by_id.insert(device_id.to_owned(), identity.clone());
        Ok(identity)
    }

    /// Look up the device managed through `ip`.
    pub async fn resolve_by_management_ip(&self, ip: IpAddr) -> Result<DeviceIdentity, CoreError> {
        let cached = self
            .by_ip
            .get(&ip)
            .and_then(|id| self.by_id.get(id.value()).map(|hit| hit.value().clone()));
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let device = self
            .client
            .get_device_by_ip(&ip.to_string())
            .await?
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: ip.to_string(),
            })?;

        let identity = DeviceIdentity::from(device);
        debug!(%ip, hostname = %identity.hostname, "resolved device by management address");
        self.by_ip.insert(ip, identity.device_id.clone());
        self.by_id.insert(identity.device_id.clone(), identity.clone());
        Ok(identity)
    }

    /// Number of distinct devices currently memoized.
    pub fn cached_count(&self) -> usize {
        self.by_id.len()
    }
}
