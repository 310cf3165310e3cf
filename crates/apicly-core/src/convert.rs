// ── API-to-domain type conversions ──
//
// Bridges raw `apicly_api` response types into `apicly_core::model` domain
// types. Missing optional fields become empty strings rather than errors;
// the controller omits them on devices it has only partially discovered.

use apicly_api::{HostRecord, HostType, NetworkDevice};

use crate::model::DeviceIdentity;

// ── Device ─────────────────────────────────────────────────────────

impl From<NetworkDevice> for DeviceIdentity {
    fn from(d: NetworkDevice) -> Self {
        Self {
            device_id: d.id,
            hostname: d.hostname.unwrap_or_default(),
            device_type: d.device_type.unwrap_or_default(),
            serial_number: d.serial_number.unwrap_or_default(),
        }
    }
}

// ── Host ───────────────────────────────────────────────────────────

/// Where a client host is attached, as shown to the user.
///
/// Wireless clients have no switch port, so they are labelled with their
/// VLAN instead.
pub(crate) fn interface_label(host: &HostRecord) -> String {
    match host.host_type {
        HostType::Wireless => format!("VLAN {}", host.vlan_id.as_deref().unwrap_or_default()),
        _ => host.connected_interface_name.clone().unwrap_or_default(),
    }
}
