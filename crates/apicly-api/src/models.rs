// Controller API response types
//
// Models for the controller's JSON API. Every response is wrapped in the
// `ApicResponse<T>` envelope. Fields use `#[serde(default)]` liberally
// because inventory records are sparse for unreachable devices.

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard controller response envelope.
///
/// ```json
/// { "response": <payload>, "version": "1.0" }
/// ```
#[derive(Debug, Deserialize)]
pub struct ApicResponse<T> {
    pub response: T,
    #[serde(default)]
    pub version: Option<String>,
}

/// Error payload the controller places inside `response` on 4xx/5xx.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable description the controller gave us.
    pub fn describe(&self) -> Option<String> {
        match (&self.message, &self.detail) {
            (Some(m), Some(d)) if m != d => Some(format!("{m}: {d}")),
            (Some(m), _) => Some(m.clone()),
            (None, Some(d)) => Some(d.clone()),
            (None, None) => self.error_code.clone(),
        }
    }
}

// ── Ticket ───────────────────────────────────────────────────────────

/// Payload of `POST /ticket`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[serde(default)]
    pub service_ticket: Option<String>,
    #[serde(default)]
    pub idle_timeout: Option<u64>,
    #[serde(default)]
    pub session_timeout: Option<u64>,
}

// ── Host ─────────────────────────────────────────────────────────────

/// How an end-host attaches to the network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HostType {
    Wired,
    Wireless,
    #[serde(other)]
    Other,
}

/// Discovered end-host from `GET /host`.
///
/// Wireless hosts carry `vlan_id` instead of a switch port name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub host_ip: String,
    #[serde(default)]
    pub host_mac: Option<String>,
    pub host_type: HostType,
    pub connected_network_device_id: String,
    #[serde(default)]
    pub connected_network_device_ip_address: Option<String>,
    #[serde(default)]
    pub connected_interface_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub vlan_id: Option<String>,
}

// ── Interface ────────────────────────────────────────────────────────

/// Interface binding from `GET /interface/ip-address/{ip}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub port_name: String,
    pub device_id: String,
    #[serde(default)]
    pub ipv4_address: Option<String>,
    #[serde(default)]
    pub ipv4_mask: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Network device ───────────────────────────────────────────────────

/// Inventory record from `GET /network-device[/...]`.
///
/// The controller reports 40+ fields per device; we model what the
/// resolution workflow needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    pub id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub management_ip_address: Option<String>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
    #[serde(default)]
    pub reachability_status: Option<String>,
}

// ── License ──────────────────────────────────────────────────────────

/// License state. Only `INUSE` licenses count as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    #[serde(rename = "INUSE")]
    InUse,
    #[serde(other)]
    Other,
}

/// License entry from `GET /license-info/network-device/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub name: String,
    pub status: LicenseStatus,
}

impl LicenseRecord {
    pub fn is_in_use(&self) -> bool {
        self.status == LicenseStatus::InUse
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Some firmware reports `vlanId` as a string, some as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wireless_host_accepts_numeric_vlan() {
        let host: HostRecord = serde_json::from_value(json!({
            "hostIp": "10.1.15.117",
            "hostType": "wireless",
            "connectedNetworkDeviceId": "dev-ap",
            "vlanId": 600
        }))
        .unwrap();
        assert_eq!(host.host_type, HostType::Wireless);
        assert_eq!(host.vlan_id.as_deref(), Some("600"));
        assert!(host.connected_interface_name.is_none());
    }

    #[test]
    fn unknown_host_type_maps_to_other() {
        let host: HostRecord = serde_json::from_value(json!({
            "hostIp": "10.2.1.22",
            "hostType": "virtual",
            "connectedNetworkDeviceId": "dev-1",
            "connectedInterfaceName": "GigabitEthernet1/0/47"
        }))
        .unwrap();
        assert_eq!(host.host_type, HostType::Other);
    }

    #[test]
    fn license_status_other_than_inuse() {
        let lic: LicenseRecord =
            serde_json::from_value(json!({"name": "sec", "status": "EXPIRED"})).unwrap();
        assert!(!lic.is_in_use());
        let lic: LicenseRecord =
            serde_json::from_value(json!({"name": "ipbase", "status": "INUSE"})).unwrap();
        assert!(lic.is_in_use());
    }

    #[test]
    fn error_body_prefers_message_and_detail() {
        let body = ApiErrorBody {
            error_code: Some("NCND01050".into()),
            message: Some("Not found".into()),
            detail: Some("No device with ip 10.0.0.9".into()),
        };
        assert_eq!(
            body.describe().as_deref(),
            Some("Not found: No device with ip 10.0.0.9")
        );
    }
}
