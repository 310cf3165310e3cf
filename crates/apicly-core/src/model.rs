// ── Domain types ──
//
// What the resolution and aggregation workflows produce. Serializable so
// the CLI can render them as JSON/YAML as well as prose.

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

pub use apicly_api::HostType;

/// Hostname, type and serial of one managed device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub device_id: String,
    pub hostname: String,
    pub device_type: String,
    pub serial_number: String,
}

/// Outcome of the client check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClientFinding {
    /// No connected host holds the address.
    NotUsed,
    /// A connected host holds the address. For wireless hosts the label is
    /// `VLAN <id>`; otherwise it is the switch port name.
    Connected {
        device: DeviceIdentity,
        interface_label: String,
        host_type: HostType,
    },
}

/// Outcome of the interface / management-address check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfigurationFinding {
    NotConfigured,
    /// Address is configured on an interface of `device`.
    Interface {
        device: DeviceIdentity,
        port_name: String,
    },
    /// Address is the management IP of `device`; there is no port.
    ManagementAddress { device: DeviceIdentity },
}

/// Both answers for one IP address. The two findings come from different
/// upstream datasets and are never reconciled against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub address: IpAddr,
    pub client: ClientFinding,
    pub configuration: ConfigurationFinding,
}

impl ResolutionReport {
    /// Devices named anywhere in the report, client side first.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceIdentity> {
        let client = match &self.client {
            ClientFinding::Connected { device, .. } => Some(device),
            ClientFinding::NotUsed => None,
        };
        let configured = match &self.configuration {
            ConfigurationFinding::Interface { device, .. }
            | ConfigurationFinding::ManagementAddress { device } => Some(device),
            ConfigurationFinding::NotConfigured => None,
        };
        client.into_iter().chain(configured)
    }

    pub fn client_line(&self) -> String {
        let ip = self.address;
        match &self.client {
            ClientFinding::NotUsed => {
                format!("The IP address {ip} is not used by any client devices")
            }
            ClientFinding::Connected {
                device,
                interface_label,
                ..
            } => format!(
                "The IP address {ip} is connected to the network device {}, {}, interface {interface_label}",
                device.hostname, device.device_type
            ),
        }
    }

    pub fn configuration_line(&self) -> String {
        let ip = self.address;
        match &self.configuration {
            ConfigurationFinding::NotConfigured => {
                format!("The IP address {ip} is not configured on any network devices")
            }
            ConfigurationFinding::Interface { device, port_name } => format!(
                "The IP address {ip} is configured on network device {}, {}, interface {port_name}",
                device.hostname, device.device_type
            ),
            ConfigurationFinding::ManagementAddress { device } => format!(
                "The IP address {ip} is configured on network device {}, {}",
                device.hostname, device.device_type
            ),
        }
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.client_line())?;
        write!(f, "{}", self.configuration_line())
    }
}

/// One line of the fleet license report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetReportRow {
    pub device_id: String,
    pub hostname: String,
    pub serial_number: String,
    /// Active (`INUSE`) license names, deduplicated, first-seen order.
    pub licenses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> DeviceIdentity {
        DeviceIdentity {
            device_id: "dev-1".into(),
            hostname: "AHEC-2960C1".into(),
            device_type: "Cisco Catalyst 2960C-8PC-L Switch".into(),
            serial_number: "FOC1637Y3FJ".into(),
        }
    }

    #[test]
    fn unresolved_address_renders_both_negative_lines() {
        let report = ResolutionReport {
            address: "10.9.9.9".parse().unwrap_or(IpAddr::from([0, 0, 0, 0])),
            client: ClientFinding::NotUsed,
            configuration: ConfigurationFinding::NotConfigured,
        };
        assert_eq!(
            report.to_string(),
            "The IP address 10.9.9.9 is not used by any client devices\n\
             The IP address 10.9.9.9 is not configured on any network devices"
        );
        assert_eq!(report.devices().count(), 0);
    }

    #[test]
    fn management_match_has_no_interface() {
        let report = ResolutionReport {
            address: IpAddr::from([10, 2, 1, 17]),
            client: ClientFinding::NotUsed,
            configuration: ConfigurationFinding::ManagementAddress { device: router() },
        };
        let line = report.configuration_line();
        assert_eq!(
            line,
            "The IP address 10.2.1.17 is configured on network device AHEC-2960C1, Cisco Catalyst 2960C-8PC-L Switch"
        );
        assert!(!line.contains("interface"));
    }

    #[test]
    fn devices_lists_client_side_first() {
        let mut other = router();
        other.hostname = "CAMPUS-Access1".into();
        let report = ResolutionReport {
            address: IpAddr::from([10, 1, 15, 117]),
            client: ClientFinding::Connected {
                device: other,
                interface_label: "VLAN 600".into(),
                host_type: HostType::Wireless,
            },
            configuration: ConfigurationFinding::Interface {
                device: router(),
                port_name: "Vlan1".into(),
            },
        };
        let names: Vec<&str> = report.devices().map(|d| d.hostname.as_str()).collect();
        assert_eq!(names, vec!["CAMPUS-Access1", "AHEC-2960C1"]);
    }
}
