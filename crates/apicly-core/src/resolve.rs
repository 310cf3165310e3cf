// ── IP resolution pipeline ──
//
// Answers "who is using this address" with two independent checks against
// two different upstream datasets: the host table (clients) and the
// interface table (device configuration, falling back to management
// addresses). Both checks always run; their answers are never reconciled.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::{debug, info};

use apicly_api::ApicClient;

use crate::convert::interface_label;
use crate::error::CoreError;
use crate::identity::IdentityResolver;
use crate::model::{ClientFinding, ConfigurationFinding, ResolutionReport};
use crate::session::Session;

/// Resolves IP addresses to client attachments and device configuration.
///
/// Holds its own [`IdentityResolver`], so resolving many addresses in one
/// run fetches each device only once.
pub struct IpResolver {
    client: ApicClient,
    identities: Arc<IdentityResolver>,
}

impl IpResolver {
    pub fn new(session: &Session) -> Self {
        Self::with_identities(session, Arc::new(IdentityResolver::new(session)))
    }

    /// Share an identity cache with other workflows.
    pub fn with_identities(session: &Session, identities: Arc<IdentityResolver>) -> Self {
        Self {
            client: session.client().clone(),
            identities,
        }
    }

    pub fn identities(&self) -> &IdentityResolver {
        &self.identities
    }

    /// Run both checks for `ip`, client check first.
    ///
    /// Only the documented "no match" outcomes are folded into the report;
    /// any other failure (transport, auth, malformed payload, a host or
    /// interface pointing at a device the inventory does not know) is
    /// returned as an error.
    pub async fn resolve(&self, ip: IpAddr) -> Result<ResolutionReport, CoreError> {
        info!(%ip, "resolving address");
        let client = self.check_client(ip).await?;
        let configuration = self.check_configuration(ip).await?;
        Ok(ResolutionReport {
            address: ip,
            client,
            configuration,
        })
    }

    /// Is `ip` held by a connected client, and where is it attached?
    pub async fn check_client(&self, ip: IpAddr) -> Result<ClientFinding, CoreError> {
        let hosts = self.client.find_hosts_by_ip(&ip.to_string()).await?;
        let Some(host) = hosts.into_iter().next() else {
            debug!(%ip, "no client host holds address");
            return Ok(ClientFinding::NotUsed);
        };

        let label = interface_label(&host);
        let device = self
            .identities
            .resolve_by_device_id(&host.connected_network_device_id)
            .await?;

        Ok(ClientFinding::Connected {
            device,
            interface_label: label,
            host_type: host.host_type,
        })
    }

    /// Is `ip` configured on a device interface, or failing that, is it a
    /// device's management address?
    pub async fn check_configuration(&self, ip: IpAddr) -> Result<ConfigurationFinding, CoreError> {
        let interfaces = self.client.interfaces_by_ip(&ip.to_string()).await?;
        if let Some(interface) = interfaces.into_iter().next() {
            let device = self
                .identities
                .resolve_by_device_id(&interface.device_id)
                .await?;
            return Ok(ConfigurationFinding::Interface {
                device,
                port_name: interface.port_name,
            });
        }

        debug!(%ip, "no interface binding, trying management address");
        match self.identities.resolve_by_management_ip(ip).await {
            Ok(device) => Ok(ConfigurationFinding::ManagementAddress { device }),
            Err(e) if e.is_not_found() => Ok(ConfigurationFinding::NotConfigured),
            Err(e) => Err(e),
        }
    }
}
