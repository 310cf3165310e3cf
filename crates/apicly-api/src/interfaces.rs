// Interface endpoints
//
// `GET /interface/ip-address/{ip}` returns every interface configured
// with the address, whether the interface is up or down.

use tracing::debug;

use crate::client::{ApicClient, segment};
use crate::error::Error;
use crate::models::InterfaceRecord;

impl ApicClient {
    /// List interfaces configured with `ip`.
    ///
    /// The controller answers 404 when nothing matches; that maps to an
    /// empty list.
    pub async fn interfaces_by_ip(&self, ip: &str) -> Result<Vec<InterfaceRecord>, Error> {
        let url = self.api_url(&format!("interface/ip-address/{}", segment(ip)))?;
        debug!(ip, "looking up interface bindings");
        let interfaces: Option<Vec<InterfaceRecord>> = self.get(url).await?;
        Ok(interfaces.unwrap_or_default())
    }
}
