// Host (end-client) endpoints
//
// `GET /host` lists discovered end-hosts; filtering by `hostIp` answers
// "is this address used by a client, and where is it attached".

use tracing::debug;

use crate::client::ApicClient;
use crate::error::Error;
use crate::models::HostRecord;

impl ApicClient {
    /// Find connected hosts using `ip`.
    ///
    /// `GET /api/v1/host?hostIp={ip}`. An empty list (or a 404) means no
    /// client currently holds the address.
    pub async fn find_hosts_by_ip(&self, ip: &str) -> Result<Vec<HostRecord>, Error> {
        let url = self.api_url("host")?;
        debug!(ip, "looking up client hosts");
        let hosts: Option<Vec<HostRecord>> = self.get_with_query(url, &[("hostIp", ip)]).await?;
        Ok(hosts.unwrap_or_default())
    }
}
