//! Resolution and aggregation workflows on top of `apicly-api`.
//!
//! Everything starts from a [`Session`], which holds the service ticket for
//! the lifetime of one run:
//!
//! - **[`IdentityResolver`]**: hostname / type / serial lookups by device
//!   id or management IP, memoized per run.
//! - **[`IpResolver`]**: answers "who uses this address" with two
//!   independent checks: connected client, then interface binding with a
//!   management-IP fallback. Produces a [`ResolutionReport`].
//! - **[`LicenseAggregator`]**: walks the whole inventory and produces one
//!   [`FleetReportRow`] per device, in inventory order, with bounded
//!   fan-out.

pub mod config;
pub mod convert;
pub mod error;
pub mod identity;
pub mod licenses;
pub mod model;
pub mod resolve;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use error::CoreError;
pub use identity::IdentityResolver;
pub use licenses::{LicenseAggregator, active_licenses};
pub use model::{
    ClientFinding, ConfigurationFinding, DeviceIdentity, FleetReportRow, HostType,
    ResolutionReport,
};
pub use resolve::IpResolver;
pub use session::Session;
