// apicly-api: Async Rust client for the APIC-EM controller REST API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod hosts;
pub mod interfaces;
pub mod licenses;
pub mod models;
pub mod transport;

pub use auth::ServiceTicket;
pub use client::ApicClient;
pub use error::Error;
pub use models::{
    HostRecord, HostType, InterfaceRecord, LicenseRecord, LicenseStatus, NetworkDevice,
};
pub use transport::{TlsMode, TransportConfig};
