//! Core host entry engine
//!
//! This library provides:
//! - Address resolution for Ingress load-balancer status and parent Gateways
//! - Aggregation of routes into one record per declared hostname
//! - Sorted, column-aligned rendering of the record set
//! - Idempotent merging of the rendered block into a host file

pub mod aggregate;
pub mod error;
pub mod hosts_file;
pub mod record;
pub mod render;
pub mod resolver;

pub use aggregate::{collect_ingress_records, collect_route_records};
pub use error::{CoreError, Result};
pub use hosts_file::{merge, HostsFile, DEFAULT_HOST_FILE, SECTION_END, SECTION_START};
pub use record::RouteRecord;
pub use render::{render, sort_records};
pub use resolver::{resolve, GatewayAddressCache, GatewayLookup};
