//! Kubernetes access for ingress-hosts
pub mod client;
pub mod discovery;

pub use client::ClusterClient;
pub use discovery::{KubeGatewayLookup, RouteDiscovery};
