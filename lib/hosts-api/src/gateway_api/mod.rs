//! Gateway API (gateway.networking.k8s.io/v1) resources

pub mod gateway;
pub mod http_route;

pub use gateway::{Gateway, GatewaySpec, GatewayStatus, GatewayStatusAddress, Listener};
pub use http_route::{HTTPRoute, HTTPRouteSpec, ParentReference};

use kube::core::ApiResource;

/// API group for Gateway API resources
pub const API_GROUP: &str = "gateway.networking.k8s.io";
/// API version for Gateway API resources
pub const API_VERSION: &str = "v1";

/// Dynamic descriptor for listing HTTPRoutes as untyped objects
pub fn http_route_resource() -> ApiResource {
    ApiResource::erase::<HTTPRoute>(&())
}

/// Dynamic descriptor for fetching Gateways as untyped objects
pub fn gateway_resource() -> ApiResource {
    ApiResource::erase::<Gateway>(&())
}
