//! Route discovery across the cluster

use async_trait::async_trait;
use hosts_api::gateway_api::{gateway_resource, http_route_resource};
use hosts_api::{decode_gateway_status, decode_http_route, DecodeIssue, DecodedRoute};
use hosts_core::GatewayLookup;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{DynamicObject, ListParams};
use kube::{Api, Client};
use tracing::{debug, warn};

/// RouteDiscovery lists the routing resources that declare hostnames
pub struct RouteDiscovery {
    client: Client,
}

impl RouteDiscovery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List Ingresses in all namespaces
    pub async fn discover_ingresses(&self) -> anyhow::Result<Vec<Ingress>> {
        let ingresses: Api<Ingress> = Api::all(self.client.clone());
        let list = ingresses.list(&ListParams::default()).await?;

        debug!("Discovered {} Ingresses", list.items.len());
        Ok(list.items)
    }

    /// List HTTPRoutes in all namespaces.
    ///
    /// Fails when the Gateway API is not installed. Routes without a usable
    /// spec are dropped; every decode issue is logged.
    pub async fn discover_http_routes(&self) -> anyhow::Result<Vec<DecodedRoute>> {
        let routes: Api<DynamicObject> =
            Api::all_with(self.client.clone(), &http_route_resource());
        let list = routes.list(&ListParams::default()).await?;
        debug!("Discovered {} HTTPRoutes", list.items.len());

        let decoded = list
            .items
            .iter()
            .filter_map(|obj| {
                let decoded = decode_http_route(obj);
                report(&decoded.issues);
                decoded.value
            })
            .collect();
        Ok(decoded)
    }

    /// Gateway lookup sharing this discovery's client
    pub fn gateway_lookup(&self) -> KubeGatewayLookup {
        KubeGatewayLookup {
            client: self.client.clone(),
        }
    }
}

/// Looks up Gateways in the cluster
pub struct KubeGatewayLookup {
    client: Client,
}

#[async_trait]
impl GatewayLookup for KubeGatewayLookup {
    async fn gateway_address(
        &self,
        namespace: &str,
        name: &str,
    ) -> hosts_core::Result<Option<String>> {
        let gateways: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &gateway_resource());
        let gateway = gateways.get(name).await?;

        let decoded = decode_gateway_status(&gateway);
        report(&decoded.issues);
        Ok(decoded.value.first_address().map(str::to_string))
    }
}

fn report(issues: &[DecodeIssue]) {
    for issue in issues {
        warn!(
            object = %issue.object,
            field = %issue.field,
            "Ignoring malformed field: {}",
            issue.reason
        );
    }
}
