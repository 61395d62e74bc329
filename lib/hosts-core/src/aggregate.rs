//! Aggregation of routes into host entry records

use crate::resolver::{resolve, GatewayAddressCache, GatewayLookup};
use crate::RouteRecord;
use hosts_api::DecodedRoute;
use k8s_openapi::api::networking::v1::Ingress;
use kube::ResourceExt;
use tracing::debug;

/// One record per Ingress rule host, backed by the Ingress' own
/// load-balancer status.
pub fn collect_ingress_records(ingresses: &[Ingress], fallback: &str) -> Vec<RouteRecord> {
    let mut records = Vec::new();

    for ingress in ingresses {
        let name = ingress.name_any();
        let endpoints = ingress
            .status
            .as_ref()
            .and_then(|status| status.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_deref())
            .unwrap_or_default();
        let address = resolve(endpoints, fallback);

        let rules = ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.rules.as_deref())
            .unwrap_or_default();
        for rule in rules {
            match rule.host.as_deref() {
                Some(host) if !host.is_empty() => {
                    records.push(RouteRecord::new(host, address.as_str(), name.as_str()));
                }
                _ => debug!(ingress = %name, "Skipping rule without host"),
            }
        }
    }

    records
}

/// One record per HTTPRoute hostname, backed by the route's parent
/// Gateways.
///
/// Parents are resolved in order and each resolved address replaces the
/// previous one; a route whose parents resolve to nothing keeps the
/// fallback.
pub async fn collect_route_records<L: GatewayLookup>(
    routes: &[DecodedRoute],
    gateways: &mut GatewayAddressCache<L>,
    fallback: &str,
) -> Vec<RouteRecord> {
    let mut records = Vec::new();

    for route in routes {
        let service = route.service_label();

        let mut address = fallback.to_string();
        for parent in &route.spec.parent_refs {
            let namespace = parent.namespace_or(&route.namespace);
            if let Some(resolved) = gateways.resolve_gateway(namespace, &parent.name).await {
                address = resolved;
            }
        }

        for hostname in &route.spec.hostnames {
            if hostname.is_empty() {
                debug!(route = %service, "Skipping empty hostname");
                continue;
            }
            records.push(RouteRecord::new(
                hostname.as_str(),
                address.as_str(),
                service.as_str(),
            ));
        }
    }

    records
}
