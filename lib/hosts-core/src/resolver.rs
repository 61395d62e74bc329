//! Address resolution for host entries
//!
//! An Ingress is backed by the addresses in its load-balancer status. An
//! HTTPRoute is backed by the first address of each parent Gateway, looked
//! up through [`GatewayLookup`] and memoized per run in
//! [`GatewayAddressCache`]. Whenever nothing better is known, the cluster API
//! server hostname is used.

use crate::Result;
use async_trait::async_trait;
use k8s_openapi::api::networking::v1::IngressLoadBalancerIngress;
use std::collections::HashMap;
use tracing::debug;

/// Pick the address backing an Ingress from its load-balancer status.
///
/// Every endpoint with a non-empty IP (preferred) or hostname overwrites the
/// result, so the last such endpoint wins. With no usable endpoint the
/// fallback is returned unchanged.
pub fn resolve<'a, I>(endpoints: I, fallback: &str) -> String
where
    I: IntoIterator<Item = &'a IngressLoadBalancerIngress>,
{
    let mut address = fallback;
    for endpoint in endpoints {
        let ip = endpoint.ip.as_deref().unwrap_or_default();
        let hostname = endpoint.hostname.as_deref().unwrap_or_default();
        if !ip.is_empty() {
            address = ip;
        } else if !hostname.is_empty() {
            address = hostname;
        }
    }
    address.to_string()
}

/// Source of parent Gateway addresses
#[async_trait]
pub trait GatewayLookup: Send + Sync {
    /// First status address of the Gateway `namespace/name`.
    ///
    /// `Ok(None)` means the Gateway exists but exposes no usable address.
    async fn gateway_address(&self, namespace: &str, name: &str) -> Result<Option<String>>;
}

/// Per-run memo of Gateway addresses keyed by `namespace/name`.
///
/// Failed and empty lookups are remembered as `None` and never retried.
pub struct GatewayAddressCache<L> {
    lookup: L,
    addresses: HashMap<String, Option<String>>,
}

impl<L: GatewayLookup> GatewayAddressCache<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            addresses: HashMap::new(),
        }
    }

    /// Resolve a Gateway address, consulting the lookup at most once per key
    pub async fn resolve_gateway(&mut self, namespace: &str, name: &str) -> Option<String> {
        let key = format!("{}/{}", namespace, name);
        if let Some(cached) = self.addresses.get(&key) {
            return cached.clone();
        }

        let address = match self.lookup.gateway_address(namespace, name).await {
            Ok(Some(address)) if !address.is_empty() => Some(address),
            Ok(_) => {
                debug!(gateway = %key, "Gateway exposes no address");
                None
            }
            Err(e) => {
                debug!(gateway = %key, error = %e, "Gateway lookup failed");
                None
            }
        };

        self.addresses.insert(key, address.clone());
        address
    }

    /// Number of Gateways looked up so far
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Get the underlying lookup
    pub fn lookup(&self) -> &L {
        &self.lookup
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use kube::core::ErrorResponse;
    use std::sync::Mutex;

    /// Lookup backed by a fixed table; unknown Gateways fail with 404
    #[derive(Default)]
    pub(crate) struct StaticLookup {
        gateways: HashMap<String, Option<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticLookup {
        pub(crate) fn with(mut self, key: &str, address: Option<&str>) -> Self {
            self.gateways
                .insert(key.to_string(), address.map(str::to_string));
            self
        }

        pub(crate) fn call_count(&self, key: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|k| *k == key).count()
        }
    }

    #[async_trait]
    impl GatewayLookup for StaticLookup {
        async fn gateway_address(&self, namespace: &str, name: &str) -> Result<Option<String>> {
            let key = format!("{}/{}", namespace, name);
            self.calls.lock().unwrap().push(key.clone());
            match self.gateways.get(&key) {
                Some(address) => Ok(address.clone()),
                None => Err(kube::Error::Api(ErrorResponse {
                    status: "Failure".to_string(),
                    message: format!("gateways \"{}\" not found", name),
                    reason: "NotFound".to_string(),
                    code: 404,
                })
                .into()),
            }
        }
    }

    fn endpoint(ip: &str, hostname: &str) -> IngressLoadBalancerIngress {
        IngressLoadBalancerIngress {
            ip: Some(ip.to_string()),
            hostname: Some(hostname.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_last_non_empty_endpoint_wins() {
        let endpoints = vec![
            endpoint("", ""),
            endpoint("1.1.1.1", ""),
            endpoint("", "h.example"),
        ];
        assert_eq!(resolve(&endpoints, "F"), "h.example");
    }

    #[test]
    fn test_ip_preferred_over_hostname() {
        let endpoints = vec![endpoint("10.1.2.3", "lb.example")];
        assert_eq!(resolve(&endpoints, "F"), "10.1.2.3");
    }

    #[test]
    fn test_empty_status_uses_fallback() {
        let none: Vec<IngressLoadBalancerIngress> = Vec::new();
        assert_eq!(resolve(&none, "F"), "F");
        assert_eq!(resolve(&[endpoint("", "")], "F"), "F");
        assert_eq!(resolve(&[IngressLoadBalancerIngress::default()], "F"), "F");
    }

    #[tokio::test]
    async fn test_cache_looks_up_once() {
        let lookup = StaticLookup::default().with("ns1/gw", Some("5.6.7.8"));
        let mut cache = GatewayAddressCache::new(lookup);

        for _ in 0..2 {
            let address = cache.resolve_gateway("ns1", "gw").await;
            assert_eq!(address.as_deref(), Some("5.6.7.8"));
        }
        assert_eq!(cache.lookup().call_count("ns1/gw"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_remembers_failures() {
        let lookup = StaticLookup::default().with("ns1/empty", Some(""));
        let mut cache = GatewayAddressCache::new(lookup);

        assert_eq!(cache.resolve_gateway("ns1", "missing").await, None);
        assert_eq!(cache.resolve_gateway("ns1", "missing").await, None);
        assert_eq!(cache.resolve_gateway("ns1", "empty").await, None);
        assert_eq!(cache.resolve_gateway("ns1", "empty").await, None);

        assert_eq!(cache.lookup().call_count("ns1/missing"), 1);
        assert_eq!(cache.lookup().call_count("ns1/empty"), 1);
    }
}
