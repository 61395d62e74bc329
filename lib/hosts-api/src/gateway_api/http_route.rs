use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// HTTPRoute attaches hostnames to one or more parent Gateways.
///
/// Only the fields needed to derive host entries are modelled; rules and
/// backends are irrelevant to name resolution.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "HTTPRoute",
    plural = "httproutes",
    namespaced,
    derive = "Default",
)]
#[serde(rename_all = "camelCase")]
pub struct HTTPRouteSpec {
    /// Hostnames matched against the HTTP Host header
    #[serde(default)]
    pub hostnames: Vec<String>,

    /// Gateways this route attaches to
    #[serde(default)]
    pub parent_refs: Vec<ParentReference>,
}

/// Reference from a route to its parent Gateway
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    /// Name of the parent Gateway
    pub name: String,

    /// Namespace of the parent (defaults to the route's namespace)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Listener name on the parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
}

impl ParentReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace to look the parent up in, falling back to the route's own
    pub fn namespace_or<'a>(&'a self, route_namespace: &'a str) -> &'a str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => route_namespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_defaults_to_route() {
        let parent = ParentReference::new("gw");
        assert_eq!(parent.namespace_or("apps"), "apps");

        let parent = ParentReference::new("gw").in_namespace("infra");
        assert_eq!(parent.namespace_or("apps"), "infra");

        let parent = ParentReference::new("gw").in_namespace("");
        assert_eq!(parent.namespace_or("apps"), "apps");
    }

    #[test]
    fn test_spec_deserializes_camel_case() {
        let spec: HTTPRouteSpec = serde_json::from_value(serde_json::json!({
            "hostnames": ["shop.example.com"],
            "parentRefs": [{"name": "public", "namespace": "infra", "sectionName": "https"}]
        }))
        .unwrap();

        assert_eq!(spec.hostnames, vec!["shop.example.com"]);
        assert_eq!(spec.parent_refs[0].section_name.as_deref(), Some("https"));
    }
}
