//! Decoding of untyped Gateway API objects
//!
//! HTTPRoutes and Gateways are fetched as [`DynamicObject`]s so that objects
//! which only partially match the expected schema still yield usable data.
//! Every field that does not have the expected shape is returned as a
//! [`DecodeIssue`] alongside whatever could be decoded.

use crate::gateway_api::{GatewayStatus, GatewayStatusAddress, HTTPRouteSpec, ParentReference};
use kube::api::DynamicObject;
use serde_json::{Map, Value};
use thiserror::Error;

/// A field that did not match the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{object}: `{field}` {reason}")]
pub struct DecodeIssue {
    /// `namespace/name` of the offending object
    pub object: String,
    /// Path of the field inside the object
    pub field: String,
    pub reason: String,
}

impl DecodeIssue {
    fn new(object: &str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            object: object.to_string(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn unexpected(object: &str, field: impl Into<String>, found: &Value, expected: &str) -> Self {
        Self::new(
            object,
            field,
            format!("is {}, expected {}", describe(found), expected),
        )
    }
}

/// Decoded value plus the issues hit while decoding it
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub value: T,
    pub issues: Vec<DecodeIssue>,
}

/// Typed view of an HTTPRoute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRoute {
    pub namespace: String,
    pub name: String,
    pub spec: HTTPRouteSpec,
}

impl DecodedRoute {
    /// `namespace/name`, used as the owning service label
    pub fn service_label(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Decode an HTTPRoute.
///
/// Returns `None` only when the object has no usable `spec`; malformed
/// hostnames and parent references are skipped individually.
pub fn decode_http_route(obj: &DynamicObject) -> Decoded<Option<DecodedRoute>> {
    let namespace = obj.metadata.namespace.clone().unwrap_or_default();
    let name = obj.metadata.name.clone().unwrap_or_default();
    let key = format!("{namespace}/{name}");
    let mut issues = Vec::new();

    let spec = match obj.data.get("spec") {
        Some(Value::Object(spec)) => spec,
        Some(other) => {
            issues.push(DecodeIssue::unexpected(&key, "spec", other, "an object"));
            return Decoded { value: None, issues };
        }
        None => {
            issues.push(DecodeIssue::new(&key, "spec", "is missing"));
            return Decoded { value: None, issues };
        }
    };

    let mut hostnames = Vec::new();
    for (i, item) in array_field(spec, "hostnames", "spec", &key, &mut issues)
        .iter()
        .enumerate()
    {
        match item {
            Value::String(host) => hostnames.push(host.clone()),
            other => issues.push(DecodeIssue::unexpected(
                &key,
                format!("spec.hostnames[{i}]"),
                other,
                "a string",
            )),
        }
    }

    let mut parent_refs = Vec::new();
    for (i, item) in array_field(spec, "parentRefs", "spec", &key, &mut issues)
        .iter()
        .enumerate()
    {
        let path = format!("spec.parentRefs[{i}]");
        if let Some(parent) = decode_parent_ref(item, &path, &key, &mut issues) {
            parent_refs.push(parent);
        }
    }

    Decoded {
        value: Some(DecodedRoute {
            namespace,
            name,
            spec: HTTPRouteSpec {
                hostnames,
                parent_refs,
            },
        }),
        issues,
    }
}

/// Decode the status of a Gateway.
///
/// Address entries that are not objects or carry no string `value` are
/// skipped, so [`GatewayStatus::first_address`] yields the first well-formed
/// address.
pub fn decode_gateway_status(obj: &DynamicObject) -> Decoded<GatewayStatus> {
    let key = format!(
        "{}/{}",
        obj.metadata.namespace.as_deref().unwrap_or_default(),
        obj.metadata.name.as_deref().unwrap_or_default()
    );
    let mut issues = Vec::new();
    let mut status = GatewayStatus::default();

    let fields = match obj.data.get("status") {
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            issues.push(DecodeIssue::unexpected(&key, "status", other, "an object"));
            return Decoded { value: status, issues };
        }
        None => {
            issues.push(DecodeIssue::new(&key, "status", "is missing"));
            return Decoded { value: status, issues };
        }
    };

    for (i, item) in array_field(fields, "addresses", "status", &key, &mut issues)
        .iter()
        .enumerate()
    {
        let path = format!("status.addresses[{i}]");
        let Value::Object(address) = item else {
            issues.push(DecodeIssue::unexpected(&key, path, item, "an object"));
            continue;
        };
        match address.get("value") {
            Some(Value::String(value)) => status.addresses.push(GatewayStatusAddress {
                type_: address
                    .get("type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                value: value.clone(),
            }),
            Some(other) => issues.push(DecodeIssue::unexpected(
                &key,
                format!("{path}.value"),
                other,
                "a string",
            )),
            None => issues.push(DecodeIssue::new(&key, format!("{path}.value"), "is missing")),
        }
    }

    Decoded {
        value: status,
        issues,
    }
}

fn decode_parent_ref(
    item: &Value,
    path: &str,
    key: &str,
    issues: &mut Vec<DecodeIssue>,
) -> Option<ParentReference> {
    let Value::Object(fields) = item else {
        issues.push(DecodeIssue::unexpected(key, path, item, "an object"));
        return None;
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(Value::String(_)) => {
            issues.push(DecodeIssue::new(key, format!("{path}.name"), "is empty"));
            return None;
        }
        Some(other) => {
            issues.push(DecodeIssue::unexpected(key, format!("{path}.name"), other, "a string"));
            return None;
        }
        None => {
            issues.push(DecodeIssue::new(key, format!("{path}.name"), "is missing"));
            return None;
        }
    };

    Some(ParentReference {
        name,
        namespace: optional_string(fields, "namespace", path, key, issues),
        section_name: optional_string(fields, "sectionName", path, key, issues),
    })
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &str,
    path: &str,
    key: &str,
    issues: &mut Vec<DecodeIssue>,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            issues.push(DecodeIssue::unexpected(key, format!("{path}.{field}"), other, "a string"));
            None
        }
    }
}

/// An absent or null array is treated as empty without an issue.
fn array_field<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
    path: &str,
    key: &str,
    issues: &mut Vec<DecodeIssue>,
) -> &'a [Value] {
    match fields.get(field) {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => &[],
        Some(other) => {
            issues.push(DecodeIssue::unexpected(key, format!("{path}.{field}"), other, "an array"));
            &[]
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway_api::{gateway_resource, http_route_resource};
    use serde_json::json;

    fn route(data: Value) -> DynamicObject {
        DynamicObject::new("shop", &http_route_resource())
            .within("apps")
            .data(data)
    }

    fn gateway(data: Value) -> DynamicObject {
        DynamicObject::new("public", &gateway_resource())
            .within("infra")
            .data(data)
    }

    #[test]
    fn test_decode_well_formed_route() {
        let decoded = decode_http_route(&route(json!({
            "spec": {
                "hostnames": ["shop.example.com", "www.shop.example.com"],
                "parentRefs": [
                    {"name": "public", "namespace": "infra"},
                    {"name": "internal"}
                ]
            }
        })));

        assert!(decoded.issues.is_empty());
        let route = decoded.value.unwrap();
        assert_eq!(route.service_label(), "apps/shop");
        assert_eq!(route.spec.hostnames.len(), 2);
        assert_eq!(
            route.spec.parent_refs,
            vec![
                ParentReference::new("public").in_namespace("infra"),
                ParentReference::new("internal"),
            ]
        );
    }

    #[test]
    fn test_missing_spec_skips_route() {
        let decoded = decode_http_route(&route(json!({})));
        assert!(decoded.value.is_none());
        assert_eq!(decoded.issues[0].field, "spec");

        let decoded = decode_http_route(&route(json!({"spec": "oops"})));
        assert!(decoded.value.is_none());
        assert_eq!(decoded.issues[0].reason, "is a string, expected an object");
    }

    #[test]
    fn test_malformed_fields_are_reported() {
        let decoded = decode_http_route(&route(json!({
            "spec": {
                "hostnames": ["ok.example.com", 42],
                "parentRefs": ["public", {"namespace": "infra"}, {"name": "gw", "namespace": 7}]
            }
        })));

        let route = decoded.value.unwrap();
        assert_eq!(route.spec.hostnames, vec!["ok.example.com"]);
        assert_eq!(route.spec.parent_refs, vec![ParentReference::new("gw")]);

        let fields: Vec<&str> = decoded.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "spec.hostnames[1]",
                "spec.parentRefs[0]",
                "spec.parentRefs[1].name",
                "spec.parentRefs[2].namespace",
            ]
        );
        assert_eq!(
            decoded.issues[0].to_string(),
            "apps/shop: `spec.hostnames[1]` is a number, expected a string"
        );
    }

    #[test]
    fn test_absent_lists_are_not_issues() {
        let decoded = decode_http_route(&route(json!({"spec": {"hostnames": null}})));
        assert!(decoded.issues.is_empty());
        assert!(decoded.value.unwrap().spec.hostnames.is_empty());
    }

    #[test]
    fn test_gateway_first_string_value() {
        let decoded = decode_gateway_status(&gateway(json!({
            "status": {
                "addresses": [
                    "bogus",
                    {"type": "IPAddress", "value": 5},
                    {"type": "IPAddress", "value": "203.0.113.7"},
                    {"type": "Hostname", "value": "lb.example.net"}
                ]
            }
        })));

        assert_eq!(decoded.value.first_address(), Some("203.0.113.7"));
        assert_eq!(decoded.value.addresses[0].type_.as_deref(), Some("IPAddress"));
        assert_eq!(decoded.issues.len(), 2);
    }

    #[test]
    fn test_gateway_without_status() {
        let decoded = decode_gateway_status(&gateway(json!({"spec": {}})));
        assert_eq!(decoded.value.first_address(), None);
        assert_eq!(decoded.issues[0].to_string(), "infra/public: `status` is missing");

        let decoded = decode_gateway_status(&gateway(json!({"status": {"addresses": {}}})));
        assert_eq!(decoded.value.first_address(), None);
        assert_eq!(decoded.issues[0].field, "status.addresses");
    }
}
