use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Gateway is the parent resource an HTTPRoute attaches to
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "Gateway",
    plural = "gateways",
    namespaced,
    derive = "Default",
    status = "GatewayStatus",
)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    /// GatewayClass implementing this Gateway
    pub gateway_class_name: String,

    /// Listeners bound by the Gateway
    #[serde(default)]
    pub listeners: Vec<Listener>,
}

/// Gateway listener
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Listener {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    pub port: u16,

    pub protocol: String,
}

/// Status of a Gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GatewayStatus {
    /// Addresses assigned to the Gateway by its controller
    #[serde(default)]
    pub addresses: Vec<GatewayStatusAddress>,
}

impl GatewayStatus {
    /// First assigned address, if any
    pub fn first_address(&self) -> Option<&str> {
        self.addresses.first().map(|a| a.value.as_str())
    }
}

/// Address assigned to a Gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GatewayStatusAddress {
    /// "IPAddress" or "Hostname"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    pub value: String,
}
