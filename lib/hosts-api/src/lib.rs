//! Gateway API resource types consumed by ingress-hosts
//!
//! This library defines:
//! - HTTPRoute: hostnames plus the parent Gateways that serve them
//! - Gateway: the parent resource exposing assigned addresses in its status
//! - decode: conversion of untyped cluster objects into the typed shapes above

pub mod decode;
pub mod gateway_api;

pub use decode::{decode_gateway_status, decode_http_route, DecodeIssue, Decoded, DecodedRoute};
pub use gateway_api::{Gateway, GatewayStatus, HTTPRoute, ParentReference};
