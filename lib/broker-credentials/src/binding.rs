//! Wire-format types for binding credentials
//!
//! Field names here are part of the broker protocol's credential schema and
//! must stay stable. Optional fields are omitted from the encoded form
//! entirely, never emitted as null.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Map of protocol name to its connection descriptor.
///
/// Ordered so the encoded key order is deterministic.
pub type Protocols = BTreeMap<String, Protocol>;

/// Binding credentials handed to the broker-protocol layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Login URL for the management dashboard, credentials embedded
    pub dashboard_url: String,

    /// Administrative username
    pub username: String,

    /// Administrative password
    pub password: String,

    /// Primary hostname, always `hostnames[0]`
    pub hostname: String,

    /// All reachable hostnames, input order preserved
    pub hostnames: Vec<String>,

    /// Management API URI for the management endpoint
    pub http_api_uri: String,

    /// Management API URIs; always a single entry for the fixed endpoint
    pub http_api_uris: Vec<String>,

    /// Primary amqp URI (host-default-port form, no explicit port)
    pub uri: String,

    /// One amqp URI per hostname, same order as `hostnames`
    pub uris: Vec<String>,

    /// Pre-encoded virtual host path segment
    pub vhost: String,

    /// Whether the primary protocol is advertised as TLS-secured
    #[serde(rename = "ssl")]
    pub tls: bool,

    /// Per-protocol connection descriptors
    pub protocols: Protocols,
}

/// Connection details for one wire protocol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    pub username: String,

    pub password: String,

    /// Virtual host; absent for protocols without a vhost concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,

    /// Primary hostname
    #[serde(rename = "host")]
    pub hostname: String,

    /// All hostnames, input order preserved
    #[serde(rename = "hosts")]
    pub hostnames: Vec<String>,

    /// Connection URI for the primary hostname, explicit port
    pub uri: String,

    /// One URI per hostname, same order as `hostnames`
    pub uris: Vec<String>,

    /// Port the protocol listens on
    pub port: u16,

    #[serde(rename = "ssl")]
    pub tls: bool,

    /// URI path prefix; absent for protocols addressed by port alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Binding {
    /// Encode into the generic key-value form the broker-protocol layer
    /// expects. This is the only point where an encoding failure can surface.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
