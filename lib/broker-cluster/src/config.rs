//! Broker configuration from the environment

use std::collections::BTreeMap;
use std::env;

use anyhow::Context;
use broker_credentials::{AMQP_SCHEME, DEFAULT_MANAGEMENT_PORT, MANAGEMENT_PROTOCOL};

/// Default amqp listener port for provisioned instances
pub const DEFAULT_AMQP_PORT: u16 = 5672;

/// Administrative credentials and connection settings shared by every
/// binding this broker hands out
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    /// Administrator username
    pub username: String,

    /// Administrator password
    pub password: String,

    /// Whether bindings advertise the amqp endpoint as TLS-secured
    pub tls: bool,

    /// Protocol name to port map used for every binding
    pub protocol_ports: BTreeMap<String, u16>,
}

impl BrokerConfig {
    /// Load the broker configuration from environment variables.
    ///
    /// `BROKER_ADMIN_USERNAME` and `BROKER_ADMIN_PASSWORD` are required;
    /// `BROKER_TLS`, `BROKER_AMQP_PORT` and `BROKER_MANAGEMENT_PORT` are
    /// optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let username = env::var("BROKER_ADMIN_USERNAME")
            .context("BROKER_ADMIN_USERNAME must be set")?;
        let password = env::var("BROKER_ADMIN_PASSWORD")
            .context("BROKER_ADMIN_PASSWORD must be set")?;

        let tls = env::var("BROKER_TLS")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let amqp_port = port_from_env("BROKER_AMQP_PORT", DEFAULT_AMQP_PORT)?;
        let management_port = port_from_env("BROKER_MANAGEMENT_PORT", DEFAULT_MANAGEMENT_PORT)?;

        Ok(Self {
            username,
            password,
            tls,
            protocol_ports: protocol_ports(amqp_port, management_port),
        })
    }

    /// The management API port this broker advertises
    pub fn management_port(&self) -> u16 {
        self.protocol_ports
            .get(MANAGEMENT_PROTOCOL)
            .copied()
            .unwrap_or(DEFAULT_MANAGEMENT_PORT)
    }
}

/// Protocol-port map for the given amqp and management ports
pub fn protocol_ports(amqp_port: u16, management_port: u16) -> BTreeMap<String, u16> {
    BTreeMap::from([
        (AMQP_SCHEME.to_string(), amqp_port),
        (MANAGEMENT_PROTOCOL.to_string(), management_port),
    ])
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "True")
}

fn port_from_env(var: &str, default: u16) -> anyhow::Result<u16> {
    match env::var(var) {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("{} must be a port number, got {:?}", var, value)),
        Err(_) => Ok(default),
    }
}
