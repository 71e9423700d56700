//! Builder deriving binding credentials from instance connection details

use std::collections::BTreeMap;

use crate::binding::{Binding, Protocol, Protocols};
use crate::error::{CredentialsError, Result};

/// URI scheme of the primary wire protocol
pub const AMQP_SCHEME: &str = "amqp";

/// Protocol-map key for the management API descriptor
pub const MANAGEMENT_PROTOCOL: &str = "management";

/// Management API port used when the protocol-port map does not name one
pub const DEFAULT_MANAGEMENT_PORT: u16 = 15672;

/// Wire protocols a descriptor is synthesized for; any other name in the
/// protocol-port map is dropped without error
const WIRE_PROTOCOLS: &[&str] = &[AMQP_SCHEME];

/// CredentialsBuilder derives a [`Binding`] from a RabbitMQ instance's
/// connection details. It is a pure transformation: no I/O, no state, safe
/// to call from concurrent binding requests.
#[derive(Clone, Debug)]
pub struct CredentialsBuilder {
    /// "host:port" of the HTTP management API
    pub management_endpoint: String,

    /// Reachable hostnames; the first entry is the primary
    pub hostnames: Vec<String>,

    /// Pre-encoded virtual host path segment (root vhost is "%2f")
    pub vhost: String,

    /// Administrative username, embedded verbatim in every URI
    pub username: String,

    /// Administrative password, embedded verbatim in every URI
    pub password: String,

    /// Whether the primary protocol is advertised as TLS-secured
    pub tls: bool,

    /// Map of protocol name to port, e.g. "amqp" -> 5672
    pub protocol_ports: BTreeMap<String, u16>,
}

impl CredentialsBuilder {
    /// Build the binding record.
    ///
    /// Fails with [`CredentialsError::InvalidConfiguration`] when `hostnames`
    /// is empty; no partial record is produced.
    pub fn build(&self) -> Result<Binding> {
        let primary = self.primary_hostname()?;

        Ok(Binding {
            dashboard_url: self.dashboard_url(),
            username: self.username.clone(),
            password: self.password.clone(),
            hostname: primary.to_string(),
            hostnames: self.hostnames.clone(),
            http_api_uri: self.http_api_uri(),
            http_api_uris: vec![self.http_api_uri()],
            uri: self.amqp_uri(primary),
            uris: self.hostnames.iter().map(|h| self.amqp_uri(h)).collect(),
            vhost: self.vhost.clone(),
            tls: self.tls,
            protocols: self.protocols(primary),
        })
    }

    fn primary_hostname(&self) -> Result<&str> {
        self.hostnames
            .first()
            .map(String::as_str)
            .ok_or_else(|| {
                CredentialsError::InvalidConfiguration("hostnames must not be empty".to_string())
            })
    }

    /// Dashboard login URL. Credentials live in a path segment because that
    /// is how the management UI routes its login page.
    fn dashboard_url(&self) -> String {
        format!(
            "http://{}/#/login/{}/{}",
            self.management_endpoint, self.username, self.password
        )
    }

    /// Port-less amqp URI; the client falls back to the protocol's default
    /// port.
    fn amqp_uri(&self, hostname: &str) -> String {
        format!(
            "{}://{}:{}@{}/{}",
            AMQP_SCHEME, self.username, self.password, hostname, self.vhost
        )
    }

    /// Explicit-port amqp URI used inside protocol descriptors.
    fn amqp_uri_with_port(&self, hostname: &str, port: u16) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}",
            AMQP_SCHEME, self.username, self.password, hostname, port, self.vhost
        )
    }

    /// Management API URI against the fixed management endpoint.
    fn http_api_uri(&self) -> String {
        format!(
            "http://{}:{}@{}/api/",
            self.username, self.password, self.management_endpoint
        )
    }

    /// Management API URI against a specific hostname and port.
    fn management_uri(&self, hostname: &str, port: u16) -> String {
        format!(
            "http://{}:{}@{}:{}/api/",
            self.username, self.password, hostname, port
        )
    }

    fn protocols(&self, primary: &str) -> Protocols {
        let mut protocols = Protocols::new();

        for name in WIRE_PROTOCOLS {
            if let Some(port) = self.protocol_ports.get(*name).copied() {
                protocols.insert(name.to_string(), self.amqp_protocol(primary, port));
            }
        }

        // The management descriptor is synthesized unconditionally; the port
        // map only overrides its port.
        protocols.insert(
            MANAGEMENT_PROTOCOL.to_string(),
            self.management_protocol(primary),
        );

        protocols
    }

    fn amqp_protocol(&self, primary: &str, port: u16) -> Protocol {
        Protocol {
            username: self.username.clone(),
            password: self.password.clone(),
            vhost: Some(self.vhost.clone()),
            hostname: primary.to_string(),
            hostnames: self.hostnames.clone(),
            uri: self.amqp_uri_with_port(primary, port),
            uris: self
                .hostnames
                .iter()
                .map(|h| self.amqp_uri_with_port(h, port))
                .collect(),
            port,
            // Descriptor always advertises plain amqp; the top-level ssl
            // field is the only TLS signal in the schema.
            tls: false,
            path: None,
        }
    }

    fn management_protocol(&self, primary: &str) -> Protocol {
        let port = self
            .protocol_ports
            .get(MANAGEMENT_PROTOCOL)
            .copied()
            .unwrap_or(DEFAULT_MANAGEMENT_PORT);

        Protocol {
            username: self.username.clone(),
            password: self.password.clone(),
            vhost: None,
            hostname: primary.to_string(),
            hostnames: self.hostnames.clone(),
            uri: self.management_uri(primary, port),
            uris: self
                .hostnames
                .iter()
                .map(|h| self.management_uri(h, port))
                .collect(),
            port,
            tls: false,
            path: Some("/api/".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(hostnames: &[&str]) -> CredentialsBuilder {
        CredentialsBuilder {
            management_endpoint: "10.0.0.5:15672".to_string(),
            hostnames: hostnames.iter().map(|h| h.to_string()).collect(),
            vhost: "%2f".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            tls: false,
            protocol_ports: BTreeMap::from([("amqp".to_string(), 5672)]),
        }
    }

    #[test]
    fn test_single_host_binding() {
        let binding = builder(&["10.0.0.5"]).build().unwrap();

        assert_eq!(binding.dashboard_url, "http://10.0.0.5:15672/#/login/u/p");
        assert_eq!(binding.hostname, "10.0.0.5");
        assert_eq!(binding.hostnames, vec!["10.0.0.5"]);
        assert_eq!(binding.uri, "amqp://u:p@10.0.0.5/%2f");
        assert_eq!(binding.uris, vec!["amqp://u:p@10.0.0.5/%2f"]);
        assert_eq!(binding.http_api_uri, "http://u:p@10.0.0.5:15672/api/");
        assert_eq!(binding.http_api_uris, vec!["http://u:p@10.0.0.5:15672/api/"]);
        assert_eq!(binding.vhost, "%2f");
        assert!(!binding.tls);

        let amqp = &binding.protocols["amqp"];
        assert_eq!(amqp.uri, "amqp://u:p@10.0.0.5:5672/%2f");
        assert_eq!(amqp.port, 5672);
        assert_eq!(amqp.vhost.as_deref(), Some("%2f"));
        assert_eq!(amqp.path, None);

        let management = &binding.protocols["management"];
        assert_eq!(management.uri, "http://u:p@10.0.0.5:15672/api/");
        assert_eq!(management.port, 15672);
        assert_eq!(management.vhost, None);
    }

    #[test]
    fn test_multiple_hostnames_preserve_order() {
        let binding = builder(&["h1", "h2"]).build().unwrap();

        assert_eq!(binding.hostname, "h1");
        assert_eq!(binding.uris.len(), binding.hostnames.len());
        assert_eq!(
            binding.uris,
            vec!["amqp://u:p@h1/%2f", "amqp://u:p@h2/%2f"]
        );

        let amqp = &binding.protocols["amqp"];
        assert_eq!(amqp.hostname, "h1");
        assert_eq!(
            amqp.uris,
            vec!["amqp://u:p@h1:5672/%2f", "amqp://u:p@h2:5672/%2f"]
        );

        // The management endpoint is a single fixed address, so the http
        // API list never grows with the hostnames.
        assert_eq!(binding.http_api_uris.len(), 1);
    }

    #[test]
    fn test_unrecognized_protocols_are_dropped() {
        let mut config = builder(&["10.0.0.5"]);
        config
            .protocol_ports
            .insert("clustering".to_string(), 25672);

        let binding = config.build().unwrap();

        assert!(!binding.protocols.contains_key("clustering"));
        assert!(binding.protocols.contains_key("amqp"));
    }

    #[test]
    fn test_empty_hostnames_is_a_configuration_error() {
        let err = builder(&[]).build().unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_management_descriptor_is_always_present() {
        let mut config = builder(&["10.0.0.5"]);
        config.protocol_ports.clear();
        config.tls = true;

        let binding = config.build().unwrap();

        // No amqp port configured, so only management remains
        assert!(!binding.protocols.contains_key("amqp"));

        let management = &binding.protocols["management"];
        assert!(!management.tls);
        assert_eq!(management.path.as_deref(), Some("/api/"));
        assert_eq!(management.port, 15672);
    }

    #[test]
    fn test_management_port_from_protocol_ports() {
        let mut config = builder(&["10.0.0.5"]);
        config
            .protocol_ports
            .insert("management".to_string(), 35672);

        let binding = config.build().unwrap();

        let management = &binding.protocols["management"];
        assert_eq!(management.port, 35672);
        assert_eq!(management.uri, "http://u:p@10.0.0.5:35672/api/");
    }

    #[test]
    fn test_tls_flag_only_affects_top_level() {
        let mut config = builder(&["10.0.0.5"]);
        config.tls = true;

        let binding = config.build().unwrap();

        assert!(binding.tls);
        assert!(!binding.protocols["amqp"].tls);
    }

    #[test]
    fn test_empty_resolved_address_flows_through() {
        let binding = builder(&[""]).build().unwrap();

        assert_eq!(binding.hostname, "");
        assert_eq!(binding.uri, "amqp://u:p@/%2f");
    }
}
