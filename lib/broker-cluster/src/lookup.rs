//! Resolution of a provisioned instance's public address

use anyhow::Context;
use k8s_openapi::api::core::v1::Service;
use kube::{Api, Client};
use tracing::debug;

/// Namespace where provisioned RabbitMQ instances live
pub const BROKER_NAMESPACE: &str = "rabbitmq-for-kubernetes";

const SERVICE_NAME_PREFIX: &str = "p-";
const SERVICE_NAME_SUFFIX: &str = "-rabbitmq";

/// Kubernetes Service name for a provisioned instance
pub fn service_name(instance_id: &str) -> String {
    format!("{}{}{}", SERVICE_NAME_PREFIX, instance_id, SERVICE_NAME_SUFFIX)
}

/// First load-balancer ingress IP of a Service, or the empty string when
/// none has been assigned yet.
pub fn ingress_address(service: &Service) -> String {
    service
        .status
        .as_ref()
        .and_then(|status| status.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_ref())
        .and_then(|ingress| ingress.first())
        .and_then(|entry| entry.ip.clone())
        .unwrap_or_default()
}

/// ServiceResolver looks up the externally reachable address of a
/// provisioned instance's Service
pub struct ServiceResolver {
    client: Client,
}

impl ServiceResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolve the ingress address for an instance.
    ///
    /// Returns the empty string when the load balancer has no ingress entry
    /// yet; callers pass it through unchanged.
    pub async fn resolve_ingress_address(&self, instance_id: &str) -> anyhow::Result<String> {
        let name = service_name(instance_id);
        let services: Api<Service> = Api::namespaced(self.client.clone(), BROKER_NAMESPACE);

        let service = services.get(&name).await.with_context(|| {
            format!("failed to retrieve service {}/{}", BROKER_NAMESPACE, name)
        })?;

        let address = ingress_address(&service);
        if address.is_empty() {
            debug!("Service {} has no ingress address assigned yet", name);
        } else {
            debug!("Resolved service {} to {}", name, address);
        }

        Ok(address)
    }
}
