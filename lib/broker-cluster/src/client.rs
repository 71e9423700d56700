//! Kubernetes client for broker operations

use anyhow::Context;
use kube::Client;

/// BrokerClient wraps the Kubernetes client used for instance lookups
pub struct BrokerClient {
    client: Client,
}

impl BrokerClient {
    /// Create a new broker client from the ambient cluster configuration
    pub async fn new() -> anyhow::Result<Self> {
        let client = Client::try_default()
            .await
            .context("failed to create kubernetes client")?;
        Ok(Self { client })
    }

    /// Get the underlying Kubernetes client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get a clone of the Kubernetes client
    pub fn clone_client(&self) -> Client {
        self.client.clone()
    }
}
