use anyhow::{bail, Result};
use broker_cluster::{Binder, BrokerClient, BrokerConfig};
use tracing::info;
use tracing_subscriber::fmt::init as tracing_init;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let instance_id = match std::env::args().nth(1) {
        Some(id) => id,
        None => bail!("usage: broker-bindctl <instance-id>"),
    };

    let config = BrokerConfig::from_env()?;
    let client = BrokerClient::new().await?;

    info!("Binding instance {}...", instance_id);

    let binder = Binder::new(client.clone_client(), config);
    let credentials = binder.bind(&instance_id).await?;

    println!("{}", serde_json::to_string_pretty(&credentials)?);

    Ok(())
}
