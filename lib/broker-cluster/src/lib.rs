//! Kubernetes integration for the RabbitMQ service broker
//!
//! This library provides:
//! - A thin wrapper around the Kubernetes client
//! - Resolution of a provisioned instance's public ingress address
//! - The bind flow composing address resolution and credential synthesis

pub mod binder;
pub mod client;
pub mod config;
pub mod lookup;

pub use binder::Binder;
pub use client::BrokerClient;
pub use config::BrokerConfig;
pub use lookup::ServiceResolver;
