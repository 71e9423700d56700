//! Credential synthesis for RabbitMQ service bindings
//!
//! This library provides:
//! - A pure builder that turns instance connection details into a binding record
//! - Wire-format types matching the broker protocol's credential schema
//! - Typed errors for configuration and encoding failures

pub mod binding;
pub mod builder;
pub mod error;

pub use binding::{Binding, Protocol, Protocols};
pub use builder::{CredentialsBuilder, AMQP_SCHEME, DEFAULT_MANAGEMENT_PORT, MANAGEMENT_PROTOCOL};
pub use error::{CredentialsError, Result};
