//! NodeBalancer client and data models for the Linode API.
//!
//! Provides typed structures and an asynchronous client for NodeBalancers and
//! the port configs nested under them.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{NodeBalancerClient, NodeBalancerClientBuilder};
pub use models::{
    ConfigAlgorithm, ConfigCheck, ConfigCipher, ConfigProtocol, ConfigStickiness, NodeBalancer,
    NodeBalancerConfig, NodeBalancerConfigOptions, NodeBalancerConfigs,
    NodeBalancerCreateOptions, NodeBalancerTransfer, NodeBalancerUpdateOptions, NodeBalancers,
    NodesStatus,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = linode_core::Result<T>;
