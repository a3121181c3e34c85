//! Instance config client and data models for the Linode API.
//!
//! Config profiles live under a Linode instance and decide how it boots.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{InstanceConfigClient, InstanceConfigClientBuilder};
pub use models::{
    InstanceConfig, InstanceConfigCreateOptions, InstanceConfigDevice, InstanceConfigDeviceMap,
    InstanceConfigHelpers, InstanceConfigUpdateOptions, InstanceConfigs, RunLevel, VirtMode,
};

/// Convenient result alias that reuses the shared error type.
pub type Result<T> = linode_core::Result<T>;
