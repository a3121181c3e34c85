//! # linode-core
//!
//! Core types and the generic resource client for the Linode API.
//!
//! Resource families plug into [`resource::ResourceClient`] by implementing
//! [`resource::ResourceFamily`]; pagination, error mapping and timestamp
//! normalization are shared.
//!
//! ## Modules
//!
//! - [`error`] - Error type and HTTP status classification
//! - [`id`] - Strongly-typed resource ids
//! - [`config`] - Client configuration
//! - [`client`] - HTTP transport
//! - [`endpoint`] - Endpoint templates for top-level and nested families
//! - [`pagination`] - Paged envelopes and list options
//! - [`query`] - Query parameter builder
//! - [`resource`] - Generic paginated CRUD client
//! - [`timestamp`] - Timestamp normalization
//! - [`cancel`] - Caller-driven cancellation

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod timestamp;

// Re-export commonly used types
pub use cancel::{cancellation, CancelHandle, CancelSignal};
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{ListOptions, PagedResponse};
pub use resource::{Existence, ResourceClient, ResourceFamily};
pub use timestamp::Record;
