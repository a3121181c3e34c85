//! Asynchronous NodeBalancer client implementation.

use crate::models::{
    NodeBalancer, NodeBalancerConfig, NodeBalancerConfigOptions, NodeBalancerConfigs,
    NodeBalancerCreateOptions, NodeBalancerUpdateOptions, NodeBalancers,
};
use crate::Result;
use linode_core::cancel::CancelSignal;
use linode_core::client::{ApiClient, ApiClientBuilder};
use linode_core::config::ClientConfig;
use linode_core::id::{NodeBalancerConfigId, NodeBalancerId};
use linode_core::pagination::ListOptions;
use linode_core::resource::{Existence, ResourceClient};
use url::Url;

const USER_AGENT: &str = concat!("linode-nodebalancer/", env!("CARGO_PKG_VERSION"));

/// Builder for [`NodeBalancerClient`].
#[derive(Debug, Clone)]
pub struct NodeBalancerClientBuilder {
    inner: ApiClientBuilder,
}

impl NodeBalancerClientBuilder {
    /// Create a builder from a client configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let builder = ApiClient::builder(config).with_user_agent(USER_AGENT);
        Self { inner: builder }
    }

    /// Build the client.
    pub fn build(self) -> Result<NodeBalancerClient> {
        NodeBalancerClient::from_api(self.inner.build()?)
    }
}

/// Asynchronous client for NodeBalancers and their configs.
#[derive(Debug, Clone)]
pub struct NodeBalancerClient {
    nodebalancers: ResourceClient<NodeBalancers>,
    configs: ResourceClient<NodeBalancerConfigs>,
}

impl NodeBalancerClient {
    /// Construct a client directly from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        NodeBalancerClientBuilder::new(config.clone()).build()
    }

    /// Construct a client over an existing transport.
    pub fn from_api(api: ApiClient) -> Result<Self> {
        Ok(Self {
            nodebalancers: ResourceClient::new(api.clone())?,
            configs: ResourceClient::new(api)?,
        })
    }

    /// Return a copy whose requests abort when `signal` fires.
    #[must_use]
    pub fn with_cancel_signal(&self, signal: CancelSignal) -> Self {
        Self {
            nodebalancers: self.nodebalancers.with_cancel_signal(signal.clone()),
            configs: self.configs.with_cancel_signal(signal),
        }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.nodebalancers.api().base_url()
    }

    /// List NodeBalancers on the account.
    pub async fn list_nodebalancers(&self, opts: &ListOptions) -> Result<Vec<NodeBalancer>> {
        self.nodebalancers.list((), opts).await
    }

    /// Fetch a NodeBalancer by id.
    pub async fn get_nodebalancer(&self, id: NodeBalancerId) -> Result<NodeBalancer> {
        self.nodebalancers.get((), id).await
    }

    /// Create a NodeBalancer.
    pub async fn create_nodebalancer(
        &self,
        opts: &NodeBalancerCreateOptions,
    ) -> Result<NodeBalancer> {
        self.nodebalancers.create((), opts).await
    }

    /// Update a NodeBalancer.
    pub async fn update_nodebalancer(
        &self,
        id: NodeBalancerId,
        opts: &NodeBalancerUpdateOptions,
    ) -> Result<NodeBalancer> {
        self.nodebalancers.update((), id, opts).await
    }

    /// Delete a NodeBalancer.
    pub async fn delete_nodebalancer(&self, id: NodeBalancerId) -> Result<()> {
        self.nodebalancers.delete((), id).await
    }

    /// Check whether a NodeBalancer still exists.
    pub async fn nodebalancer_existence(&self, id: NodeBalancerId) -> Result<Existence> {
        self.nodebalancers.existence((), id).await
    }

    /// List the configs of a NodeBalancer.
    pub async fn list_configs(
        &self,
        nodebalancer: NodeBalancerId,
        opts: &ListOptions,
    ) -> Result<Vec<NodeBalancerConfig>> {
        self.configs.list(nodebalancer, opts).await
    }

    /// Fetch one config.
    pub async fn get_config(
        &self,
        nodebalancer: NodeBalancerId,
        id: NodeBalancerConfigId,
    ) -> Result<NodeBalancerConfig> {
        self.configs.get(nodebalancer, id).await
    }

    /// Create a config on a NodeBalancer.
    pub async fn create_config(
        &self,
        nodebalancer: NodeBalancerId,
        opts: &NodeBalancerConfigOptions,
    ) -> Result<NodeBalancerConfig> {
        self.configs.create(nodebalancer, opts).await
    }

    /// Update a config.
    pub async fn update_config(
        &self,
        nodebalancer: NodeBalancerId,
        id: NodeBalancerConfigId,
        opts: &NodeBalancerConfigOptions,
    ) -> Result<NodeBalancerConfig> {
        self.configs.update(nodebalancer, id, opts).await
    }

    /// Delete a config.
    pub async fn delete_config(
        &self,
        nodebalancer: NodeBalancerId,
        id: NodeBalancerConfigId,
    ) -> Result<()> {
        self.configs.delete(nodebalancer, id).await
    }

    /// Check whether a config still exists.
    pub async fn config_existence(
        &self,
        nodebalancer: NodeBalancerId,
        id: NodeBalancerConfigId,
    ) -> Result<Existence> {
        self.configs.existence(nodebalancer, id).await
    }
}
