//! NodeBalancer and NodeBalancer config models.

use chrono::{DateTime, Utc};
use linode_core::id::{NodeBalancerConfigId, NodeBalancerId};
use linode_core::resource::ResourceFamily;
use linode_core::timestamp::{parse_timestamp, Record};
use serde::{Deserialize, Serialize};

/// A NodeBalancer as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeBalancer {
    /// NodeBalancer id.
    pub id: NodeBalancerId,
    /// Label, unique per account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Region; backends must live in the same region.
    pub region: String,
    /// Hostname ending in `.nodebalancer.linode.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Public IPv4 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    /// Public IPv6 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    /// Connections per second per client IP (0-20); 0 disables throttling.
    #[serde(default)]
    pub client_conn_throttle: u32,
    /// Transfer used this month.
    #[serde(default)]
    pub transfer: NodeBalancerTransfer,
    /// Raw creation timestamp.
    #[serde(rename = "created", default, skip_serializing_if = "Option::is_none")]
    pub created_str: Option<String>,
    /// Raw last-update timestamp.
    #[serde(rename = "updated", default, skip_serializing_if = "Option::is_none")]
    pub updated_str: Option<String>,
    /// Parsed creation time.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    /// Parsed last-update time.
    #[serde(skip)]
    pub updated: Option<DateTime<Utc>>,
}

impl NodeBalancer {
    /// Create options reproducing this NodeBalancer.
    #[must_use]
    pub fn create_options(&self) -> NodeBalancerCreateOptions {
        NodeBalancerCreateOptions {
            label: self.label.clone(),
            region: Some(self.region.clone()),
            client_conn_throttle: Some(self.client_conn_throttle),
        }
    }

    /// Update options carrying every mutable field.
    #[must_use]
    pub fn update_options(&self) -> NodeBalancerUpdateOptions {
        NodeBalancerUpdateOptions {
            label: self.label.clone(),
            client_conn_throttle: Some(self.client_conn_throttle),
        }
    }
}

impl Record for NodeBalancer {
    fn fix_dates(&mut self) {
        self.created = parse_timestamp(self.created_str.as_deref());
        self.updated = parse_timestamp(self.updated_str.as_deref());
    }
}

/// Monthly transfer totals in MB.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeBalancerTransfer {
    /// Total transfer.
    #[serde(default)]
    pub total: Option<f64>,
    /// Outbound transfer.
    #[serde(default)]
    pub out: Option<f64>,
    /// Inbound transfer.
    #[serde(default, rename = "in")]
    pub inbound: Option<f64>,
}

/// Payload for creating a NodeBalancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeBalancerCreateOptions {
    /// Label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Connection throttle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_conn_throttle: Option<u32>,
}

/// Payload for updating a NodeBalancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeBalancerUpdateOptions {
    /// Label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Connection throttle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_conn_throttle: Option<u32>,
}

/// Protocol spoken on a config's port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigProtocol {
    /// Plain HTTP.
    Http,
    /// HTTPS, terminated at the NodeBalancer.
    Https,
    /// Raw TCP.
    Tcp,
}

/// Backend selection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigAlgorithm {
    /// Round robin.
    #[serde(rename = "roundrobin")]
    RoundRobin,
    /// Fewest open connections.
    #[serde(rename = "leastconn")]
    LeastConn,
    /// Hash of the client address.
    Source,
}

/// Session stickiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStickiness {
    /// No stickiness.
    None,
    /// Sticky via the NodeBalancer's session table.
    Table,
    /// Sticky via an HTTP cookie.
    HttpCookie,
}

/// Active health check type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigCheck {
    /// No active check.
    None,
    /// TCP connect.
    Connection,
    /// HTTP status check.
    Http,
    /// HTTP body regex check.
    HttpBody,
}

/// TLS cipher suite for HTTPS configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigCipher {
    /// Current recommended suite.
    Recommended,
    /// Legacy suite for old clients.
    Legacy,
}

/// Backend node health counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodesStatus {
    /// Nodes passing checks.
    #[serde(default)]
    pub up: u32,
    /// Nodes failing checks.
    #[serde(default)]
    pub down: u32,
}

/// A NodeBalancer port configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeBalancerConfig {
    /// Config id.
    pub id: NodeBalancerConfigId,
    /// Owning NodeBalancer.
    pub nodebalancer_id: NodeBalancerId,
    /// Listening port.
    pub port: u16,
    /// Protocol.
    pub protocol: ConfigProtocol,
    /// Balancing algorithm.
    pub algorithm: ConfigAlgorithm,
    /// Session stickiness.
    pub stickiness: ConfigStickiness,
    /// Active health check type.
    pub check: ConfigCheck,
    /// Seconds between checks.
    #[serde(default)]
    pub check_interval: u32,
    /// Failed checks before a node is taken out.
    #[serde(default)]
    pub check_attempts: u32,
    /// Seconds to wait for a check response.
    #[serde(default)]
    pub check_timeout: u32,
    /// Path requested by HTTP checks.
    #[serde(default)]
    pub check_path: String,
    /// Regex the body must match for `http_body` checks.
    #[serde(default)]
    pub check_body: String,
    /// Whether passive checks are enabled.
    #[serde(default)]
    pub check_passive: bool,
    /// TLS cipher suite.
    pub cipher_suite: ConfigCipher,
    /// Common name of the installed certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_commonname: Option<String>,
    /// Fingerprint of the installed certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_fingerprint: Option<String>,
    /// Backend health counts.
    #[serde(default)]
    pub nodes_status: NodesStatus,
}

impl NodeBalancerConfig {
    /// Update options carrying every writable field except TLS material,
    /// which the API never returns.
    #[must_use]
    pub fn update_options(&self) -> NodeBalancerConfigOptions {
        NodeBalancerConfigOptions {
            port: Some(self.port),
            protocol: Some(self.protocol),
            algorithm: Some(self.algorithm),
            stickiness: Some(self.stickiness),
            check: Some(self.check),
            check_interval: Some(self.check_interval),
            check_attempts: Some(self.check_attempts),
            check_timeout: Some(self.check_timeout),
            check_path: Some(self.check_path.clone()),
            check_body: Some(self.check_body.clone()),
            check_passive: Some(self.check_passive),
            cipher_suite: Some(self.cipher_suite),
            ssl_cert: None,
            ssl_key: None,
        }
    }
}

impl Record for NodeBalancerConfig {}

/// Payload for creating or updating a NodeBalancer config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeBalancerConfigOptions {
    /// Listening port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ConfigProtocol>,
    /// Balancing algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<ConfigAlgorithm>,
    /// Session stickiness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickiness: Option<ConfigStickiness>,
    /// Active health check type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<ConfigCheck>,
    /// Seconds between checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<u32>,
    /// Failed checks before a node is taken out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_attempts: Option<u32>,
    /// Seconds to wait for a check response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_timeout: Option<u32>,
    /// HTTP check path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_path: Option<String>,
    /// HTTP body regex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_body: Option<String>,
    /// Passive checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_passive: Option<bool>,
    /// TLS cipher suite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher_suite: Option<ConfigCipher>,
    /// PEM certificate chain for HTTPS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<String>,
    /// PEM private key for HTTPS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
}

/// Top-level NodeBalancer family.
#[derive(Debug)]
pub struct NodeBalancers;

impl ResourceFamily for NodeBalancers {
    const NAME: &'static str = "nodebalancer";
    const ENDPOINT: &'static str = "nodebalancers";
    type Parent = ();
    type Id = NodeBalancerId;
    type Record = NodeBalancer;
    type CreateOptions = NodeBalancerCreateOptions;
    type UpdateOptions = NodeBalancerUpdateOptions;
}

/// Configs nested under a NodeBalancer.
#[derive(Debug)]
pub struct NodeBalancerConfigs;

impl ResourceFamily for NodeBalancerConfigs {
    const NAME: &'static str = "nodebalancer config";
    const ENDPOINT: &'static str = "nodebalancers/{id}/configs";
    type Parent = NodeBalancerId;
    type Id = NodeBalancerConfigId;
    type Record = NodeBalancerConfig;
    type CreateOptions = NodeBalancerConfigOptions;
    type UpdateOptions = NodeBalancerConfigOptions;
}
