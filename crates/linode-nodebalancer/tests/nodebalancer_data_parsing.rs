//! Integration tests for parsing NodeBalancer API data.
//!
//! These tests validate that the models deserialize recorded API responses,
//! including fields the models do not track.

use chrono::{TimeZone, Utc};
use linode_core::id::{NodeBalancerConfigId, NodeBalancerId};
use linode_core::{PagedResponse, Record};
use linode_nodebalancer::models::{
    ConfigAlgorithm, ConfigCheck, ConfigCipher, ConfigProtocol, ConfigStickiness, NodeBalancer,
    NodeBalancerConfig,
};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_nodebalancer() {
    let json_data = load_fixture("nodebalancer.json");
    let mut nb: NodeBalancer = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize NodeBalancer: {e}"));
    nb.fix_dates();

    assert_eq!(nb.id, NodeBalancerId::new(12345));
    assert_eq!(nb.label.as_deref(), Some("balancer12345"));
    assert_eq!(nb.region, "us-east");
    assert_eq!(nb.ipv4.as_deref(), Some("203.0.113.1"));
    assert!(nb.ipv6.is_none());
    assert_eq!(nb.client_conn_throttle, 0);
    assert!(nb.transfer.total.is_some());

    assert_eq!(
        nb.created,
        Some(Utc.with_ymd_and_hms(2018, 1, 1, 0, 1, 1).unwrap())
    );
    assert_eq!(
        nb.updated,
        Some(Utc.with_ymd_and_hms(2018, 3, 1, 0, 1, 1).unwrap())
    );
}

#[test]
fn test_deserialize_config_page() {
    let json_data = load_fixture("nodebalancer_configs.json");
    let page: PagedResponse<NodeBalancerConfig> = serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize config page: {e}"));

    assert_eq!((page.page, page.pages, page.results), (1, 1, 2));
    assert_eq!(page.data.len(), 2, "Expected 2 configs in test data");
    assert!(!page.has_more());

    let http = &page.data[0];
    assert_eq!(http.id, NodeBalancerConfigId::new(4567));
    assert_eq!(http.nodebalancer_id, NodeBalancerId::new(12345));
    assert_eq!(http.protocol, ConfigProtocol::Http);
    assert_eq!(http.algorithm, ConfigAlgorithm::RoundRobin);
    assert_eq!(http.stickiness, ConfigStickiness::HttpCookie);
    assert_eq!(http.check, ConfigCheck::HttpBody);
    assert_eq!(http.check_path, "/test");
    assert_eq!(http.nodes_status.up, 4);

    let https = &page.data[1];
    assert_eq!(https.port, 443);
    assert_eq!(https.protocol, ConfigProtocol::Https);
    assert_eq!(https.algorithm, ConfigAlgorithm::LeastConn);
    assert_eq!(https.cipher_suite, ConfigCipher::Legacy);
    assert_eq!(https.ssl_commonname.as_deref(), Some("www.example.com"));
    assert_eq!(https.nodes_status.down, 1);
}

#[test]
fn test_config_update_options_skip_tls_material() {
    let json_data = load_fixture("nodebalancer_configs.json");
    let page: PagedResponse<NodeBalancerConfig> = serde_json::from_str(&json_data).unwrap();

    let opts = page.data[1].update_options();
    let encoded = serde_json::to_value(&opts).unwrap();
    assert_eq!(encoded["port"], 443);
    assert_eq!(encoded["check"], "connection");
    assert!(encoded.get("ssl_cert").is_none());
    assert!(encoded.get("ssl_key").is_none());
}
