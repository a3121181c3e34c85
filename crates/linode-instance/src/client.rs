//! Asynchronous instance config client implementation.

use crate::models::{
    InstanceConfig, InstanceConfigCreateOptions, InstanceConfigUpdateOptions, InstanceConfigs,
};
use crate::Result;
use linode_core::cancel::CancelSignal;
use linode_core::client::{ApiClient, ApiClientBuilder};
use linode_core::config::ClientConfig;
use linode_core::id::{InstanceConfigId, LinodeId};
use linode_core::pagination::ListOptions;
use linode_core::resource::{Existence, ResourceClient};
use url::Url;

const USER_AGENT: &str = concat!("linode-instance/", env!("CARGO_PKG_VERSION"));

/// Builder for [`InstanceConfigClient`].
#[derive(Debug, Clone)]
pub struct InstanceConfigClientBuilder {
    inner: ApiClientBuilder,
}

impl InstanceConfigClientBuilder {
    /// Create a builder from a client configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let builder = ApiClient::builder(config).with_user_agent(USER_AGENT);
        Self { inner: builder }
    }

    /// Build the client.
    pub fn build(self) -> Result<InstanceConfigClient> {
        InstanceConfigClient::from_api(self.inner.build()?)
    }
}

/// Asynchronous client for the config profiles of Linode instances.
#[derive(Debug, Clone)]
pub struct InstanceConfigClient {
    configs: ResourceClient<InstanceConfigs>,
}

impl InstanceConfigClient {
    /// Construct a client directly from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        InstanceConfigClientBuilder::new(config.clone()).build()
    }

    /// Construct a client over an existing transport.
    pub fn from_api(api: ApiClient) -> Result<Self> {
        Ok(Self {
            configs: ResourceClient::new(api)?,
        })
    }

    /// Return a copy whose requests abort when `signal` fires.
    #[must_use]
    pub fn with_cancel_signal(&self, signal: CancelSignal) -> Self {
        Self {
            configs: self.configs.with_cancel_signal(signal),
        }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.configs.api().base_url()
    }

    /// List the configs of an instance.
    pub async fn list_configs(
        &self,
        linode: LinodeId,
        opts: &ListOptions,
    ) -> Result<Vec<InstanceConfig>> {
        self.configs.list(linode, opts).await
    }

    /// Fetch one config.
    pub async fn get_config(
        &self,
        linode: LinodeId,
        id: InstanceConfigId,
    ) -> Result<InstanceConfig> {
        self.configs.get(linode, id).await
    }

    /// Create a config on an instance.
    pub async fn create_config(
        &self,
        linode: LinodeId,
        opts: &InstanceConfigCreateOptions,
    ) -> Result<InstanceConfig> {
        self.configs.create(linode, opts).await
    }

    /// Update a config.
    pub async fn update_config(
        &self,
        linode: LinodeId,
        id: InstanceConfigId,
        opts: &InstanceConfigUpdateOptions,
    ) -> Result<InstanceConfig> {
        self.configs.update(linode, id, opts).await
    }

    /// Change only the label of a config.
    pub async fn rename_config(
        &self,
        linode: LinodeId,
        id: InstanceConfigId,
        label: impl Into<String>,
    ) -> Result<InstanceConfig> {
        let opts = InstanceConfigUpdateOptions {
            label: Some(label.into()),
            ..InstanceConfigUpdateOptions::default()
        };
        self.update_config(linode, id, &opts).await
    }

    /// Delete a config.
    pub async fn delete_config(&self, linode: LinodeId, id: InstanceConfigId) -> Result<()> {
        self.configs.delete(linode, id).await
    }

    /// Check whether a config still exists.
    pub async fn config_existence(
        &self,
        linode: LinodeId,
        id: InstanceConfigId,
    ) -> Result<Existence> {
        self.configs.existence(linode, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceConfigDevice, InstanceConfigDeviceMap, RunLevel};
    use linode_core::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> InstanceConfigClient {
        let config = ClientConfig::new(server.uri())
            .unwrap()
            .with_token("secret");
        InstanceConfigClient::new(&config).unwrap()
    }

    fn config_json(id: u64, label: &str) -> serde_json::Value {
        json!({
            "id": id,
            "label": label,
            "comments": "",
            "devices": {"sda": {"disk_id": 11, "volume_id": null}},
            "helpers": {
                "updatedb_disabled": true,
                "distro": true,
                "modules_dep": true,
                "network": true,
                "devtmpfs_automount": true
            },
            "memory_limit": 0,
            "kernel": "linode/latest-64bit",
            "init_rd": null,
            "root_device": "/dev/sda",
            "run_level": "default",
            "virt_mode": "paravirt",
            "created": "2018-06-01T10:00:00",
            "updated": "2018-06-02T10:00:00"
        })
    }

    #[tokio::test]
    async fn list_configs_uses_instance_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/linode/instances/77/configs"))
            .and(query_param("page", "1"))
            .and(header("User-Agent", USER_AGENT))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [config_json(1, "boot"), config_json(2, "rescue")],
                "page": 1,
                "pages": 1,
                "results": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let configs = client
            .list_configs(LinodeId::new(77), &ListOptions::default())
            .await
            .unwrap();

        let labels: Vec<&str> = configs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["boot", "rescue"]);
        assert!(configs.iter().all(|c| c.created.is_some() && c.updated.is_some()));
    }

    #[tokio::test]
    async fn create_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/linode/instances/77/configs"))
            .and(body_json(json!({
                "label": "boot",
                "devices": {"sda": {"disk_id": 11}},
                "kernel": "linode/latest-64bit",
                "run_level": "single"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(config_json(5, "boot")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let created = client
            .create_config(
                LinodeId::new(77),
                &InstanceConfigCreateOptions {
                    label: Some("boot".into()),
                    devices: Some(InstanceConfigDeviceMap {
                        sda: Some(InstanceConfigDevice::disk(11)),
                        ..InstanceConfigDeviceMap::default()
                    }),
                    kernel: Some("linode/latest-64bit".into()),
                    run_level: Some(RunLevel::Single),
                    ..InstanceConfigCreateOptions::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, InstanceConfigId::new(5));
        assert_eq!(created.devices.sda, Some(InstanceConfigDevice::disk(11)));
    }

    #[tokio::test]
    async fn rename_puts_label_only() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/linode/instances/77/configs/5"))
            .and(body_json(json!({"label": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(config_json(5, "renamed")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let renamed = client
            .rename_config(LinodeId::new(77), InstanceConfigId::new(5), "renamed")
            .await
            .unwrap();
        assert_eq!(renamed.label, "renamed");
        assert_eq!(renamed.kernel, "linode/latest-64bit");
    }

    #[tokio::test]
    async fn delete_then_absent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/linode/instances/77/configs/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/linode/instances/77/configs/5"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{"reason": "Not found"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let (linode, id) = (LinodeId::new(77), InstanceConfigId::new(5));
        client.delete_config(linode, id).await.unwrap();

        let err = client.get_config(linode, id).await.unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                status: 404,
                message: "Not found".into()
            }
        );
        assert_eq!(
            client.config_existence(linode, id).await.unwrap(),
            Existence::Absent
        );
    }

    #[tokio::test]
    async fn validation_error_joins_field_reasons() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/linode/instances/77/configs"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [
                    {"field": "label", "reason": "Label is required"},
                    {"field": "devices", "reason": "At least one device is required"}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .create_config(LinodeId::new(77), &InstanceConfigCreateOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
        assert_eq!(
            err,
            Error::Api {
                status: 400,
                message: "label: Label is required; devices: At least one device is required"
                    .into()
            }
        );
    }
}
