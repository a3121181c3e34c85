//! HTTP transport shared by every resource client.
//!
//! [`ApiClient`] owns the `reqwest` client, the base URL and the default
//! headers (bearer token, user agent). It sends one request per call, maps
//! non-2xx responses to [`Error::Api`] and never retries.

use crate::cancel::CancelSignal;
use crate::config::ClientConfig;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;

const USER_AGENT: &str = concat!("linode-core/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Create a builder from a [`ClientConfig`].
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Set the default User-Agent. A `user_agent` in the configuration
    /// still takes precedence.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Finalise the builder and create the [`ApiClient`].
    pub fn build(self) -> Result<ApiClient> {
        self.config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        let base_url = self.config.parse_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::Config("API token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("building Linode API client without a token");
        }

        let user_agent = self.config.user_agent.clone().unwrap_or(self.user_agent);

        let mut builder = ClientBuilder::new()
            .user_agent(user_agent)
            .default_headers(headers);

        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ApiClient {
            http,
            base_url,
            debug: self.config.debug,
            cancel: None,
        })
    }
}

/// Asynchronous transport for the Linode API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    debug: bool,
    cancel: Option<CancelSignal>,
}

impl ApiClient {
    /// Construct a client directly from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        ApiClientBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return a copy of this client whose requests abort when `signal` fires.
    #[must_use]
    pub fn with_cancel_signal(&self, signal: CancelSignal) -> Self {
        Self {
            cancel: Some(signal),
            ..self.clone()
        }
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// `configure` may add headers or a body to the request.
    pub async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        configure: F,
    ) -> Result<String>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.build_url(path)?;
        let request = configure(self.http.request(method.clone(), url).query(params));

        info!(%method, path = %path, ?params, "Sending Linode API request");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, Error>((status, text))
        };

        let (status, text) = match &self.cancel {
            Some(signal) => signal.guard(exchange).await?,
            None => exchange.await?,
        };

        if self.debug {
            debug!(%method, path = %path, %status, body = %text, "Linode API response");
        }

        if status.is_success() {
            Ok(text)
        } else {
            let error = Error::from_response(status, &text);
            warn!(%method, path = %path, %status, "Linode API request failed: {error}");
            Err(error)
        }
    }

    /// Send a request with an optional JSON body and decode the JSON response.
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| Error::Serialization(err.to_string()))?;

        if self.debug {
            if let Some(bytes) = &payload {
                debug!(path = %path, body = %String::from_utf8_lossy(bytes), "Linode API request body");
            }
        }

        let text = self
            .execute(method, path, params, |request| match payload {
                Some(bytes) => request.header(CONTENT_TYPE, "application/json").body(bytes),
                None => request,
            })
            .await?;

        decode(path, &text)
    }
}

/// Decode a JSON body, naming the path in the error.
pub(crate) fn decode<R: DeserializeOwned>(path: &str, text: &str) -> Result<R> {
    serde_json::from_str(text)
        .map_err(|err| Error::Decode(format!("Failed to parse response for `{path}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancellation;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ApiClient {
        let config = ClientConfig::new(server.uri()).unwrap().with_token("t0ken");
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn sends_bearer_token_and_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things"))
            .and(header("Authorization", "Bearer t0ken"))
            .and(header("Accept", "application/json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let value: serde_json::Value = client
            .send_json::<(), _>(Method::GET, "things", &[("page", "1".into())], None)
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"label": "a"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let value: serde_json::Value = client
            .send_json(Method::POST, "things", &[], Some(&json!({"label": "a"})))
            .await
            .unwrap();
        assert_eq!(value["id"], 1);
    }

    #[tokio::test]
    async fn non_success_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things/9"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"errors": [{"reason": "Not found"}]})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_json::<(), serde_json::Value>(Method::GET, "things/9", &[], None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error 404: Not found");
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_json::<(), serde_json::Value>(Method::GET, "things", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = ApiClient::new(&ClientConfig::new(uri).unwrap()).unwrap();
        let err = client
            .send_json::<(), serde_json::Value>(Method::GET, "things", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Request(_)));
        assert!(!err.is_api_error());
    }

    #[tokio::test]
    async fn cancel_signal_aborts_in_flight_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;

        let (handle, signal) = cancellation();
        let client = test_client(&server).with_cancel_signal(signal);

        let call = tokio::spawn(async move {
            client
                .send_json::<(), serde_json::Value>(Method::GET, "slow", &[], None)
                .await
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), call)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.unwrap_err(), Error::Cancelled);
    }

    #[tokio::test]
    async fn unencodable_body_is_serialization_error() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let mut body = BTreeMap::new();
        body.insert((1u8, 2u8), 3u8);
        let err = client
            .send_json::<_, serde_json::Value>(Method::POST, "things", &[], Some(&body))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn out_of_range_timeout_is_config_error() {
        let err = ApiClient::new(&ClientConfig::default().with_timeout(0)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = ClientConfig {
            base_url: "not-a-url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn invalid_token_is_config_error() {
        let config = ClientConfig::default().with_token("bad\ntoken");
        let err = ApiClient::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
