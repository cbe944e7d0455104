use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::request::{ApiRequest, RawResponse};

/// Puts a request on the wire. Any received status is a successful send;
/// only a missing response is an error here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> GatewayResult<RawResponse>;
}

/// reqwest-backed transport with a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("hradmin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout { after_ms: self.timeout_ms }
        } else {
            GatewayError::network(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> GatewayResult<RawResponse> {
        let url = request.url(&self.base_url)?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(RawResponse { status, body })
    }
}
