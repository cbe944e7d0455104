//! HTTP gateway shared by every resource client.
//!
//! All calls go through one [`Gateway`]: request middleware runs in
//! registration order, the transport sends, non-2xx statuses become errors,
//! response middleware runs in registration order, and the body is decoded
//! into an [`Envelope`]. Callers never see transport status or headers.

pub mod middleware;
pub mod request;
pub mod transport;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::session::Session;
use crate::types::Envelope;

pub use middleware::{
    BearerToken, LogNavigator, Navigator, Notice, NoticeLevel, Notifier, RequestMiddleware,
    ResponseMiddleware, SessionExpiry, TracingNotifier, SESSION_EXPIRED_NOTICE,
};
pub use request::{ApiRequest, RawResponse};
pub use transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    transport: Arc<dyn Transport>,
    session: Session,
    request_chain: Vec<Arc<dyn RequestMiddleware>>,
    response_chain: Vec<Arc<dyn ResponseMiddleware>>,
    log_requests: bool,
}

pub struct GatewayBuilder {
    transport: Arc<dyn Transport>,
    session: Session,
    request_chain: Vec<Arc<dyn RequestMiddleware>>,
    response_chain: Vec<Arc<dyn ResponseMiddleware>>,
    log_requests: bool,
}

impl GatewayBuilder {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            session,
            request_chain: Vec::new(),
            response_chain: Vec::new(),
            log_requests: true,
        }
    }

    pub fn request_middleware(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        tracing::debug!("Registered request middleware '{}'", middleware.name());
        self.request_chain.push(Arc::new(middleware));
        self
    }

    pub fn response_middleware(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        tracing::debug!("Registered response middleware '{}'", middleware.name());
        self.response_chain.push(Arc::new(middleware));
        self
    }

    /// Bearer token on the way out, 401 handling on the way back
    pub fn with_session_auth(self, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        let session = self.session.clone();
        self.request_middleware(BearerToken::new(session.clone()))
            .response_middleware(SessionExpiry::new(session, navigator, notifier))
    }

    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn build(self) -> Gateway {
        Gateway {
            inner: Arc::new(GatewayInner {
                transport: self.transport,
                session: self.session,
                request_chain: self.request_chain,
                response_chain: self.response_chain,
                log_requests: self.log_requests,
            }),
        }
    }
}

impl Gateway {
    pub fn builder(transport: Arc<dyn Transport>, session: Session) -> GatewayBuilder {
        GatewayBuilder::new(transport, session)
    }

    /// reqwest transport from config with the bearer/401 middleware pair installed
    pub fn from_config(
        config: &ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> GatewayResult<Self> {
        let transport = ReqwestTransport::new(&config.api)?;
        tracing::debug!(
            "Gateway targeting {} (timeout {} ms)",
            transport.base_url(),
            config.api.timeout_ms
        );

        Ok(Self::builder(Arc::new(transport), session)
            .with_session_auth(navigator, notifier)
            .log_requests(config.api.enable_request_logging)
            .build())
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<Envelope<T>> {
        self.execute(ApiRequest::new(Method::GET, path)).await
    }

    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> GatewayResult<Envelope<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(ApiRequest::new(Method::GET, path).with_query(query)?).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> GatewayResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::new(Method::POST, path).with_json(body)?).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> GatewayResult<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::new(Method::PUT, path).with_json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<Envelope<T>> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await
    }

    /// Run the full pipeline and decode the envelope
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> GatewayResult<Envelope<T>> {
        let raw = self.dispatch(request).await?;
        decode_envelope(&raw)
    }

    async fn dispatch(&self, mut request: ApiRequest) -> GatewayResult<RawResponse> {
        for middleware in &self.inner.request_chain {
            request = middleware.on_request(request).await?;
        }

        let method = request.method.clone();
        let path = request.path.clone();
        if self.inner.log_requests {
            tracing::debug!("{} {}", method, path);
        }

        let mut outcome = self
            .inner
            .transport
            .send(request)
            .await
            .and_then(check_status);

        for middleware in &self.inner.response_chain {
            outcome = middleware.on_response(outcome).await;
        }

        match &outcome {
            Ok(raw) if self.inner.log_requests => tracing::debug!("{} {} -> {}", method, path, raw.status),
            Err(e) => tracing::debug!("{} {} failed: {}", method, path, e),
            _ => {}
        }

        outcome
    }
}

/// Non-2xx statuses become errors; 401 gets its own variant
fn check_status(raw: RawResponse) -> GatewayResult<RawResponse> {
    if raw.is_success() {
        return Ok(raw);
    }

    let message = error_message(&raw);
    if raw.status == StatusCode::UNAUTHORIZED.as_u16() {
        Err(GatewayError::unauthorized(message))
    } else {
        Err(GatewayError::http(raw.status, message))
    }
}

fn error_message(raw: &RawResponse) -> String {
    if let Ok(body) = serde_json::from_str::<serde_json::Value>(&raw.body) {
        if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    let text = raw.body.trim();
    if !text.is_empty() && text.len() <= 200 {
        return text.to_string();
    }

    StatusCode::from_u16(raw.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("request failed")
        .to_string()
}

fn decode_envelope<T: DeserializeOwned>(raw: &RawResponse) -> GatewayResult<Envelope<T>> {
    if raw.body.trim().is_empty() {
        return Err(GatewayError::decode(format!(
            "empty response body (HTTP {})",
            raw.status
        )));
    }
    Ok(serde_json::from_str(&raw.body)?)
}
