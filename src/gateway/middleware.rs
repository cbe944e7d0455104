// Request/response middleware applied by the gateway in registration order

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::error::GatewayResult;
use crate::gateway::request::{ApiRequest, RawResponse};
use crate::router::LOGIN_PATH;
use crate::session::Session;

pub const SESSION_EXPIRED_NOTICE: &str = "Session expired, please sign in again";

/// `(request) -> request` transform run before the request is sent
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_request(&self, request: ApiRequest) -> GatewayResult<ApiRequest>;
}

/// `(response | error) -> response | error` transform run after the send
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_response(&self, outcome: GatewayResult<RawResponse>) -> GatewayResult<RawResponse>;
}

/// Moves the client to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }
}

/// Shows a message to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}

/// Navigator for hosts without routes; records the target in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, to: &str) {
        tracing::info!("Navigation requested to {}", to);
    }
}

/// Sets `Authorization: Bearer <token>` from the session at call time.
/// With no token stored the header still goes out as `Bearer null`.
#[derive(Debug, Clone)]
pub struct BearerToken {
    session: Session,
}

impl BearerToken {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RequestMiddleware for BearerToken {
    fn name(&self) -> &'static str {
        "bearer_token"
    }

    async fn on_request(&self, mut request: ApiRequest) -> GatewayResult<ApiRequest> {
        let token = self.session.current_token();
        let value = format!("Bearer {}", token.as_deref().unwrap_or("null"));
        request.set_header(AUTHORIZATION, &value)?;
        Ok(request)
    }
}

/// On HTTP 401: clear the session, go to the login route, tell the user.
/// The original error is always handed back so the caller still fails.
pub struct SessionExpiry {
    session: Session,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionExpiry {
    pub fn new(session: Session, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, navigator, notifier }
    }
}

#[async_trait]
impl ResponseMiddleware for SessionExpiry {
    fn name(&self) -> &'static str {
        "session_expiry"
    }

    async fn on_response(&self, outcome: GatewayResult<RawResponse>) -> GatewayResult<RawResponse> {
        if let Err(err) = &outcome {
            if err.is_unauthorized() {
                tracing::warn!("Server rejected session token: {}", err);
                if let Err(e) = self.session.clear() {
                    tracing::error!("Failed to clear session after 401: {}", e);
                }
                self.navigator.navigate(LOGIN_PATH);
                self.notifier.notify(&Notice::warning(SESSION_EXPIRED_NOTICE));
            }
        }
        outcome
    }
}
