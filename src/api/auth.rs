use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::session::CurrentUser;
use crate::types::{null_as_default, Envelope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_name: String,
    pub token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_first_logged: bool,
}

impl LoginResponse {
    /// Session record for this login; the server may omit the username
    pub fn current_user(&self, requested_username: &str) -> CurrentUser {
        let username = if self.username.is_empty() {
            requested_username.to_string()
        } else {
            self.username.clone()
        };

        CurrentUser {
            id: self.id,
            username,
            name: self.name.clone(),
            role_name: self.role_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub id: Option<i64>,
    pub password: String,
}

pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, request: &LoginRequest) -> GatewayResult<Envelope<LoginResponse>> {
        self.gateway.post("/auth/login", request).await
    }

    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.post("/auth/update-password", request).await
    }

    /// Log in and populate the session with the returned token and user
    pub async fn sign_in(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        let response = self.login(request).await?.into_result()?;

        let session = self.gateway.session();
        session.set_token(&response.token)?;
        session.set_user(&response.current_user(&request.username))?;

        tracing::info!(
            "Signed in as {} (role: {})",
            request.username,
            if response.role_name.is_empty() { "-" } else { response.role_name.as_str() }
        );
        Ok(response)
    }

    pub fn sign_out(&self) -> GatewayResult<()> {
        self.gateway.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
