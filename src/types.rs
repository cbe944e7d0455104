//! Shared wire shapes used by every resource client

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Envelope code the backend uses for a successful call
pub const SUCCESS_CODE: i64 = 0;

/// Uniform wrapper around every response body.
/// `code` is the application outcome, unrelated to the HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: Some("ok".to_string()),
            data: Some(data),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Payload on success, `Application` error carrying the server message otherwise
    pub fn into_result(self) -> GatewayResult<T> {
        if !self.is_success() {
            let message = match self.message {
                Some(m) if !m.is_empty() => m,
                _ => format!("request failed with code {}", self.code),
            };
            return Err(GatewayError::application(self.code, message));
        }

        self.data
            .ok_or_else(|| GatewayError::decode("successful envelope carried no data"))
    }
}

/// One page of a server-side search; `total` counts every match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

/// Identifiers as the single comma-joined value bulk deletes expect
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Field deserializer treating an explicit `null` like a missing key.
/// Pair with `#[serde(default)]` on columns the server may leave empty.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
