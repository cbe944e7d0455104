use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::{null_as_default, Envelope, Page, PageRequest};

/// One audited backend method invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub operator: String,
    #[serde(default)]
    pub operate_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method_name: String,
    /// Milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(default)]
    pub method_params: Option<String>,
    #[serde(default)]
    pub return_value: Option<String>,
}

pub struct ActivityLogApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ActivityLogApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn find(&self, page: &PageRequest) -> GatewayResult<Envelope<Page<ActivityLogResponse>>> {
        self.gateway.get_with("/logs", page).await
    }
}
