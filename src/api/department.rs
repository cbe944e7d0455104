use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::Envelope;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddDepartmentRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub department: AddDepartmentRequest,
}

pub struct DepartmentApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> DepartmentApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn find_all(&self) -> GatewayResult<Envelope<Vec<DepartmentResponse>>> {
        self.gateway.get("/depts").await
    }

    pub async fn find_by_id(&self, id: i64) -> GatewayResult<Envelope<DepartmentResponse>> {
        self.gateway.get(&format!("/depts/{}", id)).await
    }

    pub async fn add(&self, request: &AddDepartmentRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.post("/depts", request).await
    }

    pub async fn update(&self, request: &UpdateDepartmentRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.put("/depts", request).await
    }

    pub async fn delete(&self, id: i64) -> GatewayResult<Envelope<bool>> {
        self.gateway.delete(&format!("/depts/{}", id)).await
    }
}
