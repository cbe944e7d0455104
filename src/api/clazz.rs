use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::{null_as_default, Envelope, Page};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClazzRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClazzResponse {
    pub id: i64,
    pub clazz_name: String,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddClazzRequest {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub teacher_id: Option<i64>,
    pub subject: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateClazzRequest {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub clazz: AddClazzRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClazzDetail {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub subject: Option<i64>,
}

impl From<ClazzDetail> for UpdateClazzRequest {
    fn from(detail: ClazzDetail) -> Self {
        Self {
            id: detail.id,
            clazz: AddClazzRequest {
                name: detail.name,
                start_date: detail.start_date,
                end_date: detail.end_date,
                teacher_id: detail.teacher_id,
                subject: detail.subject,
            },
        }
    }
}

pub struct ClazzApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ClazzApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn search(&self, request: &SearchClazzRequest) -> GatewayResult<Envelope<Page<SearchClazzResponse>>> {
        self.gateway.get_with("/clazz/search", request).await
    }

    pub async fn find_by_id(&self, id: i64) -> GatewayResult<Envelope<ClazzDetail>> {
        self.gateway.get(&format!("/clazz/{}", id)).await
    }

    pub async fn add(&self, request: &AddClazzRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.post("/clazz", request).await
    }

    pub async fn update(&self, request: &UpdateClazzRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.put("/clazz", request).await
    }

    pub async fn delete(&self, id: i64) -> GatewayResult<Envelope<bool>> {
        self.gateway.delete(&format!("/clazz/{}", id)).await
    }
}
