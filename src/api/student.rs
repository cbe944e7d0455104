use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::{join_ids, null_as_default, Envelope, Page};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStudentRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clazz_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStudentResponse {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub no: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education_level: String,
    #[serde(default)]
    pub clazz_name: Option<String>,
    #[serde(default)]
    pub intake_date: Option<NaiveDate>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentRequest {
    pub name: String,
    pub gender: Option<i32>,
    pub birthdate: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub education_level: Option<i64>,
    pub graduation_date: Option<NaiveDate>,
    pub clazz_id: Option<i64>,
    pub intake_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub student: AddStudentRequest,
}

/// Detail view; graduation date is not part of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub gender: Option<i32>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default)]
    pub education_level: Option<i64>,
    #[serde(default)]
    pub clazz_id: Option<i64>,
    #[serde(default)]
    pub intake_date: Option<NaiveDate>,
}

impl From<StudentDetail> for UpdateStudentRequest {
    fn from(detail: StudentDetail) -> Self {
        Self {
            id: detail.id,
            student: AddStudentRequest {
                name: detail.name,
                gender: detail.gender,
                birthdate: detail.birthdate,
                phone: detail.phone,
                email: detail.email,
                address: detail.address,
                education_level: detail.education_level,
                graduation_date: None,
                clazz_id: detail.clazz_id,
                intake_date: detail.intake_date,
            },
        }
    }
}

pub struct StudentApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> StudentApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn search(
        &self,
        request: &SearchStudentRequest,
    ) -> GatewayResult<Envelope<Page<SearchStudentResponse>>> {
        self.gateway.get_with("/students/search", request).await
    }

    pub async fn find_by_id(&self, id: i64) -> GatewayResult<Envelope<StudentDetail>> {
        self.gateway.get(&format!("/students/{}", id)).await
    }

    pub async fn add(&self, request: &AddStudentRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.post("/students", request).await
    }

    pub async fn update(&self, request: &UpdateStudentRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.put("/students", request).await
    }

    pub async fn delete(&self, ids: &[i64]) -> GatewayResult<Envelope<bool>> {
        self.gateway.delete(&format!("/students?ids={}", join_ids(ids))).await
    }
}
