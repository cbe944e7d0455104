use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::{join_ids, null_as_default, Envelope, Page};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEmployeeRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEmployeeResponse {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub dept_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeRequest {
    pub username: String,
    pub name: String,
    pub gender: Option<i32>,
    pub phone: String,
    pub image: Option<String>,
    pub job_title: Option<i64>,
    pub hire_date: Option<NaiveDate>,
    pub dept_id: Option<i64>,
}

/// Create fields plus the id; a null id is left for the server to reject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub employee: AddEmployeeRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub gender: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub job_title: Option<i64>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub dept_id: Option<i64>,
}

impl From<EmployeeDetail> for UpdateEmployeeRequest {
    fn from(detail: EmployeeDetail) -> Self {
        Self {
            id: detail.id,
            employee: AddEmployeeRequest {
                username: detail.username,
                name: detail.name,
                gender: detail.gender,
                phone: detail.phone,
                image: detail.image,
                job_title: detail.job_title,
                hire_date: detail.hire_date,
                dept_id: detail.dept_id,
            },
        }
    }
}

pub struct EmployeeApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> EmployeeApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn search(
        &self,
        request: &SearchEmployeeRequest,
    ) -> GatewayResult<Envelope<Page<SearchEmployeeResponse>>> {
        self.gateway.get_with("/emps/search", request).await
    }

    pub async fn find_by_id(&self, id: i64) -> GatewayResult<Envelope<EmployeeDetail>> {
        self.gateway.get(&format!("/emps/{}", id)).await
    }

    pub async fn add(&self, request: &AddEmployeeRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.post("/emps", request).await
    }

    pub async fn update(&self, request: &UpdateEmployeeRequest) -> GatewayResult<Envelope<bool>> {
        self.gateway.put("/emps", request).await
    }

    pub async fn delete(&self, ids: &[i64]) -> GatewayResult<Envelope<bool>> {
        self.gateway.delete(&format!("/emps?ids={}", join_ids(ids))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_is_create_plus_id() {
        let request = UpdateEmployeeRequest {
            id: Some(12),
            employee: AddEmployeeRequest {
                username: "zhang".to_string(),
                name: "Zhang Wei".to_string(),
                gender: Some(1),
                dept_id: Some(2),
                ..Default::default()
            },
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["id"], 12);
        assert_eq!(body["username"], "zhang");
        assert_eq!(body["deptId"], 2);
        assert_eq!(body["hireDate"], serde_json::Value::Null);
    }

    #[test]
    fn test_search_omits_unset_filters() {
        let request = SearchEmployeeRequest {
            page: 1,
            page_size: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let query = serde_json::to_value(&request).unwrap();
        assert_eq!(query, json!({"page": 1, "pageSize": 10, "startDate": "2024-01-01"}));
    }

    #[test]
    fn test_detail_feeds_update() {
        let detail: EmployeeDetail = serde_json::from_value(json!({
            "id": 4, "username": "li", "name": "Li Na", "gender": 2,
            "phone": "13800000000", "jobTitle": 1, "hireDate": "2020-03-01", "deptId": 1
        }))
        .unwrap();
        let update = UpdateEmployeeRequest::from(detail);
        assert_eq!(update.id, Some(4));
        assert_eq!(update.employee.hire_date, NaiveDate::from_ymd_opt(2020, 3, 1));
    }
}
