use futures::future::try_join;
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::{null_as_default, Envelope};

/// Parallel label/count lists, ready for a bar chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpJobTitleCountResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title_list: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title_count_list: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpGenderCountResponse {
    pub gender: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCountByClazzResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub clazz_name_list: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_count_list: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEduLevelCountResponse {
    pub education_level: String,
    pub count: i64,
}

impl EmpJobTitleCountResponse {
    /// Labels zipped with counts; extra entries on either side are dropped
    pub fn pairs(&self) -> Vec<(&str, i64)> {
        self.job_title_list
            .iter()
            .map(String::as_str)
            .zip(self.job_title_count_list.iter().copied())
            .collect()
    }
}

impl StudentCountByClazzResponse {
    pub fn pairs(&self) -> Vec<(&str, i64)> {
        self.clazz_name_list
            .iter()
            .map(String::as_str)
            .zip(self.student_count_list.iter().copied())
            .collect()
    }
}

pub struct DashboardApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn employee_job_title_count(&self) -> GatewayResult<Envelope<EmpJobTitleCountResponse>> {
        self.gateway.get("/emps/jobTitle/count").await
    }

    pub async fn employee_gender_count(&self) -> GatewayResult<Envelope<Vec<EmpGenderCountResponse>>> {
        self.gateway.get("/emps/gender/count").await
    }

    pub async fn student_count_by_clazz(&self) -> GatewayResult<Envelope<StudentCountByClazzResponse>> {
        self.gateway.get("/students/clazz/count").await
    }

    pub async fn student_edu_level_count(&self) -> GatewayResult<Envelope<Vec<StudentEduLevelCountResponse>>> {
        self.gateway.get("/students/edu-level/count").await
    }

    /// Both employee charts, fetched concurrently
    pub async fn employee_overview(
        &self,
    ) -> GatewayResult<(Envelope<EmpJobTitleCountResponse>, Envelope<Vec<EmpGenderCountResponse>>)> {
        try_join(self.employee_job_title_count(), self.employee_gender_count()).await
    }

    /// Both student charts, fetched concurrently
    pub async fn student_overview(
        &self,
    ) -> GatewayResult<(Envelope<StudentCountByClazzResponse>, Envelope<Vec<StudentEduLevelCountResponse>>)> {
        try_join(self.student_count_by_clazz(), self.student_edu_level_count()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_truncate_to_shorter_list() {
        let counts = EmpJobTitleCountResponse {
            job_title_list: vec!["Teacher".to_string(), "Counselor".to_string(), "Manager".to_string()],
            job_title_count_list: vec![12, 4],
        };
        assert_eq!(counts.pairs(), vec![("Teacher", 12), ("Counselor", 4)]);
    }

    #[test]
    fn test_student_counts_decode() {
        let counts: StudentCountByClazzResponse = serde_json::from_str(
            r#"{"clazzNameList":["Java 01","Web 02"],"studentCountList":[30,28]}"#,
        )
        .unwrap();
        assert_eq!(counts.pairs(), vec![("Java 01", 30), ("Web 02", 28)]);
    }
}
