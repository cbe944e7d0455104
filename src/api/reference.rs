// Lookup lists that feed the form drop-downs
use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::types::Envelope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
}

pub type SubjectResponse = ReferenceItem;
pub type JobTitleResponse = ReferenceItem;
pub type EduLevelResponse = ReferenceItem;

pub struct ReferenceApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ReferenceApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn subjects(&self) -> GatewayResult<Envelope<Vec<SubjectResponse>>> {
        self.gateway.get("/subjects").await
    }

    pub async fn job_titles(&self) -> GatewayResult<Envelope<Vec<JobTitleResponse>>> {
        self.gateway.get("/jobs").await
    }

    pub async fn edu_levels(&self) -> GatewayResult<Envelope<Vec<EduLevelResponse>>> {
        self.gateway.get("/edu-levels").await
    }
}
