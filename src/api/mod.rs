//! Typed resource clients.
//!
//! Every function maps one endpoint to one gateway call and hands back the
//! envelope as the server sent it. No validation, retries or caching.

pub mod activity_log;
pub mod auth;
pub mod clazz;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod reference;
pub mod student;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::GatewayResult;
use crate::gateway::{Gateway, Navigator, Notifier};
use crate::session::Session;

pub use activity_log::ActivityLogApi;
pub use auth::AuthApi;
pub use clazz::ClazzApi;
pub use dashboard::DashboardApi;
pub use department::DepartmentApi;
pub use employee::EmployeeApi;
pub use reference::ReferenceApi;
pub use student::StudentApi;

/// Entry point bundling the gateway with one accessor per resource
#[derive(Clone)]
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn from_config(
        config: &ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> GatewayResult<Self> {
        Ok(Self::new(Gateway::from_config(config, session, navigator, notifier)?))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Session {
        self.gateway.session()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.gateway)
    }

    pub fn employees(&self) -> EmployeeApi<'_> {
        EmployeeApi::new(&self.gateway)
    }

    pub fn departments(&self) -> DepartmentApi<'_> {
        DepartmentApi::new(&self.gateway)
    }

    pub fn classes(&self) -> ClazzApi<'_> {
        ClazzApi::new(&self.gateway)
    }

    pub fn students(&self) -> StudentApi<'_> {
        StudentApi::new(&self.gateway)
    }

    pub fn reference(&self) -> ReferenceApi<'_> {
        ReferenceApi::new(&self.gateway)
    }

    pub fn activity_logs(&self) -> ActivityLogApi<'_> {
        ActivityLogApi::new(&self.gateway)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(&self.gateway)
    }
}
