pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod router;
pub mod session;
pub mod types;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use router::Router;
pub use session::{CurrentUser, Session};
pub use types::{Envelope, Page, PageRequest};
