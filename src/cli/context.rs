use std::sync::Arc;

use crate::api::ApiClient;
use crate::cli::utils::ConsoleNotifier;
use crate::cli::OutputFormat;
use crate::config::ClientConfig;
use crate::router::{self, Router, LOGIN_PATH};
use crate::session::Session;

/// Everything a command needs: the API client, the router standing in for
/// screen navigation, and the output format
pub struct CliContext {
    pub client: ApiClient,
    pub router: Arc<Router>,
    pub output: OutputFormat,
}

impl CliContext {
    pub fn new(config: &ClientConfig, output: OutputFormat) -> anyhow::Result<Self> {
        let session = Session::from_config(config)?;
        let router = Arc::new(Router::new(session.clone()));
        let client = ApiClient::from_config(
            config,
            session,
            router.clone(),
            Arc::new(ConsoleNotifier::new(output)),
        )?;

        Ok(Self { client, router, output })
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Navigate to the screen a command stands in for; fail if the guard
    /// sends us elsewhere
    pub fn enter(&self, screen: &str) -> anyhow::Result<()> {
        let expected = router::resolve(screen).and_then(|r| r.redirect).unwrap_or(screen);
        let landed = self.router.push(screen);
        if router::path_of(&landed) == router::path_of(expected) {
            return Ok(());
        }

        if router::path_of(&landed) == LOGIN_PATH {
            self.session().set_pending_redirect(&landed)?;
            anyhow::bail!("Not signed in. Run 'hradmin auth login <username>' first");
        }
        anyhow::bail!("The {} screen requires the admin role", screen)
    }

    /// Edits are only offered to admins; the server still has the final say
    pub fn ensure_can_edit(&self) -> anyhow::Result<()> {
        if self.session().controls_disabled() {
            anyhow::bail!("Editing requires the admin role");
        }
        Ok(())
    }
}
