mod common;

use anyhow::Result;
use clap::Parser;

use common::{MockBackend, Recorder};
use hradmin::api::auth::LoginRequest;
use hradmin::api::employee::SearchEmployeeRequest;
use hradmin::cli::{run_with_config, Cli};
use hradmin::error::ErrorKind;
use hradmin::session::{FileStorage, Session, SessionStorage, REDIRECT_KEY};
use hradmin::ApiClient;

#[tokio::test]
async fn sign_in_then_search_carries_the_new_token() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let session = Session::in_memory();
    let client = ApiClient::from_config(&backend.config(), session.clone(), recorder.clone(), recorder.clone())?;

    let request = LoginRequest { username: "admin".to_string(), password: "secret".to_string() };
    let response = client.auth().sign_in(&request).await?;
    assert_eq!(response.token, "token-admin");

    assert_eq!(session.current_token().as_deref(), Some("token-admin"));
    let user = session.current_user().expect("user stored");
    assert_eq!(user.username, "admin");
    assert!(session.is_admin());
    assert!(!session.controls_disabled());

    let search = SearchEmployeeRequest { page: 1, page_size: 10, ..Default::default() };
    let page = client.employees().search(&search).await?.into_result()?;
    assert_eq!(page.total, 12);

    let login = &backend.requests()[0];
    assert_eq!(login.authorization.as_deref(), Some("Bearer null"));
    assert_eq!(backend.last().authorization.as_deref(), Some("Bearer token-admin"));
    assert!(recorder.routes().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_credentials_leave_the_session_empty() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let session = Session::in_memory();
    let client = ApiClient::from_config(&backend.config(), session.clone(), recorder.clone(), recorder.clone())?;

    let request = LoginRequest { username: "admin".to_string(), password: "wrong".to_string() };
    let err = client.auth().sign_in(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert!(err.to_string().contains("invalid credentials"));
    assert!(!session.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn non_admin_sign_in_disables_controls() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let session = Session::in_memory();
    let client = ApiClient::from_config(&backend.config(), session.clone(), recorder.clone(), recorder.clone())?;

    let request = LoginRequest { username: "clerk".to_string(), password: "secret".to_string() };
    client.auth().sign_in(&request).await?;
    assert!(session.is_authenticated());
    assert!(!session.is_admin());
    assert!(session.controls_disabled());
    Ok(())
}

#[tokio::test]
async fn cli_login_persists_session_for_later_commands() -> Result<()> {
    let backend = MockBackend::start().await?;
    let dir = std::env::temp_dir().join(format!("hradmin-cli-test-{}", std::process::id()));
    let mut config = backend.config();
    config.session.dir = Some(dir.clone());

    let login = Cli::parse_from(["hradmin", "--json", "auth", "login", "admin", "--password", "secret"]);
    run_with_config(login, &config).await?;

    let search = Cli::parse_from(["hradmin", "--json", "emp", "search", "--page-size", "5"]);
    run_with_config(search, &config).await?;

    let seen = backend.last();
    assert_eq!(seen.path, "/api/emps/search");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer token-admin"));

    let logout = Cli::parse_from(["hradmin", "auth", "logout"]);
    run_with_config(logout, &config).await?;

    let search = Cli::parse_from(["hradmin", "emp", "search"]);
    let err = run_with_config(search, &config).await.unwrap_err();
    assert!(err.to_string().contains("Not signed in"));

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}

#[tokio::test]
async fn cli_login_resumes_the_screen_a_command_was_bounced_from() -> Result<()> {
    let backend = MockBackend::start().await?;
    let dir = std::env::temp_dir().join(format!("hradmin-cli-resume-{}", std::process::id()));
    let mut config = backend.config();
    config.session.dir = Some(dir.clone());

    let search = Cli::parse_from(["hradmin", "student", "search"]);
    assert!(run_with_config(search, &config).await.is_err());
    assert!(backend.requests().is_empty());

    let stored = FileStorage::in_dir(&dir)?.get_item(REDIRECT_KEY)?;
    assert_eq!(stored.as_deref(), Some("/login?redirect=/stud"));

    let login = Cli::parse_from(["hradmin", "--json", "auth", "login", "admin", "--password", "secret"]);
    run_with_config(login, &config).await?;
    assert_eq!(FileStorage::in_dir(&dir)?.get_item(REDIRECT_KEY)?, None);

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
