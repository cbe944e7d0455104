mod common;

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use common::{MockBackend, Recorder};
use hradmin::error::ErrorKind;
use hradmin::gateway::Gateway;
use hradmin::session::Session;
use hradmin::types::Envelope;
use hradmin::GatewayError;

fn gateway_for(backend: &MockBackend, session: Session, recorder: &Arc<Recorder>) -> Result<Gateway> {
    Ok(Gateway::from_config(&backend.config(), session, recorder.clone(), recorder.clone())?)
}

#[tokio::test]
async fn sends_bearer_null_without_a_token() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let gateway = gateway_for(&backend, Session::in_memory(), &recorder)?;

    let envelope: Envelope<bool> = gateway.get("/anything").await?;
    assert!(envelope.is_success());

    let seen = backend.last();
    assert_eq!(seen.path, "/api/anything");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer null"));
    Ok(())
}

#[tokio::test]
async fn reads_the_token_at_call_time() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let session = Session::in_memory();
    let gateway = gateway_for(&backend, session.clone(), &recorder)?;

    session.set_token("first")?;
    let _: Envelope<bool> = gateway.get("/one").await?;
    session.set_token("second")?;
    let _: Envelope<bool> = gateway.get("/two").await?;

    let auth: Vec<_> = backend.requests().into_iter().map(|r| r.authorization).collect();
    assert_eq!(auth, vec![Some("Bearer first".to_string()), Some("Bearer second".to_string())]);
    Ok(())
}

#[tokio::test]
async fn failing_envelope_code_is_not_a_transport_error() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let gateway = gateway_for(&backend, Session::in_memory(), &recorder)?;

    let envelope: Envelope<Value> = gateway.get("/failing").await?;
    assert!(!envelope.is_success());
    assert_eq!(envelope.message(), "name already taken");

    let err = envelope.into_result().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert!(recorder.routes().is_empty());
    Ok(())
}

#[tokio::test]
async fn forbidden_and_server_errors_have_no_side_effects() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let session = Session::in_memory();
    session.set_token("still-valid")?;
    let gateway = gateway_for(&backend, session.clone(), &recorder)?;

    let err = gateway.get::<Value>("/forbidden").await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(err.error_code(), "FORBIDDEN");

    let err = gateway.get::<Value>("/broken").await.unwrap_err();
    match err {
        GatewayError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }

    assert!(recorder.routes().is_empty());
    assert!(recorder.notices().is_empty());
    assert_eq!(session.current_token().as_deref(), Some("still-valid"));
    Ok(())
}

#[tokio::test]
async fn empty_body_is_a_decode_error() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let gateway = gateway_for(&backend, Session::in_memory(), &recorder)?;

    let err = gateway.get::<Value>("/empty").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    Ok(())
}

#[tokio::test]
async fn slow_backend_times_out() -> Result<()> {
    let backend = MockBackend::start().await?;
    let recorder = Recorder::new();
    let mut config = backend.config();
    config.api.timeout_ms = 200;
    let gateway = Gateway::from_config(&config, Session::in_memory(), recorder.clone(), recorder.clone())?;

    let err = gateway.get::<Value>("/slow").await.unwrap_err();
    assert!(matches!(err, GatewayError::Timeout { after_ms: 200 }), "got {:?}", err);
    assert!(recorder.routes().is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let config = hradmin::ClientConfig::for_server(format!("http://127.0.0.1:{}", port));
    let recorder = Recorder::new();
    let gateway = Gateway::from_config(&config, Session::in_memory(), recorder.clone(), recorder.clone())?;

    let err = gateway.get::<Value>("/depts").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status_code(), None);
    Ok(())
}
