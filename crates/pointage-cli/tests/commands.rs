//! Command handlers against a runtime rooted in a temporary directory

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pointage_attendance::{AttendanceKind, AttendanceLog};
use pointage_cli::commands::{
    handle_attendance_command, handle_config_command, handle_controller_command,
    handle_qr_command, AttendanceCommand, ConfigCommand, ControllerCommand, QrCommand,
};
use pointage_cli::{PointageConfig, PointageRuntime};

fn config_in(dir: &tempfile::TempDir) -> PointageConfig {
    let mut config = PointageConfig::default();
    config.storage.base_path = dir.path().to_path_buf();
    config
}

#[tokio::test]
async fn test_controller_commands_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = PointageRuntime::from_config(&config_in(&dir)).unwrap();

    handle_controller_command(
        ControllerCommand::Create {
            name: "Alice".into(),
            agent_id: None,
            password: Some("4821".into()),
            department: None,
        },
        &runtime,
    )
    .await
    .unwrap();

    let login = |pin: &str| ControllerCommand::Login {
        agent_id: "1001".into(),
        pin: pin.into(),
        timeout_ms: 5000,
    };
    handle_controller_command(login("4821"), &runtime).await.unwrap();
    assert!(handle_controller_command(login("0000"), &runtime).await.is_err());

    handle_controller_command(
        ControllerCommand::Deactivate {
            agent_id: "1001".into(),
        },
        &runtime,
    )
    .await
    .unwrap();
    assert!(handle_controller_command(login("4821"), &runtime).await.is_err());

    // A second runtime over the same directory sees the change
    let reopened = PointageRuntime::from_config(&config_in(&dir)).unwrap();
    let status = reopened.store.lookup("1001").await.unwrap();
    assert!(!status.is_active);
}

#[tokio::test]
async fn test_create_with_generated_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = PointageRuntime::from_config(&config_in(&dir)).unwrap();

    handle_controller_command(
        ControllerCommand::Create {
            name: "Bob".into(),
            agent_id: None,
            password: None,
            department: Some("finance".into()),
        },
        &runtime,
    )
    .await
    .unwrap();

    let accounts = runtime.store.get_all().await;
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].agent_id.as_str(), "3001");
}

#[tokio::test]
async fn test_destructive_and_empty_commands_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = PointageRuntime::from_config(&config_in(&dir)).unwrap();

    assert!(
        handle_controller_command(ControllerCommand::Clear { yes: false }, &runtime)
            .await
            .is_err()
    );
    assert!(handle_controller_command(
        ControllerCommand::Update {
            agent_id: "1001".into(),
            name: None,
            password: None,
        },
        &runtime,
    )
    .await
    .is_err());
    handle_controller_command(ControllerCommand::Clear { yes: true }, &runtime)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_attendance_record_requires_valid_qr() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = PointageRuntime::from_config(&config_in(&dir)).unwrap();

    let record = |qr: &str| AttendanceCommand::Record {
        user_id: "alice".into(),
        kind: AttendanceKind::CheckIn,
        qr: Some(qr.into()),
        lat: None,
        lon: None,
    };
    assert!(handle_attendance_command(record("{}"), &runtime)
        .await
        .is_err());

    let valid = r#"{"locationId":"hq-1","locationName":"Siège","companyId":"acme","timestamp":1}"#;
    handle_attendance_command(record(valid), &runtime)
        .await
        .unwrap();
    assert!(handle_qr_command(
        QrCommand::Check {
            payload: valid.into()
        },
        &runtime
    )
    .await
    .is_ok());

    let history = runtime.attendance.history("alice", None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].qr_code_data.as_deref(), Some(valid));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = PointageConfig::default();

    handle_config_command(ConfigCommand::Init { force: false }, &config, &path).unwrap();
    assert!(path.exists());
    assert!(handle_config_command(ConfigCommand::Init { force: false }, &config, &path).is_err());
    handle_config_command(ConfigCommand::Init { force: true }, &config, &path).unwrap();
    assert_eq!(PointageConfig::load(&path).unwrap(), PointageConfig::default());
}
