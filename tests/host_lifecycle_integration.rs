//! Integration tests for the host worker lifecycle
//!
//! These tests validate the complete host workflow:
//! - Worker start, snapshot refresh and shutdown
//! - Load and save against a mocked host
//! - A full edit/save round trip through the file host

mod common;

use common::builders::household_snapshot;
use common::mock_helpers::{create_test_channels, permissive_host, wait_for, MockHost};
use common::test_timeout;
use cyd_panel::backend::{FileHost, HostBridge, HostCommand, HostMessage, HostWorker};
use cyd_panel::frontend::AppAction;
use cyd_panel::session::NoticeKind;
use cyd_panel::{ConfigHost, ConfigOptions, ConfigValue, OptionsExt, PanelError, PanelSession};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Feed worker messages into the session until `done` holds
fn pump_until<F>(bridge: &HostBridge, session: &mut PanelSession, mut done: F) -> bool
where
    F: FnMut(&PanelSession) -> bool,
{
    let deadline = Instant::now() + test_timeout();
    while Instant::now() < deadline {
        while let Some(msg) = bridge.try_recv() {
            for cmd in session.handle_message(msg) {
                bridge.send_command(cmd).unwrap();
            }
        }
        if done(session) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_worker_refreshes_and_shuts_down() {
    let (cmd_tx, cmd_rx, msg_tx, msg_rx) = create_test_channels();
    let host = permissive_host(household_snapshot());
    let running = Arc::new(AtomicBool::new(true));
    let mut worker = HostWorker::new(
        Box::new(host),
        cmd_rx,
        msg_tx,
        running,
        Duration::from_secs(60),
    );
    let handle = thread::spawn(move || worker.run());

    let first = wait_for(&msg_rx, test_timeout(), |m| matches!(m, HostMessage::Snapshot(_)));
    match first {
        Some(HostMessage::Snapshot(snapshot)) => assert_eq!(snapshot.len(), 10),
        other => panic!("expected an initial snapshot, got {:?}", other),
    }

    cmd_tx.send(HostCommand::RefreshSnapshot).unwrap();
    assert!(wait_for(&msg_rx, test_timeout(), |m| matches!(m, HostMessage::Snapshot(_))).is_some());

    cmd_tx.send(HostCommand::Shutdown).unwrap();
    assert!(wait_for(&msg_rx, test_timeout(), |m| matches!(m, HostMessage::Shutdown)).is_some());
    assert!(handle.join().is_ok(), "Worker thread should exit cleanly");
}

#[test]
fn test_worker_stops_when_ui_drops() {
    let (cmd_tx, cmd_rx, msg_tx, _msg_rx) = create_test_channels();
    let running = Arc::new(AtomicBool::new(true));
    let mut worker = HostWorker::new(
        Box::new(permissive_host(household_snapshot())),
        cmd_rx,
        msg_tx,
        running,
        Duration::from_secs(60),
    );
    let handle = thread::spawn(move || worker.run());

    drop(cmd_tx);
    assert!(handle.join().is_ok());
}

#[test]
fn test_save_sends_edited_options_to_host() {
    let mut host = MockHost::new();
    host.expect_describe().return_const("mock host".to_string());
    host.expect_sensor_snapshot()
        .returning(|| Ok(household_snapshot()));
    host.expect_load_config()
        .withf(|entry_id| entry_id == "display")
        .times(1)
        .returning(|_| {
            let mut options = ConfigOptions::new();
            options.insert("show_kw".into(), ConfigValue::Bool(true));
            Ok(options)
        });
    host.expect_save_config()
        .withf(|entry_id, options| {
            entry_id == "display"
                && options.binding("solar_entity") == Some("sensor.pv_power")
                && options.show_kw()
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (bridge, handle) = HostWorker::spawn(Box::new(host), Duration::from_secs(60)).unwrap();
    let mut session = PanelSession::new(Some("display".into()));
    for cmd in session.start() {
        bridge.send_command(cmd).unwrap();
    }
    assert!(pump_until(&bridge, &mut session, |s| s.options().show_kw()));

    let now = Instant::now();
    session.apply(
        AppAction::SelectEntity {
            key: "solar_entity".into(),
            entity_id: "sensor.pv_power".into(),
        },
        now,
    );
    for cmd in session.apply(AppAction::Save, now) {
        bridge.send_command(cmd).unwrap();
    }

    assert!(pump_until(&bridge, &mut session, |s| s.notice().is_some()));
    assert_eq!(session.notice().map(|n| n.kind), Some(NoticeKind::Info));

    bridge.shutdown();
    assert!(handle.join().is_ok());
}

#[test]
fn test_save_failure_becomes_error_notice() {
    let mut host = MockHost::new();
    host.expect_describe().return_const("mock host".to_string());
    host.expect_sensor_snapshot()
        .returning(|| Ok(household_snapshot()));
    host.expect_load_config()
        .returning(|_| Ok(ConfigOptions::new()));
    host.expect_save_config()
        .returning(|_, _| Err(PanelError::Host("disk full".into())));

    let (bridge, handle) = HostWorker::spawn(Box::new(host), Duration::from_secs(60)).unwrap();
    let mut session = PanelSession::new(Some("display".into()));
    for cmd in session.apply(AppAction::Save, Instant::now()) {
        bridge.send_command(cmd).unwrap();
    }

    assert!(pump_until(&bridge, &mut session, |s| s.notice().is_some()));
    let notice = session.notice().cloned().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("disk full"));

    session.apply(AppAction::DismissNotice, Instant::now());
    assert!(session.notice().is_none());

    bridge.shutdown();
    assert!(handle.join().is_ok());
}

#[test]
fn test_load_failure_starts_empty() {
    let mut host = MockHost::new();
    host.expect_describe().return_const("mock host".to_string());
    host.expect_sensor_snapshot()
        .returning(|| Ok(household_snapshot()));
    host.expect_load_config()
        .returning(|_| Err(PanelError::Host("entry not found".into())));

    let (bridge, handle) = HostWorker::spawn(Box::new(host), Duration::from_secs(60)).unwrap();
    let mut session = PanelSession::new(Some("display".into()));
    session.apply(AppAction::set("show_kw", true), Instant::now());
    for cmd in session.start() {
        bridge.send_command(cmd).unwrap();
    }

    assert!(pump_until(&bridge, &mut session, |s| !s.options().show_kw()));
    assert!(session.options().is_empty());
    assert!(session.notice().is_none());

    bridge.shutdown();
    assert!(handle.join().is_ok());
}

#[test]
fn test_file_host_round_trip() {
    let dir = TempDir::new().unwrap();
    let seed = FileHost::new(dir.path());
    seed.write_states(&household_snapshot()).unwrap();

    // A key written by someone else must survive the panel's save
    let mut existing = ConfigOptions::new();
    existing.insert("firmware_channel".into(), ConfigValue::from("beta"));
    FileHost::new(dir.path())
        .save_config("display", &existing)
        .unwrap();

    let (bridge, handle) =
        HostWorker::spawn(Box::new(FileHost::new(dir.path())), Duration::from_secs(60)).unwrap();
    let mut session = PanelSession::new(Some("display".into()));
    for cmd in session.start() {
        bridge.send_command(cmd).unwrap();
    }
    assert!(pump_until(&bridge, &mut session, |s| {
        s.snapshot().len() == 10 && s.options().text("firmware_channel").is_some()
    }));

    let now = Instant::now();
    session.apply(
        AppAction::SelectEntity {
            key: "grid_entity".into(),
            entity_id: "sensor.grid_power".into(),
        },
        now,
    );
    session.apply(AppAction::set("custom1_name", "Boiler"), now);
    session.apply(AppAction::set("enable_page5", false), now);
    for cmd in session.apply(AppAction::Save, now) {
        bridge.send_command(cmd).unwrap();
    }
    assert!(pump_until(&bridge, &mut session, |s| s.notice().is_some()));

    bridge.shutdown();
    assert!(handle.join().is_ok());

    let stored = FileHost::new(dir.path()).load_config("display").unwrap();
    assert_eq!(stored.binding("grid_entity"), Some("sensor.grid_power"));
    assert_eq!(stored.text("custom1_name"), Some("Boiler"));
    assert_eq!(stored.get("enable_page5"), Some(&ConfigValue::Bool(false)));
    assert_eq!(stored.text("firmware_channel"), Some("beta"));
}

#[test]
fn test_file_host_rejects_unsafe_entry_ids() {
    let dir = TempDir::new().unwrap();
    let mut host = FileHost::new(dir.path());

    assert!(host.load_config("../outside").is_err());
    assert!(host.save_config("a/b", &ConfigOptions::new()).is_err());
}
