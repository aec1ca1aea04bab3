//! Mock construction helpers

use cyd_panel::backend::{ConfigHost, HostCommand, HostMessage};
use cyd_panel::{ConfigOptions, Result, SensorSnapshot};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::{Duration, Instant};

mockall::mock! {
    pub Host {}

    impl ConfigHost for Host {
        fn load_config(&mut self, entry_id: &str) -> Result<ConfigOptions>;
        fn save_config(&mut self, entry_id: &str, options: &ConfigOptions) -> Result<()>;
        fn sensor_snapshot(&mut self) -> Result<SensorSnapshot>;
        fn describe(&self) -> String;
    }
}

/// Mock host that serves `snapshot` and accepts everything else
pub fn permissive_host(snapshot: SensorSnapshot) -> MockHost {
    let mut host = MockHost::new();
    host.expect_describe().return_const("mock host".to_string());
    host.expect_sensor_snapshot()
        .returning(move || Ok(snapshot.clone()));
    host.expect_load_config()
        .returning(|_| Ok(ConfigOptions::new()));
    host.expect_save_config().returning(|_, _| Ok(()));
    host
}

/// Channels shaped like the worker's
pub fn create_test_channels() -> (
    Sender<HostCommand>,
    Receiver<HostCommand>,
    Sender<HostMessage>,
    Receiver<HostMessage>,
) {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (msg_tx, msg_rx) = bounded(64);
    (cmd_tx, cmd_rx, msg_tx, msg_rx)
}

/// Receive until `pred` matches or the timeout expires
pub fn wait_for<F>(rx: &Receiver<HostMessage>, timeout: Duration, mut pred: F) -> Option<HostMessage>
where
    F: FnMut(&HostMessage) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(left) {
            Ok(msg) if pred(&msg) => return Some(msg),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
}
