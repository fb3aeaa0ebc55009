use std::sync::Arc;

use parking_lot::Mutex;

/// Sink for user-facing messages (status bar line, dialogs).
///
/// The app installs a log-backed implementation; tests install a recording
/// one so they can assert on what was surfaced.
pub trait Messenger {
    fn show_status(&mut self, msg: &str);
    fn show_info(&mut self, title: &str, msg: &str);
    fn show_error(&mut self, title: &str, msg: &str);

    /// The most recent status line, for mirroring into a status bar.
    fn last_status(&self) -> Option<String> {
        None
    }
}

/// Forwards messages to the `log` crate. The app shell additionally mirrors
/// the latest status line into its status bar.
#[derive(Debug, Default)]
pub struct LogMessenger {
    last_status: Option<String>,
}

impl LogMessenger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Messenger for LogMessenger {
    fn show_status(&mut self, msg: &str) {
        log::debug!("status: {msg}");
        self.last_status = Some(msg.to_owned());
    }

    fn show_info(&mut self, title: &str, msg: &str) {
        log::info!("{title}: {msg}");
    }

    fn show_error(&mut self, title: &str, msg: &str) {
        log::error!("{title}: {msg}");
    }

    fn last_status(&self) -> Option<String> {
        self.last_status.clone()
    }
}

/// Records every message for later inspection. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessenger {
    statuses: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn show_status(&mut self, msg: &str) {
        self.statuses.lock().push(msg.to_owned());
    }

    fn show_info(&mut self, _title: &str, _msg: &str) {}

    fn show_error(&mut self, title: &str, msg: &str) {
        self.errors.lock().push(format!("{title}: {msg}"));
    }

    fn last_status(&self) -> Option<String> {
        self.statuses.lock().last().cloned()
    }
}
