//! User-facing notifications
//!
//! Operations never block on the user. Every outcome that the user should
//! see is pushed onto an unbounded channel, and the presentation layer
//! drains it whenever it redraws.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

pub const FETCH_FAILED: &str = "Fetch failed";
pub const ENTER_ID: &str = "Enter ID";
pub const USER_NOT_FOUND: &str = "User not found";
pub const NAME_AND_EMAIL_REQUIRED: &str = "Name and Email required";
pub const USER_ADDED: &str = "User added";
pub const ADD_FAILED: &str = "Add failed";
pub const USER_UPDATED: &str = "User updated";
pub const UPDATE_FAILED: &str = "Update failed";
pub const USER_DELETED: &str = "User deleted";
pub const DELETE_FAILED: &str = "Delete failed";

/// What a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A mutation went through
    Success,
    /// Missing input or a failed request
    Error,
    /// Informational payload, e.g. a fetched record
    Info,
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Receiving end handed to the presentation layer.
#[derive(Debug)]
pub struct Notifications {
    rx: mpsc::UnboundedReceiver<Notification>,
}

impl Notifications {
    /// Wait for the next notification.
    ///
    /// Returns `None` once every manager handle has been dropped.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }

    /// Take the next notification if one is queued.
    pub fn try_recv(&mut self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }

    /// Take everything currently queued, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            out.push(notification);
        }
        out
    }
}

/// Sending end kept by the manager.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub(crate) fn channel() -> (Self, Notifications) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, Notifications { rx })
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Success, message));
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Error, message));
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Info, message));
    }

    fn push(&self, notification: Notification) {
        if let Err(mpsc::error::SendError(dropped)) = self.tx.send(notification) {
            debug!(message = %dropped.message, "Notification receiver gone, discarding");
        }
    }
}
