//! Notification sinks
//!
//! The engine hands every event of a real (non dry-run) sync to a sink once
//! the target it belongs to has been processed. Sink errors are logged and
//! never stop the sync.

use crate::Result;
use crate::sync::SyncEvent;

/// Receives sync events as they are produced.
pub trait NotificationSink {
    fn notify(&mut self, event: &SyncEvent) -> Result<()>;
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn notify(&mut self, event: &SyncEvent) -> Result<()> {
        (**self).notify(event)
    }
}

/// Logs each event at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, event: &SyncEvent) -> Result<()> {
        tracing::info!(changed = event.is_change(), "{}", event);
        Ok(())
    }
}

/// Collects rendered messages in memory.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl NotificationSink for MessageLog {
    fn notify(&mut self, event: &SyncEvent) -> Result<()> {
        self.messages.push(event.to_string());
        Ok(())
    }
}
