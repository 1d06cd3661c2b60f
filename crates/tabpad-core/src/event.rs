//! Tab host notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Instead of callbacks holding references back into the window, the host
//! publishes plain values on a `tokio::sync::broadcast` channel. Observers
//! subscribe and pull events when they are ready; the GUI drains its
//! receiver after every update on the same thread.

use std::path::PathBuf;
use tokio::sync::broadcast;

use crate::document::TabId;

/// Events emitted by the tab host.
#[derive(Debug, Clone, PartialEq)]
pub enum TabEvent {
    /// An empty untitled tab was created and activated
    TabCreated { id: TabId, title: String },
    /// A file's contents were loaded into a tab
    FileOpened { id: TabId, path: PathBuf },
    /// A tab was written to its already bound path
    FileSaved { id: TabId, path: PathBuf },
    /// A tab was written to a newly chosen path and rebound
    FileSavedAs { id: TabId, path: PathBuf },
    /// A tab was removed
    TabClosed { id: TabId },
    /// Closing was refused because it was the last tab
    CloseRefused,
    /// A different tab became active
    ActiveChanged { id: TabId },
}

impl TabEvent {
    /// Short status-bar text for the event, if it deserves one.
    pub fn status_text(&self) -> Option<String> {
        let text = match self {
            TabEvent::TabCreated { .. } => "New tab created".to_string(),
            TabEvent::FileOpened { path, .. } => format!("Opened: {}", path.display()),
            TabEvent::FileSaved { path, .. } => format!("Saved: {}", path.display()),
            TabEvent::FileSavedAs { path, .. } => format!("Saved as: {}", path.display()),
            TabEvent::TabClosed { .. } => "Tab closed".to_string(),
            TabEvent::CloseRefused => "Cannot close the last tab.".to_string(),
            TabEvent::ActiveChanged { .. } => return None,
        };
        Some(text)
    }
}

/// Event bus for broadcasting tab events.
pub struct EventBus {
    sender: broadcast::Sender<TabEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        // Capacity of 64 events in the buffer
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: TabEvent) {
        tracing::debug!(?event, "tab event");
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Pulls every event currently queued on `receiver` without blocking.
pub fn drain(receiver: &mut broadcast::Receiver<TabEvent>) -> Vec<TabEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                tracing::warn!("Event receiver lagged, missed {} events", n);
            }
            Err(_) => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(TabEvent::CloseRefused);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, TabEvent::CloseRefused));
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(TabEvent::CloseRefused);

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn test_drain_collects_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let id = TabId::new();

        bus.emit(TabEvent::TabCreated {
            id,
            title: "Untitled-1".to_string(),
        });
        bus.emit(TabEvent::TabClosed { id });

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TabEvent::TabCreated { .. }));
        assert!(matches!(events[1], TabEvent::TabClosed { .. }));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_status_text() {
        let id = TabId::new();
        let saved = TabEvent::FileSaved {
            id,
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(saved.status_text().as_deref(), Some("Saved: notes.txt"));
        assert_eq!(
            TabEvent::CloseRefused.status_text().as_deref(),
            Some("Cannot close the last tab.")
        );
        assert!(TabEvent::ActiveChanged { id }.status_text().is_none());
    }
}
