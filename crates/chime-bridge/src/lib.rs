//! Communication bridge between the console driver and the backend.
//!
//! This crate defines the types and protocols used to connect an
//! interactive driver with an asynchronous backend responsible for the
//! settings store and preference reconciliation.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The driver sends commands (e.g., change the default level for a
//!   notification type, request the current settings).
//! - The backend pushes events (fresh settings snapshots, notices).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod notice;
pub mod snapshot;

use chime_settings::{NotificationLevel, NotificationType, Provider, ScopeId};
use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the driver of state updates.
///
/// These are typically sent in response to driver requests: every change
/// request is answered with a notice and, when it succeeded, a fresh
/// snapshot.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notices in the application.
    NoticeMessage(notice::Notice),
    /// The current settings, pushed after a request or a change.
    SettingsResponse(snapshot::SettingsSnapshot),
}

/// Commands issued by the driver to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the current settings snapshot.
    SettingsRequest,
    /// Change the set of delivery providers for a notification type.
    SetProviders {
        kind: NotificationType,
        providers: Vec<Provider>,
    },
    /// Change the user-wide default level for a notification type. When the
    /// new level is `never`, every listed parent row is reset to inherit.
    SetDefaultLevel {
        kind: NotificationType,
        level: NotificationLevel,
        parent_ids: Vec<ScopeId>,
    },
    /// Change the level of a single project/organization row.
    SetParentLevel {
        kind: NotificationType,
        parent_id: ScopeId,
        level: NotificationLevel,
    },
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the driver and the backend.
pub struct BridgeChannels {
    /// Receiver used by the driver to get messages from the backend.
    pub driver_rx: Receiver<MessageFromBackend>,
    /// Sender used by the driver to send commands to the backend.
    pub driver_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the driver.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the driver.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_driver_tx, to_driver_rx) = mpsc::channel(buffer);
        Self {
            driver_tx: to_backend_tx,
            driver_rx: to_driver_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_driver_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
