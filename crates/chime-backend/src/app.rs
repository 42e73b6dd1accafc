//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notices back to the driver bridge.

use std::sync::Arc;

use chime_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the driver bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the driver bridge until it closes.
    ///
    /// Messages are handled one at a time, so each interaction's
    /// read-tree → build-patch → persist sequence completes before the
    /// next command is taken off the channel.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a driver message: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received message from the driver down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::SettingsRequest => {
                services::settings_service::handle_settings_request(self.clone()).await;
            }
            MessageToBackend::SetProviders { kind, providers } => {
                services::settings_service::handle_set_providers(self.clone(), kind, providers)
                    .await;
            }
            MessageToBackend::SetDefaultLevel {
                kind,
                level,
                parent_ids,
            } => {
                services::settings_service::handle_set_default_level(
                    self.clone(),
                    kind,
                    level,
                    parent_ids,
                )
                .await;
            }
            MessageToBackend::SetParentLevel {
                kind,
                parent_id,
                level,
            } => {
                services::settings_service::handle_set_parent_level(
                    self.clone(),
                    kind,
                    parent_id,
                    level,
                )
                .await;
            }
        }
    }

    /// Send a message to the driver bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to driver");
    }

    /// Send a notice message to the driver bridge.
    pub async fn send_notice(
        &self,
        kind: chime_bridge::notice::NoticeKind,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NoticeMessage(
            chime_bridge::notice::Notice {
                kind,
                message: content.into(),
            },
        ))
        .await;
    }
}
