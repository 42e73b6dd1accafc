//! Line-oriented interactive driver for the preference backend.
//!
//! This crate plays the role of the form layer: it turns typed commands
//! into bridge messages and prints the snapshots and notices the backend
//! pushes back. It carries no reconciliation logic of its own — every
//! change is computed and persisted on the backend side.

use chime_bridge::{MessageFromBackend, MessageToBackend};
use chime_settings::{NotificationLevel, NotificationType, Provider, ScopeId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::command::Command;

pub mod command;
pub mod render;

/// Thin wrapper over the outbound channel, one method per backend request.
#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    pub async fn request_settings(&self) {
        self.to_backend
            .send(MessageToBackend::SettingsRequest)
            .await
            .expect("failed to request settings");
    }

    pub async fn set_providers(&self, kind: NotificationType, providers: Vec<Provider>) {
        self.to_backend
            .send(MessageToBackend::SetProviders { kind, providers })
            .await
            .expect("failed to request provider change");
    }

    pub async fn set_default_level(
        &self,
        kind: NotificationType,
        level: NotificationLevel,
        parent_ids: Vec<ScopeId>,
    ) {
        self.to_backend
            .send(MessageToBackend::SetDefaultLevel {
                kind,
                level,
                parent_ids,
            })
            .await
            .expect("failed to request default level change");
    }

    pub async fn set_parent_level(
        &self,
        kind: NotificationType,
        parent_id: ScopeId,
        level: NotificationLevel,
    ) {
        self.to_backend
            .send(MessageToBackend::SetParentLevel {
                kind,
                parent_id,
                level,
            })
            .await
            .expect("failed to request parent level change");
    }
}

/// Runs the console until the user quits or stdin closes.
///
/// Backend messages are printed from a listener task as they arrive, so
/// snapshots pushed after a change show up without an explicit `settings`
/// command.
pub fn run(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let bridge = BackendBridge { to_backend: tx };

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    MessageFromBackend::NoticeMessage(notice) => {
                        println!("{}", render::render_notice(&notice));
                    }
                    MessageFromBackend::SettingsResponse(snapshot) => {
                        print!("{}", render::render_snapshot(&snapshot));
                    }
                }
            }
        });

        println!("{}", command::USAGE);
        bridge.request_settings().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match command::parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("[error] {e}");
                    continue;
                }
            };

            match command {
                Command::ShowSettings => bridge.request_settings().await,
                Command::SetProviders { kind, providers } => {
                    bridge.set_providers(kind, providers).await;
                }
                Command::SetDefault {
                    kind,
                    level,
                    parent_ids,
                } => {
                    bridge.set_default_level(kind, level, parent_ids).await;
                }
                Command::SetParent {
                    kind,
                    parent_id,
                    level,
                } => {
                    bridge.set_parent_level(kind, parent_id, level).await;
                }
                Command::Help => println!("{}", command::USAGE),
                Command::Quit => break,
            }
        }

        Ok(())
    })
}
