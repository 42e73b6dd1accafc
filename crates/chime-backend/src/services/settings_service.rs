use chime_bridge::MessageFromBackend;
use chime_bridge::notice::NoticeKind;
use chime_bridge::snapshot::SettingsSnapshot;
use chime_settings::{
    NotificationLevel, NotificationType, Provider, ScopeId, SettingsTree, default_change_patch,
    parent_change_patch, provider_change_patch,
};

use crate::store::StoreError;

/// Handles an incoming settings request (see
/// [`chime_bridge::MessageToBackend::SettingsRequest`]).
pub async fn handle_settings_request(context: super::AppContextHandle) {
    let settings = {
        let state = context.state.read().await;
        state.settings.clone()
    };
    context
        .send(MessageFromBackend::SettingsResponse(
            SettingsSnapshot::capture(&settings),
        ))
        .await;
}

/// Handles a provider-set change (see
/// [`chime_bridge::MessageToBackend::SetProviders`]).
pub async fn handle_set_providers(
    context: super::AppContextHandle,
    kind: NotificationType,
    providers: Vec<Provider>,
) {
    let settings = {
        let state = context.state.read().await;
        state.settings.clone()
    };

    let patch = match provider_change_patch(&kind, &settings, &providers) {
        Ok(patch) => patch,
        Err(e) => {
            log::warn!("Rejected provider change for {kind}: {e}");
            context
                .send_notice(NoticeKind::Error, format!("{kind}: {e}"))
                .await;
            return;
        }
    };

    commit_patch(&context, &kind, patch).await;
}

/// Handles a change of the user-wide default level (see
/// [`chime_bridge::MessageToBackend::SetDefaultLevel`]).
pub async fn handle_set_default_level(
    context: super::AppContextHandle,
    kind: NotificationType,
    level: NotificationLevel,
    parent_ids: Vec<ScopeId>,
) {
    let settings = {
        let state = context.state.read().await;
        state.settings.clone()
    };

    let patch = default_change_patch(&kind, &settings, level, &parent_ids);
    commit_patch(&context, &kind, patch).await;
}

/// Handles a change of a single parent-scoped row (see
/// [`chime_bridge::MessageToBackend::SetParentLevel`]).
pub async fn handle_set_parent_level(
    context: super::AppContextHandle,
    kind: NotificationType,
    parent_id: ScopeId,
    level: NotificationLevel,
) {
    let settings = {
        let state = context.state.read().await;
        state.settings.clone()
    };

    let patch = parent_change_patch(&kind, &settings, level, &parent_id);
    commit_patch(&context, &kind, patch).await;
}

/// Applies a reconciliation patch to the shared tree, persists it, and
/// pushes the result to the driver.
///
/// The in-memory tree is only replaced once the store write succeeded, so a
/// failed save leaves the previous settings intact.
async fn commit_patch(
    context: &super::AppContextHandle,
    kind: &NotificationType,
    patch: SettingsTree,
) {
    match apply_and_persist(context, patch).await {
        Ok(updated) => {
            log::info!("Saved notification settings for {kind}");
            context
                .send_notice(NoticeKind::Success, format!("Saved settings for {kind}"))
                .await;
            context
                .send(MessageFromBackend::SettingsResponse(
                    SettingsSnapshot::capture(&updated),
                ))
                .await;
        }
        Err(e) => {
            log::error!("Failed to persist settings for {kind}: {e}");
            context.send_notice(NoticeKind::Error, e.to_string()).await;
        }
    }
}

async fn apply_and_persist(
    context: &super::AppContextHandle,
    patch: SettingsTree,
) -> Result<SettingsTree, StoreError> {
    let updated = {
        let state = context.state.read().await;
        let mut tree = state.settings.clone();
        tree.apply(patch);
        tree
    };

    crate::store::save_settings(&updated).await?;

    let mut state = context.state.write().await;
    state.settings = updated.clone();
    Ok(updated)
}
