//! Builders for the partial trees a form interaction sends back to the
//! persistence layer.
//!
//! Each builder returns only the paths that changed, never the full tree;
//! the store applies them with [`SettingsTree::apply`] semantics. None of
//! them mutate their input.

use crate::backfill::backfill_providers;
use crate::decide::current_providers;
use crate::tree::{ProviderSettings, ScopeId, SettingsTree, USER_SCOPE_ID};
use crate::types::{NotificationLevel, NotificationType, Provider, ScopeType, SettingsError};

/// Patch for a change to the set of delivery providers.
///
/// Every row already stored for `kind` is backfilled against the new
/// provider list so each row keeps covering the full provider set; rows of
/// other types are left out of the patch entirely. When `kind` has no rows
/// yet, a single user-scope row is synthesized mapping each requested
/// provider to the type's fallback level — a type without one cannot be
/// enabled this way and reports [`SettingsError::MissingFallback`].
pub fn provider_change_patch(
    kind: &NotificationType,
    tree: &SettingsTree,
    providers: &[Provider],
) -> Result<SettingsTree, SettingsError> {
    let fallback = kind.fallback_value();
    let mut patch = SettingsTree::new();

    match tree.scopes(kind) {
        Some(scopes) if !scopes.is_empty() => {
            for (scope, rows) in scopes {
                for (scope_id, partial) in rows {
                    let complete = backfill_providers(partial, providers, fallback, *scope)?;
                    patch.insert_row(kind.clone(), *scope, scope_id.clone(), complete);
                }
            }
        }
        _ => {
            let level = fallback.ok_or(SettingsError::MissingFallback)?;
            let row: ProviderSettings = providers
                .iter()
                .map(|provider| (*provider, level))
                .collect();
            patch.insert_row(kind.clone(), ScopeType::User, USER_SCOPE_ID, row);
        }
    }

    Ok(patch)
}

/// Patch for a change to the user-wide default level.
///
/// Every currently-active provider (email alone when none are active) is
/// set to `level` at the user scope. Muting — `level == never` — also
/// resets every row in `parent_ids` under the type's parent scope back to
/// `default`, so stale per-project or per-organization overrides cannot
/// keep a muted type alive.
pub fn default_change_patch(
    kind: &NotificationType,
    tree: &SettingsTree,
    level: NotificationLevel,
    parent_ids: &[ScopeId],
) -> SettingsTree {
    let mut active = current_providers(kind, tree);
    if active.is_empty() {
        active.push(Provider::Email);
    }

    let mut patch = SettingsTree::new();
    let user_row: ProviderSettings = active.iter().map(|provider| (*provider, level)).collect();
    patch.insert_row(kind.clone(), ScopeType::User, USER_SCOPE_ID, user_row);

    if level == NotificationLevel::Never {
        let parent_scope = kind.parent_scope();
        for parent_id in parent_ids {
            let reset: ProviderSettings = active
                .iter()
                .map(|provider| (*provider, NotificationLevel::Default))
                .collect();
            patch.insert_row(kind.clone(), parent_scope, parent_id.clone(), reset);
        }
    }

    patch
}

/// Patch for a change to one parent-scoped row: every currently-active
/// provider is set to `level` at exactly that row.
pub fn parent_change_patch(
    kind: &NotificationType,
    tree: &SettingsTree,
    level: NotificationLevel,
    parent_id: &str,
) -> SettingsTree {
    let row: ProviderSettings = current_providers(kind, tree)
        .into_iter()
        .map(|provider| (provider, level))
        .collect();

    let mut patch = SettingsTree::new();
    patch.insert_row(kind.clone(), kind.parent_scope(), parent_id, row);
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NotificationLevel as Level, NotificationType as Kind};

    fn row(entries: &[(Provider, Level)]) -> ProviderSettings {
        entries.iter().copied().collect()
    }

    #[test]
    fn provider_change_backfills_existing_rows_only() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[(Provider::Email, Level::Always)]),
        );
        tree.insert_row(
            Kind::Alerts,
            ScopeType::Project,
            "1",
            row(&[(Provider::Email, Level::SubscribeOnly)]),
        );

        let patch =
            provider_change_patch(&Kind::Alerts, &tree, &[Provider::Email, Provider::Slack])
                .unwrap();

        // Both existing rows are rewritten with the full provider set, the
        // enabled value carried over as the fallback.
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::User, USER_SCOPE_ID),
            Some(&row(&[
                (Provider::Email, Level::Always),
                (Provider::Slack, Level::Always),
            ]))
        );
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::Project, "1"),
            Some(&row(&[
                (Provider::Email, Level::SubscribeOnly),
                (Provider::Slack, Level::SubscribeOnly),
            ]))
        );
    }

    #[test]
    fn provider_change_synthesizes_user_row_for_untouched_type() {
        let patch = provider_change_patch(
            &Kind::Alerts,
            &SettingsTree::new(),
            &[Provider::Email, Provider::Slack],
        )
        .unwrap();
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::User, USER_SCOPE_ID),
            Some(&row(&[
                (Provider::Email, Level::Always),
                (Provider::Slack, Level::Always),
            ]))
        );
    }

    #[test]
    fn provider_change_without_fallback_is_an_error() {
        let err = provider_change_patch(
            &Kind::Other("quota".to_string()),
            &SettingsTree::new(),
            &[Provider::Email],
        )
        .unwrap_err();
        assert_eq!(err, SettingsError::MissingFallback);
    }

    #[test]
    fn default_change_sets_active_providers_at_user_scope() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[
                (Provider::Email, Level::Always),
                (Provider::Slack, Level::Always),
            ]),
        );

        let patch = default_change_patch(&Kind::Alerts, &tree, Level::SubscribeOnly, &[]);
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::User, USER_SCOPE_ID),
            Some(&row(&[
                (Provider::Email, Level::SubscribeOnly),
                (Provider::Slack, Level::SubscribeOnly),
            ]))
        );
    }

    #[test]
    fn default_change_falls_back_to_email_when_nothing_active() {
        let patch = default_change_patch(&Kind::Alerts, &SettingsTree::new(), Level::Always, &[]);
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::User, USER_SCOPE_ID),
            Some(&row(&[(Provider::Email, Level::Always)]))
        );
    }

    #[test]
    fn muting_the_default_resets_every_parent_row() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[
                (Provider::Email, Level::Always),
                (Provider::Slack, Level::Always),
            ]),
        );

        let patch = default_change_patch(
            &Kind::Alerts,
            &tree,
            Level::Never,
            &["10".to_string(), "20".to_string()],
        );

        for parent_id in ["10", "20"] {
            assert_eq!(
                patch.providers_at(&Kind::Alerts, ScopeType::Project, parent_id),
                Some(&row(&[
                    (Provider::Email, Level::Default),
                    (Provider::Slack, Level::Default),
                ]))
            );
        }
    }

    #[test]
    fn non_muting_default_change_leaves_parents_alone() {
        let patch = default_change_patch(
            &Kind::Alerts,
            &SettingsTree::new(),
            Level::Always,
            &["10".to_string()],
        );
        assert_eq!(
            patch.providers_at(&Kind::Alerts, ScopeType::Project, "10"),
            None
        );
    }

    #[test]
    fn parent_change_touches_exactly_one_row() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Deploy,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[(Provider::Email, Level::CommittedOnly)]),
        );

        let patch = parent_change_patch(&Kind::Deploy, &tree, Level::Never, "42");
        assert_eq!(
            patch.providers_at(&Kind::Deploy, ScopeType::Organization, "42"),
            Some(&row(&[(Provider::Email, Level::Never)]))
        );
        assert_eq!(patch.scopes(&Kind::Deploy).unwrap().len(), 1);
    }
}
