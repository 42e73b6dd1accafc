//! Deriving the effective "default" level the form layer displays for a
//! notification type.

use crate::tree::{ProviderSettings, SettingsTree};
use crate::types::{NotificationLevel, NotificationType, Provider};

/// Providers currently delivering this notification type: the user-scope
/// row's entries that are not `never`. Empty when no user-scope data
/// exists. See [`SettingsTree::user_row`] for the single-row assumption.
pub fn current_providers(kind: &NotificationType, tree: &SettingsTree) -> Vec<Provider> {
    tree.user_row(kind)
        .map(|row| {
            row.iter()
                .filter(|(_, level)| **level != NotificationLevel::Never)
                .map(|(provider, _)| *provider)
                .collect()
        })
        .unwrap_or_default()
}

/// The user-scope provider mapping, or a synthesized one when the user has
/// never saved a row for this type.
///
/// Synthesis starts from each provider's off value; where that value is
/// `default`, the type's product fallback takes its place (types without a
/// fallback keep `default` there, which the decision fold treats as the
/// bottom of the precedence order).
pub fn user_default_values(kind: &NotificationType, tree: &SettingsTree) -> ProviderSettings {
    if let Some(row) = tree.user_row(kind) {
        return row.clone();
    }

    Provider::ALL
        .iter()
        .map(|provider| {
            let off = provider.default_off();
            let level = if off == NotificationLevel::Default {
                kind.fallback_value().unwrap_or(NotificationLevel::Default)
            } else {
                off
            };
            (*provider, level)
        })
        .collect()
}

/// The single effective default level for a notification type.
///
/// The user's own row is consulted first: its highest-precedence value
/// wins outright unless it is `never`. A muted user row still has to
/// surface whatever parent-scoped overrides exist, so in that case the
/// fold repeats across every row under the type's parent scope; a result
/// of `default` there means nothing is actually enabled and reads back as
/// `never`.
pub fn decide_default(kind: &NotificationType, tree: &SettingsTree) -> NotificationLevel {
    let parent_independent =
        NotificationLevel::max_of(user_default_values(kind, tree).into_values());
    if parent_independent != NotificationLevel::Never {
        return parent_independent;
    }

    let parent_specific = NotificationLevel::max_of(
        tree.rows(kind, kind.parent_scope())
            .into_iter()
            .flat_map(|rows| rows.values())
            .flat_map(|providers| providers.values().copied()),
    );
    if parent_specific == NotificationLevel::Default {
        NotificationLevel::Never
    } else {
        parent_specific
    }
}

/// Whether nothing at all is enabled for this type.
pub fn is_everything_disabled(kind: &NotificationType, tree: &SettingsTree) -> bool {
    matches!(
        decide_default(kind, tree),
        NotificationLevel::Never | NotificationLevel::Default
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::USER_SCOPE_ID;
    use crate::types::{NotificationLevel as Level, NotificationType as Kind, ScopeType};

    fn row(entries: &[(Provider, Level)]) -> ProviderSettings {
        entries.iter().copied().collect()
    }

    fn quota() -> Kind {
        Kind::Other("quota".to_string())
    }

    #[test]
    fn current_providers_skips_muted_entries() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[
                (Provider::Email, Level::Always),
                (Provider::Slack, Level::Never),
            ]),
        );
        assert_eq!(
            current_providers(&Kind::Alerts, &tree),
            vec![Provider::Email]
        );
    }

    #[test]
    fn current_providers_empty_without_user_row() {
        assert!(current_providers(&Kind::Alerts, &SettingsTree::new()).is_empty());
    }

    #[test]
    fn user_defaults_synthesized_from_fallback() {
        // Email's off value is `default`, so the product fallback fills it
        // in; Slack stays muted.
        let values = user_default_values(&Kind::Deploy, &SettingsTree::new());
        assert_eq!(values[&Provider::Email], Level::CommittedOnly);
        assert_eq!(values[&Provider::Slack], Level::Never);
    }

    #[test]
    fn user_defaults_without_fallback_stay_default() {
        let values = user_default_values(&quota(), &SettingsTree::new());
        assert_eq!(values[&Provider::Email], Level::Default);
        assert_eq!(values[&Provider::Slack], Level::Never);
    }

    #[test]
    fn user_override_wins_over_parent_rows() {
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
            row(&[(Provider::Email, Level::Never)]),
        );
        assert_eq!(decide_default(&Kind::Alerts, &tree), Level::Always);
    }

    #[test]
    fn muted_user_row_falls_back_to_parent_rows() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[(Provider::Email, Level::Never)]),
        );
        tree.insert_row(
            Kind::Alerts,
            ScopeType::Project,
            "1",
            row(&[(Provider::Email, Level::SubscribeOnly)]),
        );
        assert_eq!(decide_default(&Kind::Alerts, &tree), Level::SubscribeOnly);
    }

    #[test]
    fn muted_user_row_with_inheriting_parents_reads_never() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[
                (Provider::Email, Level::Never),
                (Provider::Slack, Level::Never),
            ]),
        );
        tree.insert_row(
            Kind::Alerts,
            ScopeType::Project,
            "1",
            row(&[(Provider::Email, Level::Default)]),
        );
        assert_eq!(decide_default(&Kind::Alerts, &tree), Level::Never);
    }

    #[test]
    fn parent_rows_of_other_scope_are_ignored() {
        // Deploy groups by organization; a project row must not count.
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Deploy,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[(Provider::Email, Level::Never)]),
        );
        tree.insert_row(
            Kind::Deploy,
            ScopeType::Project,
            "1",
            row(&[(Provider::Email, Level::Always)]),
        );
        assert_eq!(decide_default(&Kind::Deploy, &tree), Level::Never);
    }

    #[test]
    fn empty_tree_decides_the_product_fallback() {
        assert_eq!(
            decide_default(&Kind::Deploy, &SettingsTree::new()),
            Level::CommittedOnly
        );
        assert!(!is_everything_disabled(&Kind::Deploy, &SettingsTree::new()));
    }

    #[test]
    fn empty_tree_without_fallback_is_fully_muted() {
        assert_eq!(decide_default(&quota(), &SettingsTree::new()), Level::Never);
        assert!(is_everything_disabled(&quota(), &SettingsTree::new()));
    }

    #[test]
    fn explicit_default_user_row_is_disabled() {
        let mut tree = SettingsTree::new();
        tree.insert_row(
            Kind::Alerts,
            ScopeType::User,
            USER_SCOPE_ID,
            row(&[(Provider::Email, Level::Default)]),
        );
        assert_eq!(decide_default(&Kind::Alerts, &tree), Level::Default);
        assert!(is_everything_disabled(&Kind::Alerts, &tree));
    }
}
