//! Precomputed view of the settings tree pushed to the driver.

use chime_settings::{
    current_providers, decide_default, is_everything_disabled, NotificationLevel,
    NotificationType, Provider, SettingsTree,
};

/// Notification types the driver always renders, whether or not the tree
/// has rows for them.
pub const CORE_TYPES: &[NotificationType] = &[
    NotificationType::Alerts,
    NotificationType::Deploy,
    NotificationType::Workflow,
];

/// The decided state of one notification type.
#[derive(Debug, Clone)]
pub struct TypeSummary {
    pub kind: NotificationType,
    /// The single effective level the form layer displays.
    pub default_level: NotificationLevel,
    /// Whether nothing at all is enabled for this type.
    pub disabled: bool,
    /// Providers currently delivering this type.
    pub providers: Vec<Provider>,
}

/// The current settings together with their decided per-type summaries.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    pub tree: SettingsTree,
    pub summaries: Vec<TypeSummary>,
}

impl SettingsSnapshot {
    /// Summarizes `tree`: the core types first, then any extra types the
    /// tree has rows for, each collapsed through the decision engine.
    pub fn capture(tree: &SettingsTree) -> Self {
        let mut kinds: Vec<NotificationType> = CORE_TYPES.to_vec();
        for kind in tree.kinds() {
            if !kinds.contains(kind) {
                kinds.push(kind.clone());
            }
        }

        let summaries = kinds
            .into_iter()
            .map(|kind| {
                let default_level = decide_default(&kind, tree);
                let disabled = is_everything_disabled(&kind, tree);
                let providers = current_providers(&kind, tree);
                TypeSummary {
                    kind,
                    default_level,
                    disabled,
                    providers,
                }
            })
            .collect();

        Self {
            tree: tree.clone(),
            summaries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_settings::{ScopeType, USER_SCOPE_ID};

    #[test]
    fn capture_always_covers_core_types() {
        let snapshot = SettingsSnapshot::capture(&SettingsTree::new());
        let kinds: Vec<&NotificationType> =
            snapshot.summaries.iter().map(|s| &s.kind).collect();
        assert_eq!(
            kinds,
            CORE_TYPES.iter().collect::<Vec<&NotificationType>>()
        );
    }

    #[test]
    fn capture_includes_extra_types_from_the_tree() {
        let mut tree = SettingsTree::new();
        tree.set(
            NotificationType::Other("quota".to_string()),
            ScopeType::User,
            USER_SCOPE_ID,
            Provider::Email,
            NotificationLevel::Always,
        );

        let snapshot = SettingsSnapshot::capture(&tree);
        let quota = snapshot
            .summaries
            .iter()
            .find(|s| s.kind.as_str() == "quota")
            .expect("extra type missing from snapshot");
        assert_eq!(quota.default_level, NotificationLevel::Always);
        assert!(!quota.disabled);
        assert_eq!(quota.providers, vec![Provider::Email]);
    }
}
