//! The settings tree and its merge semantics.
//!
//! A tree is a sparse, four-level mapping from notification type down to a
//! per-provider level. It is a plain value: fetched from the store, read by
//! the form layer, and patched by the builders in [`crate::patch`]. Patches
//! are themselves trees containing only the paths that changed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{NotificationLevel, NotificationType, Provider, ScopeType};

/// Opaque scope identifier: `"me"` for the user scope, a project or
/// organization id otherwise.
pub type ScopeId = String;

/// Scope id the persistence layer resolves to the current user.
pub const USER_SCOPE_ID: &str = "me";

/// Levels keyed by provider — the leaf mapping of the tree.
pub type ProviderSettings = BTreeMap<Provider, NotificationLevel>;

/// Provider mappings keyed by scope id.
pub type ScopeRows = BTreeMap<ScopeId, ProviderSettings>;

/// Rows grouped by the scope type they apply to.
pub type ScopeSettings = BTreeMap<ScopeType, ScopeRows>;

/// Sparse notification settings, keyed by notification type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsTree(pub BTreeMap<NotificationType, ScopeSettings>);

impl SettingsTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Notification types with at least one stored row.
    pub fn kinds(&self) -> impl Iterator<Item = &NotificationType> {
        self.0.keys()
    }

    /// All rows stored for a notification type.
    pub fn scopes(&self, kind: &NotificationType) -> Option<&ScopeSettings> {
        self.0.get(kind)
    }

    /// The rows of one scope type under a notification type.
    pub fn rows(&self, kind: &NotificationType, scope: ScopeType) -> Option<&ScopeRows> {
        self.0.get(kind).and_then(|scopes| scopes.get(&scope))
    }

    /// The provider mapping at one fully-qualified path.
    pub fn providers_at(
        &self,
        kind: &NotificationType,
        scope: ScopeType,
        scope_id: &str,
    ) -> Option<&ProviderSettings> {
        self.rows(kind, scope).and_then(|rows| rows.get(scope_id))
    }

    /// The user-scope row for a notification type.
    ///
    /// Only one row, keyed [`USER_SCOPE_ID`], is expected under the user
    /// scope. Should the store ever return more, the `"me"` row wins and
    /// otherwise the first row in key order is used — deliberately not the
    /// last, so a duplicate row cannot silently shadow the canonical one.
    pub fn user_row(&self, kind: &NotificationType) -> Option<&ProviderSettings> {
        let rows = self.rows(kind, ScopeType::User)?;
        rows.get(USER_SCOPE_ID).or_else(|| rows.values().next())
    }

    /// Replaces the provider mapping at one path, creating intermediate
    /// levels as needed.
    pub fn insert_row(
        &mut self,
        kind: NotificationType,
        scope: ScopeType,
        scope_id: impl Into<ScopeId>,
        providers: ProviderSettings,
    ) {
        self.0
            .entry(kind)
            .or_default()
            .entry(scope)
            .or_default()
            .insert(scope_id.into(), providers);
    }

    /// Sets a single provider's level at one path.
    pub fn set(
        &mut self,
        kind: NotificationType,
        scope: ScopeType,
        scope_id: impl Into<ScopeId>,
        provider: Provider,
        level: NotificationLevel,
    ) {
        self.0
            .entry(kind)
            .or_default()
            .entry(scope)
            .or_default()
            .entry(scope_id.into())
            .or_default()
            .insert(provider, level);
    }

    /// Merges `patch` into this tree.
    ///
    /// Right-biased per path: every `(type, scope, scope id)` row present
    /// in the patch replaces this tree's row wholesale. Provider mappings
    /// are never unioned — a patched row is the complete new truth for that
    /// path. Paths the patch does not mention are untouched.
    pub fn apply(&mut self, patch: SettingsTree) {
        for (kind, scopes) in patch.0 {
            for (scope, rows) in scopes {
                for (scope_id, providers) in rows {
                    self.insert_row(kind.clone(), scope, scope_id, providers);
                }
            }
        }
    }
}

/// Folds an ordered sequence of partial trees into one, later trees
/// overwriting earlier ones per [`SettingsTree::apply`].
pub fn merge_settings(trees: impl IntoIterator<Item = SettingsTree>) -> SettingsTree {
    let mut merged = SettingsTree::new();
    for tree in trees {
        merged.apply(tree);
    }
    merged
}
