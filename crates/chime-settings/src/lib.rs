//! Pure reconciliation engine for notification preference trees.
//!
//! This crate owns the settings model — who gets notified, over which
//! provider, at which scope — and the functions that transform it:
//!
//! - The [`SettingsTree`]: a sparse `type → scope → id → provider → level`
//!   mapping with right-biased merge semantics.
//! - [`backfill_providers`]: completing a partial provider mapping against
//!   the full provider set.
//! - [`decide_default`] and friends: collapsing a tree into the single
//!   effective level the form layer displays.
//! - The patch builders in [`patch`]: computing the minimal partial tree a
//!   form interaction sends back to the persistence layer.
//!
//! Everything here is synchronous, allocation-light, and free of I/O; the
//! backend crate wires these functions to the store and the bridge.

mod backfill;
mod decide;
mod patch;
mod tree;
mod types;

pub use crate::backfill::backfill_providers;
pub use crate::decide::{
    current_providers, decide_default, is_everything_disabled, user_default_values,
};
pub use crate::patch::{default_change_patch, parent_change_patch, provider_change_patch};
pub use crate::tree::{
    merge_settings, ProviderSettings, ScopeId, ScopeRows, ScopeSettings, SettingsTree,
    USER_SCOPE_ID,
};
pub use crate::types::{
    choice_label, NotificationLevel, NotificationType, Provider, ScopeType, SettingsError,
    LEVEL_CHOICES,
};
