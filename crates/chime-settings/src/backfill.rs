//! Completing partial provider mappings against the known provider set.

use crate::tree::ProviderSettings;
use crate::types::{NotificationLevel, Provider, ScopeType, SettingsError};

/// Expands a partial provider mapping into one covering every provider in
/// [`Provider::ALL`].
///
/// Providers named in `active` receive the effective fallback; everything
/// else receives the scope's off value (`never` at the user scope, where an
/// explicit row must not accidentally re-enable a channel, `default`
/// elsewhere so the row keeps inheriting).
///
/// The effective fallback starts as `fallback` and is replaced by each
/// non-`never` value already present in `partial`, scanned in provider key
/// order — an existing enabled level wins over the caller's suggestion.
/// When an active provider needs the fallback and none exists, the whole
/// backfill fails rather than writing a meaningless level.
pub fn backfill_providers(
    partial: &ProviderSettings,
    active: &[Provider],
    fallback: Option<NotificationLevel>,
    scope: ScopeType,
) -> Result<ProviderSettings, SettingsError> {
    let mut effective = fallback;
    for level in partial.values() {
        if *level != NotificationLevel::Never {
            effective = Some(*level);
        }
    }

    let off = match scope {
        ScopeType::User => NotificationLevel::Never,
        _ => NotificationLevel::Default,
    };

    let mut complete = ProviderSettings::new();
    for provider in Provider::ALL {
        let level = if active.contains(provider) {
            effective.ok_or(SettingsError::MissingFallback)?
        } else {
            off
        };
        complete.insert(*provider, level);
    }
    Ok(complete)
}
