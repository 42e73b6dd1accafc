//! Plain-text rendering of snapshots and notices.

use std::fmt::Write;

use chime_bridge::notice::{Notice, NoticeKind};
use chime_bridge::snapshot::SettingsSnapshot;
use chime_settings::{LEVEL_CHOICES, NotificationLevel, ScopeType, choice_label};

/// Display label for a level, falling back to the raw tag for values the
/// choice list does not cover.
fn level_label(level: NotificationLevel) -> &'static str {
    choice_label(LEVEL_CHOICES, level).unwrap_or(level.as_str())
}

/// Renders a settings snapshot as an indented, two-section listing: the
/// decided default per type, then the stored parent overrides.
pub fn render_snapshot(snapshot: &SettingsSnapshot) -> String {
    let mut out = String::new();

    out.push_str("notification defaults:\n");
    for summary in &snapshot.summaries {
        let providers = if summary.providers.is_empty() {
            "-".to_string()
        } else {
            summary
                .providers
                .iter()
                .map(|provider| provider.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let state = if summary.disabled { "off" } else { "on" };
        let _ = writeln!(
            out,
            "  {:<12} {:<24} [{state}] via {providers}",
            summary.kind.to_string(),
            level_label(summary.default_level),
        );
    }

    let mut overrides = String::new();
    for (kind, scopes) in &snapshot.tree.0 {
        for (scope, rows) in scopes {
            if *scope == ScopeType::User {
                continue;
            }
            for (scope_id, providers) in rows {
                let levels = providers
                    .iter()
                    .map(|(provider, level)| format!("{provider}={level}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(overrides, "  {kind} {scope} {scope_id}: {levels}");
            }
        }
    }
    if !overrides.is_empty() {
        out.push_str("parent overrides:\n");
        out.push_str(&overrides);
    }

    out
}

/// Renders a notice as a single tagged line.
pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Warning => "warn",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}
