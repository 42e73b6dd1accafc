//! Core vocabulary of the preference model: notification types, delivery
//! providers, scopes, and levels.
//!
//! All of these appear as keys or values in the settings tree, so each one
//! serializes as its plain string tag. The key types carry hand-written
//! serde impls because derived enum serialization cannot key TOML tables.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// Errors produced by the reconciliation functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A provider needed a fallback level, but neither the partial settings
    /// nor the notification type supplied one.
    #[error("no fallback level available to assign the requested providers")]
    MissingFallback,
    /// A level was looked up in a choice list that does not contain it.
    #[error("level `{0}` is missing from the choice list")]
    UnknownChoice(NotificationLevel),
    /// Failed to parse a provider tag.
    #[error("`{0}` is not a known provider")]
    UnknownProvider(String),
    /// Failed to parse a scope type tag.
    #[error("`{0}` is not a known scope type")]
    UnknownScope(String),
    /// Failed to parse a notification level tag.
    #[error("`{0}` is not a known notification level")]
    UnknownLevel(String),
}

/// Category of event a user can be notified about.
///
/// The set is open on the wire: tags this build does not recognize are kept
/// as [`NotificationType::Other`] so sparse trees survive a round trip
/// through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationType {
    /// Issue alert notifications.
    Alerts,
    /// Deploy notifications.
    Deploy,
    /// Workflow (issue state change) notifications.
    Workflow,
    /// Email routing for issue notifications.
    Email,
    /// A tag introduced by a newer producer than this build.
    Other(String),
}

impl NotificationType {
    /// String tag used on the wire and in the store.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alerts => "alerts",
            Self::Deploy => "deploy",
            Self::Workflow => "workflow",
            Self::Email => "email",
            Self::Other(tag) => tag,
        }
    }

    /// Whether settings of this type group under projects rather than
    /// organizations.
    pub fn is_grouped_by_project(&self) -> bool {
        matches!(self, Self::Alerts | Self::Email | Self::Workflow)
    }

    /// The scope that parent-specific overrides of this type live under.
    pub fn parent_scope(&self) -> ScopeType {
        if self.is_grouped_by_project() {
            ScopeType::Project
        } else {
            ScopeType::Organization
        }
    }

    /// Product-default level for this type, if it has one.
    ///
    /// Types without a fallback cannot synthesize enabled defaults; any
    /// operation that would need one reports
    /// [`SettingsError::MissingFallback`] instead.
    pub fn fallback_value(&self) -> Option<NotificationLevel> {
        match self {
            Self::Alerts => Some(NotificationLevel::Always),
            Self::Deploy => Some(NotificationLevel::CommittedOnly),
            Self::Workflow => Some(NotificationLevel::SubscribeOnly),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "alerts" => Self::Alerts,
            "deploy" => Self::Deploy,
            "workflow" => Self::Workflow,
            "email" => Self::Email,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    Email,
    Slack,
}

impl Provider {
    /// Every provider this build knows about. Backfilled provider mappings
    /// cover exactly this set.
    pub const ALL: &'static [Provider] = &[Provider::Email, Provider::Slack];

    /// String tag used on the wire and in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Slack => "slack",
        }
    }

    /// The level a provider rests at when nothing has been configured for
    /// it. Email inherits, Slack stays off until opted into.
    pub fn default_off(&self) -> NotificationLevel {
        match self {
            Self::Email => NotificationLevel::Default,
            Self::Slack => NotificationLevel::Never,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "slack" => Ok(Self::Slack),
            other => Err(SettingsError::UnknownProvider(other.to_string())),
        }
    }
}

/// The entity a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeType {
    /// The user globally. Rows under this scope use the id `"me"`.
    User,
    /// A specific project.
    Project,
    /// A specific organization.
    Organization,
}

impl ScopeType {
    /// String tag used on the wire and in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            "organization" => Ok(Self::Organization),
            other => Err(SettingsError::UnknownScope(other.to_string())),
        }
    }
}

/// Notification intensity stored at the leaves of the tree.
///
/// The precedence order used by the decision engine is `default < never <
/// always < subscribe_only < committed_only`. It carries no semantic
/// meaning of its own; it mirrors the backing store's historical numeric
/// encoding and exists purely as a tie-break rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationLevel {
    /// Inherit from the broader scope (or the product default).
    Default,
    /// Muted.
    Never,
    /// Notify on every event.
    Always,
    /// Notify only for subscribed issues.
    SubscribeOnly,
    /// Notify only for issues with the user's commits.
    CommittedOnly,
}

impl NotificationLevel {
    /// Position in the precedence table.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Never => 1,
            Self::Always => 2,
            Self::SubscribeOnly => 3,
            Self::CommittedOnly => 4,
        }
    }

    /// Highest-precedence level among `levels`, or [`Self::Default`] when
    /// the iterator is empty. Ties keep the earlier value.
    pub fn max_of(levels: impl IntoIterator<Item = NotificationLevel>) -> NotificationLevel {
        levels
            .into_iter()
            .fold(NotificationLevel::Default, |best, level| {
                if level.precedence() > best.precedence() {
                    level
                } else {
                    best
                }
            })
    }

    /// String tag used on the wire and in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Never => "never",
            Self::Always => "always",
            Self::SubscribeOnly => "subscribe_only",
            Self::CommittedOnly => "committed_only",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationLevel {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "subscribe_only" => Ok(Self::SubscribeOnly),
            "committed_only" => Ok(Self::CommittedOnly),
            other => Err(SettingsError::UnknownLevel(other.to_string())),
        }
    }
}

/// Level choices with the labels the form layer renders.
pub const LEVEL_CHOICES: &[(NotificationLevel, &str)] = &[
    (NotificationLevel::Default, "Default"),
    (NotificationLevel::Never, "Off"),
    (NotificationLevel::Always, "On"),
    (NotificationLevel::SubscribeOnly, "Subscribed issues only"),
    (NotificationLevel::CommittedOnly, "Committed issues only"),
];

/// Looks up the display label for `level` in a choice list.
///
/// A miss signals a programmer error (a choice list that does not cover the
/// stored value) and is not expected to be recovered at runtime.
pub fn choice_label<'a>(
    choices: &'a [(NotificationLevel, &'a str)],
    level: NotificationLevel,
) -> Result<&'a str, SettingsError> {
    choices
        .iter()
        .find(|(choice, _)| *choice == level)
        .map(|(_, label)| *label)
        .ok_or(SettingsError::UnknownChoice(level))
}

macro_rules! string_keyed_serde {
    ($type:ty) => {
        impl Serialize for $type {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct TagVisitor;

                impl Visitor<'_> for TagVisitor {
                    type Value = $type;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("a string tag")
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                        value.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(TagVisitor)
            }
        }
    };
}

string_keyed_serde!(NotificationType);
string_keyed_serde!(Provider);
string_keyed_serde!(ScopeType);
string_keyed_serde!(NotificationLevel);
