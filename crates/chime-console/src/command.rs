//! Parsing of the driver's line commands.

use anyhow::bail;
use chime_settings::{NotificationLevel, NotificationType, Provider, ScopeId};

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current settings snapshot.
    ShowSettings,
    /// Replace the provider set for a notification type.
    SetProviders {
        kind: NotificationType,
        providers: Vec<Provider>,
    },
    /// Change the user-wide default level, optionally resetting parents.
    SetDefault {
        kind: NotificationType,
        level: NotificationLevel,
        parent_ids: Vec<ScopeId>,
    },
    /// Change one project/organization row.
    SetParent {
        kind: NotificationType,
        parent_id: ScopeId,
        level: NotificationLevel,
    },
    /// Print the usage summary.
    Help,
    /// Leave the console.
    Quit,
}

/// Usage summary printed by `help` and on startup.
pub const USAGE: &str = "\
commands:
  settings                          show current settings
  providers <type> <p1,p2|none>     set delivery providers for a type
  default <type> <level> [id,id]    set the user-wide default level;
                                    with level `never`, the listed parent
                                    rows are reset to inherit
  parent <type> <id> <level>        set the level of one parent row
  help                              show this message
  quit                              exit";

/// Parses a single input line into a [`Command`].
pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command; try `help`");
    };

    let command = match verb {
        "settings" | "show" => Command::ShowSettings,
        "providers" => {
            let kind = parse_kind(words.next())?;
            let providers = match words.next() {
                Some("none") => Vec::new(),
                Some(list) => list
                    .split(',')
                    .map(|tag| tag.parse::<Provider>())
                    .collect::<Result<_, _>>()?,
                None => bail!("usage: providers <type> <p1,p2|none>"),
            };
            Command::SetProviders { kind, providers }
        }
        "default" => {
            let kind = parse_kind(words.next())?;
            let level = parse_level(words.next())?;
            let parent_ids = words
                .next()
                .map(|list| list.split(',').map(str::to_string).collect())
                .unwrap_or_default();
            Command::SetDefault {
                kind,
                level,
                parent_ids,
            }
        }
        "parent" => {
            let kind = parse_kind(words.next())?;
            let Some(parent_id) = words.next() else {
                bail!("usage: parent <type> <id> <level>");
            };
            let level = parse_level(words.next())?;
            Command::SetParent {
                kind,
                parent_id: parent_id.to_string(),
                level,
            }
        }
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command `{other}`; try `help`"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument `{extra}`");
    }
    Ok(command)
}

fn parse_kind(word: Option<&str>) -> anyhow::Result<NotificationType> {
    match word {
        // The tag set is open, so this never fails on content.
        Some(tag) => Ok(tag.parse().expect("notification type parsing is total")),
        None => bail!("missing notification type"),
    }
}

fn parse_level(word: Option<&str>) -> anyhow::Result<NotificationLevel> {
    match word {
        Some(tag) => Ok(tag.parse()?),
        None => bail!("missing notification level"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_settings::{NotificationLevel as Level, NotificationType as Kind};

    #[test]
    fn parses_provider_changes() {
        assert_eq!(
            parse_command("providers alerts email,slack").unwrap(),
            Command::SetProviders {
                kind: Kind::Alerts,
                providers: vec![Provider::Email, Provider::Slack],
            }
        );
        assert_eq!(
            parse_command("providers alerts none").unwrap(),
            Command::SetProviders {
                kind: Kind::Alerts,
                providers: vec![],
            }
        );
    }

    #[test]
    fn parses_default_changes_with_and_without_parents() {
        assert_eq!(
            parse_command("default workflow subscribe_only").unwrap(),
            Command::SetDefault {
                kind: Kind::Workflow,
                level: Level::SubscribeOnly,
                parent_ids: vec![],
            }
        );
        assert_eq!(
            parse_command("default alerts never 10,20").unwrap(),
            Command::SetDefault {
                kind: Kind::Alerts,
                level: Level::Never,
                parent_ids: vec!["10".to_string(), "20".to_string()],
            }
        );
    }

    #[test]
    fn parses_parent_changes() {
        assert_eq!(
            parse_command("parent deploy 42 committed_only").unwrap(),
            Command::SetParent {
                kind: Kind::Deploy,
                parent_id: "42".to_string(),
                level: Level::CommittedOnly,
            }
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("providers alerts").is_err());
        assert!(parse_command("default alerts loudly").is_err());
        assert!(parse_command("parent deploy 42 never extra").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
