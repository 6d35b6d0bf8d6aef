//! REPL command grammar. Status aliases are resolved here, at the
//! boundary; the core only ever sees the closed `TaskStatus` enum.

use kanban_core::TaskStatus;

pub const MV_USAGE: &str = "Usage: mv <id> <status>; statuses: t/ip/d";
pub const RM_USAGE: &str = "Usage: rm <id>";
pub const UNKNOWN: &str = "Unknown command. Type 'help' for instructions.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <title...>`; `None` asks the caller to prompt for a title.
    Add(Option<String>),
    Move { id: u64, status: TaskStatus },
    /// `move` with no arguments: interactive prompts.
    MovePrompt,
    /// `rm <id>` / `remove <id>`; `None` asks the caller to prompt.
    Remove(Option<u64>),
    /// Empty input: no mutation, but still a full cleanup + render cycle.
    Redraw,
    Help,
    Exit,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = tokens.split_first() else {
        return Ok(Command::Redraw);
    };

    match verb.to_lowercase().as_str() {
        "add" | "a" => {
            if args.is_empty() {
                Ok(Command::Add(None))
            } else {
                Ok(Command::Add(Some(args.join(" "))))
            }
        }
        "mv" => parse_move(args).ok_or_else(|| MV_USAGE.to_string()),
        "move" => {
            if args.is_empty() {
                Ok(Command::MovePrompt)
            } else {
                parse_move(args).ok_or_else(|| MV_USAGE.to_string())
            }
        }
        "rm" => match args {
            [id] => parse_id(id)
                .map(|id| Command::Remove(Some(id)))
                .ok_or_else(|| RM_USAGE.to_string()),
            _ => Err(RM_USAGE.to_string()),
        },
        "remove" | "del" => match args {
            [] => Ok(Command::Remove(None)),
            [id] => parse_id(id)
                .map(|id| Command::Remove(Some(id)))
                .ok_or_else(|| RM_USAGE.to_string()),
            _ => Err(RM_USAGE.to_string()),
        },
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        _ => Err(UNKNOWN.to_string()),
    }
}

/// Resolve a status token through the alias table (`t`, `ip`, `d`, the
/// full spellings, and the legacy `doing`).
pub fn parse_status(token: &str) -> Option<TaskStatus> {
    token.parse::<TaskStatus>().ok()
}

fn parse_move(args: &[&str]) -> Option<Command> {
    let [id, status] = args else {
        return None;
    };
    let id = parse_id(id)?;
    let status = parse_status(status)?;
    Some(Command::Move { id, status })
}

/// Task ids as typed by the user; a trailing dot is tolerated so that
/// `rm 2.` (copied from the rendered `2. ` label) still works.
fn parse_id(token: &str) -> Option<u64> {
    token.trim_end_matches('.').parse::<u64>().ok()
}

pub fn help_lines() -> Vec<&'static str> {
    vec![
        "Commands:",
        "  add                 Add a new task (prompts for title)",
        "  add <title...>      Shorthand add with inline title (e.g., add write report)",
        "  move                Move a task (interactive prompts)",
        "  mv <id> <status>    Shorthand move; status aliases: t (todo), ip (in-progress), d (done)",
        "  rm <id>             Shorthand remove by id (e.g., rm 2)",
        "  remove              Remove a task by id (prompts or 'remove <id>')",
        "  help                Show this help (press Enter to return)",
        "  exit                Save and exit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_redraw() {
        assert_eq!(parse("").unwrap(), Command::Redraw);
        assert_eq!(parse("   ").unwrap(), Command::Redraw);
    }

    #[test]
    fn add_with_inline_title_joins_the_words() {
        assert_eq!(
            parse("add write the report").unwrap(),
            Command::Add(Some("write the report".to_string()))
        );
        assert_eq!(parse("a quick note").unwrap(), Command::Add(Some("quick note".to_string())));
    }

    #[test]
    fn bare_add_requests_a_prompt() {
        assert_eq!(parse("add").unwrap(), Command::Add(None));
    }

    #[test]
    fn mv_resolves_status_aliases() {
        assert_eq!(
            parse("mv 3 d").unwrap(),
            Command::Move { id: 3, status: TaskStatus::Done }
        );
        assert_eq!(
            parse("mv 1 ip").unwrap(),
            Command::Move { id: 1, status: TaskStatus::InProgress }
        );
        assert_eq!(
            parse("move 2 todo").unwrap(),
            Command::Move { id: 2, status: TaskStatus::Todo }
        );
        assert_eq!(
            parse("mv 2 doing").unwrap(),
            Command::Move { id: 2, status: TaskStatus::InProgress }
        );
    }

    #[test]
    fn malformed_mv_yields_usage() {
        assert_eq!(parse("mv").unwrap_err(), MV_USAGE);
        assert_eq!(parse("mv 1").unwrap_err(), MV_USAGE);
        assert_eq!(parse("mv one done").unwrap_err(), MV_USAGE);
        assert_eq!(parse("mv 1 urgent").unwrap_err(), MV_USAGE);
    }

    #[test]
    fn rm_accepts_a_trailing_dot_on_the_id() {
        assert_eq!(parse("rm 2.").unwrap(), Command::Remove(Some(2)));
        assert_eq!(parse("remove 7").unwrap(), Command::Remove(Some(7)));
        assert_eq!(parse("remove").unwrap(), Command::Remove(None));
        assert_eq!(parse("rm two").unwrap_err(), RM_USAGE);
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse("ADD milk").unwrap(), Command::Add(Some("milk".to_string())));
        assert_eq!(parse("Exit").unwrap(), Command::Exit);
        assert_eq!(parse("QUIT").unwrap(), Command::Exit);
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert_eq!(parse("frobnicate 1").unwrap_err(), UNKNOWN);
    }
}
