use crate::analysis::player_stats::PlayerId;
use crate::analysis::ranking::{DEFAULT_MIN_GAMES, DEFAULT_TOP_N};

/// Commands that only need a player id to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCommand {
    Profile,
    Top,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Profile(PlayerId),
    Top {
        player: PlayerId,
        min_games: u32,
        top_n: usize,
    },
    Hero {
        player: PlayerId,
        hero: String,
    },
}

impl PendingCommand {
    fn with_player(self, player: PlayerId) -> Command {
        match self {
            PendingCommand::Profile => Command::Profile(player),
            PendingCommand::Top => Command::Top {
                player,
                min_games: DEFAULT_MIN_GAMES,
                top_n: DEFAULT_TOP_N,
            },
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            PendingCommand::Profile => "Enter a player ID to fetch the profile.",
            PendingCommand::Top => "Enter a player ID to fetch the top heroes.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingPlayerId(PendingCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Prompt(String),
    Dispatch(Command),
    Help,
    Quit,
}

pub const INVALID_ID_PROMPT: &str = "Invalid player ID. It must be a number, try again.";
pub const HERO_USAGE: &str = "Usage: hero <player ID> <hero name or ID> (e.g. hero 123456789 Pudge)";

pub const HELP_TEXT: &str = "Available commands:
  profile [player ID]          overall stats for a player
  top [player ID]              best heroes of a player
  hero <player ID> <hero>      stats of a player on one hero
  help                         this message
  quit                         leave the session";

/// Line-oriented input state machine for the interactive session.
///
/// `profile` and `top` without an argument switch to waiting for a player id;
/// the next valid id dispatches the command and returns to idle, anything
/// else re-prompts.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn handle(&mut self, line: &str) -> SessionAction {
        let line = line.trim();

        if let SessionState::AwaitingPlayerId(pending) = self.state {
            return match line {
                "quit" | "exit" => self.quit(),
                "cancel" => {
                    self.state = SessionState::Idle;
                    SessionAction::Prompt("Cancelled.".to_string())
                }
                _ => match PlayerId::parse(line) {
                    Ok(player) => {
                        self.state = SessionState::Idle;
                        SessionAction::Dispatch(pending.with_player(player))
                    }
                    Err(_) => SessionAction::Prompt(INVALID_ID_PROMPT.to_string()),
                },
            };
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.trim_start_matches('/').to_lowercase();

        match word.as_str() {
            "profile" => self.single_id(PendingCommand::Profile, rest),
            "top" => self.single_id(PendingCommand::Top, rest),
            "hero" => hero_command(rest),
            "help" | "start" => SessionAction::Help,
            "quit" | "exit" => self.quit(),
            "" => SessionAction::Prompt(String::new()),
            other => SessionAction::Prompt(format!(
                "Unknown command '{}'. Type 'help' for the list of commands.",
                other
            )),
        }
    }

    fn single_id(&mut self, pending: PendingCommand, arg: &str) -> SessionAction {
        if arg.is_empty() {
            self.state = SessionState::AwaitingPlayerId(pending);
            return SessionAction::Prompt(pending.prompt().to_string());
        }
        match PlayerId::parse(arg) {
            Ok(player) => SessionAction::Dispatch(pending.with_player(player)),
            Err(_) => SessionAction::Prompt(INVALID_ID_PROMPT.to_string()),
        }
    }

    fn quit(&mut self) -> SessionAction {
        self.state = SessionState::Idle;
        SessionAction::Quit
    }
}

fn hero_command(args: &str) -> SessionAction {
    let Some((id, hero)) = args.split_once(char::is_whitespace) else {
        return SessionAction::Prompt(HERO_USAGE.to_string());
    };
    let hero = hero.trim();
    if hero.is_empty() {
        return SessionAction::Prompt(HERO_USAGE.to_string());
    }
    match PlayerId::parse(id) {
        Ok(player) => SessionAction::Dispatch(Command::Hero {
            player,
            hero: hero.to_string(),
        }),
        Err(_) => SessionAction::Prompt(INVALID_ID_PROMPT.to_string()),
    }
}
