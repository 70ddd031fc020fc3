//! Player commands and menu choices.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the six things a farmer can do with their Bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Give food.
    Feed,
    /// Let the Bean rest.
    Rest,
    /// Play together.
    Play,
    /// Treat the Bean. The only command an exhausted Bean accepts.
    Heal,
    /// Take the Bean outside.
    GoOut,
    /// Put the Bean to work.
    Work,
}

impl Command {
    /// Menu order.
    pub const ALL: [Command; 6] = [
        Self::Feed,
        Self::Rest,
        Self::Play,
        Self::Heal,
        Self::GoOut,
        Self::Work,
    ];

    /// Key looked up in the action tables.
    #[must_use]
    pub fn action_key(self) -> &'static str {
        match self {
            Self::Feed => "eat",
            Self::Rest => "rest",
            Self::Play => "play",
            Self::Heal => "heal",
            Self::GoOut => "goOut",
            Self::Work => "work",
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Rest => "Rest",
            Self::Play => "Play",
            Self::Heal => "Heal",
            Self::GoOut => "Go out",
            Self::Work => "Work",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A line typed at the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Spend a turn on a command.
    Act(Command),
    /// Show the Bean's status. Free.
    Status,
    /// Save and leave.
    Quit,
    /// Throw the current game away and start over.
    NewGame,
}

/// Input that is not a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu choice: {0:?}")]
pub struct UnknownChoice(pub String);

impl FromStr for MenuChoice {
    type Err = UnknownChoice;

    /// Accepts the menu number (`1`..`9`) or a word such as `feed` or `quit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        let choice = match input.as_str() {
            "1" | "feed" | "eat" => Self::Act(Command::Feed),
            "2" | "rest" => Self::Act(Command::Rest),
            "3" | "play" => Self::Act(Command::Play),
            "4" | "heal" => Self::Act(Command::Heal),
            "5" | "go out" | "goout" | "out" => Self::Act(Command::GoOut),
            "6" | "work" => Self::Act(Command::Work),
            "7" | "status" => Self::Status,
            "8" | "quit" | "exit" => Self::Quit,
            "9" | "new" | "new game" => Self::NewGame,
            _ => return Err(UnknownChoice(s.trim().to_string())),
        };
        Ok(choice)
    }
}

/// The menu text, numbered to match [`MenuChoice`]'s parser.
#[must_use]
pub fn menu_text() -> String {
    let mut lines: Vec<String> = Command::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.label()))
        .collect();
    lines.push("7. Status".to_string());
    lines.push("8. Save and quit".to_string());
    lines.push("9. New game".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_words_parse() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::Act(Command::Feed)));
        assert_eq!(" Go Out ".parse::<MenuChoice>(), Ok(MenuChoice::Act(Command::GoOut)));
        assert_eq!("7".parse::<MenuChoice>(), Ok(MenuChoice::Status));
        assert_eq!("QUIT".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
        assert_eq!("9".parse::<MenuChoice>(), Ok(MenuChoice::NewGame));
        assert!("0".parse::<MenuChoice>().is_err());
        assert!("dance".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn action_keys_match_table_keys() {
        let keys: Vec<_> = Command::ALL.iter().map(|c| c.action_key()).collect();
        assert_eq!(keys, ["eat", "rest", "play", "heal", "goOut", "work"]);
    }

    #[test]
    fn menu_numbers_round_trip() {
        let menu = menu_text();
        for (i, command) in Command::ALL.iter().enumerate() {
            let number = (i + 1).to_string();
            assert!(menu.contains(&format!("{number}. {}", command.label())));
            assert_eq!(number.parse::<MenuChoice>(), Ok(MenuChoice::Act(*command)));
        }
    }
}
