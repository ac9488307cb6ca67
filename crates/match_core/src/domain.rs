use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(TileId);
id_newtype!(ImageId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Hidden,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileColor {
    Neutral,
    Matched,
}

/// Color the player picked at launch. Outlines every tile and fills matched ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerColor {
    Blue,
    Green,
    Magenta,
}

impl PlayerColor {
    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Magenta => "magenta",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            PlayerColor::Blue => [0, 0, 255],
            PlayerColor::Green => [0, 128, 0],
            PlayerColor::Magenta => [255, 0, 255],
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Neutral fill for tiles that have not been matched yet.
pub const NEUTRAL_RGB: [u8; 3] = [255, 255, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub starting_score: i32,
    /// Completed pairs that cost nothing.
    pub free_turns: u32,
    pub turn_penalty: i32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            starting_score: 100,
            free_turns: 13,
            turn_penalty: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: i32,
    pub turns: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game over!\nScore: {}\nNumber of tries: {}",
            self.score, self.turns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_colors_display_their_names() {
        assert_eq!(PlayerColor::Blue.to_string(), "blue");
        assert_eq!(PlayerColor::Green.to_string(), "green");
        assert_eq!(PlayerColor::Magenta.to_string(), "magenta");
    }

    #[test]
    fn default_rules_are_classic() {
        let rules = ScoreRules::default();
        assert_eq!(rules.starting_score, 100);
        assert_eq!(rules.free_turns, 13);
        assert_eq!(rules.turn_penalty, 10);
    }
}
