//! Player identity, serve side and per-player live state.

use crate::models::squash_match::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER1_COLOR: &str = "border-red-500";
pub const DEFAULT_PLAYER2_COLOR: &str = "border-blue-500";

/// Which of the two players.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Convert the UI's player number (1 or 2).
    pub fn from_number(n: u8) -> Result<Self, ValidationError> {
        match n {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(ValidationError::UnknownPlayer(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Service box the server serves from.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ServeSide {
    #[default]
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "L")]
    Left,
}

impl ServeSide {
    pub fn flip(self) -> Self {
        match self {
            ServeSide::Right => ServeSide::Left,
            ServeSide::Left => ServeSide::Right,
        }
    }
}

/// Live state of one player in the current game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub name: String,
    /// Opaque display tag chosen by the UI.
    pub color: String,
    pub score: u32,
    pub serving: bool,
    pub serve_side: ServeSide,
}

impl PlayerState {
    /// Fresh player with score 0 on the right box.
    pub fn new(name: impl Into<String>, color: impl Into<String>, serving: bool) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            score: 0,
            serving,
            serve_side: ServeSide::Right,
        }
    }

    /// Back to 0-0 for a new game, keeping name and colour.
    pub fn reset_for_game(&mut self, serving: bool) {
        self.score = 0;
        self.serving = serving;
        self.serve_side = ServeSide::Right;
    }
}
