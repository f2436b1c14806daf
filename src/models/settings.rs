//! Match rules and the bundle used to start a match.

use crate::models::player::{DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR};
use crate::models::squash_match::ValidationError;
use serde::{Deserialize, Serialize};

/// Scoring rules for a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSettings {
    /// 11 or 15.
    pub points_to_win: u32,
    /// Win by this many clear points (1 or 2).
    pub clear_points: u32,
    /// Odd number of games.
    pub best_of: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            points_to_win: 15,
            clear_points: 2,
            best_of: 5,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !matches!(self.points_to_win, 11 | 15) {
            return Err(ValidationError::PointsToWin(self.points_to_win));
        }
        if !matches!(self.clear_points, 1 | 2) {
            return Err(ValidationError::ClearPoints(self.clear_points));
        }
        if self.best_of == 0 || self.best_of % 2 == 0 {
            return Err(ValidationError::BestOf(self.best_of));
        }
        Ok(())
    }

    /// Games a player needs to take the match.
    pub fn games_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }

    /// True if `score` against `opponent_score` ends the game.
    pub fn is_winning_score(&self, score: u32, opponent_score: u32) -> bool {
        score >= self.points_to_win && score >= opponent_score + self.clear_points
    }
}

fn default_player1_color() -> String {
    DEFAULT_PLAYER1_COLOR.to_string()
}

fn default_player2_color() -> String {
    DEFAULT_PLAYER2_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

/// Everything needed to start a match (the setup screen's form).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    #[serde(default)]
    pub player1_name: String,
    #[serde(default)]
    pub player2_name: String,
    #[serde(default = "default_player1_color")]
    pub player1_color: String,
    #[serde(default = "default_player2_color")]
    pub player2_color: String,
    #[serde(flatten)]
    pub settings: MatchSettings,
    /// Player 1 serves first when true, player 2 otherwise.
    #[serde(default = "default_true")]
    pub player1_serving: bool,
    #[serde(default)]
    pub event_name: Option<String>,
}

impl MatchSetup {
    /// Setup with default colours and rules; player 1 serves first.
    pub fn new(player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        Self {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            player1_color: default_player1_color(),
            player2_color: default_player2_color(),
            settings: MatchSettings::default(),
            player1_serving: true,
            event_name: None,
        }
    }

    pub fn with_settings(mut self, settings: MatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn player2_serves_first(mut self) -> Self {
        self.player1_serving = false;
        self
    }

    pub fn with_event(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }
}
