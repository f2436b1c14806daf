//! Finished-match records handed to the persistence collaborator.

use crate::models::history::GameScore;
use crate::models::player::PlayerId;
use crate::models::settings::MatchSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored match.
pub type MatchId = Uuid;

/// A completed match, before the store has assigned it an id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchRecord {
    pub player1_name: String,
    pub player2_name: String,
    pub player1_color: String,
    pub player2_color: String,
    pub game_scores: Vec<GameScore>,
    pub match_settings: MatchSettings,
    #[serde(default)]
    pub event_name: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

/// A stored match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    #[serde(flatten)]
    pub record: NewMatchRecord,
}

impl MatchRecord {
    pub fn new(record: NewMatchRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            record,
        }
    }

    /// Games won by `player` in this match.
    pub fn games_won(&self, player: PlayerId) -> usize {
        self.record
            .game_scores
            .iter()
            .filter(|g| g.winner() == Some(player))
            .count()
    }
}

/// A named event (tournament, league night) matches can be filed under.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: Utc::now(),
        }
    }
}
