//! Game results and the per-game score transcript.

use crate::models::player::{PlayerId, ServeSide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final score of one finished game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub player1: u32,
    pub player2: u32,
}

impl GameScore {
    pub fn winner(&self) -> Option<PlayerId> {
        if self.player1 > self.player2 {
            Some(PlayerId::One)
        } else if self.player2 > self.player1 {
            Some(PlayerId::Two)
        } else {
            None
        }
    }
}

/// A score line in the transcript.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLine {
    pub player: PlayerId,
    /// Player's score as of this line.
    pub score: u32,
    /// Side the player serves from next.
    pub serve_side: ServeSide,
    /// Player's side before this line; restored by undo.
    pub prior_serve_side: ServeSide,
    /// Serve changed hands here.
    pub is_handout: bool,
    /// This point appended the game's entry to `game_scores`.
    #[serde(default)]
    pub closes_game: bool,
    pub timestamp: DateTime<Utc>,
}

/// One line of a game's transcript.
///
/// A handout writes two lines: the previous server's frozen score (a `Score` line with
/// `is_handout` set) followed by the decision line for the new server.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreHistoryEntry {
    #[serde(rename_all = "camelCase")]
    Initial {
        serving_player: PlayerId,
        serve_side: ServeSide,
        timestamp: DateTime<Utc>,
    },
    Score(PointLine),
    Let {
        player: PlayerId,
        timestamp: DateTime<Utc>,
    },
    /// Stroke awarded to `point.player`, who made the appeal.
    Stroke(PointLine),
    /// Appeal by `called_by` denied; `point.player` is the opponent.
    #[serde(rename = "nolet", rename_all = "camelCase")]
    NoLet {
        called_by: PlayerId,
        point: PointLine,
    },
}

impl ScoreHistoryEntry {
    /// The point awarded by this line, if it is a decision line.
    pub fn point(&self) -> Option<&PointLine> {
        match self {
            ScoreHistoryEntry::Score(p) | ScoreHistoryEntry::Stroke(p) => Some(p),
            ScoreHistoryEntry::NoLet { point, .. } => Some(point),
            ScoreHistoryEntry::Initial { .. } | ScoreHistoryEntry::Let { .. } => None,
        }
    }

    pub fn is_handout(&self) -> bool {
        self.point().map(|p| p.is_handout).unwrap_or(false)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ScoreHistoryEntry::Initial { timestamp, .. } | ScoreHistoryEntry::Let { timestamp, .. } => {
                *timestamp
            }
            ScoreHistoryEntry::Score(p) | ScoreHistoryEntry::Stroke(p) => p.timestamp,
            ScoreHistoryEntry::NoLet { point, .. } => point.timestamp,
        }
    }
}

/// Referee's ruling on a let appeal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetDecision {
    /// Rally replayed.
    Let,
    /// Point to the appealing player.
    Stroke,
    /// Point to the appealing player's opponent.
    NoLet,
}
