//! Data structures for a squash match: players, rules, transcript, stored records.

mod history;
mod player;
mod record;
mod settings;
mod squash_match;

pub use history::{GameScore, LetDecision, PointLine, ScoreHistoryEntry};
pub use player::{PlayerId, PlayerState, ServeSide, DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR};
pub use record::{Event, MatchId, MatchRecord, NewMatchRecord};
pub use settings::{MatchSettings, MatchSetup};
pub use squash_match::{SquashMatch, ValidationError};
