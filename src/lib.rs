//! Squash match marker: library with the scoring engine and match storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{Config, StoreKind};
pub use logic::{
    add_point, complete_game, handle_game_completion, handle_let_decision, save_completed_match,
    start_next_game, toggle_serve_side, undo_last_point, Completion, MatchStatus, SaveClaim,
};
pub use models::{
    Event, GameScore, LetDecision, MatchId, MatchRecord, MatchSettings, MatchSetup,
    NewMatchRecord, PlayerId, PlayerState, PointLine, ScoreHistoryEntry, ServeSide, SquashMatch,
    ValidationError,
};
pub use store::{JsonFileStore, MatchStore, MemoryStore, StoreError};
