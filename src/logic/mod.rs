//! Scoring rules: rallies and appeals, undo, queries, game and match completion.

mod completion;
mod queries;
mod rally;
mod undo;

pub use completion::{
    complete_game, handle_game_completion, save_completed_match, start_next_game, Completion,
    SaveClaim,
};
pub use queries::MatchStatus;
pub use rally::{add_point, handle_let_decision, toggle_serve_side};
pub use undo::undo_last_point;

use crate::models::{LetDecision, PlayerId, SquashMatch};
use crate::store::MatchStore;

/// Command methods on the engine; each forwards to the rule function of the same name.
impl SquashMatch {
    pub fn add_point(&mut self, player: PlayerId) {
        add_point(self, player);
    }

    pub fn handle_let_decision(&mut self, caller: PlayerId, decision: LetDecision) {
        handle_let_decision(self, caller, decision);
    }

    pub fn toggle_serve_side(&mut self, player: PlayerId) {
        toggle_serve_side(self, player);
    }

    pub fn undo_last_point(&mut self) {
        undo_last_point(self);
    }

    pub fn complete_game(&mut self) -> Completion {
        complete_game(self)
    }

    pub fn start_next_game(&mut self) {
        start_next_game(self);
    }

    pub async fn save_completed_match<S>(&mut self, store: &S)
    where
        S: MatchStore + ?Sized,
    {
        save_completed_match(self, store).await;
    }

    pub async fn handle_game_completion<S>(&mut self, store: &S) -> Completion
    where
        S: MatchStore + ?Sized,
    {
        handle_game_completion(self, store).await
    }
}
