//! Game and match completion, moving on to the next game, and saving the finished match.

use crate::models::{MatchRecord, NewMatchRecord, PlayerId, SquashMatch};
use crate::store::{MatchStore, StoreError};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of `complete_game`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "state", content = "winner", rename_all = "snake_case")]
pub enum Completion {
    /// Nothing decided yet.
    InProgress,
    /// Game decided; call `start_next_game` to continue.
    GameWon(PlayerId),
    MatchWon(PlayerId),
}

/// A claimed save: the record to store and the token `finish_save` must be given back.
#[derive(Clone, Debug)]
pub struct SaveClaim {
    pub token: Uuid,
    pub record: NewMatchRecord,
}

/// Act on a decided game. A won match is marked `match_won`; a non-deciding game has its
/// live scores zeroed and waits for `start_next_game`. Safe to call repeatedly.
pub fn complete_game(game: &mut SquashMatch) -> Completion {
    if let Some(winner) = game.check_match_win() {
        if !game.match_won {
            log::info!("Match won by {}", winner);
        }
        game.match_won = true;
        return Completion::MatchWon(winner);
    }
    if game.between_games {
        return match game.game_scores.last().and_then(|g| g.winner()) {
            Some(winner) => Completion::GameWon(winner),
            None => Completion::InProgress,
        };
    }
    match game.check_game_win() {
        Some(winner) => {
            for p in game.players.iter_mut() {
                p.score = 0;
            }
            game.between_games = true;
            Completion::GameWon(winner)
        }
        None => Completion::InProgress,
    }
}

/// Start the next game. The winner of the last game serves first, from the right box.
pub fn start_next_game(game: &mut SquashMatch) {
    if game.match_won || !(game.between_games || game.check_game_win().is_some()) {
        return;
    }
    let Some(winner) = game.game_scores.last().and_then(|g| g.winner()) else {
        return;
    };
    for id in [PlayerId::One, PlayerId::Two] {
        game.player_mut(id).reset_for_game(id == winner);
    }
    game.current_game_number += 1;
    game.between_games = false;
    game.reseed_history(winner);
    log::debug!("Game {} started, {} serving", game.current_game_number, winner);
}

/// Save the won match to `store`. Also the retry after a failed save.
pub async fn save_completed_match<S>(game: &mut SquashMatch, store: &S)
where
    S: MatchStore + ?Sized,
{
    let Some(claim) = game.begin_save() else {
        return;
    };
    let result = store.save_match(claim.record).await;
    game.finish_save(claim.token, result);
}

/// `complete_game`, then save if that decided the match. Saves at most once.
pub async fn handle_game_completion<S>(game: &mut SquashMatch, store: &S) -> Completion
where
    S: MatchStore + ?Sized,
{
    let completion = complete_game(game);
    if let Completion::MatchWon(_) = completion {
        save_completed_match(game, store).await;
    }
    completion
}

impl SquashMatch {
    /// Claim the save: returns the record to store, or `None` if the match is not won,
    /// already saved, or a save is in flight.
    pub fn begin_save(&mut self) -> Option<SaveClaim> {
        if !self.match_won || self.match_saved || self.is_saving {
            return None;
        }
        let token = Uuid::new_v4();
        self.is_saving = true;
        self.save_error = None;
        self.save_token = Some(token);
        Some(SaveClaim {
            token,
            record: self.completed_record(),
        })
    }

    /// Record the outcome of the save claimed with `token`. Results for any other claim
    /// (the match was reset or re-initialized meanwhile) are dropped.
    pub fn finish_save(&mut self, token: Uuid, result: Result<MatchRecord, StoreError>) {
        if self.save_token != Some(token) {
            log::debug!("Dropping result of a save for a match that was replaced");
            return;
        }
        self.save_token = None;
        self.is_saving = false;
        match result {
            Ok(stored) => {
                log::info!("Match saved as {}", stored.id);
                self.match_saved = true;
                self.saved_match_id = Some(stored.id);
            }
            Err(e) => {
                log::warn!("Saving match failed: {}", e);
                self.save_error = Some(e.to_string());
            }
        }
    }

    pub fn clear_save_error(&mut self) {
        self.save_error = None;
    }
}
