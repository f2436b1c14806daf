//! Undo: invert the last move recorded in the transcript.

use crate::models::{ScoreHistoryEntry, SquashMatch};

/// Undo the last move. A handout (frozen score line plus decision line) is one move.
///
/// Undoing the point that closed the game also removes that game's score and reopens the
/// game, unless the game has already been completed or the match saved.
pub fn undo_last_point(game: &mut SquashMatch) {
    if game.between_games || game.match_saved || game.is_saving {
        return;
    }
    if game.score_history.len() <= 1 {
        return;
    }
    let Some(last) = game.score_history.pop() else {
        return;
    };

    let point = match last {
        ScoreHistoryEntry::Initial { .. } => {
            // Only ever at index 0; put it back.
            game.score_history.push(last);
            return;
        }
        ScoreHistoryEntry::Let { player, .. } => {
            log::debug!("Undo let by {}", player);
            return;
        }
        ScoreHistoryEntry::Score(p) | ScoreHistoryEntry::Stroke(p) => p,
        ScoreHistoryEntry::NoLet { point, .. } => point,
    };

    let scorer = point.player;
    let opponent = scorer.other();
    if point.is_handout {
        let frozen = matches!(
            game.score_history.last(),
            Some(ScoreHistoryEntry::Score(marker)) if marker.is_handout && marker.player == opponent
        );
        if frozen && game.score_history.len() > 1 {
            game.score_history.pop();
        }
    }

    let p = game.player_mut(scorer);
    p.score = p.score.saturating_sub(1);
    p.serve_side = point.prior_serve_side;
    if point.is_handout {
        p.serving = false;
        game.player_mut(opponent).serving = true;
    }

    if point.closes_game {
        game.game_scores.pop();
        game.match_won = false;
        log::info!("Game {} reopened by undo", game.current_game_number);
    }
    log::debug!(
        "Undo point for {} ({}-{})",
        scorer,
        game.players[0].score,
        game.players[1].score
    );
}
