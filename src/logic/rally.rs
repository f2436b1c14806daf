//! Rally outcomes: points, officiating decisions on appeals, and the server's choice of box.

use crate::models::{
    GameScore, LetDecision, PlayerId, PointLine, ScoreHistoryEntry, ServeSide, SquashMatch,
};
use chrono::Utc;

/// How a point came about; selects the transcript line written for it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Award {
    Rally,
    Stroke,
    NoLet { called_by: PlayerId },
}

/// `player` won the rally.
///
/// The server keeps serve and changes box; a receiver winning the rally takes the serve
/// (handout) and starts from the right box. If the point ends the game its score is
/// appended to `game_scores` and `match_won` is recomputed.
pub fn add_point(game: &mut SquashMatch, player: PlayerId) {
    award_point(game, player, Award::Rally);
}

/// Resolve an appeal made by `caller`.
///
/// - `Let`: rally replayed, only a `Let` line is written.
/// - `Stroke`: point to `caller`.
/// - `NoLet`: point to `caller`'s opponent, whoever was serving.
pub fn handle_let_decision(game: &mut SquashMatch, caller: PlayerId, decision: LetDecision) {
    match decision {
        LetDecision::Let => {
            if !game.accepts_points() {
                return;
            }
            game.score_history.push(ScoreHistoryEntry::Let {
                player: caller,
                timestamp: Utc::now(),
            });
            log::debug!("Let called by {}", caller);
        }
        LetDecision::Stroke => award_point(game, caller, Award::Stroke),
        LetDecision::NoLet => award_point(game, caller.other(), Award::NoLet { called_by: caller }),
    }
}

/// Flip the serving player's box. Before the first point this also rewrites the
/// `Initial` line so the transcript starts from the chosen side.
pub fn toggle_serve_side(game: &mut SquashMatch, player: PlayerId) {
    if !game.accepts_points() || !game.player(player).serving {
        return;
    }
    let side = game.player(player).serve_side.flip();
    game.player_mut(player).serve_side = side;

    if game.players.iter().all(|p| p.score == 0) {
        if let Some(ScoreHistoryEntry::Initial {
            serving_player,
            serve_side,
            ..
        }) = game.score_history.first_mut()
        {
            *serving_player = player;
            *serve_side = side;
        }
    }
}

fn award_point(game: &mut SquashMatch, scorer: PlayerId, award: Award) {
    if !game.accepts_points() {
        log::debug!("Ignoring point for {}: game or match already decided", scorer);
        return;
    }
    let opponent = scorer.other();
    let is_handout = !game.player(scorer).serving;
    let timestamp = Utc::now();

    if is_handout {
        let (score, serve_side) = {
            let previous = game.player(opponent);
            (previous.score, previous.serve_side)
        };
        game.score_history.push(ScoreHistoryEntry::Score(PointLine {
            player: opponent,
            score,
            serve_side,
            prior_serve_side: serve_side,
            is_handout: true,
            closes_game: false,
            timestamp,
        }));
    }

    let prior_serve_side = game.player(scorer).serve_side;
    let serve_side = if is_handout {
        ServeSide::Right
    } else {
        prior_serve_side.flip()
    };
    let score = game.player(scorer).score + 1;
    let line = PointLine {
        player: scorer,
        score,
        serve_side,
        prior_serve_side,
        is_handout,
        closes_game: game
            .settings
            .is_winning_score(score, game.player(opponent).score),
        timestamp,
    };
    game.score_history.push(match award {
        Award::Rally => ScoreHistoryEntry::Score(line),
        Award::Stroke => ScoreHistoryEntry::Stroke(line),
        Award::NoLet { called_by } => ScoreHistoryEntry::NoLet {
            called_by,
            point: line,
        },
    });

    let p = game.player_mut(scorer);
    p.score = score;
    p.serving = true;
    p.serve_side = serve_side;
    game.player_mut(opponent).serving = false;

    log::debug!(
        "{:?} to {} ({}-{}){}",
        award,
        scorer,
        game.players[0].score,
        game.players[1].score,
        if is_handout { ", handout" } else { "" }
    );

    if line.closes_game {
        game.game_scores.push(GameScore {
            player1: game.players[0].score,
            player2: game.players[1].score,
        });
        game.match_won = game.check_match_win() == Some(scorer);
        log::info!(
            "Game {} won by {} {}-{}",
            game.current_game_number,
            scorer,
            game.players[0].score,
            game.players[1].score
        );
    }
}
