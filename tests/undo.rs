//! Integration tests for undo: every move type must be inverted exactly.

use squash_marker::{
    GameScore, LetDecision, MatchSettings, MatchSetup, PlayerId, ScoreHistoryEntry, ServeSide,
    SquashMatch,
};

fn new_match() -> SquashMatch {
    SquashMatch::new(MatchSetup::new("Alice", "Bob").with_settings(MatchSettings {
        points_to_win: 11,
        clear_points: 2,
        best_of: 3,
    }))
    .unwrap()
}

fn snapshot(m: &SquashMatch) -> serde_json::Value {
    serde_json::to_value(m).unwrap()
}

#[test]
fn undo_on_a_fresh_game_is_a_no_op() {
    let mut m = new_match();
    let before = snapshot(&m);
    m.undo_last_point();
    assert_eq!(snapshot(&m), before);
}

#[test]
fn undo_inverts_every_point_in_a_rally_sequence() {
    let mut m = new_match();
    let seq = [1, 1, 2, 2, 2, 1, 2, 1, 1, 2];
    for n in seq {
        let p = PlayerId::from_number(n).unwrap();
        let before = snapshot(&m);
        m.add_point(p);
        m.undo_last_point();
        assert_eq!(snapshot(&m), before, "undo after point for {}", p);
        m.add_point(p);
    }
    assert_eq!(m.player(PlayerId::One).score, 5);
    assert_eq!(m.player(PlayerId::Two).score, 5);
}

#[test]
fn undo_inverts_appeal_decisions() {
    let mut m = new_match();
    m.add_point(PlayerId::One);
    for caller in [PlayerId::One, PlayerId::Two] {
        for decision in [LetDecision::Let, LetDecision::Stroke, LetDecision::NoLet] {
            let before = snapshot(&m);
            m.handle_let_decision(caller, decision);
            m.undo_last_point();
            assert_eq!(snapshot(&m), before, "{:?} by {}", decision, caller);
        }
    }
}

#[test]
fn undo_of_a_handout_removes_both_lines_and_returns_serve() {
    let mut m = new_match();
    m.add_point(PlayerId::One);
    m.add_point(PlayerId::One);
    m.add_point(PlayerId::Two);
    assert_eq!(m.score_history.len(), 5);

    m.undo_last_point();
    assert_eq!(m.score_history.len(), 3);
    assert_eq!(m.player(PlayerId::Two).score, 0);
    assert!(!m.player(PlayerId::Two).serving);
    assert!(m.player(PlayerId::One).serving);
    assert_eq!(m.player(PlayerId::One).serve_side, ServeSide::Right);
}

#[test]
fn undo_restores_the_side_served_from() {
    let mut m = new_match();
    m.toggle_serve_side(PlayerId::One);
    m.add_point(PlayerId::One);
    assert_eq!(m.player(PlayerId::One).serve_side, ServeSide::Right);
    m.undo_last_point();
    assert_eq!(m.player(PlayerId::One).serve_side, ServeSide::Left);
    assert_eq!(m.player(PlayerId::One).score, 0);
}

#[test]
fn undo_of_a_let_drops_one_line() {
    let mut m = new_match();
    m.add_point(PlayerId::Two);
    let len = m.score_history.len();
    m.handle_let_decision(PlayerId::One, LetDecision::Let);
    m.undo_last_point();
    assert_eq!(m.score_history.len(), len);
    assert_eq!(m.player(PlayerId::Two).score, 1);
}

#[test]
fn repeated_undo_walks_back_to_the_initial_line() {
    let mut m = new_match();
    let initial = snapshot(&m);
    m.add_point(PlayerId::Two);
    m.handle_let_decision(PlayerId::Two, LetDecision::Let);
    m.handle_let_decision(PlayerId::Two, LetDecision::NoLet);
    m.handle_let_decision(PlayerId::Two, LetDecision::Stroke);
    m.add_point(PlayerId::One);
    for _ in 0..10 {
        m.undo_last_point();
    }
    assert_eq!(snapshot(&m), initial);
    assert!(matches!(m.score_history[0], ScoreHistoryEntry::Initial { .. }));
}

#[test]
fn undo_of_the_game_ball_reopens_the_game() {
    let mut m = new_match();
    m.players[0].score = 10;
    m.players[1].score = 3;
    m.add_point(PlayerId::One);
    assert_eq!(m.game_scores, vec![GameScore { player1: 11, player2: 3 }]);

    m.undo_last_point();
    assert!(m.game_scores.is_empty());
    assert_eq!(m.check_game_win(), None);
    assert_eq!(m.player(PlayerId::One).score, 10);
    m.add_point(PlayerId::Two);
    assert_eq!(m.player(PlayerId::Two).score, 4);
}

#[test]
fn undo_of_the_match_ball_before_saving_reopens_the_match() {
    let mut m = new_match();
    m.game_scores.push(GameScore { player1: 11, player2: 7 });
    m.players[0].score = 10;
    m.add_point(PlayerId::One);
    assert!(m.match_won);

    m.undo_last_point();
    assert!(!m.match_won);
    assert_eq!(m.game_scores.len(), 1);
    assert_eq!(m.player(PlayerId::One).score, 10);
}

#[test]
fn undo_between_games_is_a_no_op() {
    let mut m = new_match();
    m.players[0].score = 10;
    m.add_point(PlayerId::One);
    m.complete_game();
    let before = snapshot(&m);
    m.undo_last_point();
    assert_eq!(snapshot(&m), before);
}

#[test]
fn undo_never_goes_below_zero_on_edited_history() {
    let mut m = new_match();
    m.add_point(PlayerId::One);
    m.players[0].score = 0;
    m.undo_last_point();
    assert_eq!(m.player(PlayerId::One).score, 0);
    assert_eq!(m.score_history.len(), 1);
}

/// Game 1 to player 2 at 0-11, completed; game 2 ready with player 2 serving.
fn into_second_game(m: &mut SquashMatch) {
    m.players[1].score = 10;
    m.add_point(PlayerId::Two);
    m.complete_game();
    m.start_next_game();
    assert_eq!(m.current_game_number, 2);
}

#[test]
fn undo_after_a_settings_change_keeps_earlier_games() {
    let mut m = new_match();
    into_second_game(&mut m);
    m.update_game_settings(MatchSettings {
        points_to_win: 15,
        clear_points: 2,
        best_of: 3,
    })
    .unwrap();

    m.add_point(PlayerId::One);
    m.undo_last_point();
    assert_eq!(m.game_scores, vec![GameScore { player1: 0, player2: 11 }]);
    assert_eq!(m.server(), Some(PlayerId::Two));

    m.players[0].score = 14;
    m.add_point(PlayerId::One);
    assert_eq!(m.game_scores.len(), 2);
    m.undo_last_point();
    assert_eq!(m.game_scores, vec![GameScore { player1: 0, player2: 11 }]);
    assert_eq!(m.player(PlayerId::One).score, 14);
    assert!(m.accepts_points());
}

#[test]
fn undo_keeps_game_scores_when_the_point_did_not_end_the_game() {
    let mut m = new_match();
    into_second_game(&mut m);
    m.add_point(PlayerId::Two);
    // Live score edited past the threshold after the point was played.
    m.players[1].score = 12;
    m.undo_last_point();
    assert_eq!(m.game_scores, vec![GameScore { player1: 0, player2: 11 }]);
    assert_eq!(m.player(PlayerId::Two).score, 11);
    assert!(!m.match_won);
}
