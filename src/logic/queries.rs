//! Pure queries the UI polls after every command. None of these mutate the match.

use crate::models::{PlayerId, SquashMatch};
use serde::Serialize;

/// Derived view of who has won what and who is on game or match point.
///
/// With one clear point both players can be on game point at once, hence the lists.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatus {
    pub game_winner: Option<PlayerId>,
    pub match_winner: Option<PlayerId>,
    /// Players on game point but not match point.
    pub game_point: Vec<PlayerId>,
    pub match_point: Vec<PlayerId>,
}

impl SquashMatch {
    /// True while points can still be recorded in the current game.
    pub fn accepts_points(&self) -> bool {
        !self.match_won && !self.between_games && self.check_game_win().is_none()
    }

    /// Winner of the current game judged on the live score.
    pub fn check_game_win(&self) -> Option<PlayerId> {
        [PlayerId::One, PlayerId::Two].into_iter().find(|&id| {
            self.settings
                .is_winning_score(self.player(id).score, self.player(id.other()).score)
        })
    }

    /// Winner of the match judged on finished games.
    pub fn check_match_win(&self) -> Option<PlayerId> {
        let needed = self.settings.games_to_win() as usize;
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|&id| self.games_won(id) >= needed)
    }

    /// Finished games won by `player`.
    pub fn games_won(&self, player: PlayerId) -> usize {
        self.game_scores
            .iter()
            .filter(|g| g.winner() == Some(player))
            .count()
    }

    /// True if `player` would win the game with the next point.
    pub fn is_game_point(&self, player: PlayerId) -> bool {
        if !self.accepts_points() {
            return false;
        }
        let score = self.player(player).score + 1;
        self.settings
            .is_winning_score(score, self.player(player.other()).score)
    }

    /// True if `player` would win the match with the next point.
    pub fn is_match_point(&self, player: PlayerId) -> bool {
        self.is_game_point(player)
            && self.games_won(player) + 1 >= self.settings.games_to_win() as usize
    }

    pub fn status(&self) -> MatchStatus {
        let players = [PlayerId::One, PlayerId::Two];
        let match_point: Vec<PlayerId> = players
            .into_iter()
            .filter(|&id| self.is_match_point(id))
            .collect();
        let game_point = players
            .into_iter()
            .filter(|&id| self.is_game_point(id) && !match_point.contains(&id))
            .collect();
        MatchStatus {
            game_winner: self.check_game_win(),
            match_winner: self.check_match_win(),
            game_point,
            match_point,
        }
    }
}
