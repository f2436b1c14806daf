//! SquashMatch: the scoring engine's state, plus setup and administrative commands.

use crate::models::history::{GameScore, ScoreHistoryEntry};
use crate::models::player::{
    PlayerId, PlayerState, ServeSide, DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR,
};
use crate::models::record::{MatchId, NewMatchRecord};
use crate::models::settings::{MatchSettings, MatchSetup};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input the engine refuses to act on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// Player number other than 1 or 2.
    UnknownPlayer(u8),
    /// Points to win must be 11 or 15.
    PointsToWin(u32),
    /// Clear points must be 1 or 2.
    ClearPoints(u32),
    /// Best-of must be a positive odd number.
    BestOf(u32),
    /// New rules would decide the game in progress at this score (player 1, player 2),
    /// or the game is already decided and waits for completion.
    SettingsDecideGame(u32, u32),
    /// New rules would decide the match on games already won.
    SettingsDecideMatch { best_of: u32, games_won: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownPlayer(n) => write!(f, "Unknown player {} (expected 1 or 2)", n),
            ValidationError::PointsToWin(n) => write!(f, "Points to win must be 11 or 15 (got {})", n),
            ValidationError::ClearPoints(n) => write!(f, "Clear points must be 1 or 2 (got {})", n),
            ValidationError::BestOf(n) => write!(f, "Best of must be a positive odd number (got {})", n),
            ValidationError::SettingsDecideGame(p1, p2) => {
                write!(f, "Settings cannot change while {}-{} decides the game", p1, p2)
            }
            ValidationError::SettingsDecideMatch { best_of, games_won } => write!(
                f,
                "Best of {} would already be decided with {} games won",
                best_of, games_won
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Full state of one match: players, rules, finished games and the current game's transcript.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquashMatch {
    pub settings: MatchSettings,
    /// Indexed by `PlayerId`; use `player` / `player_mut`.
    pub players: [PlayerState; 2],
    pub current_game_number: u32,
    pub game_scores: Vec<GameScore>,
    pub match_won: bool,
    pub event_name: String,
    /// Transcript of the current game; entry 0 is always `Initial`.
    pub score_history: Vec<ScoreHistoryEntry>,
    /// A non-deciding game was completed and the next one has not started.
    pub between_games: bool,
    pub is_saving: bool,
    pub match_saved: bool,
    pub saved_match_id: Option<MatchId>,
    pub save_error: Option<String>,
    /// Token of the save in flight; a result carrying another token is stale.
    #[serde(skip)]
    pub(crate) save_token: Option<Uuid>,
}

impl Default for SquashMatch {
    fn default() -> Self {
        Self::empty()
    }
}

impl SquashMatch {
    /// Empty match: no names, default colours and rules, player 1 to serve.
    pub fn empty() -> Self {
        Self {
            settings: MatchSettings::default(),
            players: [
                PlayerState::new("", DEFAULT_PLAYER1_COLOR, true),
                PlayerState::new("", DEFAULT_PLAYER2_COLOR, false),
            ],
            current_game_number: 1,
            game_scores: Vec::new(),
            match_won: false,
            event_name: String::new(),
            score_history: vec![ScoreHistoryEntry::Initial {
                serving_player: PlayerId::One,
                serve_side: ServeSide::Right,
                timestamp: Utc::now(),
            }],
            between_games: false,
            is_saving: false,
            match_saved: false,
            saved_match_id: None,
            save_error: None,
            save_token: None,
        }
    }

    /// Start a match from the setup form.
    pub fn new(setup: MatchSetup) -> Result<Self, ValidationError> {
        let mut m = Self::empty();
        m.initialize_game(setup)?;
        Ok(m)
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    /// The player currently serving, if a game is in progress.
    pub fn server(&self) -> Option<PlayerId> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|&id| self.player(id).serving)
    }

    /// Replace all state with a fresh match. Invalid settings leave the match untouched.
    pub fn initialize_game(&mut self, setup: MatchSetup) -> Result<(), ValidationError> {
        setup.settings.validate()?;
        let first_server = if setup.player1_serving {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        *self = Self {
            settings: setup.settings,
            players: [
                PlayerState::new(setup.player1_name, setup.player1_color, setup.player1_serving),
                PlayerState::new(setup.player2_name, setup.player2_color, !setup.player1_serving),
            ],
            event_name: setup.event_name.unwrap_or_default(),
            ..Self::empty()
        };
        self.reseed_history(first_server);
        log::debug!(
            "Match initialized: {} vs {}, {} serves first",
            self.players[0].name,
            self.players[1].name,
            first_server
        );
        Ok(())
    }

    /// Drop everything back to the empty match (cancelled or finished match).
    pub fn reset_game(&mut self) {
        *self = Self::empty();
    }

    /// Change the rules mid-match. Applies from the next point; no-op once the match is won.
    ///
    /// Rules that would decide the live game or the match without a point being played are
    /// refused, as is any change while a decided game waits for `complete_game`.
    pub fn update_game_settings(&mut self, settings: MatchSettings) -> Result<(), ValidationError> {
        settings.validate()?;
        if self.match_won {
            return Ok(());
        }
        let (p1, p2) = (self.players[0].score, self.players[1].score);
        if !self.between_games
            && (self.check_game_win().is_some()
                || settings.is_winning_score(p1, p2)
                || settings.is_winning_score(p2, p1))
        {
            return Err(ValidationError::SettingsDecideGame(p1, p2));
        }
        let games_won = self.games_won(PlayerId::One).max(self.games_won(PlayerId::Two));
        if games_won >= settings.games_to_win() as usize {
            return Err(ValidationError::SettingsDecideMatch {
                best_of: settings.best_of,
                games_won,
            });
        }
        log::debug!(
            "Settings changed to {} points, {} clear, best of {}",
            settings.points_to_win,
            settings.clear_points,
            settings.best_of
        );
        self.settings = settings;
        Ok(())
    }

    /// Rename or recolour a player. Score and serve are untouched.
    pub fn set_player_details(&mut self, id: PlayerId, name: Option<String>, color: Option<String>) {
        let p = self.player_mut(id);
        if let Some(name) = name {
            p.name = name;
        }
        if let Some(color) = color {
            p.color = color;
        }
    }

    /// Record to persist for this match (names, colours, game scores, rules, event).
    pub fn completed_record(&self) -> NewMatchRecord {
        NewMatchRecord {
            player1_name: self.players[0].name.clone(),
            player2_name: self.players[1].name.clone(),
            player1_color: self.players[0].color.clone(),
            player2_color: self.players[1].color.clone(),
            game_scores: self.game_scores.clone(),
            match_settings: self.settings,
            event_name: self.event_name.clone(),
            date: Utc::now(),
        }
    }

    /// Clear the transcript down to a single `Initial` line for `server`.
    pub(crate) fn reseed_history(&mut self, server: PlayerId) {
        self.score_history.clear();
        self.score_history.push(ScoreHistoryEntry::Initial {
            serving_player: server,
            serve_side: self.player(server).serve_side,
            timestamp: Utc::now(),
        });
    }
}
