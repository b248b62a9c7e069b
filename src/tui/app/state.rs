use crate::game::{Game, GameConfig, GameError, GameObserver, GameStatus, RoundOutcome};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    Deal,
    SelectNext,
    SelectPrev,
    SelectCard(usize),
    PlaySelected,
    Autoplay,
}

/// Game observer collecting resolved rounds for the history view.
#[derive(Debug, Clone, Default)]
pub struct RoundLog(Rc<RefCell<Vec<RoundOutcome>>>);

impl RoundLog {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Up to `n` rounds, skipping the `offset` most recent ones.
    pub fn recent_offset(&self, n: usize, offset: usize) -> Vec<RoundOutcome> {
        let rounds = self.0.borrow();
        let end = rounds.len().saturating_sub(offset);
        let start = end.saturating_sub(n);
        rounds[start..end].to_vec()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl GameObserver for RoundLog {
    fn on_status_change(&mut self, status: GameStatus) {
        log::debug!("tui: game status now {status:?}");
    }

    fn on_round_resolved(&mut self, outcome: &RoundOutcome) {
        self.0.borrow_mut().push(outcome.clone());
    }
}

#[derive(Debug)]
pub struct AppState {
    pub scene: Scene,
    // Core game engine instance
    pub game: Game,
    // Index into the active player's hand
    pub selected: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_seed: u64,
    pub game_started: bool,
    rounds: RoundLog,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        let rounds = RoundLog::default();
        let game = Self::fresh_game(num_players, seed, &rounds)?;
        Ok(Self {
            scene: Scene::Menu,
            game,
            selected: 0,
            menu_index: 0,
            cfg_num_players: num_players,
            cfg_seed: seed,
            game_started: false,
            rounds,
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        })
    }

    pub(crate) fn fresh_game(
        num_players: usize,
        seed: u64,
        rounds: &RoundLog,
    ) -> Result<Game, GameError> {
        let game =
            Game::with_observer(GameConfig::new(num_players).with_seed(seed), rounds.clone())?;
        rounds.clear();
        Ok(game)
    }

    pub(crate) fn rounds(&self) -> &RoundLog {
        &self.rounds
    }

    fn can_play(&self) -> bool {
        self.scene == Scene::Table && self.game_started && self.game.status() == GameStatus::Play
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, err: GameError) {
        self.action_error = Some(err.to_string());
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    fn hand_len(&self) -> usize {
        self.game.active_player().map(|p| p.hand_len()).unwrap_or(0)
    }

    fn play_selected(&mut self) -> bool {
        if !self.can_play() {
            return false;
        }
        let Some(card) =
            self.game.active_player().and_then(|p| p.hand().get(self.selected).copied())
        else {
            return false;
        };
        let result = self.game.play(card);
        self.apply_result(result)
    }

    fn autoplay(&mut self) -> bool {
        if !self.can_play() {
            return false;
        }
        let result = self.game.autoplay();
        self.apply_result(result)
    }

    fn apply_result(&mut self, result: Result<(), GameError>) -> bool {
        match result {
            Ok(()) => {
                self.clear_action_error();
                self.selected = 0;
                true
            }
            Err(err) => {
                self.set_action_error(err);
                false
            }
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset = self.rounds.len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::Deal => {
                if self.scene == Scene::Table {
                    self.deal();
                }
                false
            }
            InputAction::SelectNext => {
                let n = self.hand_len();
                if self.can_play() && n > 0 {
                    self.selected = (self.selected + 1) % n;
                }
                false
            }
            InputAction::SelectPrev => {
                let n = self.hand_len();
                if self.can_play() && n > 0 {
                    self.selected = (self.selected + n - 1) % n;
                }
                false
            }
            InputAction::SelectCard(idx) => {
                if self.can_play() && idx < self.hand_len() {
                    self.selected = idx;
                }
                false
            }
            InputAction::PlaySelected => self.play_selected(),
            InputAction::Autoplay => self.autoplay(),
        }
    }

    /// Deal the configured game, or a reseeded one after the previous game
    /// has finished.
    pub fn deal(&mut self) {
        if self.game_started && self.game.status() != GameStatus::Finish {
            return;
        }
        if self.game.status() == GameStatus::Finish {
            self.cfg_seed = self.cfg_seed.wrapping_add(1);
            match Self::fresh_game(self.cfg_num_players, self.cfg_seed, &self.rounds) {
                Ok(game) => self.game = game,
                Err(err) => {
                    self.set_action_error(err);
                    return;
                }
            }
        }
        match self.game.start() {
            Ok(()) => {
                self.game_started = true;
                self.selected = 0;
                self.history_offset = 0;
                self.clear_action_error();
            }
            Err(err) => self.set_action_error(err),
        }
    }

    /// Expire stale error messages.
    pub fn tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }
}
