use crate::cards::{Card, Suit};
use crate::deck::Deck;
use crate::rules::{self, Move, MAX_PLAYERS, MIN_PLAYERS};
use crate::turn::{Advance, SeatStatus, TurnSequencer};
use log::{debug, info};
use std::fmt;

/// Overall lifecycle. Transitions only ever go forward:
/// `Init → Play → Finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameStatus {
    Init,
    Play,
    Finish,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("bad number of players: {got} (supported {min} to {max})")]
    BadPlayerCount { got: usize, min: usize, max: usize },
    #[error("game can only start from its initial state, status is {0:?}")]
    NotInitialized(GameStatus),
    #[error("game is not in progress, status is {0:?}")]
    NotInGame(GameStatus),
    #[error("card {0} is not in the active player's hand")]
    CardNotFound(Card),
    #[error("forbidden move: {card} must follow the led suit {led}")]
    ForbiddenMove { card: Card, led: Suit },
    #[error("bug: nobody is active")]
    BugNobodyActive,
}

/// Construction parameters. Checked by [`Game::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub num_players: usize,
    /// Seeds the one shuffle of the game; equal seeds deal equal hands.
    pub seed: u64,
}

impl GameConfig {
    pub fn new(num_players: usize) -> Self {
        Self { num_players, seed: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(GameError::BadPlayerCount {
                got: self.num_players,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_PLAYERS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Player {
    pub(crate) index: usize,
    pub(crate) status: SeatStatus,
    pub(crate) all_cards: Vec<Card>,
    pub(crate) cards_taken: usize,
    pub(crate) score: i32,
}

impl Player {
    pub(crate) fn new(index: usize) -> Self {
        Self { index, status: SeatStatus::Waiting, all_cards: Vec::new(), cards_taken: 0, score: 0 }
    }

    /// 1-based seat number
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn status(&self) -> SeatStatus {
        self.status
    }

    /// Every card dealt to the player, played ones included.
    pub fn all_cards(&self) -> &[Card] {
        &self.all_cards
    }

    /// Cards still in hand, highest display order first.
    pub fn hand(&self) -> Vec<Card> {
        self.hand_iter().copied().collect()
    }

    pub fn hand_len(&self) -> usize {
        self.hand_iter().count()
    }

    pub fn played_count(&self) -> usize {
        self.all_cards.len() - self.hand_len()
    }

    /// Cards captured by winning rounds.
    pub fn cards_taken(&self) -> usize {
        self.cards_taken
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    fn hand_iter(&self) -> impl Iterator<Item = &Card> {
        self.all_cards.iter().filter(|c| !c.is_played())
    }

    /// Exact identity first. The two Angels are interchangeable, so an Angel
    /// also matches whichever Angel is still in hand.
    fn position_in_hand(&self, card: Card) -> Option<usize> {
        let in_hand = |c: &Card| !c.is_played();
        self.all_cards.iter().position(|c| in_hand(c) && c.same_card(card)).or_else(|| {
            if !card.is_angel() {
                return None;
            }
            self.all_cards.iter().position(|c| in_hand(c) && c.is_angel())
        })
    }
}

/// Snapshot of the round in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundState {
    /// 1-based round number
    pub seq: u32,
    pub is_doubled: bool,
    pub score_on_board: i32,
    /// Seat (0-based) currently winning the round
    pub leader: Option<usize>,
}

/// A resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundOutcome {
    pub seq: u32,
    pub winner: usize,
    pub is_doubled: bool,
    /// Points credited to the winner
    pub score: i32,
    /// Cards in play order
    pub moves: Vec<Move>,
    pub game_over: bool,
}

/// Receives notifications from a [`Game`]. Called synchronously on the thread
/// driving the game, after the state has been updated.
///
/// Any `FnMut(GameStatus)` closure is an observer that only listens to status
/// changes.
pub trait GameObserver {
    fn on_status_change(&mut self, status: GameStatus);

    fn on_round_resolved(&mut self, _outcome: &RoundOutcome) {}
}

impl<F: FnMut(GameStatus)> GameObserver for F {
    fn on_status_change(&mut self, status: GameStatus) {
        self(status)
    }
}

/// A game of kusokurae.
///
/// ```
/// use kusokurae::game::{Game, GameConfig, GameStatus};
///
/// let mut game = Game::new(GameConfig::new(3).with_seed(1)).unwrap();
/// game.start().unwrap();
/// while game.status() == GameStatus::Play {
///     game.autoplay().unwrap();
/// }
/// assert_eq!(game.finished_rounds(), 11);
/// ```
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    pub(crate) players: Vec<Player>,
    finished_rounds: u32,
    ghost_holder: Option<usize>,
    moves: Vec<Move>,
    turn: TurnSequencer,
    last_round: Option<RoundOutcome>,
    observer: Option<Box<dyn GameObserver>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("players", &self.players)
            .field("finished_rounds", &self.finished_rounds)
            .field("ghost_holder", &self.ghost_holder)
            .field("moves", &self.moves)
            .field("turn", &self.turn)
            .field("last_round", &self.last_round)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let players = (1..=config.num_players).map(Player::new).collect();
        Ok(Self {
            config,
            status: GameStatus::Init,
            players,
            finished_rounds: 0,
            ghost_holder: None,
            moves: Vec::with_capacity(config.num_players),
            turn: TurnSequencer::default(),
            last_round: None,
            observer: None,
        })
    }

    /// Like [`Game::new`], with an observer attached from the start.
    pub fn with_observer(
        config: GameConfig,
        observer: impl GameObserver + 'static,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config)?;
        game.set_observer(observer);
        Ok(game)
    }

    /// Attach the game's observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Returns the game configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Returns a reference to the players
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player in 0-based `seat`, or `None` when out of range.
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// 0-based seat whose turn it is, `None` unless a game is in progress.
    pub fn active_seat(&self) -> Option<usize> {
        self.turn.active()
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.turn.active().and_then(|seat| self.players.get(seat))
    }

    /// Rounds completed so far
    pub fn finished_rounds(&self) -> u32 {
        self.finished_rounds
    }

    /// Seat holding the Ghost, in hand or among captured cards.
    pub fn ghost_holder(&self) -> Option<usize> {
        self.ghost_holder
    }

    /// Seat currently winning the round in progress.
    pub fn high_ranker(&self) -> Option<usize> {
        rules::round_leader(&self.moves)
    }

    /// Cards played this round, in play order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Cards played this round, one slot per seat.
    pub fn board(&self) -> Vec<Option<Card>> {
        let mut slots = vec![None; self.players.len()];
        for m in &self.moves {
            slots[m.seat] = Some(m.card);
        }
        slots
    }

    pub fn last_round(&self) -> Option<&RoundOutcome> {
        self.last_round.as_ref()
    }

    pub fn round_state(&self) -> RoundState {
        let seq = match self.status {
            GameStatus::Finish => self.finished_rounds,
            _ => self.finished_rounds + 1,
        };
        RoundState {
            seq,
            is_doubled: rules::is_doubled(&self.moves),
            score_on_board: rules::score_on_board(&self.moves),
            leader: rules::round_leader(&self.moves),
        }
    }

    /// True once the game is in or past its last round: every hand holds at
    /// most one card. Always false before the deal.
    pub fn is_final_round(&self) -> bool {
        self.status != GameStatus::Init && self.players.iter().all(|p| p.hand_len() <= 1)
    }

    /// Seats sharing the top score once the game is finished.
    pub fn winners(&self) -> Vec<usize> {
        if self.status != GameStatus::Finish {
            return Vec::new();
        }
        let Some(best) = self.players.iter().map(|p| p.score).max() else {
            return Vec::new();
        };
        (0..self.players.len()).filter(|&i| self.players[i].score == best).collect()
    }

    /// Cards the active player may legally play right now.
    pub fn playable_cards(&self) -> Vec<Card> {
        let Some(player) = self.active_player() else {
            return Vec::new();
        };
        player
            .hand_iter()
            .filter(|c| rules::is_playable(c, player.hand_iter(), &self.moves))
            .copied()
            .collect()
    }

    /// Shuffle, deal, and hand the first turn to seat 1.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Init {
            return Err(GameError::NotInitialized(self.status));
        }
        let n = self.players.len();
        let bad_count =
            |_| GameError::BadPlayerCount { got: n, min: MIN_PLAYERS, max: MAX_PLAYERS };
        let mut deck = Deck::for_players(n).map_err(bad_count)?;
        deck.shuffle_seeded(self.config.seed);
        let hands = deck.deal(n).map_err(bad_count)?;

        for (seat, (player, hand)) in self.players.iter_mut().zip(hands).enumerate() {
            if hand.iter().any(|c| c.is_ghost()) {
                self.ghost_holder = Some(seat);
            }
            player.all_cards = hand;
        }
        self.turn.begin_round(&mut self.players, 0);
        debug!(
            "dealt {} cards to each of {} players (seed {})",
            self.players[0].all_cards.len(),
            n,
            self.config.seed
        );
        self.set_status(GameStatus::Play);
        Ok(())
    }

    /// Play `card` for the active player.
    ///
    /// The card is matched by identity against the active player's hand, except
    /// that either Angel stands for the one held. On error nothing changes.
    pub fn play(&mut self, card: Card) -> Result<(), GameError> {
        if self.status != GameStatus::Play {
            return Err(GameError::NotInGame(self.status));
        }
        let seat = self.turn.active().ok_or(GameError::BugNobodyActive)?;
        let player = &self.players[seat];
        let pos = player.position_in_hand(card).ok_or(GameError::CardNotFound(card))?;
        let held = player.all_cards[pos];
        if let Some(led) = rules::forbidden_by(&held, player.hand_iter(), &self.moves) {
            return Err(GameError::ForbiddenMove { card: held, led });
        }

        let seq = self.finished_rounds + 1;
        let played = &mut self.players[seat].all_cards[pos];
        played.mark_played(seq);
        self.moves.push(Move { seat, card: *played });
        debug!("round {seq}: P{} plays {held}", seat + 1);

        match self.turn.advance(&mut self.players) {
            Advance::Next(_) => Ok(()),
            Advance::RoundComplete => self.resolve_round(),
        }
    }

    /// Play the active player's first legal card.
    pub fn autoplay(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Play {
            return Err(GameError::NotInGame(self.status));
        }
        let card = self.playable_cards().first().copied().ok_or(GameError::BugNobodyActive)?;
        self.play(card)
    }

    fn resolve_round(&mut self) -> Result<(), GameError> {
        let res = rules::resolve_round(&self.moves).ok_or(GameError::BugNobodyActive)?;
        let seq = self.finished_rounds + 1;
        let moves = std::mem::take(&mut self.moves);

        let winner = &mut self.players[res.winner];
        winner.score += res.score;
        winner.cards_taken += moves.len();
        if res.is_doubled {
            self.ghost_holder = Some(res.winner);
        }
        self.finished_rounds = seq;

        let game_over = self.players.iter().all(|p| p.hand_len() == 0);
        if game_over {
            self.turn.finish(&mut self.players);
        } else {
            self.turn.begin_round(&mut self.players, res.winner);
        }
        debug!(
            "round {seq}: P{} takes {} point(s){}",
            res.winner + 1,
            res.score,
            if res.is_doubled { " (doubled)" } else { "" }
        );

        let outcome = RoundOutcome {
            seq,
            winner: res.winner,
            is_doubled: res.is_doubled,
            score: res.score,
            moves,
            game_over,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_round_resolved(&outcome);
        }
        self.last_round = Some(outcome);
        if game_over {
            self.set_status(GameStatus::Finish);
        }
        Ok(())
    }

    fn set_status(&mut self, status: GameStatus) {
        info!("game status {:?} -> {:?}", self.status, status);
        self.status = status;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_status_change(status);
        }
    }
}
