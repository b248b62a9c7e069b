//! The kusokurae ruleset: constants, move legality and round resolution.
//!
//! A round is every seat with cards playing one card. The first non-ghost
//! card sets the led suit, which later players must follow when they can.
//! The highest rank on the board takes every card played (ties go to the
//! earlier card), and the Ghost doubles what the round is worth.

use crate::cards::{Card, Suit};

/// Cards in the full deck.
pub const DECK_SIZE: usize = 33;
pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;
/// Score on the board before any card is played.
pub const BASE_SCORE: i32 = 0;
/// Applied to a round's score when the Ghost is on the board.
pub const GHOST_MULTIPLIER: i32 = 2;

/// A card committed to the current round by a seat (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub seat: usize,
    pub card: Card,
}

/// Result of scoring a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub winner: usize,
    pub is_doubled: bool,
    pub score: i32,
}

/// The suit of the first non-ghost card on the board.
pub fn led_suit(moves: &[Move]) -> Option<Suit> {
    moves.iter().map(|m| m.card.suit()).find(|s| !s.is_ghost())
}

/// The led suit `card` fails to follow, if playing it from `hand` would be
/// forbidden. `hand` is the player's in-hand cards.
pub fn forbidden_by<'a, I>(card: &Card, hand: I, moves: &[Move]) -> Option<Suit>
where
    I: IntoIterator<Item = &'a Card>,
{
    if card.is_ghost() {
        return None;
    }
    let led = led_suit(moves)?;
    if card.suit() == led {
        return None;
    }
    let can_follow = hand.into_iter().any(|c| c.suit() == led);
    can_follow.then_some(led)
}

pub fn is_playable<'a, I>(card: &Card, hand: I, moves: &[Move]) -> bool
where
    I: IntoIterator<Item = &'a Card>,
{
    forbidden_by(card, hand, moves).is_none()
}

pub fn is_doubled(moves: &[Move]) -> bool {
    moves.iter().any(|m| m.card.is_ghost())
}

/// Points currently at stake, doubling included.
pub fn score_on_board(moves: &[Move]) -> i32 {
    let raw: i32 = BASE_SCORE + moves.iter().map(|m| m.card.value()).sum::<i32>();
    if is_doubled(moves) {
        raw * GHOST_MULTIPLIER
    } else {
        raw
    }
}

/// Seat holding the highest-ranked non-ghost card so far.
pub fn round_leader(moves: &[Move]) -> Option<usize> {
    let mut best: Option<&Move> = None;
    for m in moves.iter().filter(|m| !m.card.is_ghost()) {
        // Strictly greater keeps the earliest card on ties.
        if best.map_or(true, |b| m.card.rank() > b.card.rank()) {
            best = Some(m);
        }
    }
    best.map(|m| m.seat)
}

/// Score a completed round. Returns `None` for an empty board.
pub fn resolve_round(moves: &[Move]) -> Option<Resolution> {
    let first = moves.first()?;
    let winner = round_leader(moves).unwrap_or(first.seat);
    Some(Resolution { winner, is_doubled: is_doubled(moves), score: score_on_board(moves) })
}
