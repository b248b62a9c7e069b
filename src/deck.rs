use crate::cards::{Card, Suit, ANGEL_ORDERS, TOP_RANK};
use crate::rules::{DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("no deck for {0} players")]
    UnsupportedPlayers(usize),
    #[error("{cards} cards do not split evenly between {players} players")]
    Uneven { cards: usize, players: usize },
}

/// The kusokurae deck: two Angels, the Ghost, then Baozi, Youtiao and Xiang
/// from 9 down to 0.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full 33-card deck in descending display order.
    ///
    /// ```
    /// use kusokurae::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 33);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend(ANGEL_ORDERS.iter().map(|&order| Card::new(order, Suit::Baozi, TOP_RANK)));
        cards.push(Card::ghost());
        for suit in [Suit::Baozi, Suit::Youtiao, Suit::Xiang] {
            for rank in (0..=9).rev() {
                if let Some(card) = Card::from_parts(suit, rank) {
                    cards.push(card);
                }
            }
        }
        Self { cards }
    }

    /// The deck used for `num_players`: everything for three players, one
    /// Angel fewer for four so the deck splits into 8-card hands.
    pub fn for_players(num_players: usize) -> Result<Self, DeckError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(DeckError::UnsupportedPlayers(num_players));
        }
        let mut deck = Self::standard();
        if num_players == 4 {
            deck.cards.retain(|c| c.display_order() != ANGEL_ORDERS[0]);
        }
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Total scoring value of the cards in the deck.
    pub fn value(&self) -> i32 {
        self.cards.iter().map(|c| c.value()).sum()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Split the deck into `num_players` contiguous hands of equal size, each
    /// sorted by display order (highest first).
    pub fn deal(self, num_players: usize) -> Result<Vec<Vec<Card>>, DeckError> {
        if num_players == 0 {
            return Err(DeckError::UnsupportedPlayers(num_players));
        }
        if self.cards.len() % num_players != 0 {
            return Err(DeckError::Uneven { cards: self.cards.len(), players: num_players });
        }
        let per_hand = self.cards.len() / num_players;
        Ok(self
            .cards
            .chunks(per_hand)
            .map(|chunk| {
                let mut hand = chunk.to_vec();
                hand.sort_by(|a, b| b.display_order().cmp(&a.display_order()));
                hand
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_layout() {
        let d = Deck::standard();
        assert_eq!(d.len(), DECK_SIZE);
        let orders: Vec<u8> = d.cards().iter().map(|c| c.display_order()).collect();
        let expected: Vec<u8> = (1..=DECK_SIZE as u8).rev().collect();
        assert_eq!(orders, expected);
        assert!(d.cards()[0].is_angel() && d.cards()[1].is_angel());
        assert!(d.cards()[2].is_ghost());
        assert_eq!(d.cards()[3].to_string(), "B9");
        assert_eq!(d.cards()[32].to_string(), "X0");
    }

    #[test]
    fn deck_values() {
        // 12 Baozi (Angels included) against 10 Xiang.
        assert_eq!(Deck::standard().value(), 2);
        assert_eq!(Deck::for_players(4).unwrap().value(), 1);
    }

    #[test]
    fn four_player_deck_drops_one_angel() {
        let d = Deck::for_players(4).unwrap();
        assert_eq!(d.len(), 32);
        assert_eq!(d.cards().iter().filter(|c| c.is_angel()).count(), 1);
        assert!(d.cards().iter().any(|c| c.is_ghost()));
        assert_eq!(Deck::for_players(3).unwrap().len(), 33);
    }

    #[test]
    fn unsupported_player_counts() {
        assert_eq!(Deck::for_players(2).unwrap_err(), DeckError::UnsupportedPlayers(2));
        assert_eq!(Deck::for_players(5).unwrap_err(), DeckError::UnsupportedPlayers(5));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        let mut d3 = Deck::standard();
        d3.shuffle_seeded(43);
        assert_ne!(d1.cards, d3.cards);
    }

    #[test]
    fn deal_splits_evenly_without_duplicates() {
        for n in [3, 4] {
            let mut d = Deck::for_players(n).unwrap();
            d.shuffle_seeded(7);
            let total = d.len();
            let hands = d.deal(n).unwrap();
            assert_eq!(hands.len(), n);
            let mut seen = HashSet::new();
            for hand in &hands {
                assert_eq!(hand.len(), total / n);
                assert!(hand.windows(2).all(|w| w[0].display_order() > w[1].display_order()));
                for c in hand {
                    assert!(seen.insert(c.display_order()));
                }
            }
            assert_eq!(seen.len(), total);
        }
    }

    #[test]
    fn uneven_deal_is_rejected() {
        let d = Deck::standard();
        assert_eq!(d.clone().deal(4).unwrap_err(), DeckError::Uneven { cards: 33, players: 4 });
        assert!(d.deal(0).is_err());
    }
}
