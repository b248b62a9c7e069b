use std::fmt;
use std::str::FromStr;

/// The four card suits. The discriminant is the suit's fixed code; for the
/// three ranked suits it also equals the per-card scoring value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Suit {
    /// "Shit": every card taken costs a point.
    Xiang = -1,
    /// "Fried bread stick": worth nothing.
    Youtiao = 0,
    /// "Stuffed bun": every card taken scores a point.
    Baozi = 1,
    /// The lone wildcard. Never compared by rank; doubles the round it lands in.
    Ghost = 2,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Baozi, Suit::Youtiao, Suit::Xiang, Suit::Ghost];

    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Points a single captured card of this suit is worth.
    pub const fn value(self) -> i32 {
        match self {
            Suit::Xiang => -1,
            Suit::Youtiao => 0,
            Suit::Baozi => 1,
            Suit::Ghost => 0,
        }
    }

    pub const fn is_ghost(self) -> bool {
        matches!(self, Suit::Ghost)
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Xiang => 'X',
            Suit::Youtiao => 'Y',
            Suit::Baozi => 'B',
            Suit::Ghost => 'G',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Xiang => "Xiang",
            Suit::Youtiao => "Youtiao",
            Suit::Baozi => "Baozi",
            Suit::Ghost => "Ghost",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "xiang" => Ok(Suit::Xiang),
            "youtiao" => Ok(Suit::Youtiao),
            "baozi" => Ok(Suit::Baozi),
            "ghost" | "other" => Ok(Suit::Ghost),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'X' => Ok(Suit::Xiang),
            'Y' => Ok(Suit::Youtiao),
            'B' => Ok(Suit::Baozi),
            'G' => Ok(Suit::Ghost),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// Rank shared by the Angels and the Ghost.
pub const TOP_RANK: i32 = 10;

/// Display order of the Ghost in the unshuffled deck.
pub const GHOST_ORDER: u8 = 31;

/// Display orders of the two Angels (Baozi 10). The first is left out of a
/// four-player deck.
pub const ANGEL_ORDERS: [u8; 2] = [33, 32];

/// A kusokurae card.
///
/// `display_order` is the card's identity: unique across the deck, and the
/// key hands are sorted by (highest first). `round_played` is 0 while the card
/// is in hand and the 1-based round number once it has been committed.
///
/// ```
/// use kusokurae::cards::{Card, Suit};
///
/// let card: Card = "B7".parse().unwrap();
/// assert_eq!(card.suit(), Suit::Baozi);
/// assert_eq!(card.rank(), 7);
/// assert!(!card.is_played());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    display_order: u8,
    suit: Suit,
    rank: i32,
    round_played: u32,
}

impl Card {
    pub const fn new(display_order: u8, suit: Suit, rank: i32) -> Self {
        Self { display_order, suit, rank, round_played: 0 }
    }

    /// The card of the standard deck with this suit and rank. Angels resolve to
    /// the first Angel; use [`Card::angel`] to address the second one.
    pub fn from_parts(suit: Suit, rank: i32) -> Option<Self> {
        let base = match suit {
            Suit::Ghost => return (rank == TOP_RANK).then(Card::ghost),
            Suit::Baozi if rank == TOP_RANK => return Card::angel(0),
            Suit::Baozi => 21,
            Suit::Youtiao => 11,
            Suit::Xiang => 1,
        };
        if !(0..=9).contains(&rank) {
            return None;
        }
        Some(Card::new(base + rank as u8, suit, rank))
    }

    pub const fn ghost() -> Self {
        Card::new(GHOST_ORDER, Suit::Ghost, TOP_RANK)
    }

    /// One of the two Angels, `which` being 0 or 1.
    pub fn angel(which: usize) -> Option<Self> {
        ANGEL_ORDERS.get(which).map(|&order| Card::new(order, Suit::Baozi, TOP_RANK))
    }

    pub const fn display_order(self) -> u8 {
        self.display_order
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn rank(self) -> i32 {
        self.rank
    }

    pub const fn round_played(self) -> u32 {
        self.round_played
    }

    pub const fn is_played(self) -> bool {
        self.round_played != 0
    }

    pub const fn is_ghost(self) -> bool {
        self.suit.is_ghost()
    }

    pub const fn is_angel(self) -> bool {
        matches!(self.suit, Suit::Baozi) && self.rank == TOP_RANK
    }

    pub const fn value(self) -> i32 {
        self.suit.value()
    }

    /// Whether both values denote the same physical card, regardless of
    /// whether either copy has been played.
    pub const fn same_card(self, other: Card) -> bool {
        self.display_order == other.display_order
    }

    pub(crate) fn mark_played(&mut self, round: u32) {
        debug_assert!(round > 0 && self.round_played == 0);
        self.round_played = round;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ghost() {
            return write!(f, "G");
        }
        if self.is_angel() {
            let nth = if self.display_order == ANGEL_ORDERS[0] { 1 } else { 2 };
            return write!(f, "A{nth}");
        }
        write!(f, "{}{}", self.suit, self.rank)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts `G`, `A`/`A1`/`A2` for the Angels, and suit letter + rank
    /// (`B9`, `Y0`, `X5`, `B10`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        let invalid = || CardParseError::Invalid(s.to_string());
        match t.as_str() {
            "G" => return Ok(Card::ghost()),
            "A" | "A1" => return Card::angel(0).ok_or_else(invalid),
            "A2" => return Card::angel(1).ok_or_else(invalid),
            _ => {}
        }
        let mut chars = t.chars();
        let suit = Suit::try_from(chars.next().ok_or_else(invalid)?)?;
        let rank: i32 = chars.as_str().parse().map_err(|_| invalid())?;
        Card::from_parts(suit, rank).ok_or_else(invalid)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use kusokurae::cards::{parse_cards, Card};
///
/// let cards = parse_cards("G, B9 X0").unwrap();
/// assert_eq!(cards[0], Card::ghost());
/// assert_eq!(cards[2].rank(), 0);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suit_codes_match_values_for_ranked_suits() {
        for suit in [Suit::Xiang, Suit::Youtiao, Suit::Baozi] {
            assert_eq!(suit.code() as i32, suit.value());
        }
        assert_eq!(Suit::Ghost.code(), 2);
        assert_eq!(Suit::Ghost.value(), 0);
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Baozi.to_string(), "B");
        assert_eq!(Suit::from_str("x").unwrap(), Suit::Xiang);
        assert_eq!(Suit::from_str("Youtiao").unwrap(), Suit::Youtiao);
        assert_eq!(Suit::from_str("other").unwrap(), Suit::Ghost);
        assert!(Suit::from_str("h").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let b9 = Card::from_parts(Suit::Baozi, 9).unwrap();
        assert_eq!(b9.to_string(), "B9");
        assert_eq!(b9.display_order(), 30);
        assert_eq!(Card::from_str("b9").unwrap(), b9);
        assert_eq!(Card::from_str("X0").unwrap().display_order(), 1);
        assert_eq!(Card::from_str("Y9").unwrap().display_order(), 20);
        assert_eq!(Card::from_str("G").unwrap(), Card::ghost());
    }

    #[test]
    fn angels_have_distinct_identities() {
        let a1 = Card::from_str("A").unwrap();
        let a2 = Card::from_str("A2").unwrap();
        assert!(a1.is_angel() && a2.is_angel());
        assert!(!a1.same_card(a2));
        assert_eq!(Card::from_str("B10").unwrap(), a1);
        assert_eq!(a1.to_string(), "A1");
        assert_eq!(a2.to_string(), "A2");
    }

    #[test]
    fn rejects_out_of_range_ranks() {
        assert!(Card::from_str("Y10").is_err());
        assert!(Card::from_str("X-1").is_err());
        assert!(Card::from_str("B").is_err());
        assert!(Card::from_str("").is_err());
        assert!(matches!(Card::from_str("Q3"), Err(CardParseError::Suit(_))));
    }

    #[test]
    fn played_marker_does_not_change_identity() {
        let mut c = Card::from_str("X4").unwrap();
        let fresh = c;
        c.mark_played(3);
        assert!(c.is_played());
        assert_eq!(c.round_played(), 3);
        assert!(c.same_card(fresh));
        assert_ne!(c, fresh);
    }
}
