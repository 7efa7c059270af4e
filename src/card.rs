//! Card types (Suit/Rank/Card).
//!
//! A card is a single bit in a 64-bit word split into four 16-bit suit lanes:
//!
//! ```text
//!   bits 48..63 : spades   |xxxAKQJT98765432|
//!   bits 32..47 : hearts   |xxxAKQJT98765432|
//!   bits 16..31 : diamonds |xxxAKQJT98765432|
//!   bits  0..15 : clubs    |xxxAKQJT98765432|
//!   x = reserved, always zero
//! ```

use std::fmt;
use std::str::FromStr;

/// Number of ranks in a suit.
pub const RANKS_COUNT: u32 = 13;
/// Number of suits in the deck.
pub const SUITS_COUNT: u32 = 4;
/// Number of cards in the deck.
pub const CARDS_COUNT: u32 = RANKS_COUNT * SUITS_COUNT;
/// Width of a suit lane in bits.
pub const SUIT_LANE_BITS: u32 = 16;

/// The 13 rank bits of a single suit lane.
pub const MASK13: u16 = (1u16 << RANKS_COUNT) - 1;

/// The three reserved top bits of every suit lane.
pub const RESERVED_BITS: u64 = 0xE000_E000_E000_E000;

/// A playing card suit, also the index of its lane in a [`Hand`](crate::Hand).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[inline(always)]
    pub const fn idx(self) -> usize {
        self as usize
    }

    /// Bit offset of this suit lane in a 64-bit hand.
    #[inline(always)]
    pub const fn shift(self) -> u32 {
        self as u32 * SUIT_LANE_BITS
    }

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Suit {
        match x & 0x3 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub const fn from_char(c: char) -> Option<Suit> {
        match c {
            'c' | 'C' => Some(Suit::Clubs),
            'd' | 'D' => Some(Suit::Diamonds),
            'h' | 'H' => Some(Suit::Hearts),
            's' | 'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A playing card rank.
///
/// Ranks are stored as 0..12 (Two..Ace) and placed in a suit lane as the one-hot
/// bit `1 << rank`, so Two is bit 0 and Ace is bit 12.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    /// The one-hot 13-bit mask of this rank.
    #[inline(always)]
    pub const fn bit(self) -> u16 {
        1u16 << (self as u16)
    }

    /// Convert 0..12 to a Rank (Two..Ace). Input is assumed valid.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        match x {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            _ => Rank::Ace,
        }
    }

    /// The rank of a one-hot mask, `None` unless exactly one rank bit is set.
    #[inline]
    pub const fn from_bit(bit: u16) -> Option<Rank> {
        if bit.count_ones() != 1 || bit & !MASK13 != 0 {
            return None;
        }
        Some(Rank::from_u8(bit.trailing_zeros() as u8))
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub const fn from_char(c: char) -> Option<Rank> {
        match c {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' | 't' => Some(Rank::Ten),
            'J' | 'j' => Some(Rank::Jack),
            'Q' | 'q' => Some(Rank::Queen),
            'K' | 'k' => Some(Rank::King),
            'A' | 'a' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// Iterate the ranks of a 13-bit mask, highest first.
pub fn ranks_in(mask: u16) -> impl Iterator<Item = Rank> {
    let mut m = mask & MASK13;
    std::iter::from_fn(move || {
        if m == 0 {
            return None;
        }
        let idx = 15 - m.leading_zeros() as u8;
        m &= !(1u16 << idx);
        Some(Rank::from_u8(idx))
    })
}

/// Errors from building cards and hands out of raw values or text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CardError {
    /// One of the three top bits of a suit lane is set.
    ReservedBits(u64),
    /// A card word must have exactly one bit set.
    NotSingleCard(u64),
    /// Card index outside 0..52.
    IndexOutOfRange(u8),
    /// Text that is not a card.
    Parse(String),
    /// The same card appears twice.
    Duplicate(Card),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::ReservedBits(bits) => {
                write!(f, "reserved lane bits set in 0x{bits:016x}")
            }
            CardError::NotSingleCard(bits) => {
                write!(f, "0x{bits:016x} is not a single card")
            }
            CardError::IndexOutOfRange(idx) => {
                write!(f, "card index {idx} out of range 0..{CARDS_COUNT}")
            }
            CardError::Parse(text) => write!(f, "invalid card {text:?}"),
            CardError::Duplicate(card) => write!(f, "duplicate card {card}"),
        }
    }
}

impl std::error::Error for CardError {}

/// A card: one bit in the rank position of its suit lane.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card(u64);

impl Card {
    #[inline(always)]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self((rank.bit() as u64) << suit.shift())
    }

    /// Standard 0..51 card index mapping:
    /// suit = index / 13, rank = index % 13. Input is assumed valid.
    #[inline(always)]
    pub const fn from_index(index: u8) -> Self {
        debug_assert!((index as u32) < CARDS_COUNT);
        let suit = Suit::from_u8(index / RANKS_COUNT as u8);
        let rank = Rank::from_u8(index % RANKS_COUNT as u8);
        Self::new(rank, suit)
    }

    /// Convert to 0..51 index (inverse of from_index).
    #[inline(always)]
    pub const fn index(self) -> u8 {
        (self.suit() as u8) * RANKS_COUNT as u8 + (self.rank() as u8)
    }

    pub fn from_bits(bits: u64) -> Result<Self, CardError> {
        if bits & RESERVED_BITS != 0 {
            return Err(CardError::ReservedBits(bits));
        }
        if bits.count_ones() != 1 {
            return Err(CardError::NotSingleCard(bits));
        }
        Ok(Self(bits))
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn suit(self) -> Suit {
        Suit::from_u8((self.0.trailing_zeros() / SUIT_LANE_BITS) as u8)
    }

    #[inline(always)]
    pub const fn rank(self) -> Rank {
        Rank::from_u8((self.0.trailing_zeros() % SUIT_LANE_BITS) as u8)
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index as u32 >= CARDS_COUNT {
            return Err(CardError::IndexOutOfRange(index));
        }
        Ok(Card::from_index(index))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => match (Rank::from_char(r), Suit::from_char(c)) {
                (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
                _ => Err(CardError::Parse(s.to_string())),
            },
            _ => Err(CardError::Parse(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for i in 0..CARDS_COUNT as u8 {
            let card = Card::from_index(i);
            assert_eq!(card.index(), i);
            assert_eq!(card.bits().count_ones(), 1);
            assert_eq!(card.bits() & RESERVED_BITS, 0);
            assert_eq!(Card::new(card.rank(), card.suit()), card);
        }
    }

    #[test]
    fn lane_layout() {
        assert_eq!(Card::new(Rank::Two, Suit::Clubs).bits(), 1);
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).bits(), 1 << 12);
        assert_eq!(Card::new(Rank::Two, Suit::Diamonds).bits(), 1 << 16);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).bits(), 1 << 60);
        assert_eq!(Card::from_index(13), Card::new(Rank::Two, Suit::Diamonds));
    }

    #[test]
    fn from_bits_rejects_invalid_words() {
        assert_eq!(Card::from_bits(1 << 13), Err(CardError::ReservedBits(1 << 13)));
        assert_eq!(Card::from_bits(1 << 63), Err(CardError::ReservedBits(1 << 63)));
        assert_eq!(Card::from_bits(0), Err(CardError::NotSingleCard(0)));
        assert_eq!(Card::from_bits(0b11), Err(CardError::NotSingleCard(0b11)));
        assert_eq!(
            Card::from_bits(1 << 44),
            Ok(Card::new(Rank::Ace, Suit::Hearts))
        );
    }

    #[test]
    fn try_from_index() {
        assert_eq!(Card::try_from(51), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(Card::try_from(52), Err(CardError::IndexOutOfRange(52)));
    }

    #[test]
    fn parse_and_display() {
        let card: Card = "Td".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(card.to_string(), "Td");
        assert_eq!("as".parse::<Card>(), Ok(Card::new(Rank::Ace, Suit::Spades)));
        assert!("1s".parse::<Card>().is_err());
        assert!("Asd".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn rank_bits() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_bit(rank.bit()), Some(rank));
        }
        assert_eq!(Rank::from_bit(0), None);
        assert_eq!(Rank::from_bit(0b101), None);
        assert_eq!(Rank::from_bit(1 << 13), None);
    }

    #[test]
    fn ranks_in_is_descending() {
        let mask = Rank::Ace.bit() | Rank::Eight.bit() | Rank::Two.bit();
        let ranks: Vec<Rank> = ranks_in(mask).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::Eight, Rank::Two]);
        assert_eq!(ranks_in(0).count(), 0);
    }
}
