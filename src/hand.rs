//! 4×16 lane hand: 4 suits, 13 rank bits per 16-bit lane.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::card::{Card, CardError, Suit, MASK13, RESERVED_BITS};

/// A set of cards packed as a 64-bit word, one 16-bit lane per suit.
///
/// Combining is a bitwise OR, so adding a card that is already present leaves
/// the hand unchanged.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Hand(u64);

impl Hand {
    pub const EMPTY: Hand = Hand(0);

    #[inline(always)]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub fn from_bits(bits: u64) -> Result<Self, CardError> {
        if bits & RESERVED_BITS != 0 {
            return Err(CardError::ReservedBits(bits));
        }
        Ok(Self(bits))
    }

    #[inline]
    pub fn from_cards<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Hand::with)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Number of cards in the hand.
    #[inline(always)]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & card.bits() != 0
    }

    /// A new hand with `card` added.
    #[inline(always)]
    #[must_use]
    pub const fn with(self, card: Card) -> Self {
        Self(self.0 | card.bits())
    }

    /// A new hand holding the cards of both hands.
    #[inline(always)]
    #[must_use]
    pub const fn union(self, other: Hand) -> Self {
        Self(self.0 | other.0)
    }

    /// Accumulate `card` into this hand. Returns true if card was already present.
    #[inline(always)]
    pub fn add(&mut self, card: Card) -> bool {
        let already = self.contains(card);
        self.0 |= card.bits();
        already
    }

    #[inline(always)]
    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.bits();
    }

    /// The 13-bit rank mask of one suit.
    #[inline(always)]
    pub const fn suit(self, suit: Suit) -> u16 {
        (self.0 >> suit.shift()) as u16 & MASK13
    }

    /// The rank masks of all suits, in clubs, diamonds, hearts, spades order.
    #[inline(always)]
    pub const fn suits(self) -> [u16; 4] {
        [
            self.suit(Suit::Clubs),
            self.suit(Suit::Diamonds),
            self.suit(Suit::Hearts),
            self.suit(Suit::Spades),
        ]
    }

    /// Distinct ranks present in any suit.
    #[inline(always)]
    pub const fn ranks(self) -> u16 {
        let [c, d, h, s] = self.suits();
        c | d | h | s
    }

    /// Iterate the cards in the hand, lowest bit first.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let bit = bits & bits.wrapping_neg();
            bits &= bits - 1;
            // Lanes never carry reserved bits, so every isolated bit is a card.
            Card::from_bits(bit).ok()
        })
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Hand(card.bits())
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::from_cards(iter)
    }
}

impl BitOr<Card> for Hand {
    type Output = Hand;

    fn bitor(self, card: Card) -> Hand {
        self.with(card)
    }
}

impl BitOr<Hand> for Hand {
    type Output = Hand;

    fn bitor(self, other: Hand) -> Hand {
        self.union(other)
    }
}

impl BitOr<Card> for Card {
    type Output = Hand;

    fn bitor(self, other: Card) -> Hand {
        Hand::from(self).with(other)
    }
}

impl BitOr<Hand> for Card {
    type Output = Hand;

    fn bitor(self, hand: Hand) -> Hand {
        hand.with(self)
    }
}

impl BitOrAssign<Card> for Hand {
    fn bitor_assign(&mut self, card: Card) {
        self.0 |= card.bits();
    }
}

impl BitOrAssign<Hand> for Hand {
    fn bitor_assign(&mut self, other: Hand) {
        self.0 |= other.0;
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({self})")
    }
}

/// Parses `"As Kd 8c"` or `"AsKd8c"`, duplicates are rejected.
impl FromStr for Hand {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() % 2 != 0 {
            return Err(CardError::Parse(s.to_string()));
        }

        let mut hand = Hand::EMPTY;
        for pair in compact.chunks(2) {
            let card: Card = pair.iter().collect::<String>().parse()?;
            if hand.add(card) {
                return Err(CardError::Duplicate(card));
            }
        }
        Ok(hand)
    }
}
