//! Packed u32 evaluation.
//!
//! Layout:
//! bits 28..31 : category (0..8), higher is better
//! bits 26..27 : unused, always 0
//! bits 13..25 : high ranks (13-bit rank mask)
//! bits  0..12 : low ranks (13-bit rank mask)
//!
//! What the rank masks hold depends on the category, e.g. the quads rank and the
//! kicker for four of a kind, or both pair ranks and the kicker for two pair.
//! Comparing raw values orders hands by strength.

use std::fmt;

use crate::card::{ranks_in, MASK13, RANKS_COUNT};

pub const CATEGORY_SHIFT: u32 = 28;
pub const HIGH_RANKS_SHIFT: u32 = RANKS_COUNT;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Evaluation(u32);

/// Hand categories (higher is better).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::Trips,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::Quads,
        Category::StraightFlush,
    ];

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Category {
        match x {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::Trips,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::Quads,
            _ => Category::StraightFlush,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::Trips => "Three Of A Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::Quads => "Four Of A Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Evaluation {
    #[inline(always)]
    pub const fn new(category: Category, high_ranks: u16, low_ranks: u16) -> Self {
        Self(
            ((category as u32) << CATEGORY_SHIFT)
                | (((high_ranks & MASK13) as u32) << HIGH_RANKS_SHIFT)
                | (low_ranks & MASK13) as u32,
        )
    }

    #[inline(always)]
    pub const fn from_value(value: u32) -> Self {
        Self(value)
    }

    #[inline(always)]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn category(self) -> Category {
        Category::from_u8((self.0 >> CATEGORY_SHIFT) as u8)
    }

    #[inline(always)]
    pub const fn high_ranks(self) -> u16 {
        (self.0 >> HIGH_RANKS_SHIFT) as u16 & MASK13
    }

    #[inline(always)]
    pub const fn low_ranks(self) -> u16 {
        self.0 as u16 & MASK13
    }
}

impl From<Evaluation> for u32 {
    fn from(e: Evaluation) -> u32 {
        e.0
    }
}

/// Formats as `Pair [8] [AKQ]`: category, high ranks, low ranks.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category())?;
        for rank in ranks_in(self.high_ranks()) {
            write!(f, "{rank}")?;
        }
        write!(f, "] [")?;
        for rank in ranks_in(self.low_ranks()) {
            write!(f, "{rank}")?;
        }
        write!(f, "]")
    }
}
