//! Lookup tables over 13-bit rank masks, laid out in one byte buffer.
//!
//! - number_of_bits[mask]    -> number of set bits (u8)
//! - rank_of_straights[mask] -> one-hot high card of the best straight, or 0 (u16)
//!                              wheel A2345 returns the Five bit
//! - high_up_to_5_bits[mask] -> the top 5 set bits (u16)
//! - high_bit[mask]          -> the highest set bit (u16)
//! - high_up_to_3_bits[mask] -> the top 3 set bits (u16)
//!
//! The evaluator never looks up a mask with more than 7 bits set, so the tables
//! stop at `0b1111111000000`. The top-3 table is only queried with at most 5
//! bits set and stops at `0b1111100000000`.

use std::fmt;
use std::mem::size_of;

use log::{debug, trace};

use crate::evaluator::Evaluator;

/// Entries of the tables indexed by any mask with at most 7 bits set.
pub const BITS_ARRAY_SIZE: usize = 0b1_1111_1100_0000 + 1;

/// Entries of the top-3 table, indexed by masks with at most 5 bits set.
pub const HIGH_UP_TO_3_BITS_ARRAY_SIZE: usize = 0b1_1111_0000_0000 + 1;

/// Bytes a buffer must hold for [`Tables::with_buffer`].
pub const TABLES_BUFFER_SIZE: usize = size_of::<u8>() * BITS_ARRAY_SIZE
    + size_of::<u16>() * (HIGH_UP_TO_3_BITS_ARRAY_SIZE + 3 * BITS_ARRAY_SIZE);

const WORD_TABLE_BYTES: usize = size_of::<u16>() * BITS_ARRAY_SIZE;
const RANK_OF_STRAIGHTS_OFFSET: usize = size_of::<u8>() * BITS_ARRAY_SIZE;
const HIGH_UP_TO_5_BITS_OFFSET: usize = RANK_OF_STRAIGHTS_OFFSET + WORD_TABLE_BYTES;
const HIGH_BIT_OFFSET: usize = HIGH_UP_TO_5_BITS_OFFSET + WORD_TABLE_BYTES;
const HIGH_UP_TO_3_BITS_OFFSET: usize = HIGH_BIT_OFFSET + WORD_TABLE_BYTES;

const STRAIGHT_WINDOW: u16 = 0b11111;
const WHEEL_MASK: u16 = 0b1_0000_0000_1111;
const WHEEL_HIGH_CARD: u16 = 1 << 3;

/// One-hot high card of the highest 5-rank run in `mask`, 0 if there is none.
pub const fn straight_high_card(mask: u16) -> u16 {
    // Check 5-bit windows from highest possible start (8) down to 0
    let mut s: u16 = 9;
    while s > 0 {
        s -= 1;
        let window = STRAIGHT_WINDOW << s;
        if (mask & window) == window {
            return 1 << (s + 4);
        }
    }

    // Ace plays low in the wheel, the straight is Five-high.
    if (mask & WHEEL_MASK) == WHEEL_MASK {
        return WHEEL_HIGH_CARD;
    }

    0
}

/// The highest `n` set bits of `mask`.
pub const fn high_bits(mask: u16, n: u32) -> u16 {
    let mut rest = mask;
    let mut out: u16 = 0;
    let mut taken = 0;
    while rest != 0 && taken < n {
        let bit = 1u16 << (15 - rest.leading_zeros());
        out |= bit;
        rest &= !bit;
        taken += 1;
    }
    out
}

/// Buffer errors when adopting caller memory for the tables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TablesError {
    BufferTooSmall { required: usize, actual: usize },
}

impl fmt::Display for TablesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablesError::BufferTooSmall { required, actual } => write!(
                f,
                "tables buffer holds {actual} bytes, {required} are required"
            ),
        }
    }
}

impl std::error::Error for TablesError {}

/// Read-only u16 table stored as native-endian byte pairs.
#[derive(Copy, Clone)]
pub(crate) struct WordTable<'a>(&'a [u8]);

impl WordTable<'_> {
    #[inline(always)]
    pub(crate) fn get(self, mask: u16) -> u16 {
        let i = mask as usize * 2;
        u16::from_ne_bytes([self.0[i], self.0[i + 1]])
    }
}

/// Borrowed views of the five tables inside a built buffer.
#[derive(Copy, Clone)]
pub(crate) struct TableViews<'a> {
    pub(crate) number_of_bits: &'a [u8],
    pub(crate) rank_of_straights: WordTable<'a>,
    pub(crate) high_up_to_5_bits: WordTable<'a>,
    pub(crate) high_bit: WordTable<'a>,
    pub(crate) high_up_to_3_bits: WordTable<'a>,
}

impl<'a> TableViews<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            number_of_bits: &bytes[..RANK_OF_STRAIGHTS_OFFSET],
            rank_of_straights: WordTable(&bytes[RANK_OF_STRAIGHTS_OFFSET..HIGH_UP_TO_5_BITS_OFFSET]),
            high_up_to_5_bits: WordTable(&bytes[HIGH_UP_TO_5_BITS_OFFSET..HIGH_BIT_OFFSET]),
            high_bit: WordTable(&bytes[HIGH_BIT_OFFSET..HIGH_UP_TO_3_BITS_OFFSET]),
            high_up_to_3_bits: WordTable(&bytes[HIGH_UP_TO_3_BITS_OFFSET..TABLES_BUFFER_SIZE]),
        }
    }
}

#[inline(always)]
fn put_word(table: &mut [u8], index: usize, value: u16) {
    table[index * 2..index * 2 + 2].copy_from_slice(&value.to_ne_bytes());
}

fn build(buffer: &mut [u8]) {
    trace!(
        "tables layout: rank_of_straights@{RANK_OF_STRAIGHTS_OFFSET} \
         high_up_to_5_bits@{HIGH_UP_TO_5_BITS_OFFSET} high_bit@{HIGH_BIT_OFFSET} \
         high_up_to_3_bits@{HIGH_UP_TO_3_BITS_OFFSET}"
    );

    let (number_of_bits, rest) = buffer.split_at_mut(RANK_OF_STRAIGHTS_OFFSET);
    let (rank_of_straights, rest) = rest.split_at_mut(WORD_TABLE_BYTES);
    let (high_up_to_5_bits, rest) = rest.split_at_mut(WORD_TABLE_BYTES);
    let (high_bit, high_up_to_3_bits) = rest.split_at_mut(WORD_TABLE_BYTES);

    for (i, count) in number_of_bits.iter_mut().enumerate() {
        let mask = i as u16;
        *count = mask.count_ones() as u8;
        put_word(rank_of_straights, i, straight_high_card(mask));
        put_word(high_up_to_5_bits, i, high_bits(mask, 5));
        put_word(high_bit, i, high_bits(mask, 1));
        if i < HIGH_UP_TO_3_BITS_ARRAY_SIZE {
            put_word(high_up_to_3_bits, i, high_bits(mask, 3));
        }
    }
}

/// The evaluator tables and the buffer that holds them.
///
/// Build once, then hand out [`Evaluator`]s with [`Tables::evaluator`]; they
/// borrow the tables, so the buffer cannot be released while one is alive.
/// Dropping the tables (or [`Tables::into_inner`]) releases the buffer.
pub struct Tables<B = Box<[u8]>> {
    buffer: B,
}

impl Tables {
    /// Allocate a buffer of [`TABLES_BUFFER_SIZE`] bytes and build the tables.
    pub fn new() -> Self {
        let mut buffer = vec![0u8; TABLES_BUFFER_SIZE].into_boxed_slice();
        build(&mut buffer);
        debug!("built evaluator tables ({TABLES_BUFFER_SIZE} bytes)");
        Self { buffer }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Tables<B> {
    /// Build the tables into a caller supplied buffer.
    ///
    /// Pass an owned buffer (`Vec<u8>`, `Box<[u8]>`) to hand it over, or a
    /// `&mut [u8]` to keep ownership. Only the first [`TABLES_BUFFER_SIZE`] bytes
    /// are used.
    pub fn with_buffer(mut buffer: B) -> Result<Self, TablesError> {
        let actual = buffer.as_ref().len();
        if actual < TABLES_BUFFER_SIZE {
            return Err(TablesError::BufferTooSmall {
                required: TABLES_BUFFER_SIZE,
                actual,
            });
        }

        build(&mut buffer.as_mut()[..TABLES_BUFFER_SIZE]);
        debug!("built evaluator tables in caller buffer ({actual} bytes)");
        Ok(Self { buffer })
    }
}

impl<B: AsRef<[u8]>> Tables<B> {
    #[inline]
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.views())
    }

    #[inline(always)]
    pub(crate) fn views(&self) -> TableViews<'_> {
        TableViews::new(self.buffer.as_ref())
    }

    /// Release the tables and give the buffer back.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B> fmt::Debug for Tables<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables")
            .field("bytes", &TABLES_BUFFER_SIZE)
            .finish_non_exhaustive()
    }
}
