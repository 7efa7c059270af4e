//! LUT-based evaluator over the 4×16 lane [`Hand`].
//!
//! Every entry point follows the same shape: split the hand into four suit
//! masks, OR them into the set of distinct ranks, look for a flush or straight
//! when at least five ranks are present, then classify the duplicate pattern
//! with bitwise identities over the suit masks instead of counting ranks:
//!
//! - `c & d & h & s` holds quads.
//! - `c ^ d ^ h ^ s` holds ranks seen an odd number of times (singletons, trips).
//! - `ranks ^ (c ^ d ^ h ^ s)` holds ranks seen an even number of times (pairs, quads).
//! - `(c & d) | (h & s)` holds every rank seen three times, any three suits
//!   include either clubs and diamonds or hearts and spades.
//!
//! All three entry points return the same value for the same hand.

use crate::evaluation::{Category, Evaluation};
use crate::hand::Hand;
use crate::tables::TableViews;

/// Hand evaluator borrowing built [`Tables`](crate::Tables).
///
/// Cheap to copy and safe to share between threads: the tables are read-only
/// once built.
#[derive(Copy, Clone)]
pub struct Evaluator<'a> {
    tables: TableViews<'a>,
}

#[inline(always)]
fn straight_flush(high_card: u16) -> Evaluation {
    Evaluation::new(Category::StraightFlush, 0, high_card)
}

#[inline(always)]
fn quads(quads_rank: u16, kicker: u16) -> Evaluation {
    Evaluation::new(Category::Quads, quads_rank, kicker)
}

#[inline(always)]
fn full_house(trips_rank: u16, pair_rank: u16) -> Evaluation {
    Evaluation::new(Category::FullHouse, trips_rank, pair_rank)
}

#[inline(always)]
fn flush(five_ranks: u16) -> Evaluation {
    Evaluation::new(Category::Flush, 0, five_ranks)
}

#[inline(always)]
fn straight(high_card: u16) -> Evaluation {
    Evaluation::new(Category::Straight, 0, high_card)
}

#[inline(always)]
fn trips(trips_rank: u16, two_kickers: u16) -> Evaluation {
    Evaluation::new(Category::Trips, trips_rank, two_kickers)
}

#[inline(always)]
fn two_pair(pair_ranks: u16, kicker: u16) -> Evaluation {
    Evaluation::new(Category::TwoPair, pair_ranks, kicker)
}

#[inline(always)]
fn one_pair(pair_rank: u16, three_kickers: u16) -> Evaluation {
    Evaluation::new(Category::OnePair, pair_rank, three_kickers)
}

#[inline(always)]
fn high_card(five_ranks: u16) -> Evaluation {
    Evaluation::new(Category::HighCard, 0, five_ranks)
}

impl<'a> Evaluator<'a> {
    #[inline(always)]
    pub(crate) fn new(tables: TableViews<'a>) -> Self {
        Self { tables }
    }

    #[inline(always)]
    fn number_of_bits(&self, mask: u16) -> u32 {
        self.tables.number_of_bits[mask as usize] as u32
    }

    #[inline(always)]
    fn rank_of_straight(&self, mask: u16) -> u16 {
        self.tables.rank_of_straights.get(mask)
    }

    #[inline(always)]
    fn high_up_to_5_bits(&self, mask: u16) -> u16 {
        self.tables.high_up_to_5_bits.get(mask)
    }

    #[inline(always)]
    fn high_bit(&self, mask: u16) -> u16 {
        self.tables.high_bit.get(mask)
    }

    #[inline(always)]
    fn high_up_to_3_bits(&self, mask: u16) -> u16 {
        self.tables.high_up_to_3_bits.get(mask)
    }

    /// The first suit holding five or more cards.
    #[inline(always)]
    fn flush_suit(&self, suits: [u16; 4]) -> Option<u16> {
        suits.into_iter().find(|&s| self.number_of_bits(s) >= 5)
    }

    /// Straight flush, flush or straight for a hand with at least five ranks.
    #[inline(always)]
    fn flush_or_straight(&self, suits: [u16; 4], ranks: u16) -> Option<Evaluation> {
        match self.flush_suit(suits) {
            Some(suit) => match self.rank_of_straight(suit) {
                0 => Some(flush(self.high_up_to_5_bits(suit))),
                high => Some(straight_flush(high)),
            },
            None => match self.rank_of_straight(ranks) {
                0 => None,
                high => Some(straight(high)),
            },
        }
    }

    /// Evaluate a hand of exactly 5 cards.
    pub fn evaluate5(&self, hand: Hand) -> Evaluation {
        debug_assert_eq!(hand.len(), 5, "evaluate5 needs 5 cards: {hand}");

        let suits = hand.suits();
        let [clubs, diamonds, hearts, spades] = suits;
        let ranks = clubs | diamonds | hearts | spades;

        match self.number_of_bits(ranks) {
            // Straight, flush, straight flush or high card
            5 => match self.flush_or_straight(suits, ranks) {
                Some(value) => value,
                None => high_card(ranks),
            },
            // [2, 1, 1, 1]
            4 => {
                let singletons = clubs ^ diamonds ^ hearts ^ spades;
                let pair_rank = ranks ^ singletons;

                one_pair(pair_rank, singletons)
            }
            // [2, 2, 1] or [3, 1, 1]
            3 => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;
                let pairs = ranks ^ singletons_and_trips;

                if pairs != 0 {
                    two_pair(pairs, singletons_and_trips)
                } else {
                    let trips_rank = (clubs & diamonds) | (hearts & spades);
                    trips(trips_rank, ranks ^ trips_rank)
                }
            }
            // [4, 1] or [3, 2]
            2 => {
                let quads_rank = clubs & diamonds & hearts & spades;
                if quads_rank != 0 {
                    quads(quads_rank, ranks ^ quads_rank)
                } else {
                    let trips_rank = clubs ^ diamonds ^ hearts ^ spades;
                    full_house(trips_rank, ranks ^ trips_rank)
                }
            }
            _ => {
                debug_assert!(false, "invalid 5 cards hand: {hand}");
                Evaluation::from_value(0)
            }
        }
    }

    /// Evaluate a hand of exactly 7 cards.
    pub fn evaluate7(&self, hand: Hand) -> Evaluation {
        debug_assert_eq!(hand.len(), 7, "evaluate7 needs 7 cards: {hand}");

        let suits = hand.suits();
        let [clubs, diamonds, hearts, spades] = suits;
        let ranks = clubs | diamonds | hearts | spades;
        let ranks_count = self.number_of_bits(ranks);

        // Five ranks out of seven cards leave at most two duplicates, too few for
        // a full house or quads, so a flush or straight is final.
        if ranks_count >= 5 {
            if let Some(value) = self.flush_or_straight(suits, ranks) {
                return value;
            }
        }

        match ranks_count {
            // [4, 3]
            2 => {
                let quads_rank = clubs & diamonds & hearts & spades;
                quads(quads_rank, ranks ^ quads_rank)
            }
            // [3, 3, 1], [3, 2, 2] or [4, 2, 1]
            3 => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;

                if self.number_of_bits(singletons_and_trips) == 1 {
                    let quads_rank = clubs & diamonds & hearts & spades;
                    if quads_rank == 0 {
                        // [3, 2, 2]
                        let pairs = ranks ^ singletons_and_trips;
                        full_house(singletons_and_trips, self.high_bit(pairs))
                    } else {
                        // [4, 2, 1]
                        quads(quads_rank, self.high_bit(ranks ^ quads_rank))
                    }
                } else {
                    // [3, 3, 1]
                    let trips_ranks = (clubs & diamonds) | (hearts & spades);
                    let high_trips = self.high_bit(trips_ranks);
                    full_house(high_trips, trips_ranks ^ high_trips)
                }
            }
            // [2, 2, 2, 1], [3, 2, 1, 1] or [4, 1, 1, 1]
            4 => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;

                if self.number_of_bits(singletons_and_trips) == 1 {
                    // [2, 2, 2, 1]
                    let three_pairs = ranks ^ singletons_and_trips;
                    let high_pair = self.high_bit(three_pairs);
                    let second_pair = self.high_bit(three_pairs ^ high_pair);
                    let kicker = self.high_bit(ranks ^ high_pair ^ second_pair);
                    two_pair(high_pair | second_pair, kicker)
                } else {
                    let quads_rank = clubs & diamonds & hearts & spades;
                    if quads_rank == 0 {
                        // [3, 2, 1, 1]
                        let pair_rank = ranks ^ singletons_and_trips;
                        let trips_rank = ((clubs & diamonds) | (hearts & spades)) & !pair_rank;
                        full_house(trips_rank, pair_rank)
                    } else {
                        // [4, 1, 1, 1]
                        quads(quads_rank, self.high_bit(singletons_and_trips))
                    }
                }
            }
            // [3, 1, 1, 1, 1] or [2, 2, 1, 1, 1]
            5 => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;
                let pairs = ranks ^ singletons_and_trips;

                if pairs != 0 {
                    two_pair(pairs, self.high_bit(singletons_and_trips))
                } else {
                    let trips_rank = (clubs & diamonds) | (hearts & spades);
                    let kickers = ranks ^ trips_rank;
                    let first = self.high_bit(kickers);
                    let second = self.high_bit(kickers ^ first);
                    trips(trips_rank, first | second)
                }
            }
            // [2, 1, 1, 1, 1, 1]
            6 => {
                let singletons = clubs ^ diamonds ^ hearts ^ spades;
                let pair_rank = ranks ^ singletons;
                one_pair(pair_rank, self.high_up_to_3_bits(singletons))
            }
            7 => high_card(self.high_up_to_5_bits(ranks)),
            _ => {
                debug_assert!(false, "invalid 7 cards hand: {hand}");
                Evaluation::from_value(0)
            }
        }
    }

    /// Evaluate a hand of 5, 6 or 7 cards, `cards_count` must match the hand.
    pub fn evaluate(&self, hand: Hand, cards_count: u32) -> Evaluation {
        debug_assert!(
            (5..=7).contains(&cards_count),
            "evaluate needs 5 to 7 cards, got {cards_count}"
        );
        debug_assert_eq!(hand.len(), cards_count, "card count mismatch: {hand}");

        let suits = hand.suits();
        let [clubs, diamonds, hearts, spades] = suits;
        let ranks = clubs | diamonds | hearts | spades;
        let ranks_count = self.number_of_bits(ranks);
        let duplicates = cards_count.saturating_sub(ranks_count);

        let flush_or_straight = if ranks_count >= 5 {
            self.flush_or_straight(suits, ranks)
        } else {
            None
        };

        match flush_or_straight {
            Some(value) if value.category() == Category::StraightFlush => return value,
            // Five distinct ranks in at most seven cards leave at most two
            // spare cards. Three or more duplicates could hide trips or quads,
            // and a full house or quads beats a flush.
            Some(value) if duplicates < 3 => return value,
            _ => {}
        }

        match duplicates {
            0 => high_card(self.high_up_to_5_bits(ranks)),
            1 => {
                let singletons = clubs ^ diamonds ^ hearts ^ spades;
                let pair_rank = ranks ^ singletons;
                one_pair(pair_rank, self.high_up_to_3_bits(singletons))
            }
            2 => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;
                let pairs = ranks ^ singletons_and_trips;

                if pairs != 0 {
                    two_pair(pairs, self.high_bit(singletons_and_trips))
                } else {
                    let trips_rank = (clubs & diamonds) | (hearts & spades);
                    let kickers = ranks ^ trips_rank;
                    let first = self.high_bit(kickers);
                    let second = self.high_bit(kickers ^ first);
                    trips(trips_rank, first | second)
                }
            }
            // Four of a kind, full house, two pair, or a flush/straight
            _ => {
                let singletons_and_trips = clubs ^ diamonds ^ hearts ^ spades;
                let pairs = ranks ^ singletons_and_trips;

                if self.number_of_bits(pairs) != duplicates {
                    let quads_rank = clubs & diamonds & hearts & spades;
                    if quads_rank != 0 {
                        return quads(quads_rank, self.high_bit(ranks ^ quads_rank));
                    }

                    // No quads, so there are trips, and with three or more
                    // duplicates that means a full house.
                    let trips_ranks = ((clubs & diamonds) | (hearts & spades))
                        & ((clubs & hearts) | (diamonds & spades));
                    let high_trips = self.high_bit(trips_ranks);
                    let pair_rank = self.high_bit((trips_ranks | pairs) ^ high_trips);
                    full_house(high_trips, pair_rank)
                } else if let Some(value) = flush_or_straight {
                    value
                } else {
                    let high_pair = self.high_bit(pairs);
                    let second_pair = self.high_bit(pairs ^ high_pair);
                    let kicker = self.high_bit(ranks ^ high_pair ^ second_pair);
                    two_pair(high_pair | second_pair, kicker)
                }
            }
        }
    }
}
