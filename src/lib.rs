//! Texas Hold'em hand evaluation over suit-lane bitmasks.
//!
//! A [`Hand`] is a 64-bit word with one 16-bit lane per suit. Evaluation splits
//! the lanes, classifies the hand with bitwise set operations and a few lookup
//! tables, and packs the result into a 32-bit [`Evaluation`] whose raw value
//! orders hands by strength.
//!
//! ```
//! use holdem_eval::{Category, Hand, Tables};
//!
//! let tables = Tables::new();
//! let evaluator = tables.evaluator();
//!
//! let hand: Hand = "As 8c 9c Ks Qs Ts 8d".parse().unwrap();
//! let value = evaluator.evaluate7(hand);
//! assert_eq!(value.category(), Category::OnePair);
//! assert_eq!(value, evaluator.evaluate(hand, 7));
//! ```

pub mod card;
pub mod hand;
pub mod tables;
pub mod evaluation;
pub mod evaluator;
pub mod batch;

pub use card::{ranks_in, Card, CardError, Rank, Suit, MASK13};
pub use evaluation::{Category, Evaluation};
pub use evaluator::Evaluator;
pub use hand::Hand;
pub use tables::{Tables, TablesError, TABLES_BUFFER_SIZE};

#[cfg(feature = "parallel")]
pub use batch::{eval_into_par, eval_sum_par};
pub use batch::{eval_into, eval_sum};
