//! Batch evaluation helpers.
//!
//! Keep evaluation separate from generation: callers build a `&[Hand]` (or
//! stream them) and these helpers evaluate the whole slice with one
//! [`Evaluator`]. All hands in a batch hold the same number of cards.
//!
//! The "sum of packed values" reduction keeps the compiler from optimizing the
//! work away without allocating an output array, which is what throughput
//! measurements want.

use crate::{Evaluation, Evaluator, Hand};

#[inline(always)]
fn evaluate_one(evaluator: &Evaluator<'_>, hand: Hand, cards_count: u32) -> Evaluation {
    match cards_count {
        5 => evaluator.evaluate5(hand),
        7 => evaluator.evaluate7(hand),
        n => evaluator.evaluate(hand, n),
    }
}

/// Sequential: evaluate all hands and return a wrapping sum of packed values.
#[inline]
pub fn eval_sum(evaluator: &Evaluator<'_>, hands: &[Hand], cards_count: u32) -> u32 {
    hands.iter().fold(0u32, |acc, &h| {
        acc.wrapping_add(evaluate_one(evaluator, h, cards_count).value())
    })
}

/// Sequential: evaluate and write each result into `out`, return a wrapping sum.
///
/// `out` must be as long as `hands`.
#[inline]
pub fn eval_into(
    evaluator: &Evaluator<'_>,
    hands: &[Hand],
    cards_count: u32,
    out: &mut [Evaluation],
) -> u32 {
    assert_eq!(hands.len(), out.len());
    let mut acc: u32 = 0;
    for (dst, &h) in out.iter_mut().zip(hands) {
        *dst = evaluate_one(evaluator, h, cards_count);
        acc = acc.wrapping_add(dst.value());
    }
    acc
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use rayon::prelude::*;

    /// Parallel: evaluate all hands and return a wrapping sum of packed values.
    ///
    /// Best when `hands` is large (millions). For small N, overhead dominates.
    pub fn eval_sum_par(evaluator: &Evaluator<'_>, hands: &[Hand], cards_count: u32) -> u32 {
        hands
            .par_iter()
            .map(|&h| evaluate_one(evaluator, h, cards_count).value())
            .reduce(|| 0u32, |a, b| a.wrapping_add(b))
    }

    pub fn eval_into_par(
        evaluator: &Evaluator<'_>,
        hands: &[Hand],
        cards_count: u32,
        out: &mut [Evaluation],
    ) -> u32 {
        assert_eq!(hands.len(), out.len());

        out.par_iter_mut()
            .zip(hands.par_iter())
            .for_each(|(dst, &h)| {
                *dst = evaluate_one(evaluator, h, cards_count);
            });

        out.par_iter()
            .map(|e| e.value())
            .reduce(|| 0u32, |a, b| a.wrapping_add(b))
    }
}

#[cfg(feature = "parallel")]
pub use par::{eval_into_par, eval_sum_par};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tables;

    fn hands() -> Vec<Hand> {
        ["As Ks Qs Js Ts 2c 3d", "2c 2d 2h 2s Ac Kh Qd", "7c 8d 9h Jc 2d 3h 4s"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn sum_matches_into() {
        let tables = Tables::new();
        let ev = tables.evaluator();
        let hands = hands();

        let mut out = vec![Evaluation::from_value(0); hands.len()];
        let sum = eval_sum(&ev, &hands, 7);
        assert_eq!(eval_into(&ev, &hands, 7, &mut out), sum);

        for (h, e) in hands.iter().zip(&out) {
            assert_eq!(*e, ev.evaluate7(*h));
        }
        let expected = out.iter().fold(0u32, |a, e| a.wrapping_add(e.value()));
        assert_eq!(sum, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let tables = Tables::new();
        let ev = tables.evaluator();
        let hands = hands();

        let mut seq = vec![Evaluation::from_value(0); hands.len()];
        let mut par = vec![Evaluation::from_value(0); hands.len()];
        assert_eq!(eval_sum_par(&ev, &hands, 7), eval_sum(&ev, &hands, 7));
        assert_eq!(
            eval_into_par(&ev, &hands, 7, &mut par),
            eval_into(&ev, &hands, 7, &mut seq)
        );
        assert_eq!(par, seq);
    }
}
