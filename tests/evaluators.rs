use std::collections::HashSet;

use holdem_eval::{Card, Category, Evaluation, Evaluator, Hand, Rank, Suit, Tables};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Call `f` with every `k` card hand drawn from `deck`.
fn for_each_combination(deck: &[Card], k: usize, f: &mut impl FnMut(&[Card])) {
    fn go(deck: &[Card], k: usize, start: usize, picked: &mut Vec<Card>, f: &mut impl FnMut(&[Card])) {
        if picked.len() == k {
            f(picked);
            return;
        }
        for i in start..=deck.len() - (k - picked.len()) {
            picked.push(deck[i]);
            go(deck, k, i + 1, picked, f);
            picked.pop();
        }
    }
    go(deck, k, 0, &mut Vec::with_capacity(k), f);
}

fn full_deck() -> Vec<Card> {
    (0..52).map(Card::from_index).collect()
}

/// Reference: the best `evaluate5` over every 5 card subset.
fn best_of_fives(ev: &Evaluator<'_>, cards: &[Card]) -> Evaluation {
    let mut best = Evaluation::from_value(0);
    for_each_combination(cards, 5, &mut |five| {
        best = best.max(ev.evaluate5(Hand::from_cards(five.iter().copied())));
    });
    best
}

fn random_cards(rng: &mut SmallRng, k: usize) -> Vec<Card> {
    let mut hand = Hand::EMPTY;
    let mut cards = Vec::with_capacity(k);
    while cards.len() < k {
        let card = Card::from_index(rng.random_range(0..52u8));
        if !hand.add(card) {
            cards.push(card);
        }
    }
    cards
}

#[test]
fn exhaustive_five_card_hands() {
    let tables = Tables::new();
    let ev = tables.evaluator();

    let mut counts = [0u32; 9];
    let mut distinct = HashSet::new();
    for_each_combination(&full_deck(), 5, &mut |cards| {
        let hand = Hand::from_cards(cards.iter().copied());
        let value = ev.evaluate5(hand);
        assert_eq!(value, ev.evaluate(hand, 5), "{hand}");
        counts[value.category() as usize] += 1;
        distinct.insert(value.value());
    });

    assert_eq!(
        counts,
        [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40]
    );
    assert_eq!(distinct.len(), 7462);
}

#[test]
fn random_seven_card_hands_agree() {
    let tables = Tables::new();
    let ev = tables.evaluator();
    let mut rng = SmallRng::seed_from_u64(0x5EED_0007);

    for _ in 0..100_000 {
        let cards = random_cards(&mut rng, 7);
        let hand = Hand::from_cards(cards.iter().copied());
        let value = ev.evaluate7(hand);
        assert_eq!(value, ev.evaluate(hand, 7), "{hand}");
        assert_eq!(value, best_of_fives(&ev, &cards), "{hand}");
    }
}

#[test]
fn random_six_card_hands_match_best_five() {
    let tables = Tables::new();
    let ev = tables.evaluator();
    let mut rng = SmallRng::seed_from_u64(0x5EED_0006);

    for _ in 0..100_000 {
        let cards = random_cards(&mut rng, 6);
        let hand = Hand::from_cards(cards.iter().copied());
        assert_eq!(ev.evaluate(hand, 6), best_of_fives(&ev, &cards), "{hand}");
    }
}

/// Five ranks in all four suits: every hand is packed with duplicates, flushes
/// and straights at once, which is where the generic evaluator has to choose
/// between a flush/straight and a full house or quads.
#[test]
fn dense_decks_sweep_duplicates_flushes_and_straights() {
    let tables = Tables::new();
    let ev = tables.evaluator();

    use Rank::*;
    let rank_sets: [[Rank; 5]; 3] = [
        [Nine, Ten, Jack, Queen, King],
        [Ace, Two, Three, Four, Five],
        [Two, Five, Eight, Jack, Ace],
    ];

    let mut seen = HashSet::new();
    for ranks in rank_sets {
        let deck: Vec<Card> = ranks
            .iter()
            .flat_map(|&r| Suit::ALL.map(|s| Card::new(r, s)))
            .collect();

        for k in [6, 7] {
            for_each_combination(&deck, k, &mut |cards| {
                let hand = Hand::from_cards(cards.iter().copied());
                let value = ev.evaluate(hand, k as u32);
                if k == 7 {
                    assert_eq!(value, ev.evaluate7(hand), "{hand}");
                }
                assert_eq!(value, best_of_fives(&ev, cards), "{hand}");
                seen.insert(value.category());
            });
        }
    }

    // Every category but high card shows up in these decks.
    for category in &Category::ALL[1..] {
        assert!(seen.contains(category), "{category} never produced");
    }
}

#[test]
fn categories_are_strictly_ordered() {
    let tables = Tables::new();
    let ev = tables.evaluator();

    let ladder = [
        "2c 4d 6h 8s Tc Qd Kh",
        "2c 2d 6h 8s Tc Qd Kh",
        "2c 2d 6h 6s Tc Qd Kh",
        "2c 2d 2h 8s Tc Qd Kh",
        "2c 3d 4h 5s 6c Qd Kh",
        "2h 4h 6h 8h Th Qd Kd",
        "2c 2d 2h 8s 8c Qd Kh",
        "2c 2d 2h 2s Tc Qd Kh",
        "2h 3h 4h 5h 6h Qd Kd",
    ];

    let values: Vec<Evaluation> = ladder
        .iter()
        .map(|s| ev.evaluate7(s.parse().unwrap()))
        .collect();

    for (value, category) in values.iter().zip(Category::ALL) {
        assert_eq!(value.category(), category);
    }
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn evaluators_run_concurrently() {
    let tables = Tables::new();
    let ev = tables.evaluator();
    let hand: Hand = "As 8c 9c Ks Qs Ts 8d".parse().unwrap();
    let expected = ev.evaluate7(hand);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..1000 {
                    assert_eq!(ev.evaluate7(hand), expected);
                }
            });
        }
    });
}

#[test]
#[ignore = "walks all 133M seven card hands, run with --release --ignored"]
fn exhaustive_seven_card_categories() {
    let tables = Tables::new();
    let ev = tables.evaluator();
    let deck = full_deck();

    let mut counts = [0u64; 9];
    for_each_combination(&deck, 7, &mut |cards| {
        let hand = Hand::from_cards(cards.iter().copied());
        let value = ev.evaluate7(hand);
        debug_assert_eq!(value, ev.evaluate(hand, 7));
        counts[value.category() as usize] += 1;
    });

    assert_eq!(
        counts,
        [
            23_294_460, 58_627_800, 31_433_400, 6_461_620, 6_180_020, 4_047_644, 3_473_184,
            224_848, 41_584
        ]
    );
}
