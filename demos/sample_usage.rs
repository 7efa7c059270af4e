//! Evaluate a hold'em hand and estimate its strength against a random opponent
//! by sampling the opponent's hole cards (Monte Carlo).
//!
//! Usage:
//!   cargo run --release --example sample_usage
//!   cargo run --release --example sample_usage -- --board "Ah Kh 7c 2d 9s" --hole "Qh Jh"
//!   RUST_LOG=debug cargo run --example sample_usage -- --trials 100000 --seed 7

use anyhow::{bail, Result};
use clap::Parser;
use holdem_eval::{Card, Hand, Tables};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a hand and sample win/split/lose rates")]
struct Args {
    /// Five community cards.
    #[arg(long, default_value = "As 8c 9c Ks Qs")]
    board: Hand,

    /// Two hole cards.
    #[arg(long, default_value = "Ts 8d")]
    hole: Hand,

    /// Number of random opponent hands to sample.
    #[arg(long, default_value_t = 10_000)]
    trials: u32,

    /// Seed for the sampler, random if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Draw `count` cards that are not in `used`.
fn random_cards(rng: &mut SmallRng, count: u32, used: Hand) -> Hand {
    let mut hand = Hand::EMPTY;
    while hand.len() < count {
        let card = Card::from_index(rng.random_range(0..52u8));
        if !used.contains(card) {
            hand.add(card);
        }
    }
    hand
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.board.len() != 5 || args.hole.len() != 2 {
        bail!("need 5 board cards and 2 hole cards");
    }
    let my_hand = args.board | args.hole;
    if my_hand.len() != 7 {
        bail!("board and hole cards overlap: {} / {}", args.board, args.hole);
    }

    let tables = Tables::new();
    let evaluator = tables.evaluator();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("sampling {} opponent hands with seed {seed}", args.trials);
    let mut rng = SmallRng::seed_from_u64(seed);

    let my_value = evaluator.evaluate7(my_hand);

    let (mut wins, mut splits) = (0u32, 0u32);
    for _ in 0..args.trials {
        let opponent = random_cards(&mut rng, 2, my_hand);
        let opponent_value = evaluator.evaluate7(args.board | opponent);

        if opponent_value < my_value {
            wins += 1;
        } else if opponent_value == my_value {
            splits += 1;
        }
    }

    let total = f64::from(args.trials.max(1));
    let win = f64::from(wins) / total;
    let split = f64::from(splits) / total;

    println!("hand:  {my_hand}");
    println!("value: {} (0b{:032b})", my_value.value(), my_value.value());
    println!("{my_value}");
    println!("win   {:.2}%", win * 100.0);
    println!("split {:.2}%", split * 100.0);
    println!("lose  {:.2}%", (1.0 - win - split) * 100.0);

    Ok(())
}
