//! Release-mode throughput runner.
//!
//! Modes (cards per hand with --cards 5/6/7):
//!   gen  : generate random hands only, measure generation rate
//!   eval : generate hands in chunks (not timed) then measure evaluation only
//!   e2e  : end-to-end streaming, generate + evaluate one hand at a time
//!
//! Examples:
//!   cargo run --release --example perf -- e2e --hands 10000000
//!   cargo run --release --example perf -- eval --cards 5 --hands 50000000
//!
//! Parallel (evaluation of each chunk is split across rayon threads):
//!   cargo run --release --features parallel --example perf -- eval --parallel
//!   RAYON_NUM_THREADS=8 cargo run --release --features parallel --example perf -- eval --parallel
//!
//! Chunked modes never allocate more than `--chunk` hands at once.

use std::hint::black_box;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use holdem_eval::{eval_sum, Card, Evaluator, Hand, Tables};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Gen,
    Eval,
    E2e,
}

#[derive(Parser, Debug)]
#[command(about = "Measure hand generation and evaluation throughput")]
struct Args {
    #[arg(value_enum)]
    mode: Mode,

    /// Cards per hand.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(5..=7))]
    cards: u32,

    /// Number of hands.
    #[arg(long, default_value_t = 10_000_000)]
    hands: u64,

    /// Hands generated per chunk in eval mode.
    #[arg(long, default_value_t = 2_000_000)]
    chunk: u64,

    /// Evaluate chunks in parallel (needs --features parallel).
    #[arg(long)]
    parallel: bool,
}

/// Random hand of `k` distinct cards.
#[inline(always)]
fn random_hand(rng: &mut SmallRng, k: u32) -> Hand {
    let mut hand = Hand::EMPTY;
    while hand.len() < k {
        hand.add(Card::from_index(rng.random_range(0..52u8)));
    }
    hand
}

#[inline(always)]
fn evaluate(ev: &Evaluator<'_>, hand: Hand, k: u32) -> u32 {
    match k {
        5 => ev.evaluate5(hand).value(),
        7 => ev.evaluate7(hand).value(),
        _ => ev.evaluate(hand, k).value(),
    }
}

fn report_rate(label: &str, n: u64, dt_secs: f64) {
    let n_f = n as f64;
    let ns_op = (dt_secs * 1e9) / n_f;
    let hps = n_f / dt_secs;
    println!("{label:20}: {:6.1} ns/op   ({:>12} iterations)", ns_op, n);
    println!("{label:20}: {:>10.3} ms      {:>12.0} /s", dt_secs * 1e3, hps);
}

/// Chunk helper: iterate in chunks without overflowing.
#[inline]
fn chunk_loop(mut n: u64, chunk: u64, mut f: impl FnMut(u64)) {
    while n > 0 {
        let c = n.min(chunk);
        f(c);
        n -= c;
    }
}

fn warmup(ev: &Evaluator<'_>, k: u32) {
    let mut rng = SmallRng::seed_from_u64(0x0BAD_5EED);
    for _ in 0..50_000 {
        black_box(evaluate(ev, random_hand(&mut rng, k), k));
    }
}

fn bench_gen(k: u32, n: u64) {
    let mut rng = SmallRng::seed_from_u64(0x1234_5678_9ABC_DEF0);
    let start = Instant::now();

    let mut acc: u64 = 0;
    for _ in 0..n {
        acc = acc.wrapping_add(random_hand(&mut rng, k).bits());
    }

    let dt = start.elapsed().as_secs_f64();
    black_box(acc);
    report_rate(&format!("Generate{k}"), n, dt);
}

fn bench_eval_only(ev: &Evaluator<'_>, k: u32, n: u64, chunk: u64, parallel: bool) -> Result<()> {
    #[cfg(not(feature = "parallel"))]
    if parallel {
        bail!("parallel mode requires: --features parallel");
    }

    warmup(ev, k);
    let mut rng = SmallRng::seed_from_u64(0x1111_2222_3333_4444);

    let mut acc: u32 = 0;
    let mut eval_time = 0.0f64;
    let mut gen_time = 0.0f64;

    chunk_loop(n, chunk, |c| {
        let t0 = Instant::now();
        let hands: Vec<Hand> = (0..c).map(|_| random_hand(&mut rng, k)).collect();
        gen_time += t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        #[cfg(feature = "parallel")]
        let sum = if parallel {
            holdem_eval::eval_sum_par(ev, &hands, k)
        } else {
            eval_sum(ev, &hands, k)
        };
        #[cfg(not(feature = "parallel"))]
        let sum = eval_sum(ev, &hands, k);
        acc = acc.wrapping_add(sum);
        eval_time += t1.elapsed().as_secs_f64();

        black_box(&hands);
    });

    black_box(acc);

    println!("GenerateHands{k:<2}     : {:>10.3} ms", gen_time * 1e3);
    let label = if parallel { format!("EvalOnly{k}Par") } else { format!("EvalOnly{k}") };
    report_rate(&label, n, eval_time);
    Ok(())
}

fn bench_e2e(ev: &Evaluator<'_>, k: u32, n: u64) {
    warmup(ev, k);
    let mut rng = SmallRng::seed_from_u64(0xDEAD_BEEF_F00D_CAFE);

    let start = Instant::now();
    let mut acc: u32 = 0;
    for _ in 0..n {
        acc = acc.wrapping_add(evaluate(ev, random_hand(&mut rng, k), k));
    }

    let dt = start.elapsed().as_secs_f64();
    black_box(acc);
    report_rate(&format!("EndToEnd{k}"), n, dt);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.hands == 0 || args.chunk == 0 {
        bail!("--hands and --chunk must be positive");
    }

    let start = Instant::now();
    let tables = Tables::new();
    info!("tables built in {:?}", start.elapsed());
    let ev = tables.evaluator();

    match args.mode {
        Mode::Gen => bench_gen(args.cards, args.hands),
        Mode::Eval => bench_eval_only(&ev, args.cards, args.hands, args.chunk, args.parallel)?,
        Mode::E2e => bench_e2e(&ev, args.cards, args.hands),
    }
    Ok(())
}
