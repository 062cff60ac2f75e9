// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Estimates outcome probabilities and wager expected values for a hand:
//
// ```bash
// $ cargo r --release --example advise -- -p "3 Spade" -p "2 Spade" -b "A Heart" -b "4 Heart"
// Player: 3 Spade, 2 Spade (5)
// Banker: A Heart, 4 Heart (5)
// Probabilities: player 44.75% banker 46.48% tie 8.77%
// EV player: -0.1050
// EV banker: -0.0936
// EV tie:    -0.2107
// Advice: don't bet
// ```
use anyhow::Result;
use clap::Parser;

use puntobanco_sim::{Card, Estimator, Hand};

#[derive(Parser)]
struct Args {
    /// Player cards as "value suit" descriptors.
    #[arg(short, long, required = true, num_args = 1)]
    player: Vec<String>,

    /// Banker cards as "value suit" descriptors.
    #[arg(short, long, required = true, num_args = 1)]
    banker: Vec<String>,

    /// Cards out of play beyond the two hands.
    #[arg(short, long)]
    removed: Vec<String>,

    /// Number of trials.
    #[arg(short, long, default_value_t = 10_000)]
    trials: usize,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let player = Hand::parse(&args.player)?;
    let banker = Hand::parse(&args.banker)?;
    let removed = args
        .removed
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<Card>>>()?;

    let probs = Estimator::new(args.trials).estimate(&player, &banker, &removed)?;
    let evs = probs.wager_evs();

    println!("Player: {player}");
    println!("Banker: {banker}");
    println!("Probabilities: {probs}");
    println!("EV player: {:.4}", evs.player);
    println!("EV banker: {:.4}", evs.banker);
    println!("EV tie:    {:.4}", evs.tie);

    match evs.best() {
        Some(wager) => println!("Advice: back the {wager}"),
        None => println!("Advice: don't bet"),
    }

    Ok(())
}
