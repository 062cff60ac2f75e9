// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Puntobanco baccarat outcome estimator.
//!
//! Estimates the probability of each outcome of a live baccarat hand, player
//! win, banker win or tie, given the two hands dealt so far. A natural 8 or 9,
//! or two hands already holding three cards, resolve deterministically; any
//! other state is completed over many independent random trials that follow
//! the fixed third-card drawing rules exactly.
//!
//! ```
//! use puntobanco_sim::{Estimator, Hand};
//!
//! let player = Hand::parse(&["3 Spade", "2 Spade"]).unwrap();
//! let banker = Hand::parse(&["A Heart", "4 Heart"]).unwrap();
//!
//! let probs = Estimator::default().estimate(&player, &banker, &[]).unwrap();
//! let total = probs.player + probs.banker + probs.tie;
//! assert!((total - 100.0).abs() < 1e-9);
//!
//! // Expected values for the three standard wagers.
//! let evs = probs.wager_evs();
//! if let Some(wager) = evs.best() {
//!     println!("back the {wager}");
//! }
//! ```
//!
//! The **`parallel`** feature adds [Estimator::par_estimate] that splits the
//! trials across a given number of tasks, each with its own random generator,
//! and merges the outcome counters after the join.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod estimate;
pub mod rules;

pub use estimate::{Estimator, Probabilities, Wager, WagerEvs};
pub use rules::{banker_draws, hand_value, winner, Hand, Outcome};

// Reexport cards types.
pub use puntobanco_cards::{Card, Deck, Rank, Suit};
