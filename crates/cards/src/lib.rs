// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Puntobanco baccarat cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use puntobanco_cards::{Card, Rank, Suit};
//! let ace = Card::new(Rank::Ace, Suit::Spade);
//! let ten = Card::new(Rank::Ten, Suit::Heart);
//! assert_eq!(ace.points(), 1);
//! assert_eq!(ten.points(), 0);
//! ```
//!
//! cards can also be built from the `"value suit"` descriptors used by the
//! table feed:
//!
//! ```
//! # use puntobanco_cards::{Card, Rank, Suit};
//! let card: Card = "10 Heart".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ten, Suit::Heart));
//! ```
//!
//! and a [Deck] type that models the pool of undealt cards, with O(1) uniform
//! random deals for simulation:
//!
//! ```
//! # use puntobanco_cards::{Card, Deck, Rank, Suit};
//! let mut rng = rand::rng();
//! let mut pool = Deck::without(&[Card::new(Rank::Ace, Suit::Spade)]);
//! assert_eq!(pool.count(), 51);
//!
//! let card = pool.deal_random(&mut rng).unwrap();
//! assert_eq!(pool.count(), 50);
//! assert!(!pool.contains(card));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit};
