// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Baccarat table rules.
//!
//! Pure rule functions and types: hand totals under modulo 10 arithmetic, the
//! winner of a finished hand, and the fixed banker third-card table. No state
//! and no randomness, the drawing procedure that uses these rules lives in
//! [estimate](crate::estimate).
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use puntobanco_cards::Card;

/// The outcome of a finished hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player side wins.
    Player = 0,
    /// The banker side wins.
    Banker,
    /// Equal totals.
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self {
            Outcome::Player => "player",
            Outcome::Banker => "banker",
            Outcome::Tie => "tie",
        };

        write!(f, "{outcome}")
    }
}

/// One side's cards, two as dealt or three after a draw.
///
/// A hand never exceeds three cards and a third card, once drawn, is never
/// removed, so the type is constructed from two or three cards and only grows
/// by one card inside the simulator.
#[derive(Debug, Clone, Copy)]
pub struct Hand {
    cards: [Card; 3],
    len: u8,
}

impl Hand {
    /// Creates a hand from two or three cards.
    pub fn new(cards: &[Card]) -> Result<Hand> {
        ensure!(
            cards.len() == 2 || cards.len() == 3,
            "a hand must have 2 or 3 cards, got {}",
            cards.len()
        );

        let mut hand = Self {
            cards: [cards[0]; 3],
            len: cards.len() as u8,
        };
        hand.cards[..cards.len()].copy_from_slice(cards);

        Ok(hand)
    }

    /// Creates a hand from `"value suit"` descriptors, eg. `"8 Diamond"`.
    pub fn parse<S: AsRef<str>>(descriptors: &[S]) -> Result<Hand> {
        let cards = descriptors
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Card>>>()?;
        Self::new(&cards)
    }

    /// The cards in this hand.
    pub fn cards(&self) -> &[Card] {
        &self.cards[..self.len as usize]
    }

    /// Number of cards in this hand.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// A hand always has cards.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The hand total, in `0..=9`.
    pub fn total(&self) -> u8 {
        hand_value(self.cards())
    }

    /// The third card, if one was drawn.
    pub fn third(&self) -> Option<Card> {
        self.cards().get(2).copied()
    }

    /// Appends a drawn card, the hand must have two cards.
    pub(crate) fn push(&mut self, card: Card) {
        debug_assert_eq!(self.len, 2);
        self.cards[2] = card;
        self.len = 3;
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, card) in self.cards().iter().enumerate() {
            if pos > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{card}")?;
        }

        write!(f, " ({})", self.total())
    }
}

/// The cards total modulo 10, in `0..=9`.
pub fn hand_value(cards: &[Card]) -> u8 {
    cards.iter().map(Card::points).sum::<u8>() % 10
}

/// Decides the winner of a finished hand, the greater total wins.
///
/// Both hands must be in their final post-draw state, calling this on an
/// unfinished hand compares the totals as they stand.
pub fn winner(player: &Hand, banker: &Hand) -> Outcome {
    let (player, banker) = (player.total(), banker.total());
    if player > banker {
        Outcome::Player
    } else if banker > player {
        Outcome::Banker
    } else {
        Outcome::Tie
    }
}

/// The banker third-card table.
///
/// Decides whether the banker draws given its own total and the player third
/// card points. Only meaningful when the player drew a third card, a stood
/// player hand uses the simpler total `<= 5` rule instead.
pub fn banker_draws(banker_total: u8, player_third: u8) -> bool {
    match banker_total {
        0..=2 => true,
        3 => player_third != 8,
        4 => (2..=7).contains(&player_third),
        5 => (4..=7).contains(&player_third),
        6 => player_third == 6 || player_third == 7,
        _ => false,
    }
}
