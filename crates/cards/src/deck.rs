// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Baccarat cards definitions.
use anyhow::{anyhow, bail, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A baccarat card.
///
/// A card is identified by its rank and suit pair, its betting value is given
/// by [Card::points]: aces count one, twos to nines their face value, tens and
/// court cards zero.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Creates a card given a rank and a suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Self { rank, suit }
    }

    /// Creates a card from a table feed class id in `1..=52`.
    ///
    /// Ids run through the suits in spade, heart, diamond, club order, ace to
    /// king within each suit, so 1 is the ace of spades and 52 the king of
    /// clubs.
    pub fn from_class_id(class_id: u8) -> Result<Card> {
        if !(1..=52).contains(&class_id) {
            bail!("invalid card class id {class_id}, must be in 1..=52");
        }

        let suit = Suit::suits()
            .nth((class_id as usize - 1) / 13)
            .expect("suit index in 0..4");
        let rank = Rank::ranks()
            .nth((class_id as usize - 1) % 13)
            .expect("rank index in 0..13");

        Ok(Self { rank, suit })
    }

    /// This card table feed class id in `1..=52`.
    pub fn class_id(&self) -> u8 {
        self.suit as u8 * 13 + self.rank as u8 + 1
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// The card baccarat points, in `0..=9`.
    pub fn points(&self) -> u8 {
        self.rank.points()
    }
}

impl FromStr for Card {
    type Err = anyhow::Error;

    /// Parses a `"value suit"` descriptor, eg. `"A Spade"` or `"10 Heart"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(rank), Some(suit), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("invalid card descriptor {s:?}, expected \"value suit\"");
        };

        Ok(Self {
            rank: rank.parse()?,
            suit: suit.parse()?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({} {})", self.rank, self.suit)
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ace
    Ace = 0,
    /// Two
    Two,
    /// Three
    Three,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
}

impl Rank {
    /// Returns all ranks in ace to king order.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
        .into_iter()
    }

    /// The rank baccarat points, aces one, court cards and tens zero.
    pub fn points(&self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0,
        }
    }
}

impl FromStr for Rank {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let rank = match s {
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(anyhow!("unknown card value {s:?}")),
        };

        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spade = 0,
    /// Hearts suit.
    Heart,
    /// Diamonds suit.
    Diamond,
    /// Clubs suit.
    Club,
}

impl Suit {
    /// Returns all suits in table feed order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club].into_iter()
    }
}

impl FromStr for Suit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let suit = match s {
            "Spade" => Suit::Spade,
            "Heart" => Suit::Heart,
            "Diamond" => Suit::Diamond,
            "Club" => Suit::Club,
            _ => return Err(anyhow!("unknown card suit {s:?}")),
        };

        Ok(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Spade => "Spade",
            Suit::Heart => "Heart",
            Suit::Diamond => "Diamond",
            Suit::Club => "Club",
        };

        write!(f, "{suit}")
    }
}

/// The pool of undealt cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Creates a full deck minus the given used cards.
    pub fn without(used: &[Card]) -> Self {
        let mut deck = Self::default();
        for &card in used {
            deck.remove(card);
        }
        deck
    }

    /// Deals a uniformly random card from the deck.
    ///
    /// The card is removed from the deck so that it cannot be dealt again,
    /// returns `None` when the deck is empty.
    pub fn deal_random<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            let pos = rng.random_range(0..self.cards.len());
            Some(self.cards.swap_remove(pos))
        }
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Checks if the deck contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
