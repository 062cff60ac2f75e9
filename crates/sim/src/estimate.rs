// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Outcome probabilities estimator.
//!
//! Given the two dealt hands the [Estimator] either resolves the outcome
//! immediately, on a natural 8 or 9 or when both hands already hold three
//! cards, or completes the hand per the baccarat drawing rules over many
//! independent random trials and tallies the outcomes.
//!
//! Every trial clones the hands and draws from its own copy of the card pool,
//! the full deck minus the cards already in play, so a card can never be dealt
//! twice within a trial and trials stay statistically independent.
use anyhow::{bail, Context, Result};
use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Instant};

use crate::rules::{banker_draws, winner, Hand, Outcome};
use puntobanco_cards::{Card, Deck};

#[cfg(feature = "parallel")]
mod parallel;

/// Outcome probabilities as percentages.
///
/// The three values are non negative and sum to 100 within floating point
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Player win percentage.
    pub player: f64,
    /// Banker win percentage.
    pub banker: f64,
    /// Tie percentage.
    pub tie: f64,
}

impl Probabilities {
    /// A deterministic result with all the mass on one outcome.
    fn certain(outcome: Outcome) -> Self {
        let mut probs = Self {
            player: 0.0,
            banker: 0.0,
            tie: 0.0,
        };

        match outcome {
            Outcome::Player => probs.player = 100.0,
            Outcome::Banker => probs.banker = 100.0,
            Outcome::Tie => probs.tie = 100.0,
        }

        probs
    }

    /// Builds percentages from per outcome trial counts.
    fn from_counts(counts: &[u64; 3]) -> Self {
        let total = counts.iter().sum::<u64>() as f64;
        Self {
            player: counts[Outcome::Player as usize] as f64 / total * 100.0,
            banker: counts[Outcome::Banker as usize] as f64 / total * 100.0,
            tie: counts[Outcome::Tie as usize] as f64 / total * 100.0,
        }
    }

    /// Expected values for the three standard wagers.
    ///
    /// Player pays even money, banker pays even money less a 5% commission,
    /// tie pays 8 to 1; a losing wager loses its unit stake.
    pub fn wager_evs(&self) -> WagerEvs {
        let (p, b, t) = (self.player / 100.0, self.banker / 100.0, self.tie / 100.0);
        WagerEvs {
            player: p - (b + t),
            banker: 0.95 * b - (p + t),
            tie: 8.0 * t - (p + b),
        }
    }
}

impl fmt::Display for Probabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player {:.2}% banker {:.2}% tie {:.2}%",
            self.player, self.banker, self.tie
        )
    }
}

/// One of the three standard wagers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wager {
    /// Back the player at 1:1.
    Player,
    /// Back the banker at 1:1 less 5% commission.
    Banker,
    /// Back the tie at 8:1.
    Tie,
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wager = match self {
            Wager::Player => "player",
            Wager::Banker => "banker",
            Wager::Tie => "tie",
        };

        write!(f, "{wager}")
    }
}

/// Per unit expected values for the three standard wagers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WagerEvs {
    /// Player wager expected value.
    pub player: f64,
    /// Banker wager expected value.
    pub banker: f64,
    /// Tie wager expected value.
    pub tie: f64,
}

impl WagerEvs {
    /// The wager with the largest positive expected value.
    ///
    /// Returns `None` when every wager has a negative expectation, the
    /// don't-bet case.
    pub fn best(&self) -> Option<Wager> {
        let mut best = (Wager::Player, self.player);
        if self.banker > best.1 {
            best = (Wager::Banker, self.banker);
        }
        if self.tie > best.1 {
            best = (Wager::Tie, self.tie);
        }

        (best.1 > 0.0).then_some(best.0)
    }
}

/// Monte Carlo outcome estimator.
///
/// The trial count trades accuracy for latency, the default of 10,000 keeps
/// the percentages stable to a few tenths of a point.
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    trials: usize,
}

impl Default for Estimator {
    fn default() -> Self {
        Self { trials: 10_000 }
    }
}

impl Estimator {
    /// Creates an estimator with the given trials count.
    ///
    /// Panics if `trials` is zero.
    pub fn new(trials: usize) -> Self {
        assert!(trials > 0, "trials must be positive");
        Self { trials }
    }

    /// The number of trials per estimate.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Estimates the outcome probabilities for the given hands.
    ///
    /// The hands are taken as dealt so far, `removed` lists any cards known to
    /// be out of play beyond the two hands; the pool of drawable cards is the
    /// full deck minus both hands and the removed cards.
    ///
    /// Fails if the same card appears twice across the hands and the removed
    /// cards.
    pub fn estimate(&self, player: &Hand, banker: &Hand, removed: &[Card]) -> Result<Probabilities> {
        let pool = build_pool(player, banker, removed)?;

        if let Some(outcome) = resolve_immediate(player, banker) {
            debug!("hand resolved without drawing: {outcome} wins");
            return Ok(Probabilities::certain(outcome));
        }

        let now = Instant::now();
        let mut rng = SmallRng::from_os_rng();
        let mut counts = [0u64; 3];

        for _ in 0..self.trials {
            let outcome = run_trial(player, banker, &pool, &mut rng)?;
            counts[outcome as usize] += 1;
        }

        debug!(
            "{} trials completed in {:.3}s",
            self.trials,
            now.elapsed().as_secs_f64()
        );

        Ok(Probabilities::from_counts(&counts))
    }
}

/// Resolves the hand without drawing when the rules say no card can move.
///
/// A total of 8 or 9 on either side is a natural and ends the round, and a
/// hand where both sides hold three cards has no draws left.
fn resolve_immediate(player: &Hand, banker: &Hand) -> Option<Outcome> {
    let natural = player.total() >= 8 || banker.total() >= 8;
    let complete = player.len() == 3 && banker.len() == 3;
    (natural || complete).then(|| winner(player, banker))
}

/// Builds the pool of drawable cards, checking that no card is in play twice.
fn build_pool(player: &Hand, banker: &Hand, removed: &[Card]) -> Result<Deck> {
    let mut pool = Deck::default();

    let in_play = player.cards().iter().chain(banker.cards()).chain(removed);
    for &card in in_play {
        if !pool.contains(card) {
            bail!("duplicate card in play: {card}");
        }
        pool.remove(card);
    }

    Ok(pool)
}

/// Completes the hand once from its current state and resolves the winner.
fn run_trial<R: Rng>(player: &Hand, banker: &Hand, pool: &Deck, rng: &mut R) -> Result<Outcome> {
    let mut pool = pool.clone();
    let mut player = *player;
    let mut banker = *banker;

    // Player third-card rule.
    if player.len() == 2 && player.total() <= 5 {
        player.push(draw(&mut pool, rng)?);
    }

    // Banker third-card rule.
    if banker.len() == 2 {
        let draws = match player.third() {
            // Player stood, possible only on a total of 6 or 7 here since
            // naturals resolve earlier and lower totals draw above.
            None => {
                debug_assert!(player.total() == 6 || player.total() == 7);
                banker.total() <= 5
            }
            Some(third) => banker_draws(banker.total(), third.points()),
        };

        if draws {
            banker.push(draw(&mut pool, rng)?);
        }
    }

    Ok(winner(&player, &banker))
}

/// Draws one uniformly random card from the trial pool.
fn draw<R: Rng>(pool: &mut Deck, rng: &mut R) -> Result<Card> {
    // With a 52 cards deck and at most six cards in play the pool cannot run
    // out, but fail with a diagnostic rather than index out of bounds.
    pool.deal_random(rng)
        .context("card pool exhausted during a required draw")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::prelude::*;

    fn hand(descriptors: &[&str]) -> Hand {
        Hand::parse(descriptors).unwrap()
    }

    fn assert_certain(probs: Probabilities, outcome: Outcome) {
        let expected = Probabilities::certain(outcome);
        assert_eq!(probs, expected, "expected certain {outcome}");
    }

    #[test]
    fn natural_wins_resolve_immediately() {
        let estimator = Estimator::new(10);

        // Player natural 9 against a non natural banker.
        let player = hand(&["A Spade", "8 Spade"]);
        let banker = hand(&["A Heart", "4 Heart"]);
        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert_certain(probs, Outcome::Player);

        // Banker natural 8 against a player 7.
        let player = hand(&["3 Club", "4 Club"]);
        let banker = hand(&["10 Heart", "8 Heart"]);
        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert_certain(probs, Outcome::Banker);

        // Natural 9 beats natural 8.
        let player = hand(&["4 Spade", "5 Spade"]);
        let banker = hand(&["K Heart", "8 Heart"]);
        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert_certain(probs, Outcome::Player);

        // Natural 9 against natural 9 is a certain tie.
        let player = hand(&["4 Spade", "5 Spade"]);
        let banker = hand(&["K Heart", "9 Heart"]);
        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert_certain(probs, Outcome::Tie);
    }

    #[test]
    fn three_card_hands_resolve_immediately() {
        let estimator = Estimator::new(10);

        let player = hand(&["4 Spade", "5 Spade", "6 Spade"]);
        let banker = hand(&["10 Spade", "10 Heart", "7 Spade"]);
        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert_certain(probs, Outcome::Banker);
    }

    #[test]
    fn percentages_sum_to_100() {
        let estimator = Estimator::new(2_000);

        // Both sides on a five, every drawing branch is reachable.
        let player = hand(&["3 Spade", "2 Spade"]);
        let banker = hand(&["A Heart", "4 Heart"]);

        for _ in 0..5 {
            let probs = estimator.estimate(&player, &banker, &[]).unwrap();
            let total = probs.player + probs.banker + probs.tie;
            assert!((total - 100.0).abs() < 1e-9, "total {total}");
            assert!(probs.player >= 0.0 && probs.banker >= 0.0 && probs.tie >= 0.0);
        }
    }

    #[test]
    fn stood_player_forces_banker_low_total_draw() {
        // Player stands on 6, banker on 1 always draws; over enough trials
        // every outcome should have been seen.
        let estimator = Estimator::new(2_000);
        let player = hand(&["7 Spade", "9 Club"]);
        let banker = hand(&["5 Heart", "6 Diamond"]);

        let probs = estimator.estimate(&player, &banker, &[]).unwrap();
        assert!(probs.player > 0.0);
        assert!(probs.banker > 0.0);
        assert!(probs.tie > 0.0);
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let estimator = Estimator::default();

        // Same card on both sides.
        let player = hand(&["A Spade", "5 Heart"]);
        let banker = hand(&["A Spade", "4 Heart"]);
        assert!(estimator.estimate(&player, &banker, &[]).is_err());

        // Same card within a hand.
        let player = hand(&["A Spade", "A Spade"]);
        let banker = hand(&["2 Heart", "4 Heart"]);
        assert!(estimator.estimate(&player, &banker, &[]).is_err());

        // Hand card listed in the removed cards.
        let player = hand(&["A Spade", "5 Heart"]);
        let banker = hand(&["2 Heart", "4 Heart"]);
        let removed = ["5 Heart".parse().unwrap()];
        assert!(estimator.estimate(&player, &banker, &removed).is_err());
    }

    #[test]
    fn trials_never_draw_a_card_twice() {
        // Exercise the drawing branches directly and check the final hands
        // hold no duplicate card.
        let mut rng = SmallRng::from_os_rng();
        let player = hand(&["3 Spade", "2 Spade"]);
        let banker = hand(&["A Heart", "4 Heart"]);
        let pool = build_pool(&player, &banker, &[]).unwrap();

        for _ in 0..1_000 {
            let mut pool = pool.clone();
            let mut player = player;
            let mut banker = banker;

            if player.total() <= 5 {
                player.push(draw(&mut pool, &mut rng).unwrap());
            }
            let third = player.third().unwrap();
            if banker_draws(banker.total(), third.points()) {
                banker.push(draw(&mut pool, &mut rng).unwrap());
            }

            let cards = player
                .cards()
                .iter()
                .chain(banker.cards())
                .collect::<HashSet<_>>();
            assert_eq!(cards.len(), player.len() + banker.len());
        }
    }

    #[test]
    fn removed_cards_never_show_up_in_draws() {
        // Remove every spade and club not in the hands, all draws must come
        // from the remaining hearts and diamonds.
        let player = hand(&["3 Spade", "2 Spade"]);
        let banker = hand(&["A Heart", "4 Heart"]);

        let removed = Deck::default()
            .into_iter()
            .filter(|c| {
                use puntobanco_cards::Suit;
                matches!(c.suit(), Suit::Spade | Suit::Club)
                    && !player.cards().contains(c)
                    && !banker.cards().contains(c)
            })
            .collect::<Vec<_>>();

        let pool = build_pool(&player, &banker, &removed).unwrap();
        assert_eq!(pool.count(), 24);

        let mut rng = SmallRng::from_os_rng();
        let mut pool = pool;
        while let Some(card) = pool.deal_random(&mut rng) {
            use puntobanco_cards::Suit;
            assert!(matches!(card.suit(), Suit::Heart | Suit::Diamond));
        }
    }

    #[test]
    fn wager_evs_arithmetic() {
        let probs = Probabilities {
            player: 44.62,
            banker: 45.85,
            tie: 9.53,
        };

        let evs = probs.wager_evs();
        assert!((evs.player - (0.4462 - 0.5538)).abs() < 1e-9);
        assert!((evs.banker - (0.95 * 0.4585 - 0.5415)).abs() < 1e-9);
        assert!((evs.tie - (8.0 * 0.0953 - 0.9047)).abs() < 1e-9);

        // All negative, the advisor abstains.
        assert_eq!(evs.best(), None);

        // A certain player win has a positive player expectation.
        let evs = Probabilities::certain(Outcome::Player).wager_evs();
        assert_eq!(evs.best(), Some(Wager::Player));

        // A certain tie pays 8 to 1.
        let evs = Probabilities::certain(Outcome::Tie).wager_evs();
        assert!((evs.tie - 8.0).abs() < 1e-9);
        assert_eq!(evs.best(), Some(Wager::Tie));
    }

    #[test]
    #[should_panic(expected = "trials must be positive")]
    fn zero_trials_panics() {
        Estimator::new(0);
    }
}
