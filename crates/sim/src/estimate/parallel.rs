// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel trial execution.
use anyhow::Result;
use log::debug;
use rand::prelude::*;
use std::{thread, time::Instant};

use super::{build_pool, resolve_immediate, run_trial, Estimator, Probabilities};
use crate::rules::Hand;
use puntobanco_cards::Card;

impl Estimator {
    /// Estimates the outcome probabilities running trials on parallel tasks.
    ///
    /// The trials are split across `num_tasks` scoped threads, each task runs
    /// its share with its own random generator and local counters, the
    /// per task counters are merged after the join. Resolution policy and
    /// result shape match [estimate](Estimator::estimate).
    ///
    /// Panics if `num_tasks` is zero.
    pub fn par_estimate(
        &self,
        num_tasks: usize,
        player: &Hand,
        banker: &Hand,
        removed: &[Card],
    ) -> Result<Probabilities> {
        assert!(num_tasks > 0);

        let pool = build_pool(player, banker, removed)?;

        if let Some(outcome) = resolve_immediate(player, banker) {
            debug!("hand resolved without drawing: {outcome} wins");
            return Ok(Probabilities::certain(outcome));
        }

        let now = Instant::now();
        let mut counts = [0u64; 3];

        thread::scope(|s| -> Result<()> {
            let mut handles = Vec::with_capacity(num_tasks);

            for task_id in 0..num_tasks {
                // Spread the remainder over the first tasks so the total
                // matches the configured trials count.
                let task_trials =
                    self.trials() / num_tasks + usize::from(task_id < self.trials() % num_tasks);

                let pool = &pool;
                handles.push(s.spawn(move || -> Result<[u64; 3]> {
                    let mut rng = SmallRng::from_os_rng();
                    let mut counts = [0u64; 3];

                    for _ in 0..task_trials {
                        let outcome = run_trial(player, banker, pool, &mut rng)?;
                        counts[outcome as usize] += 1;
                    }

                    Ok(counts)
                }));
            }

            for handle in handles {
                let task_counts = handle.join().expect("trials task panicked")?;
                for (count, task_count) in counts.iter_mut().zip(task_counts) {
                    *count += task_count;
                }
            }

            Ok(())
        })?;

        debug!(
            "{} trials over {num_tasks} tasks completed in {:.3}s",
            self.trials(),
            now.elapsed().as_secs_f64()
        );

        Ok(Probabilities::from_counts(&counts))
    }
}
