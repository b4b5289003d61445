//! Draw engine
//!
//! Selection without replacement for both modes. The engine is generic over
//! the random source so that frontends use entropy while tests use a seeded
//! generator.

use hashbrown::{HashMap, HashSet};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::NumericStrategy;
use crate::types::Entry;
use crate::validation::NumbersRequest;

/// Random subset selection over a range or an entry list
#[derive(Debug, Clone)]
pub struct DrawEngine<R> {
    rng: R,
    strategy: NumericStrategy,
}

impl DrawEngine<StdRng> {
    /// Engine seeded from the platform entropy source
    pub fn from_entropy(strategy: NumericStrategy) -> Self {
        Self::new(StdRng::from_entropy(), strategy)
    }

    /// Reproducible engine for a fixed seed
    pub fn seeded(seed: u64, strategy: NumericStrategy) -> Self {
        Self::new(StdRng::seed_from_u64(seed), strategy)
    }
}

impl<R: Rng> DrawEngine<R> {
    pub fn new(rng: R, strategy: NumericStrategy) -> Self {
        Self { rng, strategy }
    }

    pub fn strategy(&self) -> NumericStrategy {
        self.strategy
    }

    /// Draw `request.count` distinct integers from {1, ..., total}, ascending
    ///
    /// The request must already be validated (`0 < count <= total`).
    pub fn draw_numbers(&mut self, request: NumbersRequest) -> Vec<u64> {
        let NumbersRequest { total, count } = request;
        let strategy = match self.strategy {
            NumericStrategy::Auto if count > total / 2 => NumericStrategy::Shuffle,
            NumericStrategy::Auto => NumericStrategy::Rejection,
            explicit => explicit,
        };
        debug!("Drawing {} of {} using {:?}", count, total, strategy);

        let mut numbers = match strategy {
            NumericStrategy::Shuffle => self.partial_shuffle(total, count),
            _ => self.rejection_sample(total, count),
        };
        numbers.sort_unstable();
        numbers
    }

    /// Sample uniformly into a set until it holds `count` members
    ///
    /// Expected retries grow sharply as `count` approaches `total`.
    fn rejection_sample(&mut self, total: u64, count: u64) -> Vec<u64> {
        let mut drawn = HashSet::with_capacity(count as usize);
        while (drawn.len() as u64) < count {
            drawn.insert(self.rng.gen_range(1..=total));
        }
        drawn.into_iter().collect()
    }

    /// Fisher-Yates over the first `count` slots of a virtual array 1..=total
    ///
    /// Only displaced slots are materialized, so time and memory are O(count).
    fn partial_shuffle(&mut self, total: u64, count: u64) -> Vec<u64> {
        let mut displaced: HashMap<u64, u64> = HashMap::with_capacity(count as usize);
        let mut drawn = Vec::with_capacity(count as usize);

        for i in 0..count {
            let j = self.rng.gen_range(i..total);
            let at_i = displaced.get(&i).copied().unwrap_or(i);
            let at_j = displaced.get(&j).copied().unwrap_or(j);
            displaced.insert(j, at_i);
            drawn.push(at_j + 1);
        }

        drawn
    }

    /// Draw `count` distinct entries in shuffle order
    ///
    /// `count` must already be validated (`0 < count <= entries.len()`).
    pub fn draw_entries(&mut self, entries: &[Entry], count: usize) -> Vec<Entry> {
        debug!("Drawing {} of {} entries", count, entries.len());
        let mut shuffled = entries.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(count);
        shuffled
    }
}
