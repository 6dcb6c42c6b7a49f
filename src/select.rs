//! Random quote selection.
//!
//! One PRNG for the whole process, seeded from the system clock at startup.
//! Not cryptographically secure, which is fine: nothing here needs to be
//! unpredictable, only reasonably uniform.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ServerError;
use crate::quotes::QuoteStore;

/// Picks quotes uniformly at random from a [`QuoteStore`].
///
/// The RNG sits behind a mutex so the selector can be shared by all request
/// handlers; the critical section is a single draw.
#[derive(Debug)]
pub struct Selector {
    rng: Mutex<SmallRng>,
}

impl Selector {
    /// Selector seeded from the high-resolution system clock.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Selector with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Selector {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Pick one quote uniformly from `store`.
    ///
    /// Returns the quote together with its index, which the handlers log.
    /// Selecting from an empty store is an error, never a panic.
    pub fn select<'a>(&self, store: &'a QuoteStore) -> Result<(usize, &'a str), ServerError> {
        if store.is_empty() {
            return Err(ServerError::EmptyStore);
        }

        let index = self.rng.lock().unwrap().random_range(0..store.len());
        // Index is in range by construction.
        let quote = store.get(index).ok_or(ServerError::EmptyStore)?;
        Ok((index, quote))
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
