use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::show::{Episode, Show};
use super::store::{StoreError, WatchStore};

pub(crate) const DEFAULT_ATTEMPTS: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub(crate) enum PickError {
    #[error("show has no episodes")]
    EmptyShow,

    #[error("no unwatched episode found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Bounded rejection sampler over a show's flat episode numbers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Picker {
    pub(crate) max_attempts: u32,
    pub(crate) exhaustive_fallback: bool,
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_ATTEMPTS,
            exhaustive_fallback: false,
        }
    }
}

impl Picker {
    pub(crate) fn pick<S, R>(&self, store: &S, show: &Show, rng: &mut R) -> Result<Episode, PickError>
    where
        S: WatchStore + ?Sized,
        R: Rng + ?Sized,
    {
        let total = show.episode_count();
        if total == 0 {
            return Err(PickError::EmptyShow);
        }

        for attempt in 1..=self.max_attempts {
            let number = rng.random_range(0..total);
            if store.is_watched(&show.name, number)? {
                continue;
            }
            if let Some(episode) = show.episode(number) {
                debug!(show = %show.name, number, attempt, "picked episode");
                return Ok(episode);
            }
        }

        if self.exhaustive_fallback {
            let mut unwatched = Vec::new();
            for number in 0..total {
                if !store.is_watched(&show.name, number)? {
                    unwatched.push(number);
                }
            }
            debug!(show = %show.name, remaining = unwatched.len(), "sampling bound hit, scanned all episodes");
            if let Some(episode) = unwatched.choose(rng).and_then(|n| show.episode(*n)) {
                return Ok(episode);
            }
        }

        Err(PickError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
