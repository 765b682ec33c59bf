use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::builder::{BuilderInvalidReason, GeneratorConfig, NetworkBuilder};
use crate::location::Dimension;

/// Produces scrambled, playable boards.
///
/// The random source is owned by the generator and threaded through every build and scramble,
/// so a generator made with [`Self::with_rng`] and a seeded RNG is fully reproducible.
pub struct Generator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<ThreadRng> {
    /// A generator drawing from the thread-local, OS-seeded RNG.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl Default for Generator<ThreadRng> {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<R: Rng> Generator<R> {
    /// A generator drawing from `rng`, e.g. a seeded RNG for reproducible boards.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// The tuning this generator builds with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Access the random source, e.g. to [`shuffle`](Board::shuffle) a board again.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Grow a single solved (unscrambled) network over a board of the given `(width, height)`.
    pub fn build(&mut self, dims: (Dimension, Dimension)) -> Result<Board, BuilderInvalidReason> {
        Ok(NetworkBuilder::new(&self.config, &mut self.rng, dims)?.build())
    }

    /// Build candidates until one has at least `want` endpoints, and return it scrambled.
    ///
    /// If none of `max_attempts` candidates qualifies, the first candidate with the most endpoints is scrambled and returned instead.
    pub fn with_min_endpoints(
        &mut self,
        dims: (Dimension, Dimension),
        want: usize,
        max_attempts: usize,
    ) -> Result<Board, BuilderInvalidReason> {
        self.search(dims, max_attempts, |endpoints| endpoints >= want, |endpoints, best| endpoints > best)
    }

    /// Build candidates until one has exactly `exact` endpoints, and return it scrambled.
    ///
    /// If none of `max_attempts` candidates matches, the candidate closest to `exact` is scrambled and returned instead,
    /// preferring more endpoints over fewer when two are equally close.
    pub fn with_exact_endpoints(
        &mut self,
        dims: (Dimension, Dimension),
        exact: usize,
        max_attempts: usize,
    ) -> Result<Board, BuilderInvalidReason> {
        self.search(dims, max_attempts, |endpoints| endpoints == exact, |endpoints, best| {
            let (diff, best_diff) = (endpoints.abs_diff(exact), best.abs_diff(exact));
            diff < best_diff || (diff == best_diff && endpoints > best)
        })
    }

    /// Shared retry loop. `accept` ends the search early; `better` decides whether a candidate replaces the retained best.
    fn search(
        &mut self,
        dims: (Dimension, Dimension),
        max_attempts: usize,
        accept: impl Fn(usize) -> bool,
        better: impl Fn(usize, usize) -> bool,
    ) -> Result<Board, BuilderInvalidReason> {
        let mut best: Option<(Board, usize)> = None;

        for attempt in 0..max_attempts {
            let mut candidate = self.build(dims)?;
            let endpoints = candidate.count_endpoints();
            debug!(attempt, endpoints, "generated candidate");

            if accept(endpoints) {
                info!(attempt, endpoints, "accepted candidate");
                candidate.shuffle(&mut self.rng);
                return Ok(candidate);
            }

            if best.as_ref().map_or(true, |(_, best_endpoints)| better(endpoints, *best_endpoints)) {
                best = Some((candidate, endpoints));
            }
        }

        let mut board = match best {
            Some((board, endpoints)) => {
                warn!(max_attempts, endpoints, "attempts exhausted, using best candidate");
                board
            }
            None => {
                warn!("no attempts allowed, using a fresh candidate");
                self.build(dims)?
            }
        };
        board.shuffle(&mut self.rng);

        Ok(board)
    }
}
