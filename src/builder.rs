use std::collections::VecDeque;

use itertools::Itertools;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::board::Board;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// Reasons a board cannot be built.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// The board has a single row, so the two-cell power source does not fit.
    #[error("board must be at least two cells tall to hold the power source")]
    TooShort,
    /// A probability in the [`GeneratorConfig`] lies outside `0.0..=1.0`.
    #[error("generator probabilities must lie within 0.0..=1.0")]
    ProbabilityOutOfRange,
    /// A limit or divisor in the [`GeneratorConfig`] is zero.
    #[error("generator limits and divisors must be nonzero")]
    ZeroLimit,
}

/// Tuning knobs for network generation.
///
/// The defaults are empirically tuned to give a dense spread of endpoints on boards around 10x9.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Chance that tree growth links a node to an eligible neighbor.
    pub link_probability: f64,
    /// Each node grown from during tree growth gets a link cap drawn uniformly from `1..=max_links_per_node`.
    pub max_links_per_node: usize,
    /// One in this many linked cells receives an extra branch.
    pub branch_divisor: usize,
    /// Chance that an extra branch keeps growing past its first cell.
    pub extend_probability: f64,
    /// A growing branch adds between 1 and this many more cells.
    pub max_extension: usize,
    /// Short-branch backfill makes one attempt per this many cells on the board.
    pub backfill_divisor: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            link_probability: 0.7,
            max_links_per_node: 3,
            branch_divisor: 3,
            extend_probability: 0.4,
            max_extension: 3,
            backfill_divisor: 4,
        }
    }
}

impl GeneratorConfig {
    /// Check that probabilities lie within `0.0..=1.0` and that no limit or divisor is zero.
    pub fn validate(&self) -> Result<(), BuilderInvalidReason> {
        if ![self.link_probability, self.extend_probability].iter().all(|p| (0.0..=1.0).contains(p)) {
            return Err(BuilderInvalidReason::ProbabilityOutOfRange);
        }

        if [self.max_links_per_node, self.branch_divisor, self.max_extension, self.backfill_divisor].contains(&0) {
            return Err(BuilderInvalidReason::ZeroLimit);
        }

        Ok(())
    }
}

/// Grows one randomized spanning network over a fresh board.
///
/// Every link joins a visited cell to an unvisited one, so the result is always a tree hanging off the power source.
/// Cells no phase reaches stay empty.
pub(crate) struct NetworkBuilder<'a, R: Rng + ?Sized> {
    config: &'a GeneratorConfig,
    rng: &'a mut R,
    board: Board,
    visited: Array2<bool>,
}

impl<'a, R: Rng + ?Sized> NetworkBuilder<'a, R> {
    pub(crate) fn new(
        config: &'a GeneratorConfig,
        rng: &'a mut R,
        dims: (Dimension, Dimension),
    ) -> Result<Self, BuilderInvalidReason> {
        config.validate()?;
        let board = Board::with_dims(dims)?;
        let mut visited = Array2::from_elem(board.tiles.raw_dim(), false);

        let (top, bottom) = board.roots();
        visited[top.as_index()] = true;
        visited[bottom.as_index()] = true;

        Ok(Self { config, rng, board, visited })
    }

    pub(crate) fn build(mut self) -> Board {
        let grown = self.grow_tree();
        let branched = self.add_extra_branches();
        let backfilled = self.add_short_branches();
        debug!(grown, branched, backfilled, endpoints = self.board.count_endpoints(), "built network");

        self.board
    }

    fn connect(&mut self, location: Location, step: SquareStep) -> Location {
        self.board.link(location, step);
        let next = step.attempt_from(location);
        self.visited[next.as_index()] = true;
        next
    }

    fn shuffled_steps(&mut self) -> [SquareStep; 4] {
        let mut steps = [SquareStep::Up, SquareStep::Right, SquareStep::Down, SquareStep::Left];
        steps.shuffle(&mut *self.rng);
        steps
    }

    /// Breadth-first growth out of both root cells, each node linking to a random few of its unvisited neighbors.
    ///
    /// Links are accepted by chance, so some cells may be left unvisited for later phases.
    fn grow_tree(&mut self) -> usize {
        let (top, bottom) = self.board.roots();
        let mut frontier = VecDeque::from([top, bottom]);
        let mut linked = 0;

        while let Some(current) = frontier.pop_front() {
            let steps = self.shuffled_steps();
            let cap = self.rng.gen_range(1..=self.config.max_links_per_node);
            let mut links = 0;

            for step in steps {
                if links >= cap {
                    break;
                }

                let Some(next) = self.board.neighbor(current, step) else { continue };
                if self.visited[next.as_index()] || !self.rng.gen_bool(self.config.link_probability) {
                    continue;
                }

                frontier.push_back(self.connect(current, step));
                links += 1;
            }

            linked += links;
        }

        linked
    }

    /// Give roughly a third of the linked cells one new branch each, some of which keep growing for a few cells.
    fn add_extra_branches(&mut self) -> usize {
        let mut linked_cells = self.board.tiles.indexed_iter()
            .filter(|(index, tile)| self.visited[*index] && !tile.is_empty())
            .map(|(index, _)| Location::from(index))
            .collect_vec();
        linked_cells.shuffle(&mut *self.rng);

        let count = linked_cells.len() / self.config.branch_divisor;
        linked_cells.into_iter()
            .take(count)
            .map(|location| self.try_add_branch(location))
            .sum()
    }

    fn try_add_branch(&mut self, location: Location) -> usize {
        let tile = self.board.tile(location);
        let step = self.shuffled_steps().into_iter().find(|step| {
            !tile.has(*step) && self.board.neighbor(location, *step).is_some_and(|next| !self.visited[next.as_index()])
        });

        let Some(step) = step else { return 0 };
        let next = self.connect(location, step);

        if self.rng.gen_bool(self.config.extend_probability) {
            let length = self.rng.gen_range(1..=self.config.max_extension);
            1 + self.extend_branch(next, length)
        } else {
            1
        }
    }

    fn extend_branch(&mut self, mut location: Location, length: usize) -> usize {
        for extended in 0..length {
            let open = self.board.open_steps(location, &self.visited);
            let Some(step) = open.choose(&mut *self.rng).copied() else { return extended };
            location = self.connect(location, step);
        }

        length
    }

    /// Repeatedly pick a random linked cell that still borders unvisited space and hang a single-cell spur off it.
    fn add_short_branches(&mut self) -> usize {
        let attempts = self.board.tiles.len() / self.config.backfill_divisor;
        let mut linked = 0;

        for _ in 0..attempts {
            let candidates = self.board.tiles.indexed_iter()
                .map(|(index, _)| Location::from(index))
                .filter(|location| self.visited[location.as_index()])
                .map(|location| (location, self.board.open_steps(location, &self.visited)))
                .filter(|(_, open)| !open.is_empty())
                .collect_vec();

            let Some((location, open)) = candidates.choose(&mut *self.rng) else { continue };
            let Some(step) = open.choose(&mut *self.rng).copied() else { continue };
            self.connect(*location, step);
            linked += 1;
        }

        linked
    }
}
