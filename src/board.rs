use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::{Bfs, VisitMap};
use rand::Rng;
use strum::VariantArray;

use crate::builder::BuilderInvalidReason;
use crate::cell::Tile;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// A rectangular NetWalk board: a grid of [`Tile`]s and the fixed two-cell power source.
///
/// The power source occupies `(W / 2, H / 2)` and the cell directly below it, shifted up a row when `H == 2`.
/// Both root cells are always treated as powered, whatever their masks are rotated to.
///
/// Playable boards come from a [`Generator`](crate::Generator); [`Board::with_dims`] only lays down the power source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // indexed (y, x)
    pub(crate) tiles: Array2<Tile>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) root: Location,
}

impl Board {
    /// Construct an empty board of the specified dimensions, in `(width, height)` order, with only the power source linked.
    ///
    /// Fails with [`TooShort`](BuilderInvalidReason::TooShort) if the board is a single row, since the power source spans two.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Result<Self, BuilderInvalidReason> {
        if dims.1.get() < 2 {
            return Err(BuilderInvalidReason::TooShort);
        }

        let mut board = Self {
            tiles: Array2::from_elem((dims.1.get(), dims.0.get()), Tile::EMPTY),
            dims,
            // one row up on two-row boards so the lower root stays in bounds
            root: Location(dims.0.get() / 2, (dims.1.get() / 2).min(dims.1.get() - 2)),
        };
        let (top, _) = board.roots();
        board.link(top, SquareStep::Down);

        Ok(board)
    }

    /// `(width, height)` of this board.
    #[inline]
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// All tiles, indexed `(y, x)`. Iteration order is row-major.
    #[inline]
    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// # Panics
    /// If `location` is out of bounds.
    #[inline]
    pub fn tile(&self, location: Location) -> Tile {
        self.tiles[location.as_index()]
    }

    /// The upper and lower cell of the power source.
    #[inline]
    pub fn roots(&self) -> (Location, Location) {
        (self.root, SquareStep::Down.attempt_from(self.root))
    }

    /// Whether `location` lies on this board.
    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        location.within(self.dims)
    }

    /// The neighbor of `location` in direction `step`, or `None` if that would leave the board.
    pub fn neighbor(&self, location: Location, step: SquareStep) -> Option<Location> {
        Some(step.attempt_from(location)).filter(|next| self.contains(*next))
    }

    /// Turn the tile at `location` one quarter clockwise.
    ///
    /// # Panics
    /// If `location` is out of bounds. Callers translating pointer input must check [`Self::contains`] first.
    pub fn rotate(&mut self, location: Location) {
        let tile = &mut self.tiles[location.as_index()];
        *tile = tile.rotated();
    }

    /// Turn every tile independently by a uniformly random number of quarter-turns in `0..4`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.map_inplace(|tile| *tile = tile.rotated_by(rng.gen_range(0..4)));
    }

    /// Whether `location` is one of the two power source cells.
    pub fn is_root(&self, location: Location) -> bool {
        let (top, bottom) = self.roots();
        location == top || location == bottom
    }

    /// A non-root tile with exactly one stub.
    ///
    /// # Panics
    /// If `location` is out of bounds.
    pub fn is_endpoint(&self, location: Location) -> bool {
        !self.is_root(location) && self.tile(location).degree() == 1
    }

    /// Number of endpoint tiles on the board.
    pub fn count_endpoints(&self) -> usize {
        self.tiles.indexed_iter()
            .filter(|(index, _)| self.is_endpoint(Location::from(*index)))
            .count()
    }

    /// Whether the tiles at `location` and its neighbor in direction `step` both point at each other.
    pub fn is_live(&self, location: Location, step: SquareStep) -> bool {
        self.tile(location).has(step)
            && self.neighbor(location, step).is_some_and(|next| self.tile(next).has(step.invert()))
    }

    /// The graph of live edges. Every cell is a node; an edge is weighted by its direction from the lower-indexed cell.
    pub fn network(&self) -> UnGraphMap<Location, SquareStep> {
        // a generated network is a tree, so it has fewer edges than cells
        let mut graph = UnGraphMap::with_capacity(self.tiles.len(), self.tiles.len());

        for (index, _) in self.tiles.indexed_iter() {
            let location = Location::from(index);
            graph.add_node(location);
            // forward directions only, so each edge is seen once
            for step in [SquareStep::Right, SquareStep::Down] {
                if self.is_live(location, step) {
                    graph.add_edge(location, step.attempt_from(location), step);
                }
            }
        }

        graph
    }

    /// Mark every cell connected to the power source through live edges.
    ///
    /// The result has the same `(y, x)` shape as [`Self::tiles`]. Both root cells are always marked.
    pub fn reachable(&self) -> Array2<bool> {
        let graph = self.network();
        let (top, bottom) = self.roots();

        let mut bfs = Bfs::new(&graph, top);
        if bfs.discovered.visit(bottom) {
            bfs.stack.push_back(bottom);
        }

        let mut seen = Array2::from_elem(self.tiles.raw_dim(), false);
        while let Some(location) = bfs.next(&graph) {
            seen[location.as_index()] = true;
        }

        seen
    }

    /// Whether every non-empty tile is powered. Empty tiles never count against this.
    pub fn solved(&self) -> bool {
        let reachable = self.reachable();
        self.tiles.iter()
            .zip(reachable.iter())
            .all(|(tile, powered)| tile.is_empty() || *powered)
    }

    /// Whether every stub on the board is matched by its neighbor, i.e. no wire dangles anywhere.
    pub fn is_consistent(&self) -> bool {
        self.tiles.indexed_iter().all(|(index, tile)| {
            let location = Location::from(index);
            tile.steps().all(|step| self.is_live(location, step))
        })
    }

    /// Set the stubs joining `location` and its neighbor in direction `step`.
    ///
    /// The neighbor must be in bounds.
    pub(crate) fn link(&mut self, location: Location, step: SquareStep) {
        self.tiles[location.as_index()].link(step);
        self.tiles[step.attempt_from(location).as_index()].link(step.invert());
    }

    /// Directions from `location` leading to in-bounds cells not yet marked in `visited`.
    pub(crate) fn open_steps(&self, location: Location, visited: &Array2<bool>) -> Vec<SquareStep> {
        SquareStep::VARIANTS.iter()
            .copied()
            .filter(|step| self.neighbor(location, *step).is_some_and(|next| !visited[next.as_index()]))
            .collect_vec()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.tiles.nrows() * (self.tiles.ncols() + 1));

        for row in self.tiles.rows() {
            for tile in row {
                out.push(tile.glyph());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
