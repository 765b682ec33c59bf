#![warn(missing_docs)]

//! # `netwalk`
//!
//! Board generation and connectivity checking for [NetWalk](https://en.wikipedia.org/wiki/Net_(puzzle))-style rotation puzzles.
//! A board is a grid of [`Tile`]s, each a 4-bit mask of the directions it shows wire in, plus a fixed two-cell power source.
//! The player turns tiles a quarter at a time until every wire is powered.
//!
//! Build a [`Generator`], ask it for a board with [`with_min_endpoints`](Generator::with_min_endpoints) or [`with_exact_endpoints`](Generator::with_exact_endpoints),
//! then drive the returned [`Board`] with [`rotate`](Board::rotate) and poll [`solved`](Board::solved) and [`reachable`](Board::reachable).
//! Rendering, input and frame pacing belong to the caller.
//!
//! # Internals
//! Generation grows a random tree out of the power source in three phases:
//!
//! 1. Breadth-first growth from both root cells. Each node takes a random cap of one to three links and accepts each eligible neighbor by chance,
//!    so the tree tends to be bushy and can leave parts of the board untouched.
//! 2. About a third of the linked cells sprout one extra branch, some of which keep growing for a few cells.
//! 3. A quarter as many attempts as there are cells hang single-cell spurs off random linked cells that still border untouched space.
//!
//! Every link joins a linked cell to an untouched one, so the network stays a tree and every non-empty tile is powered before scrambling.
//! Cells no phase reaches stay empty; they are neither endpoints nor required to be powered.
//! The drivers repeat this until the endpoint count meets a goal, then scramble the winner by rotating every tile randomly.
//!
//! A wire only conducts if the neighbor it points at points back. Reachability is a breadth-first search over the graph
//! of such live edges (see [`Board::network`]), seeded with both root cells.

pub use board::Board;
pub use builder::{BuilderInvalidReason, GeneratorConfig};
pub use cell::Tile;
pub use generator::Generator;
pub use location::{Dimension, Location};
pub use shape::SquareStep;

pub(crate) mod board;
pub(crate) mod location;
pub(crate) mod shape;
pub(crate) mod cell;
/// Network generation phases, their tuning and the reasons a build can fail.
pub mod builder;
pub(crate) mod generator;
