use strum::VariantArray;

use crate::shape::SquareStep;

const MASK: u8 = 0b1111;

/// A single grid cell: the set of directions it currently shows wire stubs in, as a 4-bit mask.
///
/// There is no separate notion of a tile's shape; rotating a tile rewrites its mask.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tile(u8);

impl Tile {
    /// An empty tile.
    pub const EMPTY: Self = Self(0);

    /// Build a tile from a raw mask, discarding anything above the low four bits.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & MASK)
    }

    /// Build a tile with a stub in each of `steps`.
    pub fn from_steps(steps: &[SquareStep]) -> Self {
        Self(steps.iter().fold(0, |acc, step| acc | step.bit()))
    }

    /// The raw 4-bit mask.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether this tile shows a stub towards `step`.
    #[inline]
    pub fn has(&self, step: SquareStep) -> bool {
        self.0 & step.bit() != 0
    }

    /// Number of stubs on this tile.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.0.count_ones()
    }

    /// Whether this tile has no stubs at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The directions this tile has stubs in, clockwise from [`SquareStep::Up`].
    pub fn steps(&self) -> impl Iterator<Item = SquareStep> + '_ {
        SquareStep::VARIANTS.iter().copied().filter(|step| self.has(*step))
    }

    /// This tile turned one quarter clockwise.
    #[inline]
    pub fn rotated(self) -> Self {
        self.rotated_by(1)
    }

    /// This tile turned `turns` quarters clockwise. Only `turns % 4` matters.
    pub fn rotated_by(self, turns: u32) -> Self {
        let r = turns % 4;
        if r == 0 {
            return self;
        }
        Self(((self.0 << r) | (self.0 >> (4 - r))) & MASK)
    }

    pub(crate) fn link(&mut self, step: SquareStep) {
        self.0 |= step.bit();
    }

    /// Box-drawing glyph for this mask, `.` when empty.
    pub(crate) fn glyph(&self) -> char {
        [
            '.', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
        ][self.0 as usize]
    }
}
