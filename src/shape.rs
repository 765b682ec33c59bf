use strum::VariantArray;

use crate::location::Location;

/// One of the four directions a wire may leave a square tile in.
///
/// Variants are listed clockwise, and each one owns one bit of a [`Tile`](crate::Tile) mask:
/// [`Up`](Self::Up) is `1`, [`Right`](Self::Right) is `2`, [`Down`](Self::Down) is `4` and [`Left`](Self::Left) is `8`.
/// A clockwise quarter-turn of a tile is therefore a left rotation of its mask.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
}

impl SquareStep {
    /// Attempt the step from `location` and return the resulting [`Location`], which may be out of bounds.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Right => location.offset_by((1, 0)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// The mask bit owned by this direction.
    #[inline]
    pub fn bit(&self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Right => 0b0010,
            Self::Down => 0b0100,
            Self::Left => 0b1000,
        }
    }
}
