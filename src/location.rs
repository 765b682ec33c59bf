use std::num::NonZero;

use ndarray::Ix;

/// A cell coordinate along one axis.
pub type Coord = usize;
/// A board extent along one axis.
pub type Dimension = NonZero<Coord>;

/// A cell position in `(x, y)` order, `x` growing rightwards and `y` growing downwards.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, column)` index of this location in a board's tile array.
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Offset this location, wrapping on underflow so that stepping off the top or left edge
    /// lands far out of bounds instead of panicking.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies inside a board of the given `(width, height)`.
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
