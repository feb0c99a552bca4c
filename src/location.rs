use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A board side length; boards are never empty along either axis.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Taxicab distance between `self` and `other`.
    pub fn manhattan_distance(&self, other: Location) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Whether `other` shares a side with `self`.
    pub fn is_adjacent(&self, other: Location) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The location obtained by reflecting `other` through `self`, i.e. continuing in a straight line from `other` across `self`.
    pub(crate) fn reflect(&self, other: Location) -> Location {
        self.offset_by((
            self.0 as isize - other.0 as isize,
            self.1 as isize - other.1 as isize,
        ))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
