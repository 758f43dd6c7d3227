use std::num::NonZero;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

/// A location `(x, y)` on a grid. The top left corner is `Location(0, 0)`; `y` grows downward.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn in_bounds(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<[Coord; 2]> for Location {
    fn from(value: [Coord; 2]) -> Self {
        Self(value[0], value[1])
    }
}

impl From<Location> for [Coord; 2] {
    fn from(value: Location) -> Self {
        [value.0, value.1]
    }
}
