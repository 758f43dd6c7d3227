//! The deterministic mapping from (cell, role) to SAT variables.
//!
//! Ids are assigned in groups of three per cell ([`Role::Balloon`], [`Role::Stone`], [`Role::Black`]),
//! row-major from the top, starting with the virtual row above the grid and ending with the virtual
//! row below it. For a cell `(x, y)` the DIMACS id of its `role` variable is
//! `1 + 3 * width * (y + 1) + 3 * x + role`, so ids run contiguously from `1` to
//! `3 * width * (height + 2)`. The virtual rows exist only to anchor the support clauses; they are
//! forced black by [`encode`](crate::encode::encode) and ignored by [`decode`](crate::decode::decode).
//!
//! For a 3-wide grid this is the layout the ids take (each box lists its balloon, stone, black ids):
//!
//! ```text
//!    (1,2,3)    (4,5,6)    (7,8,9)     <- virtual row, y = -1
//!  | 10,11,12 | 13,14,15 | 16,17,18 |  <- y = 0
//!  | 19,20,21 | 22,23,24 | 25,26,27 |
//!  ...
//! ```
//!
//! Both the encoder and the decoder must go through this one scheme; the 3-CNF reducer draws its
//! auxiliary variables from [`Numbering::first_aux`] upward so the two id spaces never collide.

use varisat::Var;

use crate::cell::Role;
use crate::grid::Grid;
use crate::location::{Coord, Dimension, Location};

/// The variable numbering for a grid of fixed dimensions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Numbering {
    width: Coord,
    height: Coord,
}

impl Numbering {
    /// The numbering for a `width x height` grid.
    pub fn new(dims: (Dimension, Dimension)) -> Self {
        Self {
            width: dims.0.get(),
            height: dims.1.get(),
        }
    }

    // `row` is y + 1, i.e. 0 is the virtual row above the grid and `height + 1` the one below.
    #[inline]
    fn at(&self, x: Coord, row: Coord, role: Role) -> Var {
        debug_assert!(x < self.width && row <= self.height + 1);
        Var::from_index(3 * (self.width * row + x) + role as usize)
    }

    /// The variable for `role` at the real cell `location`.
    #[inline]
    pub fn cell(&self, location: Location, role: Role) -> Var {
        self.at(location.0, location.1 + 1, role)
    }

    /// The variable for `role` at `(x, -1)`, on the virtual row above the grid.
    #[inline]
    pub fn above(&self, x: Coord, role: Role) -> Var {
        self.at(x, 0, role)
    }

    /// The variable for `role` at `(x, height)`, on the virtual row below the grid.
    #[inline]
    pub fn below(&self, x: Coord, role: Role) -> Var {
        self.at(x, self.height + 1, role)
    }

    /// The variable directly below `location` in the support sense: the next real cell down, or the
    /// bottom virtual row when `location` is on the last row.
    #[inline]
    pub fn under(&self, location: Location, role: Role) -> Var {
        self.at(location.0, location.1 + 2, role)
    }

    /// The variable directly above `location`: the next real cell up, or the top virtual row when
    /// `location` is on the first row.
    #[inline]
    pub fn over(&self, location: Location, role: Role) -> Var {
        self.at(location.0, location.1, role)
    }

    /// How many variables the scheme assigns: `3 * width * (height + 2)`, ids `1..=var_count()`.
    #[inline]
    pub fn var_count(&self) -> usize {
        3 * self.width * (self.height + 2)
    }

    /// The first variable free for auxiliary use, directly after the last assigned id.
    #[inline]
    pub fn first_aux(&self) -> Var {
        Var::from_index(self.var_count())
    }
}

impl From<&Grid> for Numbering {
    fn from(grid: &Grid) -> Self {
        Self::new(grid.dims())
    }
}
