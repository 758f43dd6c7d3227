//! The three per-cell variable roles and the decoded per-cell states.

use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// One of the three Boolean variables attached to every cell by the numbering scheme.
///
/// The discriminant is the variable's offset within its cell's group of three consecutive ids.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Role {
    /// The cell holds a balloon.
    Balloon = 0,
    /// The cell holds a stone.
    Stone = 1,
    /// The cell is black, i.e. an obstacle and a resting surface.
    Black = 2,
}

/// The two marker roles subject to zone uniqueness. [`Role::Black`] is fixed by the grid, never chosen by the solver.
pub const MARKER_ROLES: [Role; 2] = [Role::Balloon, Role::Stone];

/// The state of one cell as recovered from a satisfying assignment.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellState {
    /// A balloon rests here.
    Balloon,
    /// A stone rests here.
    Stone,
    /// A black obstacle cell.
    Black,
    /// No marker.
    #[default]
    Empty,
}

impl Display for CellState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Balloon => 'B',
            Self::Stone => 'S',
            Self::Black => 'N',
            Self::Empty => '-',
        })
    }
}
