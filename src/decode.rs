//! Recovering a solved grid from a satisfying assignment.

use ndarray::Array2;
use thiserror::Error;
use varisat::{Lit, Var};

use crate::cell::{CellState, Role};
use crate::location::{Coord, Dimension, Location};
use crate::numbering::Numbering;

/// Why an assignment could not be decoded.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// The assignment does not cover a variable the numbering scheme says must exist. Guessing a
    /// default here would silently corrupt the reported solution, so decoding fails instead.
    #[error("assignment is missing variable {id}")]
    MissingVariable {
        /// DIMACS id of the uncovered variable.
        id: isize,
    },
}

/// A truth assignment over variable ids, as returned by a SAT oracle.
///
/// Variables the oracle never mentioned read back as [`None`]; [`decode`] turns that into a
/// [`DecodeError::MissingVariable`] rather than a guess.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// Build an assignment from solver literals, e.g. a `varisat` model.
    pub fn from_model(model: &[Lit]) -> Self {
        let mut values = vec![None; model.iter().map(|lit| lit.var().index() + 1).max().unwrap_or(0)];
        for lit in model {
            values[lit.var().index()] = Some(lit.is_positive());
        }
        Self { values }
    }

    /// Build an assignment from signed DIMACS integers. Zeros (the DIMACS clause terminator, which
    /// some solvers also append to assignment lines) are skipped.
    pub fn from_dimacs(literals: &[isize]) -> Self {
        Self::from_model(
            &literals
                .iter()
                .filter(|id| **id != 0)
                .map(|id| Lit::from_dimacs(*id))
                .collect::<Vec<_>>(),
        )
    }

    /// The truth value assigned to `var`, or [`None`] if the assignment does not cover it.
    pub fn get(&self, var: Var) -> Option<bool> {
        self.values.get(var.index()).copied().flatten()
    }

    fn require(&self, var: Var) -> Result<bool, DecodeError> {
        self.get(var).ok_or(DecodeError::MissingVariable {
            id: var.to_dimacs(),
        })
    }
}

/// Decode the state of every real cell of a `width x height` grid from `assignment`, in row-major
/// order, through the same [`Numbering`] the encoder used.
///
/// Virtual-row variables and any auxiliaries the 3-CNF reduction introduced are ignored; only the
/// balloon, stone, and black variables of real cells are consulted, and each of those must be
/// covered by the assignment.
pub fn decode(
    assignment: &Assignment,
    dims: (Dimension, Dimension),
) -> Result<Array2<CellState>, DecodeError> {
    let numbering = Numbering::new(dims);
    let (width, height): (Coord, Coord) = (dims.0.get(), dims.1.get());

    let mut states = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let cell = Location(x, y);
            states.push(if assignment.require(numbering.cell(cell, Role::Balloon))? {
                CellState::Balloon
            } else if assignment.require(numbering.cell(cell, Role::Stone))? {
                CellState::Stone
            } else if assignment.require(numbering.cell(cell, Role::Black))? {
                CellState::Black
            } else {
                CellState::Empty
            });
        }
    }

    Ok(Array2::from_shape_vec((height, width), states).unwrap())
}
