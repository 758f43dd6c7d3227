//! The in-process SAT oracle: encode, run `varisat`, decode.

use std::convert::identity;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use thiserror::Error;
use varisat::Solver;

use crate::cell::CellState;
use crate::decode::{decode, Assignment, DecodeError};
use crate::encode::encode;
use crate::grid::Grid;
use crate::location::Location;

/// Reasons solving a grid may fail.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SolveFailure {
    /// The SAT solver detected a logical inconsistency, i.e. the grid as stated has no solution.
    #[error("the grid is unsatisfiable")]
    Unsatisfiable,
    /// The solver reported satisfiable but its model did not cover the grid's variables.
    /// This should probably never happen.
    #[error("the solver's model could not be decoded: {0}")]
    BadModel(#[from] DecodeError),
}

/// A solved grid: the state of every cell, row-major.
///
/// [`Display`] prints one row per line using `B` (balloon), `S` (stone), `N` (black), and `-`
/// (empty).
#[derive(Clone, Debug)]
pub struct Solution {
    cells: Array2<CellState>,
}

impl Solution {
    /// The state of the cell at `location`.
    pub fn cell(&self, location: Location) -> CellState {
        self.cells[location.as_index()]
    }

    /// All cell states, indexed `(y, x)`.
    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }
}

impl From<Array2<CellState>> for Solution {
    fn from(cells: Array2<CellState>) -> Self {
        Self { cells }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for state in row {
                write!(f, "{}", state)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Solve `grid` with the bundled `varisat` solver, returning the decoded [`Solution`] or a
/// [`SolveFailure`] reason.
///
/// This is the whole pipeline in one call: [`encode`], solve, [`decode`]. The 3-CNF reduction is
/// not involved; it exists for oracles that demand width-3 input, which `varisat` does not.
pub fn solve(grid: &Grid) -> Result<Solution, SolveFailure> {
    let mut solver = Solver::new();
    solver.add_formula(&encode(grid));

    if !solver.solve().is_ok_and(identity) {
        return Err(SolveFailure::Unsatisfiable);
    }
    let model = solver.model().unwrap();

    let cells = decode(&Assignment::from_model(&model), grid.dims())?;
    Ok(Solution::from(cells))
}
