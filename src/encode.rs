//! The constraint compiler: from a [`Grid`] to a CNF formula.

use strum::VariantArray;
use varisat::{CnfFormula, ExtendFormula, Lit};

use crate::cell::{Role, MARKER_ROLES};
use crate::grid::Grid;
use crate::location::Location;
use crate::logic::exactly_one;
use crate::numbering::Numbering;

/// Compile `grid` into the CNF formula that is satisfiable exactly when the puzzle is solvable.
///
/// Pure and deterministic: the same grid always yields the same clauses in the same order, which is
/// also the order [`write_dimacs`](crate::dimacs::write_dimacs) emits them in. Clause groups, in
/// order:
///
/// 1. Boundary anchoring: the virtual rows above and below the grid hold no markers and are black,
///    so the support clauses can treat the grid edges as resting surfaces without special cases.
/// 2. Black fixation: black cells are black and hold no markers; all other cells are not black.
/// 3. Mutual exclusion: no cell holds both a balloon and a stone.
/// 4. Stone support: a stone rests on a stone or a black cell directly below it. Applied uniformly
///    to every row; on the last row "below" is the virtual row, already black, so the clause is
///    trivially satisfied there and the chain grounds out.
/// 5. Balloon support: symmetric, against the row above.
/// 6. Zone uniqueness: each zone holds exactly one balloon and exactly one stone.
pub fn encode(grid: &Grid) -> CnfFormula {
    let numbering = Numbering::from(grid);
    let mut formula = CnfFormula::new();

    // 1. boundary anchoring; only the black variable of a virtual cell is true
    for x in 0..grid.width() {
        for role in Role::VARIANTS {
            formula.add_clause(&[numbering.above(x, *role).lit(*role == Role::Black)]);
        }
    }
    for x in 0..grid.width() {
        for role in Role::VARIANTS {
            formula.add_clause(&[numbering.below(x, *role).lit(*role == Role::Black)]);
        }
    }

    // 2. black fixation
    for cell in cells(grid) {
        if grid.is_black(cell) {
            formula.add_clause(&[numbering.cell(cell, Role::Black).positive()]);
            formula.add_clause(&[numbering.cell(cell, Role::Balloon).negative()]);
            formula.add_clause(&[numbering.cell(cell, Role::Stone).negative()]);
        } else {
            formula.add_clause(&[numbering.cell(cell, Role::Black).negative()]);
        }
    }

    // 3. mutual exclusion
    for cell in cells(grid) {
        formula.add_clause(&[
            numbering.cell(cell, Role::Balloon).negative(),
            numbering.cell(cell, Role::Stone).negative(),
        ]);
    }

    // 4. stone support
    for cell in cells(grid) {
        formula.add_clause(&[
            numbering.cell(cell, Role::Stone).negative(),
            numbering.under(cell, Role::Stone).positive(),
            numbering.under(cell, Role::Black).positive(),
        ]);
    }

    // 5. balloon support
    for cell in cells(grid) {
        formula.add_clause(&[
            numbering.cell(cell, Role::Balloon).negative(),
            numbering.over(cell, Role::Balloon).positive(),
            numbering.over(cell, Role::Black).positive(),
        ]);
    }

    // 6. zone uniqueness
    for zone in grid.zones() {
        for role in MARKER_ROLES {
            for clause in zone_unique(&numbering, zone, role) {
                formula.add_clause(&clause);
            }
        }
    }

    formula
}

/// Clauses asserting that exactly one cell of `zone` has `role` true.
pub(crate) fn zone_unique(
    numbering: &Numbering,
    zone: &[Location],
    role: Role,
) -> Vec<Vec<Lit>> {
    let vars = zone
        .iter()
        .map(|cell| numbering.cell(*cell, role))
        .collect::<Vec<_>>();
    exactly_one(&vars)
}

fn cells(grid: &Grid) -> impl Iterator<Item = Location> + '_ {
    (0..grid.height()).flat_map(|y| (0..grid.width()).map(move |x| Location(x, y)))
}
