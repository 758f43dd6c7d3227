//! Reduction of arbitrary CNF to equisatisfiable 3-CNF.

use thiserror::Error;
use varisat::{CnfFormula, ExtendFormula, Lit, Var};

/// Reasons a reduction request is rejected before any clause is rewritten.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum ReduceError {
    /// `first_aux` falls inside the input formula's variable range. Silently reusing an input
    /// variable as an auxiliary would change the formula's meaning, so this is never tolerated.
    #[error("auxiliary variables start at id {first_aux} but the formula already uses ids up to {last_used}")]
    AuxOverlap {
        /// DIMACS id of the requested first auxiliary variable.
        first_aux: isize,
        /// Highest DIMACS id the input formula uses.
        last_used: isize,
    },
    /// The input contains an empty clause, which has no width-3 equivalent. An empty clause makes
    /// the input trivially unsatisfiable; the caller should not be reducing it at all.
    #[error("clause {index} is empty")]
    EmptyClause {
        /// Position of the clause in the input formula.
        index: usize,
    },
}

/// Rewrite `formula` into an equisatisfiable formula in which every clause has exactly three
/// literals, drawing auxiliary variables from `first_aux` upward.
///
/// Per input clause of `n` literals:
/// - `n == 1`, `(a)`: four clauses `(a+u+v)(a+u+!v)(a+!u+v)(a+!u+!v)` over two fresh auxiliaries.
///   All four sign combinations of `u, v` appear, so `a` alone carries the truth.
/// - `n == 2`, `(a+b)`: `(a+b+u)(a+b+!u)` over one fresh auxiliary.
/// - `n == 3`: passed through unchanged.
/// - `n > 3`: the standard chain `(l0+l1+u0)(!u0+l2+u1)...(!u_{n-4}+l_{n-2}+l_{n-1})` over `n - 3`
///   fresh auxiliaries, each link handing the obligation to the next.
///
/// Deterministic given `first_aux`; the output's `var_count()` is the next free auxiliary index,
/// so chained reductions can continue where this one stopped. Callers reducing a formula from
/// [`encode`](crate::encode::encode) should pass [`Numbering::first_aux`](crate::Numbering::first_aux).
pub fn to_three_cnf(formula: &CnfFormula, first_aux: Var) -> Result<CnfFormula, ReduceError> {
    if first_aux.index() < formula.var_count() {
        return Err(ReduceError::AuxOverlap {
            first_aux: first_aux.to_dimacs(),
            last_used: formula.var_count() as isize,
        });
    }

    let mut next_aux = first_aux.index();
    let mut fresh = || {
        let var = Var::from_index(next_aux);
        next_aux += 1;
        var
    };

    let mut out = CnfFormula::new();
    for (index, clause) in formula.iter().enumerate() {
        match clause {
            [] => return Err(ReduceError::EmptyClause { index }),
            &[a] => {
                let (u, v) = (fresh(), fresh());
                for (u_sign, v_sign) in [(true, true), (true, false), (false, true), (false, false)] {
                    out.add_clause(&[a, u.lit(u_sign), v.lit(v_sign)]);
                }
            }
            &[a, b] => {
                let u = fresh();
                out.add_clause(&[a, b, u.positive()]);
                out.add_clause(&[a, b, u.negative()]);
            }
            &[_, _, _] => out.add_clause(clause),
            &[ref rest @ .., y, z] => {
                // rest.len() >= 2 here
                let mut carry = fresh();
                out.add_clause(&[rest[0], rest[1], carry.positive()]);
                for &lit in &rest[2..] {
                    let next = fresh();
                    out.add_clause(&[carry.negative(), lit, next.positive()]);
                    carry = next;
                }
                out.add_clause(&[carry.negative(), y, z]);
            }
        }
    }

    Ok(out)
}

/// Whether every clause of `formula` has exactly three literals.
pub fn is_three_cnf(formula: &CnfFormula) -> bool {
    formula.iter().all(|clause| clause.len() == 3)
}
