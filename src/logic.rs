use itertools::Itertools;
use varisat::{Lit, Var};

/// The naive "exactly one of `vars` is true" encoding: the at-least-one disjunction followed by a
/// pairwise at-most-one clause per unordered pair, `1 + C(n, 2)` clauses in all. Quadratic, but
/// zones are small (rarely more than 8 cells), so nothing cleverer is warranted.
pub(crate) fn exactly_one(vars: &[Var]) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(vars.len() * (vars.len() - 1) / 2 + 1);

    // at least one is true; A + B + C + ...
    clauses.push(vars.iter().map(|v| v.positive()).collect_vec());
    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(
        vars.iter()
            .tuple_combinations()
            .map(|(a, b)| vec![a.negative(), b.negative()]),
    );

    clauses
}
