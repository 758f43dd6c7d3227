//! The DIMACS clause-file format and the output formats of external SAT solvers.

use std::collections::HashSet;
use std::io::{self, Write};

use itertools::Itertools;
use thiserror::Error;
use varisat::{CnfFormula, Lit, Var};

/// Write `formula` to `sink` in DIMACS CNF form: a comment line, the `p cnf <vars> <clauses>`
/// header, then one `0`-terminated line per clause in formula order.
///
/// The declared variable count is the number of distinct variable magnitudes actually appearing in
/// the clauses, not the highest id, matching the header contract of the grid file format.
pub fn write_dimacs<W: Write>(sink: &mut W, formula: &CnfFormula) -> io::Result<()> {
    let distinct: HashSet<Var> = formula.iter().flatten().map(|lit| lit.var()).collect();

    writeln!(sink, "c generated by fuwari")?;
    writeln!(sink, "p cnf {} {}", distinct.len(), formula.len())?;
    for clause in formula.iter() {
        writeln!(
            sink,
            "{} 0",
            clause.iter().map(|lit| lit.to_dimacs()).join(" ")
        )?;
    }

    Ok(())
}

/// The output dialects of the supported external solvers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OracleDialect {
    /// `SAT` on the first line, then one whitespace-separated assignment per line.
    #[default]
    Minisat,
    /// `s SATISFIABLE`, assignments on `v `-prefixed lines with `0` terminating each one, and
    /// `s`-prefixed separator/trailer lines in between.
    Picosat,
}

/// A token in solver output that does not parse as a signed integer literal.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("bad literal {token:?} in solver output")]
pub struct OracleParseError {
    /// The offending token.
    pub token: String,
}

/// Parse the output of an external SAT solver into zero or more assignments, one `Vec<Lit>` each.
///
/// Output that does not open with the dialect's satisfiable flag yields an empty list: the solver
/// found no assignment and there is nothing to decode.
pub fn parse_oracle_output(
    content: &str,
    dialect: OracleDialect,
) -> Result<Vec<Vec<Lit>>, OracleParseError> {
    match dialect {
        OracleDialect::Minisat => parse_minisat(content),
        OracleDialect::Picosat => parse_picosat(content),
    }
}

fn literal(token: &str) -> Result<isize, OracleParseError> {
    token.parse().map_err(|_| OracleParseError {
        token: token.to_owned(),
    })
}

fn parse_minisat(content: &str) -> Result<Vec<Vec<Lit>>, OracleParseError> {
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("SAT") {
        return Ok(vec![]);
    }

    let mut solutions = vec![];
    for line in lines.filter(|line| !line.trim().is_empty()) {
        let mut solution = vec![];
        for token in line.split_whitespace() {
            match literal(token)? {
                // terminator; minisat appends one per assignment line
                0 => {}
                id => solution.push(Lit::from_dimacs(id)),
            }
        }
        solutions.push(solution);
    }

    Ok(solutions)
}

fn parse_picosat(content: &str) -> Result<Vec<Vec<Lit>>, OracleParseError> {
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("s SATISFIABLE") {
        return Ok(vec![]);
    }

    // every assignment is spread over "v " lines, wrapped at the solver's convenience, and closed
    // by a 0; "s" lines separate repeated solutions and carry the solution count trailer
    let mut solutions = vec![];
    let mut current = vec![];
    for line in lines {
        let Some(tokens) = line.strip_prefix("v ") else {
            continue;
        };
        for token in tokens.split_whitespace() {
            match literal(token)? {
                0 => solutions.push(std::mem::take(&mut current)),
                id => current.push(Lit::from_dimacs(id)),
            }
        }
    }
    if !current.is_empty() {
        solutions.push(current);
    }

    Ok(solutions)
}
