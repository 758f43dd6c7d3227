#[cfg(test)]
mod tests {
    use std::convert::identity;

    use varisat::{CnfFormula, ExtendFormula, Lit, Solver, Var};

    use crate::cell::{CellState, Role, MARKER_ROLES};
    use crate::decode::{decode, Assignment, DecodeError};
    use crate::dimacs::{parse_oracle_output, write_dimacs, OracleDialect};
    use crate::encode::encode;
    use crate::grid::{Grid, GridError};
    use crate::location::Location;
    use crate::numbering::Numbering;
    use crate::reduce::{is_three_cnf, to_three_cnf, ReduceError};
    use crate::solve::{solve, SolveFailure, Solution};

    fn two_by_two() -> Grid {
        Grid::new(
            2,
            2,
            vec![],
            vec![
                vec![Location(0, 0), Location(0, 1)],
                vec![Location(1, 0), Location(1, 1)],
            ],
        )
        .unwrap()
    }

    // the 3x3 worked example shipped with the original puzzle set
    fn three_by_three() -> Grid {
        Grid::new(
            3,
            3,
            vec![Location(0, 1)],
            vec![
                vec![Location(0, 0), Location(1, 0)],
                vec![Location(2, 0), Location(2, 1), Location(2, 2)],
                vec![Location(1, 1), Location(1, 2), Location(0, 2)],
            ],
        )
        .unwrap()
    }

    fn satisfiable(formula: &CnfFormula) -> bool {
        let mut solver = Solver::new();
        solver.add_formula(formula);
        solver.solve().is_ok_and(identity)
    }

    fn clauses(raw: &[&[isize]]) -> CnfFormula {
        let mut formula = CnfFormula::new();
        for clause in raw {
            formula.add_clause(
                &clause.iter().map(|id| Lit::from_dimacs(*id)).collect::<Vec<_>>(),
            );
        }
        formula
    }

    /// Check every puzzle rule against a decoded solution.
    fn assert_valid(grid: &Grid, solution: &Solution) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = Location(x, y);
                let state = solution.cell(cell);

                if grid.is_black(cell) {
                    assert_eq!(state, CellState::Black, "({x}, {y}) must be black");
                } else {
                    assert_ne!(state, CellState::Black, "({x}, {y}) must not be black");
                }

                if state == CellState::Stone && y + 1 < grid.height() {
                    let under = solution.cell(Location(x, y + 1));
                    assert!(
                        matches!(under, CellState::Stone | CellState::Black),
                        "stone at ({x}, {y}) is unsupported"
                    );
                }
                if state == CellState::Balloon && y > 0 {
                    let over = solution.cell(Location(x, y - 1));
                    assert!(
                        matches!(over, CellState::Balloon | CellState::Black),
                        "balloon at ({x}, {y}) is unsupported"
                    );
                }
            }
        }

        for (index, zone) in grid.zones().iter().enumerate() {
            for (role, state) in [(Role::Balloon, CellState::Balloon), (Role::Stone, CellState::Stone)] {
                let count = zone.iter().filter(|cell| solution.cell(**cell) == state).count();
                assert_eq!(count, 1, "zone {index} must hold exactly one {role:?}");
            }
        }
    }

    #[test]
    fn numbering_matches_documented_layout() {
        let numbering = Numbering::from(&three_by_three());

        // virtual row above the grid comes first
        assert_eq!(numbering.above(0, Role::Balloon).to_dimacs(), 1);
        assert_eq!(numbering.above(2, Role::Black).to_dimacs(), 9);
        // three consecutive ids per real cell, row-major
        assert_eq!(numbering.cell(Location(0, 0), Role::Balloon).to_dimacs(), 10);
        assert_eq!(numbering.cell(Location(0, 0), Role::Stone).to_dimacs(), 11);
        assert_eq!(numbering.cell(Location(0, 0), Role::Black).to_dimacs(), 12);
        assert_eq!(numbering.cell(Location(1, 0), Role::Balloon).to_dimacs(), 13);
        assert_eq!(numbering.cell(Location(1, 2), Role::Stone).to_dimacs(), 32);
        // virtual row below the grid closes the id space
        assert_eq!(numbering.below(0, Role::Balloon).to_dimacs(), 37);
        assert_eq!(numbering.below(2, Role::Black).to_dimacs(), 45);
        assert_eq!(numbering.var_count(), 45);
        assert_eq!(numbering.first_aux().to_dimacs(), 46);
    }

    #[test]
    fn boundary_rows_forced_black() {
        let formula = encode(&two_by_two());

        let expected = clauses(&[
            &[-1], &[-2], &[3],
            &[-4], &[-5], &[6],
            &[-19], &[-20], &[21],
            &[-22], &[-23], &[24],
        ]);
        for (got, want) in formula.iter().zip(expected.iter()) {
            assert_eq!(got, want);
        }
        assert!(formula.len() >= 12);
    }

    #[test]
    fn clause_counts() {
        let grid = three_by_three();
        let formula = encode(&grid);

        // 18 boundary units, 11 black-fixation units (3 for the one black cell, 1 for each of the
        // other 8), 9 mutual exclusions, 9 + 9 support clauses, and per zone of size n per marker
        // role 1 + n*(n-1)/2 uniqueness clauses: zones of 2, 3, 3 cells give 4 + 8 + 8 = 20
        assert_eq!(formula.len(), 18 + 11 + 9 + 9 + 9 + 20);
    }

    #[test]
    fn zone_uniqueness_clause_shape() {
        let grid = three_by_three();
        let numbering = Numbering::from(&grid);
        let zone = &grid.zones()[1]; // the x = 2 column, 3 cells

        for role in MARKER_ROLES {
            let clauses = crate::encode::zone_unique(&numbering, zone, role);
            assert_eq!(clauses.len(), 1 + 3);
            // the at-least-one disjunction covers the whole zone
            assert_eq!(clauses[0].len(), 3);
            assert!(clauses[0].iter().all(|lit| lit.is_positive()));
            // every at-most-one pair is binary and all-negative
            for pair in &clauses[1..] {
                assert_eq!(pair.len(), 2);
                assert!(pair.iter().all(|lit| lit.is_negative()));
            }
        }
    }

    #[test]
    fn solve_two_columns() {
        // balloons are forced to the top row (nothing else supports them), stones to the bottom
        let solved = solve(&two_by_two()).unwrap();
        assert_eq!(format!("{}", solved), "BB
SS
");
    }

    #[test]
    fn solve_worked_example() {
        let grid = three_by_three();
        let solved = solve(&grid).unwrap();
        assert_valid(&grid, &solved);
        assert_eq!(solved.cell(Location(0, 1)), CellState::Black);
    }

    #[test]
    fn one_by_one_is_unsatisfiable() {
        // a single-cell zone must hold both markers at once, which mutual exclusion forbids
        let grid = Grid::new(1, 1, vec![], vec![vec![Location(0, 0)]]).unwrap();
        assert_eq!(solve(&grid).unwrap_err(), SolveFailure::Unsatisfiable);
    }

    #[test]
    fn black_only_grid_decodes_as_black() {
        let grid = Grid::new(1, 1, vec![Location(0, 0)], vec![]).unwrap();
        let solved = solve(&grid).unwrap();
        assert_eq!(format!("{}", solved), "N
");
    }

    #[test]
    fn grid_rejects_bad_input() {
        assert_eq!(
            Grid::new(0, 3, vec![], vec![]).unwrap_err(),
            GridError::ZeroDimension
        );
        assert_eq!(
            Grid::new(2, 2, vec![Location(2, 0)], vec![]).unwrap_err(),
            GridError::OutOfBounds { cell: Location(2, 0) }
        );
        assert_eq!(
            Grid::new(2, 2, vec![], vec![vec![Location(0, 2)]]).unwrap_err(),
            GridError::OutOfBounds { cell: Location(0, 2) }
        );
        assert_eq!(
            Grid::new(2, 2, vec![], vec![vec![Location(0, 0)], vec![]]).unwrap_err(),
            GridError::EmptyZone { index: 1 }
        );
        assert_eq!(
            Grid::new(2, 2, vec![], vec![vec![Location(0, 0), Location(0, 0)]]).unwrap_err(),
            GridError::DuplicateCell { index: 0, cell: Location(0, 0) }
        );
    }

    #[test]
    fn grid_json_format() {
        // the durable grid format, as the original tooling wrote it
        let grid: Grid = serde_json::from_str(
            r#"{"width": 3, "height": 3,
                "zones": [[[0, 0], [1, 0]], [[1, 1], [0, 1], [1, 2]], [[2, 0], [2, 1], [2, 2]]],
                "blacks": [[0, 2]]}"#,
        )
        .unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.blacks(), &[Location(0, 2)]);
        assert_eq!(grid.zones()[1], vec![Location(1, 1), Location(0, 1), Location(1, 2)]);

        let reparsed: Grid =
            serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            serde_json::to_value(&reparsed).unwrap()
        );

        assert!(serde_json::from_str::<Grid>(
            r#"{"width": 2, "height": 2, "zones": [[[5, 5]]], "blacks": []}"#
        )
        .is_err());
    }

    #[test]
    fn dimacs_output() {
        let mut sink = Vec::new();
        write_dimacs(&mut sink, &clauses(&[&[1, -2], &[2, 3, -1]])).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "c generated by fuwari
p cnf 3 2
1 -2 0
2 3 -1 0
");
    }

    #[test]
    fn dimacs_header_counts_distinct_variables() {
        // variable count is how many distinct ids appear, not the highest id
        let mut sink = Vec::new();
        write_dimacs(&mut sink, &clauses(&[&[10], &[-10, 3]])).unwrap();
        let header = String::from_utf8(sink).unwrap().lines().nth(1).unwrap().to_owned();
        assert_eq!(header, "p cnf 2 2");
    }

    #[test]
    fn three_cnf_all_widths() {
        let formula = clauses(&[
            &[1],
            &[1, -2],
            &[1, 2, 3],
            &[1, -2, 3, -4],
            &[1, 2, 3, 4, 5],
            &[-1, 2, -3, 4, -5, 6],
        ]);
        let reduced = to_three_cnf(&formula, Var::from_index(6)).unwrap();

        assert!(is_three_cnf(&reduced));
        // 4 + 2 + 1 + 2 + 3 + 4 output clauses
        assert_eq!(reduced.len(), 16);
        // 2 + 1 + 0 + 1 + 2 + 3 auxiliaries on top of the 6 input variables
        assert_eq!(reduced.var_count(), 15);
    }

    #[test]
    fn three_cnf_equisatisfiable_under_all_assignments() {
        // pin every variable of an arity-n clause to each of its 2^n assignments in turn; the
        // reduced formula must be satisfiable exactly when the pinned clause itself is
        for arity in 1..=6usize {
            let clause: Vec<isize> = (1..=arity as isize)
                .map(|id| if id % 2 == 0 { -id } else { id })
                .collect();

            for pattern in 0..1u32 << arity {
                let mut raw: Vec<Vec<isize>> = vec![clause.clone()];
                for var in 1..=arity as isize {
                    let positive = pattern & (1 << (var - 1)) != 0;
                    raw.push(vec![if positive { var } else { -var }]);
                }
                let formula = clauses(&raw.iter().map(Vec::as_slice).collect::<Vec<_>>());

                let clause_holds = clause.iter().any(|lit| {
                    let positive = pattern & (1 << (lit.unsigned_abs() - 1)) != 0;
                    (*lit > 0) == positive
                });
                assert_eq!(satisfiable(&formula), clause_holds);

                let reduced = to_three_cnf(&formula, Var::from_index(arity)).unwrap();
                assert!(is_three_cnf(&reduced));
                assert_eq!(satisfiable(&reduced), clause_holds, "arity {arity} pattern {pattern:b}");
            }
        }
    }

    #[test]
    fn three_cnf_preserves_unsatisfiability() {
        let contradiction = clauses(&[&[1], &[-1]]);
        let reduced = to_three_cnf(&contradiction, Var::from_index(1)).unwrap();
        assert!(!satisfiable(&reduced));

        let wide = clauses(&[&[1, 2, 3, 4, 5], &[-1], &[-2], &[-3], &[-4], &[-5]]);
        let reduced = to_three_cnf(&wide, Var::from_index(5)).unwrap();
        assert!(!satisfiable(&reduced));
    }

    #[test]
    fn three_cnf_rejects_overlapping_auxiliaries() {
        let formula = encode(&two_by_two());
        assert_eq!(
            to_three_cnf(&formula, Var::from_index(0)).unwrap_err(),
            ReduceError::AuxOverlap {
                first_aux: 1,
                last_used: formula.var_count() as isize,
            }
        );
    }

    #[test]
    fn three_cnf_rejects_empty_clause() {
        let mut formula = clauses(&[&[1, 2]]);
        formula.add_clause(&[]);
        assert_eq!(
            to_three_cnf(&formula, Var::from_index(2)).unwrap_err(),
            ReduceError::EmptyClause { index: 1 }
        );
    }

    #[test]
    fn reduced_formula_still_solves_the_grid() {
        let grid = two_by_two();
        let numbering = Numbering::from(&grid);
        let reduced = to_three_cnf(&encode(&grid), numbering.first_aux()).unwrap();

        let mut solver = Solver::new();
        solver.add_formula(&reduced);
        assert!(solver.solve().is_ok_and(identity));

        // the auxiliaries in the model are simply never consulted
        let model = solver.model().unwrap();
        let cells = decode(&Assignment::from_model(&model), grid.dims()).unwrap();
        let solved = Solution::from(cells);
        assert_valid(&grid, &solved);
        assert_eq!(format!("{}", solved), "BB
SS
");
    }

    #[test]
    fn decode_missing_variable_fails() {
        let grid = two_by_two();
        assert_eq!(
            decode(&Assignment::default(), grid.dims()).unwrap_err(),
            // the balloon variable of (0, 0) is the first one consulted
            DecodeError::MissingVariable { id: 7 }
        );
    }

    #[test]
    fn parse_minisat_output() {
        let models = parse_oracle_output("SAT\n1 -2 3 0\n", OracleDialect::Minisat).unwrap();
        assert_eq!(models, vec![vec![
            Lit::from_dimacs(1),
            Lit::from_dimacs(-2),
            Lit::from_dimacs(3),
        ]]);

        assert!(parse_oracle_output("UNSAT\n", OracleDialect::Minisat).unwrap().is_empty());
        assert!(parse_oracle_output("SAT\n1 x 0\n", OracleDialect::Minisat).is_err());
    }

    #[test]
    fn parse_picosat_output() {
        let content = "s SATISFIABLE
v 1 -2
v 3 0
s SATISFIABLE
v -1 2 -3 0
s SOLUTIONS 2
";
        let models = parse_oracle_output(content, OracleDialect::Picosat).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0], vec![
            Lit::from_dimacs(1),
            Lit::from_dimacs(-2),
            Lit::from_dimacs(3),
        ]);
        assert_eq!(models[1], vec![
            Lit::from_dimacs(-1),
            Lit::from_dimacs(2),
            Lit::from_dimacs(-3),
        ]);

        assert!(parse_oracle_output("s UNSATISFIABLE\n", OracleDialect::Picosat).unwrap().is_empty());
    }

    #[test]
    fn oracle_file_round_trip() {
        // export the formula, fake a minisat run with our own solver, decode its answer
        let grid = three_by_three();
        let formula = encode(&grid);

        let mut solver = Solver::new();
        solver.add_formula(&formula);
        assert!(solver.solve().is_ok_and(identity));
        let fake_output = format!(
            "SAT\n{} 0\n",
            solver
                .model()
                .unwrap()
                .iter()
                .map(|lit| lit.to_dimacs().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let models = parse_oracle_output(&fake_output, OracleDialect::Minisat).unwrap();
        assert_eq!(models.len(), 1);
        let cells = decode(&Assignment::from_model(&models[0]), grid.dims()).unwrap();
        assert_valid(&grid, &Solution::from(cells));
    }
}
