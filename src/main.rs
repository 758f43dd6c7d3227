use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fuwari::decode::{decode, Assignment};
use fuwari::dimacs::{parse_oracle_output, write_dimacs, OracleDialect};
use fuwari::encode::encode;
use fuwari::reduce::to_three_cnf;
use fuwari::{Grid, Numbering, Solution, SolveFailure};

#[derive(Parser)]
#[command(name = "fuwari", about = "Encode and solve Dosun Fuwari grids via SAT")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export each grid file as a DIMACS CNF file next to it
    Export {
        /// Grid files in the JSON grid format
        #[arg(required = true)]
        grids: Vec<PathBuf>,
        /// Reduce the formula so every clause has exactly three literals
        #[arg(long)]
        three_cnf: bool,
    },
    /// Solve a grid with the bundled solver and print the result
    Solve {
        /// Grid file in the JSON grid format
        grid: PathBuf,
    },
    /// Print the solutions reported by an external solver run on an exported formula
    Show {
        /// Grid file the formula was exported from
        grid: PathBuf,
        /// Solver output file; stdin if omitted
        output: Option<PathBuf>,
        /// Output dialect of the solver that produced the file
        #[arg(long, value_enum, default_value = "minisat")]
        solver: Dialect,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Dialect {
    Minisat,
    Picosat,
}

impl From<Dialect> for OracleDialect {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Minisat => Self::Minisat,
            Dialect::Picosat => Self::Picosat,
        }
    }
}

fn read_grid(path: &PathBuf) -> Result<Grid, Box<dyn Error>> {
    Ok(serde_json::from_reader(File::open(path)?)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    match Cli::parse().command {
        Command::Export { grids, three_cnf } => {
            for path in grids {
                let grid = read_grid(&path)?;
                let mut formula = encode(&grid);
                if three_cnf {
                    formula = to_three_cnf(&formula, Numbering::from(&grid).first_aux())?;
                }
                let mut out = File::create(path.with_extension("cnf"))?;
                write_dimacs(&mut out, &formula)?;
            }
        }
        Command::Solve { grid } => match fuwari::solve(&read_grid(&grid)?) {
            Ok(solution) => print!("{}", solution),
            Err(SolveFailure::Unsatisfiable) => println!("no solution"),
            Err(failure) => return Err(failure.into()),
        },
        Command::Show { grid, output, solver } => {
            let grid = read_grid(&grid)?;
            let content = match output {
                Some(path) => std::fs::read_to_string(path)?,
                None => io::read_to_string(io::stdin())?,
            };

            let models = parse_oracle_output(&content, solver.into())?;
            if models.is_empty() {
                println!("no solutions found");
                return Ok(());
            }

            println!("{} solution(s) found", models.len());
            for model in models {
                let solution = Solution::from(decode(&Assignment::from_model(&model), grid.dims())?);
                println!();
                print!("{}", solution);
            }
        }
    }

    Ok(())
}
