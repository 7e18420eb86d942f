use std::fs;
use std::time::Instant;

use watchsat::{Solution, Solver};

fn main() -> watchsat::Result<()> {
    env_logger::init();

    match std::env::args().collect::<Vec<_>>().as_slice() {
        [_, path] => {
            let start = Instant::now();

            let mut solver = Solver::new();
            for line in fs::read_to_string(path)?.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                solver.add_clause_line(line)?;
            }

            print_solution(solver.solve());
            println!("solved in {}ms", start.elapsed().as_millis());
            Ok(())
        }
        _ => {
            eprintln!("usage: watchsat <clause file>");
            std::process::exit(2);
        }
    }
}

fn print_solution(solution: &Solution) {
    match solution {
        Solution::Sat(model) => println!("{}", model),
        Solution::Unsat => println!("UNSATISFIABLE"),
    }
}
