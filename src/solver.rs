use crate::{parse_clause, Clause, Error, Formula, Models, Result, Sign, VariableTable};
use std::fmt;
use tracing::debug;

/// Accumulates clauses and decides their satisfiability once.
///
/// The solver moves through two phases: while no solution has been computed
/// it accepts clauses; the first `solve` call fixes the answer, and from
/// then on clause additions are rejected with [`Error::Frozen`]. Repeated
/// `solve` calls return the memoized result.
#[derive(Debug, Default)]
pub struct Solver {
    table: VariableTable,
    formula: Formula,
    solution: Option<Solution>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a space separated list of literals and adds it as a clause.
    pub fn add_clause_line(&mut self, line: &str) -> Result<()> {
        if self.is_solved() {
            return Err(Error::Frozen);
        }
        let clause = parse_clause(&mut self.table, line)?;
        self.formula.add_clause(clause);
        Ok(())
    }

    /// Adds an already-encoded clause. Its literals must refer to variables
    /// interned in this solver's table.
    pub fn add_clause(&mut self, clause: Clause) -> Result<()> {
        if self.is_solved() {
            return Err(Error::Frozen);
        }
        self.formula.add_clause(clause);
        Ok(())
    }

    /// Access to the variable table, for encoding clauses by hand.
    pub fn variables(&mut self) -> &mut VariableTable {
        &mut self.table
    }

    /// Whether a solution has already been computed.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Finds an assignment satisfying all clauses, or reports that none
    /// exists. The first call runs the search; later calls return the same
    /// answer without searching again.
    pub fn solve(&mut self) -> &Solution {
        let (table, formula) = (&self.table, &self.formula);
        self.solution.get_or_insert_with(|| {
            debug!(
                "solving {} clauses over {} variables",
                formula.num_clauses(),
                table.len()
            );
            match Models::new(formula, table.len()).next() {
                Some(values) => Solution::Sat(Model::new(table.names().to_vec(), values)),
                None => Solution::Unsat,
            }
        })
    }
}

/// Outcome of a solve: a witness assignment, or none exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {
    Sat(Model),
    Unsat,
}

impl Solution {
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Solution::Sat(model) => Some(model),
            Solution::Unsat => None,
        }
    }
}

/// A satisfying assignment keyed by variable name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Model {
    names: Vec<String>,
    values: Vec<Sign>,
}

impl Model {
    pub(crate) fn new(names: Vec<String>, values: Vec<Sign>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// The value assigned to `name`, if the variable occurs in the formula.
    pub fn value(&self, name: &str) -> Option<bool> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|var| self.values[var] == Sign::Positive)
    }

    /// Name/value pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(|&sign| sign == Sign::Positive))
    }

    /// The assignment as a JSON object mapping each name to 0 or 1.
    pub fn to_json(&self) -> String {
        let map = self
            .names
            .iter()
            .zip(&self.values)
            .map(|(name, sign)| (name.clone(), serde_json::Value::from(sign.value())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map).to_string()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (name, sign)) in self.names.iter().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, sign.value())?;
        }
        Ok(())
    }
}
