use crate::{Assignments, Formula, Literal, Sign, Variable, Watched};
use tracing::debug;

/// Lazily enumerates the complete assignments satisfying a formula.
///
/// Variables are branched in index order, trying `Negative` (0) before
/// `Positive` (1); no ordering heuristic. Each tentative assignment
/// falsifies exactly one literal, and the watch structure is asked to
/// re-establish its invariant for it. A conflict abandons the value, an
/// exhausted variable is unassigned and the walk retreats one level.
///
/// The watch structure is shared across branches and never snapshotted;
/// see `Watched::update` for what survives an abandoned branch.
pub struct Models<'f> {
    formula: &'f Formula,
    watched: Watched,
    assignments: Assignments,
    /// Per-depth value that branching will try next; `None` = exhausted.
    next_value: Vec<Option<Sign>>,
    depth: usize,
    start: usize,
    num_vars: usize,
    at_leaf: bool,
    done: bool,
}

impl<'f> Models<'f> {
    /// Fresh search over `num_vars` variables, nothing assigned.
    pub fn new(formula: &'f Formula, num_vars: Variable) -> Self {
        Self::resume(
            formula,
            Watched::build(num_vars, formula),
            0,
            Assignments::new(num_vars),
        )
    }

    /// Search that branches on `start` and the variables after it, keeping
    /// whatever `assignments` already says about the variables below.
    /// The caller is responsible for `watched` being consistent with
    /// `assignments`.
    pub fn resume(
        formula: &'f Formula,
        watched: Watched,
        start: Variable,
        assignments: Assignments,
    ) -> Self {
        let num_vars = assignments.num_variables();
        debug!("enumerating models of {} variables from {}", num_vars, start);
        Self {
            formula,
            watched,
            assignments,
            next_value: vec![Some(Sign::Negative); num_vars],
            depth: start,
            start,
            num_vars,
            at_leaf: false,
            done: false,
        }
    }
}

impl Iterator for Models<'_> {
    type Item = Vec<Sign>;

    fn next(&mut self) -> Option<Vec<Sign>> {
        if self.done {
            return None;
        }

        // A model was handed out last call; step back off the leaf
        if self.at_leaf {
            self.at_leaf = false;
            if self.depth <= self.start {
                self.done = true;
                return None;
            }
            self.depth -= 1;
        }

        loop {
            if self.depth == self.num_vars {
                let model = self.assignments.complete();
                debug_assert!(model.is_some(), "leaf reached with unassigned variables");
                self.at_leaf = true;
                return model;
            }

            let var = self.depth;
            match self.next_value[var] {
                Some(sign) => {
                    self.next_value[var] = match sign {
                        Sign::Negative => Some(Sign::Positive),
                        Sign::Positive => None,
                    };
                    self.assignments.set(var, sign);

                    // The one literal this assignment falsifies
                    let falsified = !Literal::new(var, sign);
                    if self.watched.update(self.formula, falsified, &self.assignments) {
                        self.depth += 1;
                        if self.depth < self.num_vars {
                            self.next_value[self.depth] = Some(Sign::Negative);
                        }
                    }
                }
                None => {
                    self.assignments.remove(var);
                    if self.depth == self.start {
                        self.done = true;
                        return None;
                    }
                    self.depth -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sign::{Negative, Positive};
    use crate::{parse_clause, Evaluate, VariableTable};

    fn formula(clauses: &[&str]) -> (VariableTable, Formula) {
        let mut table = VariableTable::new();
        let mut formula = Formula::new();
        for clause in clauses {
            formula.add_clause(parse_clause(&mut table, clause).unwrap());
        }
        (table, formula)
    }

    fn satisfies(formula: &Formula, values: &[Sign]) -> bool {
        let assignments = Assignments::new_with(values.iter().copied().map(Some).collect());
        formula
            .clauses()
            .all(|clause| clause.evaluate(&assignments) == Some(true))
    }

    /// Checks every one of the 2^n complete assignments against the clause set.
    fn brute_force_satisfiable(formula: &Formula, num_vars: usize) -> bool {
        (0..1u32 << num_vars).any(|bits| {
            let values = (0..num_vars)
                .map(|var| Sign::from(bits & (1 << var) != 0))
                .collect::<Vec<_>>();
            satisfies(formula, &values)
        })
    }

    #[test_log::test]
    fn two_clause_instance_has_a_model() {
        let (table, formula) = formula(&["A B ~C", "~A ~B ~C"]);
        let model = Models::new(&formula, table.len()).next();

        let model = model.expect("instance is satisfiable");
        assert!(satisfies(&formula, &model));
    }

    #[test_log::test]
    fn contradictory_units_are_unsatisfiable() {
        let (table, formula) = formula(&["A", "~A"]);
        assert_eq!(Models::new(&formula, table.len()).next(), None);
    }

    #[test]
    fn eight_clause_instance_is_unsatisfiable() {
        let (table, formula) = formula(&[
            "B C ~D", "A C D", "~A B D", "~A ~B C", "~B ~C D", "~A ~C ~D", "A ~B ~D", "A B ~C",
        ]);
        assert_eq!(table.len(), 4);
        assert_eq!(Models::new(&formula, table.len()).next(), None);
    }

    #[test]
    fn dropping_the_last_clause_restores_satisfiability() {
        let (table, formula) = formula(&[
            "B C ~D", "A C D", "~A B D", "~A ~B C", "~B ~C D", "~A ~C ~D", "A ~B ~D",
        ]);
        let model = Models::new(&formula, table.len()).next();

        let model = model.expect("seven-clause instance is satisfiable");
        assert!(satisfies(&formula, &model));
    }

    #[test]
    fn models_come_out_lazily_in_branch_order() {
        // Unconstrained variables enumerate all assignments, low values first
        let formula = Formula::new();
        let mut models = Models::new(&formula, 2);

        assert_eq!(models.next(), Some(vec![Negative, Negative]));
        assert_eq!(models.next(), Some(vec![Negative, Positive]));
        assert_eq!(models.next(), Some(vec![Positive, Negative]));
        assert_eq!(models.next(), Some(vec![Positive, Positive]));
        assert_eq!(models.next(), None);
        assert_eq!(models.next(), None);
    }

    #[test]
    fn unit_clause_prunes_half_the_space() {
        let (table, formula) = formula(&["A"]);
        let models = Models::new(&formula, table.len()).collect::<Vec<_>>();
        assert_eq!(models, vec![vec![Positive]]);
    }

    #[test]
    fn no_variables_yields_the_empty_model_once() {
        let formula = Formula::new();
        let mut models = Models::new(&formula, 0);
        assert_eq!(models.next(), Some(vec![]));
        assert_eq!(models.next(), None);
    }

    #[test]
    fn resolving_twice_finds_the_same_first_model() {
        let (table, formula) = formula(&["A B ~C", "~A ~B ~C", "B ~A"]);
        let first = Models::new(&formula, table.len()).next();
        let second = Models::new(&formula, table.len()).next();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn resume_branches_only_above_the_start_variable() {
        let (table, formula) = formula(&["A B"]);

        // Pin A = 0; the search may only branch on B
        let mut assignments = Assignments::new(table.len());
        assignments.set(0, Negative);
        let mut watched = Watched::build(table.len(), &formula);
        assert!(watched.update(&formula, Literal::new(0, true), &assignments));

        let models = Models::resume(&formula, watched, 1, assignments).collect::<Vec<_>>();
        assert_eq!(models, vec![vec![Negative, Positive]]);
    }

    mod props {
        use super::*;
        use crate::Clause;
        use quickcheck_macros::quickcheck;

        const NUM_VARS: usize = 4;

        fn build(clauses: Vec<Vec<(u8, bool)>>) -> Formula {
            let mut formula = Formula::new();
            for literals in clauses {
                if literals.is_empty() {
                    continue;
                }
                let literals = literals
                    .into_iter()
                    .map(|(var, positive)| Literal::new(var as usize % NUM_VARS, positive))
                    .collect();
                formula.add_clause(Clause::new(literals).unwrap());
            }
            formula
        }

        #[quickcheck]
        fn every_model_satisfies_every_clause(clauses: Vec<Vec<(u8, bool)>>) -> bool {
            let formula = build(clauses);
            Models::new(&formula, NUM_VARS).all(|model| satisfies(&formula, &model))
        }

        #[quickcheck]
        fn verdict_agrees_with_brute_force(clauses: Vec<Vec<(u8, bool)>>) -> bool {
            let formula = build(clauses);
            let satisfiable = Models::new(&formula, NUM_VARS).next().is_some();
            satisfiable == brute_force_satisfiable(&formula, NUM_VARS)
        }

        #[quickcheck]
        fn search_enumerates_exactly_the_satisfying_assignments(
            clauses: Vec<Vec<(u8, bool)>>,
        ) -> bool {
            let formula = build(clauses);
            let count = (0..1u32 << NUM_VARS)
                .filter(|bits| {
                    let values = (0..NUM_VARS)
                        .map(|var| Sign::from(bits & (1 << var) != 0))
                        .collect::<Vec<_>>();
                    satisfies(&formula, &values)
                })
                .count();
            Models::new(&formula, NUM_VARS).count() == count
        }
    }
}
