use crate::{Assignments, ClauseIdx, Formula, Literal, Variable};
use std::mem;
use std::ops::{Index, IndexMut};
use tracing::{debug, trace};

/// One slot per literal code, holding the clauses currently watching that
/// literal. Invariant between `update` calls: a clause watches a literal
/// only while that literal is not false.
pub struct Watched {
    watched: Vec<Vec<ClauseIdx>>,
}

impl Watched {
    pub fn new(num_vars: Variable) -> Self {
        Self {
            watched: vec![Vec::new(); num_vars * 2],
        }
    }

    /// Seeds every clause into the slot of its first literal.
    pub fn build(num_vars: Variable, formula: &Formula) -> Self {
        let mut watched = Self::new(num_vars);
        for (idx, clause) in formula.clauses().enumerate() {
            watched[clause.first()].push(idx);
        }
        watched
    }

    /// Re-establishes the watch invariant after `false_literal` became false
    /// under `assignments`.
    ///
    /// Each clause watching `false_literal` moves to its first literal that
    /// is unassigned or true; on success the slot is left empty. If some
    /// clause has every literal false, reports conflict and puts the slot
    /// back as it was before the call, leaving already-relocated clauses
    /// listed in their new slots as well. No unit propagation: a clause
    /// down to a single viable literal is relocated, not forced.
    pub fn update(
        &mut self,
        formula: &Formula,
        false_literal: Literal,
        assignments: &Assignments,
    ) -> bool {
        let watchers = mem::take(&mut self[false_literal]);
        for &idx in &watchers {
            match formula[idx].first_viable(assignments) {
                Some(alternative) => {
                    trace!("clause {} moves watch {} -> {}", idx, false_literal, alternative);
                    self[alternative].push(idx);
                }
                None => {
                    debug!("conflict: every literal of clause {} is false", idx);
                    self[false_literal] = watchers;
                    return false;
                }
            }
        }
        true
    }
}

impl Index<Literal> for Watched {
    type Output = Vec<ClauseIdx>;

    #[inline]
    fn index(&self, literal: Literal) -> &Self::Output {
        &self.watched[literal.code()]
    }
}

impl IndexMut<Literal> for Watched {
    #[inline]
    fn index_mut(&mut self, literal: Literal) -> &mut Self::Output {
        &mut self.watched[literal.code()]
    }
}

#[cfg(test)]
fn formula(clauses: &[&str]) -> (crate::VariableTable, Formula) {
    let mut table = crate::VariableTable::new();
    let mut formula = Formula::new();
    for clause in clauses {
        formula.add_clause(crate::parse_clause(&mut table, clause).unwrap());
    }
    (table, formula)
}

#[test]
fn build_seeds_first_literals() {
    let (_, formula) = formula(&["A B ~C", "~A ~B ~C"]);
    let watched = Watched::build(3, &formula);

    let (a, not_a) = (Literal::new(0, true), Literal::new(0, false));
    assert_eq!(watched[a], vec![0]);
    assert_eq!(watched[not_a], vec![1]);
    assert!(watched[Literal::new(1, true)].is_empty());
    assert!(watched[Literal::new(2, false)].is_empty());
}

#[test]
fn update_relocates_to_the_next_viable_literal() {
    use crate::Sign::Negative;

    let (_, formula) = formula(&["A B ~C"]);
    let mut watched = Watched::build(3, &formula);
    let mut assignments = Assignments::new(3);

    // A = 0 falsifies the positive literal of A
    assignments.set(0, Negative);
    let a = Literal::new(0, true);
    assert!(watched.update(&formula, a, &assignments));

    // The clause moved out of A's slot into B's; A's slot is now empty
    assert!(watched[a].is_empty());
    assert_eq!(watched[Literal::new(1, true)], vec![0]);
}

#[test]
fn update_reports_conflict_and_keeps_the_slot() {
    use crate::Sign::Negative;

    let (_, formula) = formula(&["A"]);
    let mut watched = Watched::build(1, &formula);
    let mut assignments = Assignments::new(1);

    assignments.set(0, Negative);
    let a = Literal::new(0, true);
    assert!(!watched.update(&formula, a, &assignments));
    assert_eq!(watched[a], vec![0]);
}

#[test]
fn no_clause_watches_a_false_literal_after_success() {
    use crate::{Evaluate, Sign::Negative};

    let (table, formula) = formula(&["A B ~C", "A C", "~A B"]);
    let num_vars = table.len();
    let mut watched = Watched::build(num_vars, &formula);
    let mut assignments = Assignments::new(num_vars);

    // Falsify A, then B, checking the invariant after each successful call
    for var in 0..2 {
        assignments.set(var, Negative);
        assert!(watched.update(&formula, Literal::new(var, true), &assignments));

        for code in 0..num_vars * 2 {
            let literal = Literal::from_code(code);
            if !watched[literal].is_empty() {
                assert_ne!(literal.evaluate(&assignments), Some(false), "{}", literal);
            }
        }
    }
}
