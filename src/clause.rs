use crate::{Assignments, Error, Evaluate, Literal};

/// A disjunction of literals. Never empty; the first slot holds the literal
/// the clause starts out watching.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Result<Self, Error> {
        if literals.is_empty() {
            return Err(Error::EmptyClause);
        }
        Ok(Self { literals })
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// The literal in the initially watched slot.
    #[inline]
    pub fn first(&self) -> Literal {
        self.literals[0]
    }

    /// First literal in clause order that is unassigned or true.
    pub fn first_viable(&self, assignments: &Assignments) -> Option<Literal> {
        self.literals()
            .find(|literal| !matches!(literal.evaluate(assignments), Some(false)))
    }
}

impl Evaluate for Clause {
    fn evaluate(&self, assignments: &Assignments) -> Option<bool> {
        let mut unassigned = false;
        for literal in self.literals() {
            match literal.evaluate(assignments) {
                Some(true) => return Some(true),
                None => unassigned = true,
                Some(false) => (),
            }
        }
        if unassigned {
            None
        } else {
            Some(false)
        }
    }
}

#[test]
fn empty_clauses_are_rejected() {
    assert!(matches!(Clause::new(vec![]), Err(Error::EmptyClause)));
    assert!(Clause::new(vec![Literal::new(0, true)]).is_ok());
}

#[test]
fn first_viable_scans_in_clause_order() -> Result<(), Error> {
    use crate::Sign::Negative;

    let (a, b, not_c) = (
        Literal::new(0, true),
        Literal::new(1, true),
        Literal::new(2, false),
    );
    let clause = Clause::new(vec![a, b, not_c])?;

    assert_eq!(
        clause.first_viable(&Assignments::new_with(vec![None, None, None])),
        Some(a)
    );
    assert_eq!(
        clause.first_viable(&Assignments::new_with(vec![Some(Negative), None, None])),
        Some(b)
    );
    assert_eq!(
        clause.first_viable(&Assignments::new_with(vec![
            Some(Negative),
            Some(Negative),
            None
        ])),
        Some(not_c)
    );
    assert_eq!(
        clause.first_viable(&Assignments::new_with(vec![
            Some(Negative),
            Some(Negative),
            Some(crate::Sign::Positive)
        ])),
        None
    );

    Ok(())
}

#[test]
fn clause_evaluation() -> Result<(), Error> {
    use crate::Sign::{Negative, Positive};

    let clause = Clause::new(vec![Literal::new(0, true), Literal::new(1, false)])?;

    // Unassigned literal and no true literal: undetermined
    assert_eq!(
        clause.evaluate(&Assignments::new_with(vec![Some(Negative), None])),
        None
    );
    // Any true literal satisfies the clause, assigned or not elsewhere
    assert_eq!(
        clause.evaluate(&Assignments::new_with(vec![Some(Positive), None])),
        Some(true)
    );
    assert_eq!(
        clause.evaluate(&Assignments::new_with(vec![None, Some(Negative)])),
        Some(true)
    );
    // Every literal false
    assert_eq!(
        clause.evaluate(&Assignments::new_with(vec![Some(Negative), Some(Positive)])),
        Some(false)
    );

    Ok(())
}
