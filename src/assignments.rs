use crate::{Sign, Variable};
use std::ops::Index;

/// One `Option<Sign>` slot per variable; `None` means unassigned.
#[derive(Clone, Debug)]
pub struct Assignments {
    values: Vec<Option<Sign>>,
}

impl Assignments {
    pub fn new(num_vars: Variable) -> Self {
        Self {
            values: vec![None; num_vars],
        }
    }

    #[cfg(test)]
    pub(crate) fn new_with(values: Vec<Option<Sign>>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, var: Variable) -> Option<Sign> {
        self.values[var]
    }

    pub fn set(&mut self, var: Variable, sign: Sign) {
        self.values[var] = Some(sign);
    }

    pub fn remove(&mut self, var: Variable) {
        self.values[var] = None;
    }

    pub fn num_variables(&self) -> Variable {
        self.values.len()
    }

    /// All values in variable order, provided every variable is assigned.
    pub fn complete(&self) -> Option<Vec<Sign>> {
        self.values.iter().copied().collect()
    }
}

impl Index<Variable> for Assignments {
    type Output = Option<Sign>;

    #[inline]
    fn index(&self, var: Variable) -> &Self::Output {
        &self.values[var]
    }
}

#[test]
fn complete_requires_every_variable() {
    let mut assignments = Assignments::new(2);
    assert_eq!(assignments.complete(), None);

    assignments.set(0, Sign::Positive);
    assert_eq!(assignments.complete(), None);

    assignments.set(1, Sign::Negative);
    assert_eq!(
        assignments.complete(),
        Some(vec![Sign::Positive, Sign::Negative])
    );

    assignments.remove(0);
    assert_eq!(assignments.complete(), None);
}
