use crate::{Clause, Error, Literal, Result, Sign, Variable};
use std::collections::HashMap;

/// Maps textual variable names to indices. Indices are handed out in
/// discovery order and never renumbered.
#[derive(Clone, Debug, Default)]
pub struct VariableTable {
    indices: HashMap<String, Variable>,
    names: Vec<String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, assigning the next free one on first sight.
    pub fn intern(&mut self, name: &str) -> Variable {
        match self.indices.get(name) {
            Some(&var) => var,
            None => {
                let var = self.names.len();
                self.indices.insert(name.to_owned(), var);
                self.names.push(name.to_owned());
                var
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Variable> {
        self.indices.get(name).copied()
    }

    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var).map(String::as_str)
    }

    /// Names in discovery order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses a whitespace separated list of literals into a clause.
///
/// A literal is a variable name, optionally preceded by `~` for negation.
/// Names not seen before are added to `table`.
pub fn parse_clause(table: &mut VariableTable, clause: &str) -> Result<Clause> {
    let mut literals = Vec::new();
    for token in clause.split_whitespace() {
        let (name, sign) = match token.strip_prefix('~') {
            Some(rest) => (rest, Sign::Negative),
            None => (token, Sign::Positive),
        };
        if name.is_empty() {
            return Err(Error::InvalidLiteral {
                token: token.to_owned(),
            });
        }
        literals.push(Literal::new(table.intern(name), sign));
    }
    Clause::new(literals)
}

#[test]
fn literals_encode_in_discovery_order() -> Result<()> {
    let mut table = VariableTable::new();

    let clause = parse_clause(&mut table, "A B ~C")?;
    assert_eq!(
        clause.literals().map(Literal::code).collect::<Vec<_>>(),
        vec![0, 2, 5]
    );

    let clause = parse_clause(&mut table, "A B C")?;
    assert_eq!(
        clause.literals().map(Literal::code).collect::<Vec<_>>(),
        vec![0, 2, 4]
    );

    Ok(())
}

#[test]
fn the_table_is_shared_across_clauses() -> Result<()> {
    let mut table = VariableTable::new();
    parse_clause(&mut table, "A B ~C")?;
    let clause = parse_clause(&mut table, "~A ~B ~C")?;

    assert_eq!(
        clause.literals().map(Literal::code).collect::<Vec<_>>(),
        vec![1, 3, 5]
    );
    assert_eq!(table.len(), 3);
    assert_eq!(table.names().to_vec(), vec!["A", "B", "C"]);
    assert_eq!(table.get("C"), Some(2));
    assert_eq!(table.name(1), Some("B"));

    Ok(())
}

#[test]
fn interning_is_idempotent() {
    let mut table = VariableTable::new();
    assert_eq!(table.intern("x1"), 0);
    assert_eq!(table.intern("x2"), 1);
    assert_eq!(table.intern("x1"), 0);
    assert_eq!(table.len(), 2);
}

#[test]
fn blank_clauses_and_bare_tildes_are_rejected() {
    let mut table = VariableTable::new();
    assert!(matches!(
        parse_clause(&mut table, ""),
        Err(Error::EmptyClause)
    ));
    assert!(matches!(
        parse_clause(&mut table, "   "),
        Err(Error::EmptyClause)
    ));
    assert!(matches!(
        parse_clause(&mut table, "A ~"),
        Err(Error::InvalidLiteral { .. })
    ));
}
