//! Implementation for variables and sets of variables used in expressions

use crate::GateKitError;

use bit_set::BitSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

static RE_VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([A-Za-z])\s*$").unwrap());

/// A single Boolean variable, named by one uppercase letter A-Z.
///
/// Variables are the leaves of [expression trees](crate::Expr) and the keys of
/// [assignments](crate::Assignment). Parsing is case-insensitive: the stored
/// name is always uppercase.
///
/// ```
/// use gatekit::Variable;
///
/// let a: Variable = "a".parse().unwrap();
/// assert_eq!(a.name(), 'A');
/// assert_eq!(a.uid(), 0);
///
/// assert!("AB".parse::<Variable>().is_err());
/// assert!("4".parse::<Variable>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) char);

impl Variable {
    /// Create a variable from its letter, or None if it is not a letter
    pub fn new(name: char) -> Option<Self> {
        let name = name.to_ascii_uppercase();
        match name.is_ascii_uppercase() {
            true => Some(Self(name)),
            false => None,
        }
    }

    /// The uppercase letter naming this variable
    pub fn name(&self) -> char {
        self.0
    }

    /// Return the internal integer UID (0 for A, 25 for Z)
    pub fn uid(&self) -> usize {
        self.0 as usize - 'A' as usize
    }

    pub(crate) fn from_uid(uid: usize) -> Self {
        Self((b'A' + uid as u8) as char)
    }
}

impl FromStr for Variable {
    type Err = GateKitError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match RE_VARIABLE_NAME.captures(name) {
            Some(cap) => {
                let c = cap.get(1).unwrap().as_str().chars().next().unwrap();
                Ok(Self(c.to_ascii_uppercase()))
            }
            None => Err(GateKitError::InvalidVariable(name.to_string())),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of variables with efficient bitwise operations.
///
/// A VarSet is an abstraction over [BitSet] indexed by variable UIDs.
/// It is used to collect the variables referenced in an expression and to
/// drive truth-table enumeration.
///
/// ```
/// use gatekit::{Variable, VarSet};
///
/// let mut vs = VarSet::default();
/// vs.insert(Variable::new('B').unwrap());
/// vs.insert(Variable::new('A').unwrap());
/// vs.insert(Variable::new('B').unwrap());
///
/// assert_eq!(vs.len(), 2);
/// let names: String = vs.iter().map(|v| v.name()).collect();
/// assert_eq!(names, "AB");
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarSet {
    variables: BitSet,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the given variable to this set
    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    /// Remove the given variable from this set
    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    /// Test if a specific variable is part of this set
    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Add all variables from the other set
    pub fn union_with(&mut self, vars: &Self) {
        self.variables.union_with(&vars.variables);
    }

    /// Return the number of variables in this set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Return whether there are no selected variable in this set
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over the contained variables in alphabetical order
    pub fn iter(&self) -> Iter {
        self.into_iter()
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut vs = VarSet::default();
        for v in iter {
            vs.insert(v);
        }
        vs
    }
}

impl Extend<Variable> for VarSet {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for v in self {
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Iterate over variables in a [VarSet]
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Variable::from_uid)
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.variables.iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use core::str::FromStr;

    #[test]
    fn extract_variable() -> Result<(), GateKitError> {
        assert_eq!(Variable::from_str("A")?.uid(), 0);
        assert_eq!(Variable::from_str("  z ")?.name(), 'Z');

        assert!(Variable::from_str("AB").is_err());
        assert!(Variable::from_str("3").is_err());
        assert!(Variable::from_str("").is_err());

        assert_eq!(Variable::new('q'), Variable::new('Q'));
        assert_eq!(Variable::new('!'), None);

        Ok(())
    }

    #[test]
    fn collect_and_iterate() {
        let mut vs = VarSet::default();
        for name in ['D', 'A', 'C', 'A'] {
            vs.insert(Variable::new(name).unwrap());
        }

        assert_eq!(vs.len(), 3);
        assert!(vs.contains(Variable::new('C').unwrap()));
        assert!(!vs.contains(Variable::new('B').unwrap()));
        assert_eq!(format!("{}", vs), "ACD");

        vs.remove(Variable::new('C').unwrap());
        assert_eq!(format!("{}", vs), "AD");
    }
}
