use crate::variable::Iter;
use crate::{GateKitError, VarSet, Variable};
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

/// A variable assignment defined by the set of true variables, the others are implicitly false.
///
/// Assignments are defined as sets of all true variables (using bit-sets internally);
/// any variable absent from the set evaluates to ```false```. This is the documented
/// policy for unbound variables: an expression referencing a variable which was never
/// activated sees it as false rather than failing.
///
/// An assignment can be constructed explicitly by activating or disabling individual
/// variables, built from an iterator of variables, or parsed from a string listing
/// the active letters.
///
/// ```
/// use gatekit::{Assignment, Variable};
/// use std::iter::FromIterator;
///
/// let a = Variable::new('A').unwrap();
/// let b = Variable::new('B').unwrap();
///
/// let mut assignment = Assignment::default();
/// assignment.activate(a);
///
/// assert!(assignment.is_active(a));
/// assert!(!assignment.is_active(b));
///
/// // Parse the list of active letters
/// let assignment2: Assignment = "A C".parse().unwrap();
/// let assignment3 = Assignment::from_iter([a, b]);
/// ```
#[derive(Clone, Default, Debug)]
pub struct Assignment {
    pub(crate) active: VarSet,
}

impl Assignment {
    /// Set the given variable to true in this assignment
    pub fn activate(&mut self, var: Variable) {
        self.active.insert(var);
    }

    /// Set the given variable back to false in this assignment
    pub fn disable(&mut self, var: Variable) {
        self.active.remove(var);
    }

    /// Test if a specific variable is true in this assignment
    pub fn is_active(&self, var: Variable) -> bool {
        self.active.contains(var)
    }

    /// The set of true variables
    pub fn active(&self) -> &VarSet {
        &self.active
    }

    /// Iterate over the set of true variables
    pub fn iter_active(&self) -> Iter {
        self.active.iter()
    }
}

impl From<VarSet> for Assignment {
    fn from(active: VarSet) -> Self {
        Self { active }
    }
}

impl FromIterator<Variable> for Assignment {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self::from(VarSet::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.active.iter()
    }
}

impl FromStr for Assignment {
    type Err = GateKitError;

    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let mut active = VarSet::default();
        for c in descr.chars() {
            match c {
                ' ' | '\t' | ',' | ';' => (),
                _ => match Variable::new(c) {
                    Some(v) => active.insert(v),
                    None => return Err(GateKitError::InvalidVariable(c.to_string())),
                },
            }
        }
        Ok(Self::from(active))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.active)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn build_and_query() -> Result<(), GateKitError> {
        let a = Variable::new('A').unwrap();
        let b = Variable::new('B').unwrap();

        let mut assignment = Assignment::default();
        assignment.activate(a);
        assignment.activate(b);
        assignment.disable(b);

        assert!(assignment.is_active(a));
        assert!(!assignment.is_active(b));

        let parsed: Assignment = "b, d".parse()?;
        assert!(parsed.is_active(b));
        assert!(!parsed.is_active(a));
        assert_eq!(format!("{}", parsed), "BD");

        assert!("B?D".parse::<Assignment>().is_err());

        Ok(())
    }
}
