//! Boolean formulas defined as expression trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::BitXor;
use core::ops::Not;
use std::cmp::max;
use std::fmt;
use std::str::FromStr;

use crate::efmt::Style;
use crate::{parse, Assignment, GateKitError, VarSet, Variable};

/// A Boolean expression tree.
///
/// Represents a Boolean formula as a tree where internal nodes are the classical
/// AND, OR, XOR and NOT operations and leaves are individual [variables](Variable).
/// Expressions overload the ```&```, ```|```, ```^``` and ```!``` operators to
/// facilitate their definition as readable rust statements.
///
/// Each node exclusively owns its children: subtrees are never shared, so
/// rewriting passes (such as the [answer generator](crate::generate_all_accepted_answers))
/// deep-copy subtrees instead of aliasing them.
///
/// ```
/// use gatekit::{Expr, Variable};
/// # use gatekit::GateKitError;
/// # fn main() -> Result<(), GateKitError> {
///
/// let a = Expr::from(Variable::new('A').unwrap());
/// let b = Expr::from(Variable::new('B').unwrap());
///
/// // Build an expression tree with the overloaded operators
/// let expr = a & !b;
/// assert_eq!(format!("{}", expr), "A AND NOT B");
///
/// // Evaluate it on an assignment
/// let state = "A".parse()?;
/// assert!(expr.eval(&state));
///
/// // Or parse it from text, output variable included
/// let parsed: Expr = "Q = A AND NOT B".parse()?;
/// assert_eq!(parsed, expr);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// A single variable
    Var(Variable),

    /// The negation of a sub-expression
    Not(Box<Expr>),

    /// Two sub-expressions connected with a binary operator
    Operation(Operator, Box<(Expr, Expr)>),
}

/// The binary operators allowed in expression trees.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    /// AND operator: both children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
    /// XOR operator: exactly one child needs to be true
    Xor,
}

impl Expr {
    /// Evaluate the expression on the given assignment.
    ///
    /// Variables absent from the assignment are false.
    pub fn eval(&self, state: &Assignment) -> bool {
        match self {
            Expr::Var(var) => state.is_active(*var),
            Expr::Not(e) => !e.eval(state),
            Expr::Operation(op, children) => {
                let (v1, v2) = (children.0.eval(state), children.1.eval(state));
                match op {
                    Operator::And => v1 && v2,
                    Operator::Or => v1 || v2,
                    Operator::Xor => v1 != v2,
                }
            }
        }
    }

    /// Add all variables of this expression to the set
    pub fn collect_variables(&self, variables: &mut VarSet) {
        match self {
            Expr::Var(var) => variables.insert(*var),
            Expr::Not(e) => e.collect_variables(variables),
            Expr::Operation(_, children) => {
                children.0.collect_variables(variables);
                children.1.collect_variables(variables);
            }
        }
    }

    /// Construct the set of variables used in this expression
    pub fn get_variables(&self) -> VarSet {
        let mut variables = VarSet::default();
        self.collect_variables(&mut variables);
        variables
    }

    /// Depth of the tree: 1 for a bare variable, 1 + the deepest child otherwise.
    ///
    /// This matches the number of columns needed to draw the circuit:
    /// ```NOT A``` has depth 2, ```(A AND B) OR C``` has depth 3.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) => 1,
            Expr::Not(e) => 1 + e.depth(),
            Expr::Operation(_, children) => 1 + max(children.0.depth(), children.1.depth()),
        }
    }

    /// Render this expression in the selected [Style]
    pub fn render(&self, style: Style) -> String {
        style.render(self)
    }
}

impl Operator {
    /// Define the priority of operators.
    ///
    /// This priority controls the addition of necessary parenthesis when formatting
    /// expressions, matching the parsing grammar: OR binds loosest, then AND, then XOR
    /// (NOT always binds tightest).
    pub fn priority(self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::And => 2,
            Operator::Xor => 3,
        }
    }

    /// The textual keyword of this operator
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
        }
    }

    /// Join two expressions with this operator
    pub fn join(self, e1: impl Into<Expr>, e2: impl Into<Expr>) -> Expr {
        Expr::Operation(self, Box::new((e1.into(), e2.into())))
    }
}

impl FromStr for Expr {
    type Err = GateKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_expression(s).ok_or(GateKitError::InvalidExpression)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::Var(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Self::from(*var)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Style::Minimal.fmt_expr(self, f)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self.clone()))
    }
}

impl Not for Variable {
    type Output = Expr;
    fn not(self) -> Self::Output {
        !Expr::from(self)
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for Variable {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(Expr::from(self), rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Variable {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(Expr::from(self), rhs.into())
    }
}

impl<T: Into<Expr>> BitXor<T> for Expr {
    type Output = Expr;
    fn bitxor(self, rhs: T) -> Self::Output {
        Operator::Xor.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitXor<T> for &Expr {
    type Output = Expr;
    fn bitxor(self, rhs: T) -> Self::Output {
        Operator::Xor.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitXor<T> for Variable {
    type Output = Expr;
    fn bitxor(self, rhs: T) -> Self::Output {
        Operator::Xor.join(Expr::from(self), rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn var(name: char) -> Variable {
        Variable::new(name).unwrap()
    }

    #[test]
    fn construct_and_display() -> Result<(), GateKitError> {
        let a = var('A');
        let b = var('B');
        let c = var('C');

        let expr = a & (b | !c);
        assert_eq!(format!("{}", expr), "A AND (B OR NOT C)");

        let parsed: Expr = "Q = A AND (B OR NOT C)".parse()?;
        assert_eq!(parsed, expr);

        Ok(())
    }

    #[test]
    fn eval() -> Result<(), GateKitError> {
        let a = var('A');
        let b = var('B');
        let c = var('C');

        let e = (a & b) | (c ^ b);

        assert!(!e.eval(&"".parse()?));
        assert!(e.eval(&"A B".parse()?));
        assert!(e.eval(&"C".parse()?));
        assert!(!e.eval(&"B C".parse()?));
        assert!(e.eval(&"A B C".parse()?));

        // unbound variables are false
        let lonely = Expr::from(var('Z'));
        assert!(!lonely.eval(&"A B C".parse()?));

        Ok(())
    }

    #[test]
    fn variables_and_depth() {
        let a = var('A');
        let b = var('B');
        let c = var('C');

        let e = (a & b) | (c ^ a);
        assert_eq!(format!("{}", e.get_variables()), "ABC");
        assert_eq!(e.depth(), 3);

        assert_eq!(Expr::from(a).depth(), 1);
        assert_eq!((!a).depth(), 2);
        assert_eq!((!!!(!a)).depth(), 5);

        let same = a & a;
        assert_eq!(format!("{}", same.get_variables()), "A");
    }
}
