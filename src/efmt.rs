//! Formatting API for expressions.
//!
//! The grading surface and the circuit renderer historically disagreed on
//! parenthesization, so the same tree can be serialized in several styles and
//! every surface form is accepted as learner input. Each style only decides
//! *optional* parentheses: parentheses required for correctness (a binary
//! operand under a NOT, a low-priority child) are always emitted.

use crate::{Expr, Operator};
use delegate::delegate;

use std::fmt;

/// The serialization styles for expression trees.
///
/// ```
/// use gatekit::{Expr, Style};
///
/// let e: Expr = "NOT A AND B".parse().unwrap();
/// assert_eq!(e.render(Style::Minimal), "NOT A AND B");
/// assert_eq!(e.render(Style::Aggressive), "(NOT A AND B)");
/// assert_eq!(e.render(Style::NotParens), "(NOT A) AND B");
/// assert_eq!(e.render(Style::Circuit), "NOT A AND B");
/// assert_eq!(e.render(Style::HybridCircuit), "(NOT A) AND B");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Style {
    /// Parentheses only where priorities require them
    Minimal,
    /// Every binary operation parenthesized, the root included
    Aggressive,
    /// Like Minimal, but every NOT term parenthesized
    NotParens,
    /// Mirrors the gate nesting of the layout engine: every binary operand
    /// parenthesized, NOT of a variable left bare
    Circuit,
    /// Like Circuit, but a NOT of a variable used as a binary operand is
    /// parenthesized too
    HybridCircuit,
}

/// The position of a sub-expression within its parent node.
#[derive(Clone, Copy)]
enum Parent {
    /// Top of the tree
    Root,
    /// Operand of a binary operation
    Operation(Operator),
    /// Operand of a NOT
    Negation,
}

/// Decide the optional parentheses of one serialization style.
trait StyleRules {
    /// Parenthesize a binary operation? `parent` is None at the root.
    fn parenthesize_operation(&self, op: Operator, parent: Option<Operator>) -> bool;

    /// Parenthesize a whole NOT term? `under_binary` tells whether the NOT is
    /// itself an operand of a binary operation.
    fn parenthesize_not(&self, operand: &Expr, under_binary: bool) -> bool;
}

struct Minimal;
struct Aggressive;
struct NotParens(Minimal);
struct Circuit;
struct HybridCircuit(Circuit);

static MINIMAL: Minimal = Minimal;
static AGGRESSIVE: Aggressive = Aggressive;
static NOT_PARENS: NotParens = NotParens(Minimal);
static CIRCUIT: Circuit = Circuit;
static HYBRID_CIRCUIT: HybridCircuit = HybridCircuit(Circuit);

impl StyleRules for Minimal {
    fn parenthesize_operation(&self, op: Operator, parent: Option<Operator>) -> bool {
        match parent {
            Some(p) => op.priority() < p.priority(),
            None => false,
        }
    }

    fn parenthesize_not(&self, _operand: &Expr, _under_binary: bool) -> bool {
        false
    }
}

impl StyleRules for Aggressive {
    fn parenthesize_operation(&self, _op: Operator, _parent: Option<Operator>) -> bool {
        true
    }

    fn parenthesize_not(&self, _operand: &Expr, _under_binary: bool) -> bool {
        false
    }
}

impl StyleRules for NotParens {
    delegate! {
        to self.0 {
            fn parenthesize_operation(&self, op: Operator, parent: Option<Operator>) -> bool;
        }
    }

    fn parenthesize_not(&self, _operand: &Expr, _under_binary: bool) -> bool {
        true
    }
}

impl StyleRules for Circuit {
    fn parenthesize_operation(&self, _op: Operator, parent: Option<Operator>) -> bool {
        parent.is_some()
    }

    fn parenthesize_not(&self, _operand: &Expr, _under_binary: bool) -> bool {
        false
    }
}

impl StyleRules for HybridCircuit {
    delegate! {
        to self.0 {
            fn parenthesize_operation(&self, op: Operator, parent: Option<Operator>) -> bool;
        }
    }

    fn parenthesize_not(&self, operand: &Expr, under_binary: bool) -> bool {
        self.0.parenthesize_not(operand, under_binary)
            || (under_binary && matches!(operand, Expr::Var(_)))
    }
}

impl Style {
    /// All styles, in the order used by the answer generator
    pub const ALL: [Style; 5] = [
        Style::Minimal,
        Style::Aggressive,
        Style::NotParens,
        Style::Circuit,
        Style::HybridCircuit,
    ];

    /// Serialize an expression tree in this style
    pub fn render(self, expr: &Expr) -> String {
        format!("{}", StyledExpr { expr, style: self })
    }

    pub(crate) fn fmt_expr(self, expr: &Expr, f: &mut fmt::Formatter) -> fmt::Result {
        write_expr(expr, self.rules(), Parent::Root, f)
    }

    fn rules(self) -> &'static dyn StyleRules {
        match self {
            Style::Minimal => &MINIMAL,
            Style::Aggressive => &AGGRESSIVE,
            Style::NotParens => &NOT_PARENS,
            Style::Circuit => &CIRCUIT,
            Style::HybridCircuit => &HYBRID_CIRCUIT,
        }
    }
}

/// Wrap an expression with a style to get a displayable value
pub struct StyledExpr<'a> {
    pub expr: &'a Expr,
    pub style: Style,
}

impl fmt::Display for StyledExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.style.fmt_expr(self.expr, f)
    }
}

fn write_expr(
    expr: &Expr,
    rules: &dyn StyleRules,
    parent: Parent,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    match expr {
        Expr::Var(var) => write!(f, "{}", var),
        Expr::Not(operand) => {
            let under_binary = matches!(parent, Parent::Operation(_));
            let wrap = rules.parenthesize_not(operand, under_binary);
            if wrap {
                write!(f, "(")?;
            }
            write!(f, "NOT ")?;
            write_expr(operand, rules, Parent::Negation, f)?;
            match wrap {
                true => write!(f, ")"),
                false => Ok(()),
            }
        }
        Expr::Operation(op, children) => {
            let wrap = match parent {
                // a binary operand of NOT is always parenthesized
                Parent::Negation => true,
                Parent::Operation(p) => rules.parenthesize_operation(*op, Some(p)),
                Parent::Root => rules.parenthesize_operation(*op, None),
            };
            if wrap {
                write!(f, "(")?;
            }
            write_expr(&children.0, rules, Parent::Operation(*op), f)?;
            write!(f, " {} ", op.keyword())?;
            write_expr(&children.1, rules, Parent::Operation(*op), f)?;
            match wrap {
                true => write!(f, ")"),
                false => Ok(()),
            }
        }
    }
}
