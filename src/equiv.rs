//! Semantic comparison of expressions through truth-table enumeration.

use crate::{parse_expression, Assignment, Expr, VarSet, Variable};

/// Cap on the number of variables enumerated by [are_logically_equivalent].
///
/// The truth table grows as `2^n`; capping n bounds the comparison cost on
/// pathological inputs. Variables beyond the cap stay false on both sides,
/// consistent with the unbound-variable policy.
pub const MAX_ENUMERATED_VARIABLES: usize = 12;

/// Parse and evaluate an expression on the given assignment.
///
/// Unparseable input evaluates to `false`: this is a fallback, not a validity
/// claim. Variables absent from the assignment are false as well.
///
/// ```
/// use gatekit::evaluate_expression;
///
/// let state = "A".parse().unwrap();
/// assert!(evaluate_expression("A XOR B", &state));
/// assert!(!evaluate_expression("A AND B", &state));
/// assert!(!evaluate_expression("not an expression!", &state));
/// ```
pub fn evaluate_expression(text: &str, assignment: &Assignment) -> bool {
    match parse_expression(text) {
        Some(expr) => expr.eval(assignment),
        None => false,
    }
}

/// Compare the truth tables of two expressions over the union of their variables.
///
/// Both sides are evaluated on every assignment of the shared variable set; a
/// side referencing fewer variables simply ignores the extra ones, and a side
/// which fails to parse is the constant `false`. There is no special case for
/// disjoint variable sets: the union-padded table decides.
///
/// ```
/// use gatekit::are_logically_equivalent;
///
/// assert!(are_logically_equivalent("Q = A AND B", "Q = B AND A"));
/// assert!(are_logically_equivalent("Q = NOT (A AND B)", "Q = (NOT A) OR (NOT B)"));
/// assert!(!are_logically_equivalent("Q = A OR B", "Q = A AND B"));
/// ```
pub fn are_logically_equivalent(text_a: &str, text_b: &str) -> bool {
    let expr_a = parse_expression(text_a);
    let expr_b = parse_expression(text_b);

    let mut variables = VarSet::default();
    if let Some(e) = &expr_a {
        e.collect_variables(&mut variables);
    }
    if let Some(e) = &expr_b {
        e.collect_variables(&mut variables);
    }
    let variables: Vec<Variable> = variables.iter().take(MAX_ENUMERATED_VARIABLES).collect();

    let eval = |e: &Option<Expr>, s: &Assignment| e.as_ref().map(|e| e.eval(s)).unwrap_or(false);
    for bits in 0..(1usize << variables.len()) {
        let assignment: Assignment = variables
            .iter()
            .enumerate()
            .filter(|(idx, _)| bits >> idx & 1 == 1)
            .map(|(_, var)| *var)
            .collect();
        if eval(&expr_a, &assignment) != eval(&expr_b, &assignment) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn evaluation() -> Result<(), GateKitError> {
        let state: Assignment = "A".parse()?;
        assert!(evaluate_expression("A XOR B", &state));
        assert!(evaluate_expression("Q = A OR B", &state));
        assert!(!evaluate_expression("Q = A AND B", &state));
        assert!(evaluate_expression("NOT B", &state));

        // fallbacks
        assert!(!evaluate_expression("", &state));
        assert!(!evaluate_expression("ANDY", &state));

        Ok(())
    }

    #[test]
    fn equivalence_laws() {
        // reflexive and symmetric
        assert!(are_logically_equivalent("A AND B", "A AND B"));
        assert!(are_logically_equivalent("A AND B", "B AND A"));
        assert!(are_logically_equivalent("B AND A", "A AND B"));

        // commutation of every binary operator
        assert!(are_logically_equivalent("A OR B", "B OR A"));
        assert!(are_logically_equivalent("A XOR B", "B XOR A"));

        // double negation
        assert!(are_logically_equivalent("NOT NOT A", "A"));

        // De Morgan
        assert!(are_logically_equivalent(
            "Q = NOT (A AND B)",
            "Q = (NOT A) OR (NOT B)"
        ));
        assert!(are_logically_equivalent(
            "Q = NOT (A OR B)",
            "Q = (NOT A) AND (NOT B)"
        ));

        // XOR expansion
        assert!(are_logically_equivalent(
            "A XOR B",
            "(A AND NOT B) OR (B AND NOT A)"
        ));

        assert!(!are_logically_equivalent("A OR B", "A AND B"));
        assert!(!are_logically_equivalent("A", "NOT A"));
    }

    #[test]
    fn union_padded_tables() {
        // different variables, same shape: not equivalent
        assert!(!are_logically_equivalent("A", "B"));

        // both constant false over the union
        assert!(are_logically_equivalent("A AND NOT A", "B AND NOT B"));

        // an unparseable side is the constant false
        assert!(are_logically_equivalent("ANDY", "A AND NOT A"));
        assert!(!are_logically_equivalent("ANDY", "A OR NOT A"));
    }
}
