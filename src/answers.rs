//! Enumeration of the accepted textual answers for an expression.
//!
//! The generator rewrites the parsed tree into its commutative variations,
//! serializes each variation in every [Style], and deduplicates the results.
//! All of these strings parse back to trees which are logically equivalent to
//! the input by construction, since they come from operand swaps of the same
//! tree rather than from independent parsing.

use crate::{normalize_expression, parse_expression, Expr, Style};
use itertools::Itertools;

/// Cap on the variations kept per tree node.
///
/// Variations combine pairwise (a cartesian product per binary node), so a
/// deep tree could blow up combinatorially; truncating at each node keeps the
/// total bounded while covering the whole corpus (8-variable trees stay well
/// under the cap).
pub const MAX_TREE_VARIATIONS: usize = 512;

/// Enumerate the accepted renderings of an expression, deduplicated in
/// first-seen order.
///
/// Every entry is uppercase and prefixed with the output variable and
/// ``` = ``` (the output variable defaults to ```Q``` when the input has
/// none). The first entry is the normalized original text. When the input
/// cannot be parsed at all the original text is returned verbatim as the only
/// accepted answer.
///
/// ```
/// use gatekit::generate_all_accepted_answers;
///
/// let answers = generate_all_accepted_answers("q = a AND b");
/// assert!(answers.contains(&"Q = A AND B".to_string()));
/// assert!(answers.contains(&"Q = B AND A".to_string()));
/// assert!(answers.contains(&"Q = (A AND B)".to_string()));
/// ```
pub fn generate_all_accepted_answers(text: &str) -> Vec<String> {
    let (output, rhs) = split_output(text);
    let expr = match parse_expression(rhs) {
        Some(expr) => expr,
        None => return vec![text.to_string()],
    };

    let original = normalize_expression(&format!("{} = {}", output, rhs).to_uppercase());
    std::iter::once(original)
        .chain(variations(&expr).iter().flat_map(|variant| {
            Style::ALL
                .iter()
                .map(|style| format!("{} = {}", output, style.render(variant)))
                .collect::<Vec<_>>()
        }))
        .unique()
        .collect()
}

fn split_output(text: &str) -> (char, &str) {
    match text.find('=') {
        Some(idx) => (output_name(&text[..idx]), &text[idx + 1..]),
        None => ('Q', text),
    }
}

fn output_name(name: &str) -> char {
    let name = name.trim();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => 'Q',
    }
}

/// Enumerate the commutative variations of a tree.
///
/// Every binary node contributes both operand orders, combined pairwise with
/// the variations of its children; a NOT node keeps its negation on each
/// variation of its operand. The first variation is always the original tree.
/// Each returned tree is freshly built and owns all of its nodes.
fn variations(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Var(_) => vec![expr.clone()],
        Expr::Not(operand) => variations(operand)
            .into_iter()
            .map(|v| Expr::Not(Box::new(v)))
            .collect(),
        Expr::Operation(op, children) => {
            let lefts = variations(&children.0);
            let rights = variations(&children.1);
            let mut out = Vec::with_capacity(2 * lefts.len() * rights.len());
            for (l, r) in lefts.iter().cartesian_product(rights.iter()) {
                out.push(op.join(l.clone(), r.clone()));
                out.push(op.join(r.clone(), l.clone()));
                if out.len() >= MAX_TREE_VARIATIONS {
                    break;
                }
            }
            out.truncate(MAX_TREE_VARIATIONS);
            out
        }
    }
}
