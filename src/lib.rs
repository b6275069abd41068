//! Parse, compare and lay out Boolean expressions for gate-circuit practice tools.
//!
//! This crate is the expression engine behind a Boolean-algebra practice UI:
//! it parses textual logic expressions (```Q = A AND B```), checks learner
//! answers against the many acceptable phrasings of the same formula, and
//! converts expressions into positioned gate graphs for circuit rendering.
//! The quiz, scoring and rendering layers are external consumers of this
//! engine; none of them live here.
//!
//! Everything is built around one data model, the [expression tree](Expr):
//! [variables](Variable) A-Z as leaves, NOT as unary nodes and AND/OR/XOR as
//! binary nodes. Parsing is case-insensitive with the precedence of the usual
//! textbook grammar (NOT binds tightest, then XOR, AND, OR, all binary
//! operators folding left-associatively).
//!
//! ```
//! use gatekit::parse_expression;
//!
//! // AND binds tighter than OR
//! let expr = parse_expression("Q = A OR B AND C").unwrap();
//! assert_eq!(format!("{}", expr), "A OR B AND C");
//!
//! // Evaluate on an assignment: absent variables are false
//! let state = "A".parse().unwrap();
//! assert!(expr.eval(&state));
//! ```
//!
//! # Graceful degradation
//!
//! Malformed input never raises: [parse_expression] returns `None` or a
//! best-effort partial tree, [evaluate_expression] falls back to `false`,
//! [generate_all_accepted_answers] falls back to the original text and the
//! layout functions propagate `None`. Failure is a sentinel value, not an
//! error type; see [GateKitError] for the one exception (the [FromStr](std::str::FromStr)
//! construction API).
//!
//! # Answer checking
//!
//! Learner submissions are matched against the [accepted-answer
//! set](generate_all_accepted_answers): every commutative reordering of the
//! expression, serialized in the parenthesization [styles](Style) that the
//! grading surface and the circuit renderer historically produced. Where a
//! direct match fails, the caller can fall back to [text
//! normalization](normalize_expression) or to full [semantic
//! comparison](are_logically_equivalent) over truth tables.
//!
//! ```
//! use gatekit::{are_logically_equivalent, generate_all_accepted_answers};
//!
//! let answers = generate_all_accepted_answers("Q = NOT A AND B");
//! assert!(answers.contains(&"Q = B AND NOT A".to_string()));
//! assert!(answers.contains(&"Q = (NOT A) AND B".to_string()));
//!
//! assert!(are_logically_equivalent("Q = NOT (A AND B)", "Q = (NOT A) OR (NOT B)"));
//! ```
//!
//! # Circuit layout
//!
//! [layout_nodes] turns a tree into a [Layout]: a gate graph with pixel
//! coordinates, input pins deduplicated per variable, ready for an SVG layer
//! to draw. Single-gate circuits get a hand-tuned
//! [template](render_simple_circuit) instead.
//!
//! ```
//! use gatekit::{layout_nodes, parse_expression};
//!
//! let expr = parse_expression("Q = A AND B");
//! let layout = layout_nodes(expr.as_ref()).unwrap();
//! assert_eq!(layout.len(), 3);
//! ```

mod answers;
mod efmt;
mod equiv;
mod error;
mod expr;
mod layout;
mod norm;
mod parse;
mod state;
mod variable;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use answers::{generate_all_accepted_answers, MAX_TREE_VARIATIONS};
pub use efmt::{Style, StyledExpr};
pub use equiv::{are_logically_equivalent, evaluate_expression, MAX_ENUMERATED_VARIABLES};
pub use error::GateKitError;
pub use expr::{Expr, Operator};
pub use layout::{
    circuit_depth, collect_variables, is_single_gate_circuit, layout_nodes,
    render_simple_circuit, GateKind, Layout, LayoutNode, Point, SimpleCircuit, INPUT_X,
    INPUT_Y_MAX, INPUT_Y_MIN, LEVEL_WIDTH,
};
pub use norm::normalize_expression;
pub use parse::{parse_expression, parse_tokens, tokenize, Token};
pub use state::Assignment;
pub use variable::{VarSet, Variable};
