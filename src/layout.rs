//! Constraint-based 2D placement of gates for circuit rendering.
//!
//! The layout engine walks an expression tree and assigns pixel coordinates
//! and a gate identity to every node. The result is a [Layout] arena which the
//! rendering layer (out of scope here) walks to emit gate shapes and wires;
//! the engine itself emits no markup.
//!
//! All working state (the variable-position map, the id counter backing the
//! arena) lives in a per-call context, so repeated layouts of the same tree
//! produce identical output and successive calls cannot contaminate each other.

use crate::{Expr, Operator, VarSet, Variable};
use slab::Slab;
use std::collections::HashMap;

/// x column shared by all variable input pins
pub const INPUT_X: i32 = 60;
/// Horizontal distance between a gate and its children
pub const LEVEL_WIDTH: i32 = 90;
/// Top of the vertical slot pool for input pins
pub const INPUT_Y_MIN: i32 = 40;
/// Bottom of the vertical slot pool for input pins
pub const INPUT_Y_MAX: i32 = 210;

/// A 2D pixel position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// The gate identity of a layout node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GateKind {
    /// A variable input pin
    Input(Variable),
    /// An inverter
    Not,
    /// A two-input gate
    Gate(Operator),
}

/// An expression node decorated with its position in the circuit drawing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LayoutNode {
    /// Unique id, assigned by a depth-first counter (the arena key)
    pub id: usize,
    /// Gate identity
    pub kind: GateKind,
    /// Horizontal position; deeper nodes are further left, the root is rightmost
    pub x: i32,
    /// Vertical position; gates sit at the midpoint of their children
    pub y: i32,
    /// Distance from the root (root = 0)
    pub level: usize,
    /// Ids of the child nodes feeding this gate, left to right
    pub inputs: Vec<usize>,
}

/// A positioned gate graph, built fresh from an expression tree per call.
///
/// Nodes live in a [Slab] arena and reference each other by id; the ids are
/// assigned depth-first while placing the tree, so layouts are reproducible.
///
/// ```
/// use gatekit::{layout_nodes, parse_expression};
///
/// let expr = parse_expression("Q = (A AND B) OR C");
/// let layout = layout_nodes(expr.as_ref()).unwrap();
///
/// // the OR root is the rightmost gate
/// let root = layout.root();
/// assert!(layout.iter().all(|n| n.x <= root.x));
///
/// assert!(layout_nodes(None).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Layout {
    nodes: Slab<LayoutNode>,
    root: usize,
}

/// Per-call working set: variable slot assignments, never retained across calls.
struct LayoutContext {
    positions: HashMap<Variable, Point>,
    claimed: usize,
    slots: usize,
}

impl LayoutContext {
    fn new(slots: usize) -> Self {
        Self {
            positions: HashMap::new(),
            claimed: 0,
            slots,
        }
    }

    /// Resolve the shared input-pin position of a variable.
    ///
    /// The first occurrence claims the next free vertical slot; every later
    /// occurrence of the same variable returns the exact same position.
    fn variable_position(&mut self, var: Variable) -> Point {
        if let Some(p) = self.positions.get(&var) {
            return *p;
        }
        let y = match self.slots {
            0 | 1 => (INPUT_Y_MIN + INPUT_Y_MAX) / 2,
            n => {
                INPUT_Y_MIN + self.claimed as i32 * (INPUT_Y_MAX - INPUT_Y_MIN) / (n as i32 - 1)
            }
        };
        self.claimed += 1;
        let p = Point { x: INPUT_X, y };
        self.positions.insert(var, p);
        p
    }
}

/// Lay out an expression tree as a positioned gate graph.
///
/// Children are placed before their parents (post-order): variable leaves get
/// a vertical slot from a pool evenly spaced in `[INPUT_Y_MIN, INPUT_Y_MAX]`,
/// gates sit one [LEVEL_WIDTH] to the right of their children at the vertical
/// midpoint of their children's pins. Returns `None` for `None` input.
pub fn layout_nodes(expr: Option<&Expr>) -> Option<Layout> {
    let expr = expr?;
    let mut variables = VarSet::default();
    expr.collect_variables(&mut variables);

    let mut ctx = LayoutContext::new(variables.len());
    let mut nodes = Slab::new();
    let root = place(expr, 0, &mut ctx, &mut nodes);
    Some(Layout { nodes, root })
}

fn place(
    expr: &Expr,
    level: usize,
    ctx: &mut LayoutContext,
    nodes: &mut Slab<LayoutNode>,
) -> usize {
    let (kind, x, y, inputs) = match expr {
        Expr::Var(var) => {
            let pos = ctx.variable_position(*var);
            (GateKind::Input(*var), pos.x, pos.y, Vec::new())
        }
        Expr::Not(operand) => {
            let child = place(operand, level + 1, ctx, nodes);
            let (cx, cy) = (nodes[child].x, nodes[child].y);
            (GateKind::Not, cx + LEVEL_WIDTH, cy, vec![child])
        }
        Expr::Operation(op, children) => {
            let left = place(&children.0, level + 1, ctx, nodes);
            let right = place(&children.1, level + 1, ctx, nodes);
            let (lx, ly) = (nodes[left].x, nodes[left].y);
            let (rx, ry) = (nodes[right].x, nodes[right].y);
            let x = lx.max(rx) + LEVEL_WIDTH;
            let y = (ly + ry) / 2;
            (GateKind::Gate(*op), x, y, vec![left, right])
        }
    };

    let entry = nodes.vacant_entry();
    let id = entry.key();
    entry.insert(LayoutNode {
        id,
        kind,
        x,
        y,
        level,
        inputs,
    });
    id
}

impl Layout {
    /// The root node: the output gate, drawn last and rightmost
    pub fn root(&self) -> &LayoutNode {
        &self.nodes[self.root]
    }

    /// The id of the root node
    pub fn root_id(&self) -> usize {
        self.root
    }

    /// Look up a node by id
    pub fn get(&self, id: usize) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the placed nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// The wire anchor of a node, used as the wire start for its parent.
    ///
    /// Returns `(0, 0)` for a missing node rather than failing: callers treat
    /// it as "nothing to wire".
    pub fn output_point(&self, id: Option<usize>) -> Point {
        match id.and_then(|id| self.nodes.get(id)) {
            Some(node) => Point {
                x: node.x,
                y: node.y,
            },
            None => Point::default(),
        }
    }
}

/// Add the variables of an expression to the given set, post-order; no-op on `None`.
pub fn collect_variables(expr: Option<&Expr>, variables: &mut VarSet) {
    if let Some(expr) = expr {
        expr.collect_variables(variables);
    }
}

/// Number of gate columns needed to draw an expression.
///
/// `0` for `None`, `1` for a bare variable, `1 + max(child depths)` otherwise:
/// ```NOT A``` needs 2, ```(A AND B) OR C``` needs 3.
pub fn circuit_depth(expr: Option<&Expr>) -> usize {
    match expr {
        None => 0,
        Some(expr) => expr.depth(),
    }
}

/// Test whether the tree is exactly one operator applied to variable leaves.
///
/// Such circuits are rendered from a hand-tuned template
/// ([render_simple_circuit]) instead of the general layout.
pub fn is_single_gate_circuit(expr: &Expr) -> bool {
    match expr {
        Expr::Var(_) => false,
        Expr::Not(operand) => matches!(**operand, Expr::Var(_)),
        Expr::Operation(_, children) => {
            matches!(children.0, Expr::Var(_)) && matches!(children.1, Expr::Var(_))
        }
    }
}

/// x column of the template input pins
const SIMPLE_INPUT_X: i32 = 60;
/// x position of the template gate body
const SIMPLE_GATE_X: i32 = 230;
/// Template output anchor
const SIMPLE_OUTPUT: Point = Point { x: 390, y: 125 };

/// A hand-tuned single-gate circuit template.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SimpleCircuit {
    /// The single gate of the circuit
    pub gate: GateKind,
    /// The template position of the gate body
    pub gate_position: Point,
    /// Input pins with their fixed template positions, top to bottom
    pub inputs: Vec<(Variable, Point)>,
    /// The output wire anchor
    pub output: Point,
}

/// Build the hand-tuned template for a single-gate layout.
///
/// Returns `None` when the layout is `None` or when the underlying tree is
/// more complex than one gate over variable pins, signaling the caller to fall
/// back to the general layout-driven renderer.
pub fn render_simple_circuit(layout: Option<&Layout>) -> Option<SimpleCircuit> {
    let layout = layout?;
    let root = layout.root();

    let mut pins = Vec::with_capacity(2);
    for &input in &root.inputs {
        match layout.get(input)?.kind {
            GateKind::Input(var) => pins.push(var),
            _ => return None,
        }
    }
    if matches!(root.kind, GateKind::Input(_)) {
        return None;
    }

    let inputs = match pins.as_slice() {
        [var] => vec![(*var, Point { x: SIMPLE_INPUT_X, y: 125 })],
        [v1, v2] => vec![
            (*v1, Point { x: SIMPLE_INPUT_X, y: 85 }),
            (*v2, Point { x: SIMPLE_INPUT_X, y: 165 }),
        ],
        _ => return None,
    };

    Some(SimpleCircuit {
        gate: root.kind,
        gate_position: Point {
            x: SIMPLE_GATE_X,
            y: 125,
        },
        inputs,
        output: SIMPLE_OUTPUT,
    })
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn parsed(text: &str) -> Expr {
        parse_expression(text).unwrap()
    }

    #[test]
    fn depth_fixtures() {
        assert_eq!(circuit_depth(None), 0);
        assert_eq!(circuit_depth(Some(&parsed("A"))), 1);
        assert_eq!(circuit_depth(Some(&parsed("NOT A"))), 2);
        assert_eq!(circuit_depth(Some(&parsed("(A AND B) OR C"))), 3);
        assert_eq!(circuit_depth(Some(&parsed("NOT (NOT (NOT (NOT A)))"))), 5);
    }

    #[test]
    fn collected_variables() {
        let mut vars = VarSet::default();
        collect_variables(Some(&parsed("(A AND B) OR (C XOR D)")), &mut vars);
        assert_eq!(format!("{}", vars), "ABCD");

        let mut vars = VarSet::default();
        collect_variables(Some(&parsed("A AND A")), &mut vars);
        assert_eq!(format!("{}", vars), "A");

        let mut vars = VarSet::default();
        collect_variables(None, &mut vars);
        assert!(vars.is_empty());
    }

    #[test]
    fn null_propagation() {
        assert!(layout_nodes(None).is_none());
        assert!(render_simple_circuit(None).is_none());

        let layout = layout_nodes(Some(&parsed("A AND B"))).unwrap();
        assert_eq!(layout.output_point(None), Point { x: 0, y: 0 });
        assert_eq!(layout.output_point(Some(9999)), Point { x: 0, y: 0 });
    }

    #[test]
    fn gate_placement() {
        let layout = layout_nodes(Some(&parsed("(A AND B) OR C"))).unwrap();
        let root = layout.root();

        assert_eq!(root.kind, GateKind::Gate(Operator::Or));
        assert_eq!(root.level, 0);
        assert_eq!(root.inputs.len(), 2);

        let and = layout.get(root.inputs[0]).unwrap();
        assert_eq!(and.kind, GateKind::Gate(Operator::And));
        assert_eq!(and.level, 1);

        // gates sit one level right of their children, at their y midpoint
        let a = layout.get(and.inputs[0]).unwrap();
        let b = layout.get(and.inputs[1]).unwrap();
        assert_eq!(and.x, a.x.max(b.x) + LEVEL_WIDTH);
        assert_eq!(and.y, (a.y + b.y) / 2);

        // the root is the rightmost node
        assert!(layout.iter().all(|n| n.x <= root.x));

        // input pins share the input column and stay within the slot pool
        for node in layout.iter() {
            if let GateKind::Input(_) = node.kind {
                assert_eq!(node.x, INPUT_X);
                assert!(node.y >= INPUT_Y_MIN && node.y <= INPUT_Y_MAX);
            }
        }
    }

    #[test]
    fn ids_are_depth_first_and_fresh_per_call() {
        let expr = parsed("(A AND B) OR C");
        let layout = layout_nodes(Some(&expr)).unwrap();

        // post-order placement: A=0, B=1, AND=2, C=3, OR=4
        assert_eq!(layout.len(), 5);
        assert_eq!(layout.root_id(), 4);
        for (expected, node) in layout.iter().enumerate() {
            assert_eq!(node.id, expected);
        }

        // a second call starts from a fresh context and arena
        let again = layout_nodes(Some(&expr)).unwrap();
        assert_eq!(again.root_id(), layout.root_id());
        assert_eq!(
            again.iter().collect::<Vec<_>>(),
            layout.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn repeated_variables_share_their_pin() {
        let layout = layout_nodes(Some(&parsed("(A AND B) OR (A XOR A)"))).unwrap();

        let pins: Vec<(Variable, Point)> = layout
            .iter()
            .filter_map(|n| match n.kind {
                GateKind::Input(var) => Some((var, Point { x: n.x, y: n.y })),
                _ => None,
            })
            .collect();

        let a = Variable::new('A').unwrap();
        let a_positions: Vec<Point> = pins
            .iter()
            .filter(|(v, _)| *v == a)
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(a_positions.len(), 3);
        assert!(a_positions.iter().all(|p| *p == a_positions[0]));

        // distinct variables get distinct vertical slots
        let b_position = pins.iter().find(|(v, _)| *v != a).map(|(_, p)| *p).unwrap();
        assert_ne!(b_position.y, a_positions[0].y);
        assert_eq!(b_position.x, a_positions[0].x);
    }

    #[test]
    fn single_gate_detection() {
        assert!(is_single_gate_circuit(&parsed("A AND B")));
        assert!(is_single_gate_circuit(&parsed("A XOR B")));
        assert!(is_single_gate_circuit(&parsed("NOT A")));
        assert!(!is_single_gate_circuit(&parsed("A")));
        assert!(!is_single_gate_circuit(&parsed("NOT (A AND B)")));
        assert!(!is_single_gate_circuit(&parsed("(A AND B) OR C")));
    }

    #[test]
    fn simple_circuit_template() {
        let layout = layout_nodes(Some(&parsed("A OR B"))).unwrap();
        let simple = render_simple_circuit(Some(&layout)).unwrap();
        assert_eq!(simple.gate, GateKind::Gate(Operator::Or));
        assert_eq!(simple.inputs.len(), 2);
        assert_eq!(simple.output, Point { x: 390, y: 125 });

        let layout = layout_nodes(Some(&parsed("NOT A"))).unwrap();
        let simple = render_simple_circuit(Some(&layout)).unwrap();
        assert_eq!(simple.gate, GateKind::Not);
        assert_eq!(simple.inputs.len(), 1);

        // complex trees fall back to the general renderer
        let layout = layout_nodes(Some(&parsed("(A AND B) OR C"))).unwrap();
        assert!(render_simple_circuit(Some(&layout)).is_none());

        // a bare variable is not a gate
        let layout = layout_nodes(Some(&parsed("A"))).unwrap();
        assert!(render_simple_circuit(Some(&layout)).is_none());
    }
}
