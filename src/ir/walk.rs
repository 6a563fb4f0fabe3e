//! Generic tree traversal.
//!
//! Every pass is written against these three entry points:
//!
//! - [`map_bottom_up`]: children are rebuilt before the parent is offered to
//!   the rewrite function. Used by folds and simplifications that want
//!   sub-expressions to stabilize first.
//! - [`map_top_down`]: the rewrite function sees the node before its
//!   children. Used by rewrites that must inspect original children to
//!   decide whether to touch the parent.
//! - [`any`]: read-only pre-order scan, used to derive "is there a call to X
//!   anywhere below" style facts on demand.
//!
//! All traversal consumes the node and returns a new one. Nothing here
//! mutates in place, so each pass stays a pure function of its input tree.
//! Unchanged subtrees are moved into the rebuilt parent, not cloned.

use crate::ir::node::{Node, NodeKind};

/// Rebuilds `node` with `f` applied to each direct child, in source order.
///
/// Every `NodeKind` variant is matched explicitly. A catch-all arm would
/// silently stop rewrites from reaching the children of any variant it
/// swallowed, which is exactly the coverage gap a closed sum type exists to
/// prevent.
pub fn map_children(node: Node, f: &mut dyn FnMut(Node) -> Node) -> Node {
    let Node { kind, meta } = node;
    let kind = match kind {
        NodeKind::Module { name, body } => NodeKind::Module {
            name,
            body: body.into_iter().map(&mut *f).collect(),
        },
        NodeKind::FunctionDef { name, params, body } => NodeKind::FunctionDef {
            name,
            params: params.into_iter().map(&mut *f).collect(),
            body: Box::new(f(*body)),
        },
        NodeKind::Block(items) => NodeKind::Block(items.into_iter().map(&mut *f).collect()),
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => NodeKind::If {
            cond: Box::new(f(*cond)),
            then_branch: Box::new(f(*then_branch)),
            else_branch: else_branch.map(|b| Box::new(f(*b))),
        },
        NodeKind::Case { scrutinee, clauses } => NodeKind::Case {
            scrutinee: Box::new(f(*scrutinee)),
            clauses: clauses.into_iter().map(&mut *f).collect(),
        },
        NodeKind::Clause {
            pattern,
            guard,
            body,
        } => NodeKind::Clause {
            pattern: Box::new(f(*pattern)),
            guard: guard.map(|g| Box::new(f(*g))),
            body: Box::new(f(*body)),
        },
        NodeKind::BinOp { op, lhs, rhs } => NodeKind::BinOp {
            op,
            lhs: Box::new(f(*lhs)),
            rhs: Box::new(f(*rhs)),
        },
        NodeKind::UnaryOp { op, operand } => NodeKind::UnaryOp {
            op,
            operand: Box::new(f(*operand)),
        },
        NodeKind::Literal(lit) => NodeKind::Literal(lit),
        NodeKind::Var(name) => NodeKind::Var(name),
        NodeKind::Wildcard => NodeKind::Wildcard,
        NodeKind::Call { callee, args } => NodeKind::Call {
            callee: Box::new(f(*callee)),
            args: args.into_iter().map(&mut *f).collect(),
        },
        NodeKind::RemoteCall { module, name, args } => NodeKind::RemoteCall {
            module,
            name,
            args: args.into_iter().map(&mut *f).collect(),
        },
        NodeKind::Lambda { params, body } => NodeKind::Lambda {
            params: params.into_iter().map(&mut *f).collect(),
            body: Box::new(f(*body)),
        },
        NodeKind::Assign { pattern, value } => NodeKind::Assign {
            pattern: Box::new(f(*pattern)),
            value: Box::new(f(*value)),
        },
        NodeKind::Tuple(items) => NodeKind::Tuple(items.into_iter().map(&mut *f).collect()),
        NodeKind::List(items) => NodeKind::List(items.into_iter().map(&mut *f).collect()),
        NodeKind::MapLit(pairs) => {
            NodeKind::MapLit(pairs.into_iter().map(|(k, v)| (f(k), f(v))).collect())
        }
        NodeKind::For {
            pattern,
            source,
            body,
        } => NodeKind::For {
            pattern: Box::new(f(*pattern)),
            source: Box::new(f(*source)),
            body: Box::new(f(*body)),
        },
    };
    Node { kind, meta }
}

/// Post-order rewrite: children first, then the rebuilt parent.
pub fn map_bottom_up(node: Node, mut f: impl FnMut(Node) -> Node) -> Node {
    bottom_up_dyn(node, &mut f)
}

fn bottom_up_dyn(node: Node, f: &mut dyn FnMut(Node) -> Node) -> Node {
    let node = map_children(node, &mut |child| bottom_up_dyn(child, &mut *f));
    f(node)
}

/// Pre-order rewrite: the parent first, then the children of the result.
pub fn map_top_down(node: Node, mut f: impl FnMut(Node) -> Node) -> Node {
    top_down_dyn(node, &mut f)
}

fn top_down_dyn(node: Node, f: &mut dyn FnMut(Node) -> Node) -> Node {
    let node = f(node);
    map_children(node, &mut |child| top_down_dyn(child, &mut *f))
}

/// Borrowed view of the direct children of `node`, in source order.
pub fn children(node: &Node) -> Vec<&Node> {
    match &node.kind {
        NodeKind::Module { body, .. } => body.iter().collect(),
        NodeKind::FunctionDef { params, body, .. } => {
            params.iter().chain(std::iter::once(&**body)).collect()
        }
        NodeKind::Block(items) => items.iter().collect(),
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let mut out = vec![&**cond, &**then_branch];
            if let Some(e) = else_branch {
                out.push(&**e);
            }
            out
        }
        NodeKind::Case { scrutinee, clauses } => {
            std::iter::once(&**scrutinee).chain(clauses.iter()).collect()
        }
        NodeKind::Clause {
            pattern,
            guard,
            body,
        } => {
            let mut out = vec![&**pattern];
            if let Some(g) = guard {
                out.push(&**g);
            }
            out.push(&**body);
            out
        }
        NodeKind::BinOp { lhs, rhs, .. } => vec![&**lhs, &**rhs],
        NodeKind::UnaryOp { operand, .. } => vec![&**operand],
        NodeKind::Literal(_) | NodeKind::Var(_) | NodeKind::Wildcard => Vec::new(),
        NodeKind::Call { callee, args } => {
            std::iter::once(&**callee).chain(args.iter()).collect()
        }
        NodeKind::RemoteCall { args, .. } => args.iter().collect(),
        NodeKind::Lambda { params, body } => {
            params.iter().chain(std::iter::once(&**body)).collect()
        }
        NodeKind::Assign { pattern, value } => vec![&**pattern, &**value],
        NodeKind::Tuple(items) | NodeKind::List(items) => items.iter().collect(),
        NodeKind::MapLit(pairs) => pairs.iter().flat_map(|(k, v)| [k, v]).collect(),
        NodeKind::For {
            pattern,
            source,
            body,
        } => vec![&**pattern, &**source, &**body],
    }
}

/// Pre-order scan: true if `pred` holds for `node` or any descendant.
pub fn any(node: &Node, pred: &mut dyn FnMut(&Node) -> bool) -> bool {
    if pred(node) {
        return true;
    }
    children(node).into_iter().any(|child| any(child, pred))
}
