//! The canonicalization rewrites the registry wires into the pipeline.
//!
//! Each function here is one narrow, independently testable tree rewrite
//! with the uniform pass signature. None of them loops: convergence across
//! rewrites is the registry's job, done by replaying a rewrite under a
//! distinct name at a later pipeline position.

use crate::error::PassError;
use crate::ir::node::{BinOp, Literal, Node, NodeKind, UnOp};
use crate::ir::walk;
use crate::pass::PassContext;

/// Splices nested blocks into their parent and collapses single-item
/// blocks to the item itself (the collapsed block's metadata is dropped,
/// the surviving item keeps its own).
///
/// Replayed early and late: several simplifications leave a block directly
/// inside a block behind.
pub fn normalize_blocks(node: Node) -> Result<Node, PassError> {
    Ok(walk::map_bottom_up(node, |node| {
        let Node { kind, meta } = node;
        match kind {
            NodeKind::Block(items) => {
                let mut flat = Vec::with_capacity(items.len());
                for item in items {
                    if let NodeKind::Block(inner) = item.kind {
                        flat.extend(inner);
                    } else {
                        flat.push(item);
                    }
                }
                if flat.len() == 1 {
                    flat.remove(0)
                } else {
                    Node {
                        kind: NodeKind::Block(flat),
                        meta,
                    }
                }
            }
            kind => Node { kind, meta },
        }
    }))
}

/// Folds operators whose operands are literal constants. The folded node
/// keeps the operator node's metadata.
///
/// Division and remainder by a literal zero are left unfolded: the output
/// language raises at runtime and the rewrite must not change that.
pub fn fold_constants(node: Node) -> Result<Node, PassError> {
    Ok(walk::map_bottom_up(node, |node| {
        let Node { kind, meta } = node;
        let kind = match kind {
            NodeKind::BinOp { op, lhs, rhs } => fold_binop(op, lhs, rhs),
            NodeKind::UnaryOp { op, operand } => fold_unop(op, operand),
            kind => kind,
        };
        Node { kind, meta }
    }))
}

fn fold_binop(op: BinOp, lhs: Box<Node>, rhs: Box<Node>) -> NodeKind {
    use Literal::*;
    let folded = match (&lhs.kind, &rhs.kind) {
        (NodeKind::Literal(a), NodeKind::Literal(b)) => match (op, a, b) {
            (BinOp::Add, Int(x), Int(y)) => x.checked_add(*y).map(Int),
            (BinOp::Sub, Int(x), Int(y)) => x.checked_sub(*y).map(Int),
            (BinOp::Mul, Int(x), Int(y)) => x.checked_mul(*y).map(Int),
            (BinOp::Div, Int(x), Int(y)) => x.checked_div(*y).map(Int),
            (BinOp::Rem, Int(x), Int(y)) => x.checked_rem(*y).map(Int),
            (BinOp::Add, Float(x), Float(y)) => Some(Float(x + y)),
            (BinOp::Sub, Float(x), Float(y)) => Some(Float(x - y)),
            (BinOp::Mul, Float(x), Float(y)) => Some(Float(x * y)),
            (BinOp::Div, Float(x), Float(y)) => Some(Float(x / y)),
            (BinOp::Concat, Str(x), Str(y)) => Some(Str(format!("{}{}", x, y))),
            (BinOp::And, Bool(x), Bool(y)) => Some(Bool(*x && *y)),
            (BinOp::Or, Bool(x), Bool(y)) => Some(Bool(*x || *y)),
            (BinOp::Eq, Str(x), Str(y)) => Some(Bool(x == y)),
            (BinOp::Ne, Str(x), Str(y)) => Some(Bool(x != y)),
            (BinOp::Eq, Int(x), Int(y)) => Some(Bool(x == y)),
            (BinOp::Ne, Int(x), Int(y)) => Some(Bool(x != y)),
            (BinOp::Lt, Int(x), Int(y)) => Some(Bool(x < y)),
            (BinOp::Le, Int(x), Int(y)) => Some(Bool(x <= y)),
            (BinOp::Gt, Int(x), Int(y)) => Some(Bool(x > y)),
            (BinOp::Ge, Int(x), Int(y)) => Some(Bool(x >= y)),
            _ => None,
        },
        _ => None,
    };
    match folded {
        Some(lit) => NodeKind::Literal(lit),
        None => NodeKind::BinOp { op, lhs, rhs },
    }
}

fn fold_unop(op: UnOp, operand: Box<Node>) -> NodeKind {
    use Literal::*;
    let folded = match (&op, &operand.kind) {
        (UnOp::Neg, NodeKind::Literal(Int(x))) => x.checked_neg().map(Int),
        (UnOp::Neg, NodeKind::Literal(Float(x))) => Some(Float(-x)),
        (UnOp::Not, NodeKind::Literal(Bool(x))) => Some(Bool(!x)),
        _ => None,
    };
    match folded {
        Some(lit) => NodeKind::Literal(lit),
        None => NodeKind::UnaryOp { op, operand },
    }
}

/// Reduces a conditional on a literal boolean to the taken branch. A false
/// condition with no else branch reduces to nil, keeping the conditional's
/// metadata.
pub fn simplify_conditionals(node: Node) -> Result<Node, PassError> {
    Ok(walk::map_bottom_up(node, |node| {
        let Node { kind, meta } = node;
        match kind {
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => match cond.kind {
                NodeKind::Literal(Literal::Bool(true)) => *then_branch,
                NodeKind::Literal(Literal::Bool(false)) => match else_branch {
                    Some(e) => *e,
                    None => Node {
                        kind: NodeKind::Literal(Literal::Nil),
                        meta,
                    },
                },
                _ => Node {
                    kind: NodeKind::If {
                        cond,
                        then_branch,
                        else_branch,
                    },
                    meta,
                },
            },
            kind => Node { kind, meta },
        }
    }))
}

/// Drops case clauses that follow an unguarded catch-all clause (a wildcard
/// or bare variable pattern): they can never match.
///
/// Faults with [`PassError::MalformedTree`] if a case child is not a clause.
pub fn prune_case_clauses(node: Node) -> Result<Node, PassError> {
    let mut fault: Option<PassError> = None;
    let out = walk::map_bottom_up(node, |node| {
        if fault.is_some() {
            return node;
        }
        let Node { kind, meta } = node;
        match kind {
            NodeKind::Case { scrutinee, clauses } => {
                let mut kept = Vec::with_capacity(clauses.len());
                let mut closed = false;
                for clause in clauses {
                    if closed {
                        break;
                    }
                    match &clause.kind {
                        NodeKind::Clause { pattern, guard, .. } => {
                            let catch_all = guard.is_none()
                                && matches!(pattern.kind, NodeKind::Wildcard | NodeKind::Var(_));
                            kept.push(clause);
                            if catch_all {
                                closed = true;
                            }
                        }
                        other => {
                            fault = Some(PassError::MalformedTree {
                                detail: format!(
                                    "case child is a {}, expected a clause",
                                    other.name()
                                ),
                            });
                            kept.push(clause);
                            closed = true;
                        }
                    }
                }
                Node {
                    kind: NodeKind::Case {
                        scrutinee,
                        clauses: kept,
                    },
                    meta,
                }
            }
            kind => Node { kind, meta },
        }
    });
    match fault {
        Some(e) => Err(e),
        None => Ok(out),
    }
}

/// Collapses `x = x` to `x`.
pub fn strip_self_assign(node: Node) -> Result<Node, PassError> {
    Ok(walk::map_bottom_up(node, |node| {
        let Node { kind, meta } = node;
        match kind {
            NodeKind::Assign { pattern, value } => {
                let same = matches!(
                    (&pattern.kind, &value.kind),
                    (NodeKind::Var(a), NodeKind::Var(b)) if a == b
                );
                if same {
                    *value
                } else {
                    Node {
                        kind: NodeKind::Assign { pattern, value },
                        meta,
                    }
                }
            }
            kind => Node { kind, meta },
        }
    }))
}

/// Qualifies bare calls with the current module name: `foo(x)` becomes
/// `Mod.foo(x)`, so the printer never has to guess call targets. Calls
/// whose callee is not a plain variable (calling a lambda) are left alone.
///
/// Requires a module root: faults with [`PassError::MissingContext`] when
/// the context carries no module name. Disable this pass when rewriting
/// bare fragments.
pub fn qualify_local_calls(node: Node, ctx: &PassContext) -> Result<Node, PassError> {
    if ctx.module_name.is_empty() {
        return Err(PassError::MissingContext {
            detail: "qualify-local-calls needs a module name, but the root is not a module".into(),
        });
    }
    let module = ctx.module_name.clone();
    Ok(walk::map_bottom_up(node, move |node| {
        let Node { kind, meta } = node;
        match kind {
            NodeKind::Call { callee, args } => match callee.kind {
                NodeKind::Var(name) => Node {
                    kind: NodeKind::RemoteCall {
                        module: module.clone(),
                        name,
                        args,
                    },
                    meta,
                },
                _ => Node {
                    kind: NodeKind::Call { callee, args },
                    meta,
                },
            },
            kind => Node { kind, meta },
        }
    }))
}

/// Debug-only pass: logs the tree and returns it unchanged. Log output is
/// never program state; later passes must behave identically with this
/// pass on or off.
pub fn dump_tree(node: Node) -> Result<Node, PassError> {
    log::debug!("tree dump ({} root):\n{:#?}", node.kind.name(), node);
    Ok(node)
}
