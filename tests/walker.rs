//! Walker totality and ordering tests.
//!
//! Builds one node of every kind and checks that a leaf-literal rewrite
//! propagates to the root through each variant. A variant missing from the
//! walker's match would silently drop the rewrite on its children.

use relix::ir::walk;
use relix::ir::{BinOp, Literal, Meta, Node, NodeKind, Span, UnOp};

/// Increments every integer literal in the tree.
fn bump(node: Node) -> Node {
    walk::map_bottom_up(node, |mut n| {
        if let NodeKind::Literal(Literal::Int(v)) = &mut n.kind {
            *v += 1;
        }
        n
    })
}

fn clause(pattern: Node, guard: Option<Node>, body: Node) -> Node {
    Node::new(NodeKind::Clause {
        pattern: Box::new(pattern),
        guard: guard.map(Box::new),
        body: Box::new(body),
    })
}

#[test]
fn bump_reaches_module_body() {
    let node = Node::new(NodeKind::Module {
        name: "M".into(),
        body: vec![Node::int(1), Node::int(2)],
    });
    let expected = Node::new(NodeKind::Module {
        name: "M".into(),
        body: vec![Node::int(2), Node::int(3)],
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_function_params_and_body() {
    let node = Node::new(NodeKind::FunctionDef {
        name: "f".into(),
        params: vec![Node::int(1)],
        body: Box::new(Node::int(1)),
    });
    let expected = Node::new(NodeKind::FunctionDef {
        name: "f".into(),
        params: vec![Node::int(2)],
        body: Box::new(Node::int(2)),
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_block_items() {
    let node = Node::block(vec![Node::int(1), Node::int(1)]);
    assert_eq!(bump(node), Node::block(vec![Node::int(2), Node::int(2)]));
}

#[test]
fn bump_reaches_all_if_arms() {
    let node = Node::new(NodeKind::If {
        cond: Box::new(Node::int(1)),
        then_branch: Box::new(Node::int(1)),
        else_branch: Some(Box::new(Node::int(1))),
    });
    let expected = Node::new(NodeKind::If {
        cond: Box::new(Node::int(2)),
        then_branch: Box::new(Node::int(2)),
        else_branch: Some(Box::new(Node::int(2))),
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_case_scrutinee_and_clauses() {
    let node = Node::new(NodeKind::Case {
        scrutinee: Box::new(Node::int(1)),
        clauses: vec![clause(Node::int(1), Some(Node::int(1)), Node::int(1))],
    });
    let expected = Node::new(NodeKind::Case {
        scrutinee: Box::new(Node::int(2)),
        clauses: vec![clause(Node::int(2), Some(Node::int(2)), Node::int(2))],
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_operator_operands() {
    let node = Node::binop(BinOp::Add, Node::int(1), Node::int(1));
    assert_eq!(bump(node), Node::binop(BinOp::Add, Node::int(2), Node::int(2)));

    let node = Node::new(NodeKind::UnaryOp {
        op: UnOp::Neg,
        operand: Box::new(Node::int(1)),
    });
    let expected = Node::new(NodeKind::UnaryOp {
        op: UnOp::Neg,
        operand: Box::new(Node::int(2)),
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_call_callee_and_args() {
    let node = Node::call(Node::int(1), vec![Node::int(1)]);
    assert_eq!(bump(node), Node::call(Node::int(2), vec![Node::int(2)]));

    let node = Node::new(NodeKind::RemoteCall {
        module: "Mod".into(),
        name: "f".into(),
        args: vec![Node::int(1)],
    });
    let expected = Node::new(NodeKind::RemoteCall {
        module: "Mod".into(),
        name: "f".into(),
        args: vec![Node::int(2)],
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_lambda_assign_and_loop() {
    let node = Node::new(NodeKind::Lambda {
        params: vec![Node::int(1)],
        body: Box::new(Node::int(1)),
    });
    let expected = Node::new(NodeKind::Lambda {
        params: vec![Node::int(2)],
        body: Box::new(Node::int(2)),
    });
    assert_eq!(bump(node), expected);

    let node = Node::new(NodeKind::Assign {
        pattern: Box::new(Node::int(1)),
        value: Box::new(Node::int(1)),
    });
    let expected = Node::new(NodeKind::Assign {
        pattern: Box::new(Node::int(2)),
        value: Box::new(Node::int(2)),
    });
    assert_eq!(bump(node), expected);

    let node = Node::new(NodeKind::For {
        pattern: Box::new(Node::int(1)),
        source: Box::new(Node::int(1)),
        body: Box::new(Node::int(1)),
    });
    let expected = Node::new(NodeKind::For {
        pattern: Box::new(Node::int(2)),
        source: Box::new(Node::int(2)),
        body: Box::new(Node::int(2)),
    });
    assert_eq!(bump(node), expected);
}

#[test]
fn bump_reaches_collection_literals() {
    let node = Node::new(NodeKind::Tuple(vec![Node::int(1)]));
    assert_eq!(bump(node), Node::new(NodeKind::Tuple(vec![Node::int(2)])));

    let node = Node::new(NodeKind::List(vec![Node::int(1)]));
    assert_eq!(bump(node), Node::new(NodeKind::List(vec![Node::int(2)])));

    let node = Node::new(NodeKind::MapLit(vec![(Node::int(1), Node::int(1))]));
    let expected = Node::new(NodeKind::MapLit(vec![(Node::int(2), Node::int(2))]));
    assert_eq!(bump(node), expected);
}

#[test]
fn leaves_without_children_are_untouched() {
    assert_eq!(bump(Node::var("x")), Node::var("x"));
    assert_eq!(bump(Node::new(NodeKind::Wildcard)), Node::new(NodeKind::Wildcard));
    assert_eq!(bump(Node::str("s")), Node::str("s"));
}

#[test]
fn bottom_up_sees_rewritten_children_top_down_does_not() {
    // f folds Add(1, 2) to 3 and Neg(3) to -3.
    let f = |node: Node| -> Node {
        let Node { kind, meta } = node;
        let kind = match kind {
            NodeKind::BinOp { op: BinOp::Add, lhs, rhs }
                if matches!(lhs.kind, NodeKind::Literal(Literal::Int(1)))
                    && matches!(rhs.kind, NodeKind::Literal(Literal::Int(2))) =>
            {
                NodeKind::Literal(Literal::Int(3))
            }
            NodeKind::UnaryOp { op: UnOp::Neg, operand }
                if matches!(operand.kind, NodeKind::Literal(Literal::Int(3))) =>
            {
                NodeKind::Literal(Literal::Int(-3))
            }
            kind => kind,
        };
        Node { kind, meta }
    };

    let tree = || {
        Node::new(NodeKind::UnaryOp {
            op: UnOp::Neg,
            operand: Box::new(Node::binop(BinOp::Add, Node::int(1), Node::int(2))),
        })
    };

    // Bottom-up: the inner add folds first, so the negation folds too.
    assert_eq!(walk::map_bottom_up(tree(), f), Node::int(-3));

    // Top-down: the negation is inspected before its child folds.
    let expected = Node::new(NodeKind::UnaryOp {
        op: UnOp::Neg,
        operand: Box::new(Node::int(3)),
    });
    assert_eq!(walk::map_top_down(tree(), f), expected);
}

#[test]
fn any_finds_a_deep_call() {
    let tree = Node::block(vec![Node::new(NodeKind::If {
        cond: Box::new(Node::bool(true)),
        then_branch: Box::new(Node::call(Node::var("target"), vec![])),
        else_branch: None,
    })]);

    let mut has_target = |n: &Node| {
        matches!(
            &n.kind,
            NodeKind::Call { callee, .. } if matches!(&callee.kind, NodeKind::Var(v) if v == "target")
        )
    };
    assert!(walk::any(&tree, &mut has_target));

    let mut has_other = |n: &Node| matches!(&n.kind, NodeKind::Var(v) if v == "other");
    assert!(!walk::any(&tree, &mut has_other));
}

#[test]
fn metadata_survives_child_rewrites() {
    let span = Span { start: 3, end: 9 };
    let node = Node {
        kind: NodeKind::Block(vec![Node::int(1)]),
        meta: Meta {
            span: Some(span),
            provenance: Some("template".into()),
        },
    };
    let out = bump(node);
    assert_eq!(out.meta.span, Some(span));
    assert_eq!(out.meta.provenance.as_deref(), Some("template"));
    assert_eq!(out.kind, NodeKind::Block(vec![Node::int(2)]));
}
