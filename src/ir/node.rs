//! The rewritten-program tree.
//!
//! [`Node`] is the value every pass reads and rebuilds. The tree is strict:
//! each variant owns its children directly, a subtree that occurs in two
//! logical places is reconstructed twice, and no node holds a back reference
//! to an ancestor or sibling. Passes that need "where was this bound?" facts
//! derive them by scanning (see [`crate::ir::walk::any`]); storing them as
//! pointers would break pass composability.

/// Byte range in the original front-end source. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// Per-node metadata.
///
/// Not semantically load-bearing: passes must either carry it over to the
/// rebuilt node or drop it deliberately (a fold that merges two literals
/// keeps the parent's span, for example). Never consulted to decide program
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Meta {
    pub span: Option<Span>,
    /// Which front-end construct produced this node, e.g. `"string-interp"`.
    pub provenance: Option<String>,
}

/// Binary operators of the output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// String concatenation (`<>`).
    Concat,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators of the output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// Literal constants.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Atom(String),
    Nil,
}

/// A program fragment: metadata plus the tagged-union payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub meta: Meta,
}

/// The closed set of node kinds.
///
/// Closed on purpose: every traversal site matches all variants with no
/// catch-all arm, so adding a kind forces the compiler to flag every walker
/// and rewrite that must learn about it. An open representation is how
/// coverage gaps go unnoticed.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Module {
        name: String,
        body: Vec<Node>,
    },
    FunctionDef {
        name: String,
        /// Parameter patterns.
        params: Vec<Node>,
        body: Box<Node>,
    },
    /// Ordered statement sequence.
    Block(Vec<Node>),
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    /// Multi-clause pattern match. Children of `clauses` must be `Clause`.
    Case {
        scrutinee: Box<Node>,
        clauses: Vec<Node>,
    },
    Clause {
        pattern: Box<Node>,
        guard: Option<Box<Node>>,
        body: Box<Node>,
    },
    BinOp {
        op: BinOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Node>,
    },
    Literal(Literal),
    /// Variable reference, or a binding occurrence in pattern position.
    Var(String),
    /// The `_` pattern.
    Wildcard,
    /// Unqualified call. `callee` is usually a `Var`, but may be any
    /// expression (calling a lambda held in a variable).
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    /// Module-qualified call, `Mod.fun(args)`.
    RemoteCall {
        module: String,
        name: String,
        args: Vec<Node>,
    },
    Lambda {
        params: Vec<Node>,
        body: Box<Node>,
    },
    /// Match/assignment, `pattern = value`.
    Assign {
        pattern: Box<Node>,
        value: Box<Node>,
    },
    Tuple(Vec<Node>),
    List(Vec<Node>),
    /// Map literal as ordered key/value pairs.
    MapLit(Vec<(Node, Node)>),
    /// Comprehension-style loop, `for pattern <- source do body end`.
    For {
        pattern: Box<Node>,
        source: Box<Node>,
        body: Box<Node>,
    },
}

impl NodeKind {
    /// Short tag for diagnostics and tree dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Module { .. } => "module",
            NodeKind::FunctionDef { .. } => "function-def",
            NodeKind::Block(_) => "block",
            NodeKind::If { .. } => "if",
            NodeKind::Case { .. } => "case",
            NodeKind::Clause { .. } => "clause",
            NodeKind::BinOp { .. } => "bin-op",
            NodeKind::UnaryOp { .. } => "unary-op",
            NodeKind::Literal(_) => "literal",
            NodeKind::Var(_) => "var",
            NodeKind::Wildcard => "wildcard",
            NodeKind::Call { .. } => "call",
            NodeKind::RemoteCall { .. } => "remote-call",
            NodeKind::Lambda { .. } => "lambda",
            NodeKind::Assign { .. } => "assign",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::List(_) => "list",
            NodeKind::MapLit(_) => "map",
            NodeKind::For { .. } => "for",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            meta: Meta::default(),
        }
    }

    pub fn with_span(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            meta: Meta {
                span: Some(span),
                provenance: None,
            },
        }
    }

    // Shorthand constructors, used heavily by the front-end bridge and tests.

    pub fn int(v: i64) -> Self {
        Self::new(NodeKind::Literal(Literal::Int(v)))
    }

    pub fn float(v: f64) -> Self {
        Self::new(NodeKind::Literal(Literal::Float(v)))
    }

    pub fn bool(v: bool) -> Self {
        Self::new(NodeKind::Literal(Literal::Bool(v)))
    }

    pub fn str(v: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal(Literal::Str(v.into())))
    }

    pub fn atom(v: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal(Literal::Atom(v.into())))
    }

    pub fn nil() -> Self {
        Self::new(NodeKind::Literal(Literal::Nil))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Var(name.into()))
    }

    pub fn block(items: Vec<Node>) -> Self {
        Self::new(NodeKind::Block(items))
    }

    pub fn binop(op: BinOp, lhs: Node, rhs: Node) -> Self {
        Self::new(NodeKind::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            callee: Box::new(callee),
            args,
        })
    }
}
