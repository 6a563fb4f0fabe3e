pub mod node;
pub mod walk;

pub use node::{BinOp, Literal, Meta, Node, NodeKind, Span, UnOp};
pub use walk::{any, children, map_bottom_up, map_children, map_top_down};
