//! In-memory IR tree model.
//!
//! The tree is an arena of [`Node`]s owned by an [`IrTree`]; parent/child
//! links are kept consistent by the tree's attach and detach operations.

mod name;
mod node;
mod render;
mod symbol;
mod tree;
mod types;

pub use name::{FqName, Name};
pub use node::{
    AnnotationTag, Literal, Modality, Node, NodeId, NodeKind, NodeTag, Visibility,
};
pub use render::DumpNode;
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolTable};
pub use tree::IrTree;
pub use types::{IrBuiltIns, IrType};
