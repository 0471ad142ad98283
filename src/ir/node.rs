//! IR node definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::name::{FqName, Name};
use super::symbol::Symbol;
use super::types::IrType;

/// Index of a node inside its owning `IrTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declaration visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// Declaration modality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Final,
    Open,
    Abstract,
}

/// Literal values carried by `Literal` nodes and annotation arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Int(i64),
    Boolean(bool),
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Module,
    Function {
        symbol: Symbol,
        visibility: Visibility,
        modality: Modality,
    },
    Property {
        symbol: Symbol,
        visibility: Visibility,
        modality: Modality,
        is_var: bool,
    },
    Getter {
        symbol: Symbol,
        corresponding_property: Symbol,
    },
    Setter {
        symbol: Symbol,
        corresponding_property: Symbol,
    },
    Parameter {
        symbol: Symbol,
        index: usize,
    },
    /// Block body of a function or accessor
    Body,
    Call {
        callee: Symbol,
    },
    Return {
        target: Symbol,
    },
    /// Read of a value parameter
    GetValue {
        target: Symbol,
    },
    Literal(Literal),
    TypeRef,
}

/// Kind tag without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    Module,
    Function,
    Property,
    Getter,
    Setter,
    Parameter,
    Body,
    Call,
    Return,
    GetValue,
    Literal,
    TypeRef,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Module => NodeTag::Module,
            NodeKind::Function { .. } => NodeTag::Function,
            NodeKind::Property { .. } => NodeTag::Property,
            NodeKind::Getter { .. } => NodeTag::Getter,
            NodeKind::Setter { .. } => NodeTag::Setter,
            NodeKind::Parameter { .. } => NodeTag::Parameter,
            NodeKind::Body => NodeTag::Body,
            NodeKind::Call { .. } => NodeTag::Call,
            NodeKind::Return { .. } => NodeTag::Return,
            NodeKind::GetValue { .. } => NodeTag::GetValue,
            NodeKind::Literal(_) => NodeTag::Literal,
            NodeKind::TypeRef => NodeTag::TypeRef,
        }
    }

    /// Symbol declared by this node, if it is a declaration
    pub fn declared_symbol(&self) -> Option<&Symbol> {
        match self {
            NodeKind::Function { symbol, .. }
            | NodeKind::Property { symbol, .. }
            | NodeKind::Getter { symbol, .. }
            | NodeKind::Setter { symbol, .. }
            | NodeKind::Parameter { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeTag::Module => "MODULE",
            NodeTag::Function => "FUN",
            NodeTag::Property => "PROPERTY",
            NodeTag::Getter => "GETTER",
            NodeTag::Setter => "SETTER",
            NodeTag::Parameter => "VALUE_PARAMETER",
            NodeTag::Body => "BLOCK_BODY",
            NodeTag::Call => "CALL",
            NodeTag::Return => "RETURN",
            NodeTag::GetValue => "GET_VAR",
            NodeTag::Literal => "CONST",
            NodeTag::TypeRef => "TYPE_REF",
        };
        write!(f, "{}", s)
    }
}

/// Annotation tags understood by generators
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationTag {
    /// Marks a property for accessor rewriting
    SuspendProp,
    /// Marks a declaration synthesized by a generator
    Generated,
    Other(FqName),
}

impl fmt::Display for AnnotationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationTag::SuspendProp => write!(f, "SuspendProp"),
            AnnotationTag::Generated => write!(f, "Generated"),
            AnnotationTag::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A single tree element
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) name: Name,
    pub(crate) ty: IrType,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) annotations: IndexMap<AnnotationTag, Vec<Literal>>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, name: Name, ty: IrType) -> Self {
        Self {
            kind,
            name,
            ty,
            children: Vec::new(),
            parent: None,
            annotations: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn ty(&self) -> &IrType {
        &self.ty
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn annotations(&self) -> &IndexMap<AnnotationTag, Vec<Literal>> {
        &self.annotations
    }

    pub fn has_annotation(&self, tag: &AnnotationTag) -> bool {
        self.annotations.contains_key(tag)
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.kind.declared_symbol()
    }
}
