//! Visitor pattern for IR traversal.
//!
//! `walk` dispatches each node to the kind-specific `visit_*` method of an
//! [`IrVisitor`]. Every visit method returns a [`Visit`] that states whether
//! the node's children are traversed, so pruning a subtree is always an
//! explicit decision of the override. Visitors only see `&IrTree`; the tree
//! cannot be mutated during a traversal.

mod annotations;
mod dump;

pub use annotations::{AnnotatedProperty, AnnotatedPropertyFinder};
pub use dump::TreeDumper;

use crate::error::IrResult;
use crate::ir::{IrTree, NodeId, NodeTag};

/// Descent policy returned by every visit method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit<D> {
    /// Visit the children in stored order, passing them this context
    ContinueChildren(D),
    /// Skip the children of this node
    StopHere,
}

/// Trait for visiting IR nodes.
///
/// Only `visit_element` is required; every kind-specific method falls back to
/// it. An override that wants the default recursion must return
/// `Visit::ContinueChildren` (or delegate to `visit_element`).
pub trait IrVisitor {
    /// Context threaded from a node down to its children
    type Data;

    fn visit_element(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data>;

    /// Called after a node and its (possibly skipped) children
    fn leave_element(&mut self, _tree: &IrTree, _id: NodeId, _data: &Self::Data) {}

    fn visit_module(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_function(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_property(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_getter(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_setter(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_parameter(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_body(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_call(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_return(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_get_value(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_literal(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }

    fn visit_type_ref(&mut self, tree: &IrTree, id: NodeId, data: &Self::Data) -> Visit<Self::Data> {
        self.visit_element(tree, id, data)
    }
}

/// Dispatch a single node to the matching `visit_*` method
pub fn accept<V>(tree: &IrTree, id: NodeId, visitor: &mut V, data: &V::Data) -> IrResult<Visit<V::Data>>
where
    V: IrVisitor + ?Sized,
{
    let visit = match tree.node(id)?.tag() {
        NodeTag::Module => visitor.visit_module(tree, id, data),
        NodeTag::Function => visitor.visit_function(tree, id, data),
        NodeTag::Property => visitor.visit_property(tree, id, data),
        NodeTag::Getter => visitor.visit_getter(tree, id, data),
        NodeTag::Setter => visitor.visit_setter(tree, id, data),
        NodeTag::Parameter => visitor.visit_parameter(tree, id, data),
        NodeTag::Body => visitor.visit_body(tree, id, data),
        NodeTag::Call => visitor.visit_call(tree, id, data),
        NodeTag::Return => visitor.visit_return(tree, id, data),
        NodeTag::GetValue => visitor.visit_get_value(tree, id, data),
        NodeTag::Literal => visitor.visit_literal(tree, id, data),
        NodeTag::TypeRef => visitor.visit_type_ref(tree, id, data),
    };
    Ok(visit)
}

/// Pending work of `walk`; contexts are indices into the owned context list,
/// `None` being the caller's root context
enum Step {
    Enter(NodeId, Option<usize>),
    Leave(NodeId, Option<usize>),
}

fn context<'c, D>(contexts: &'c [D], root: &'c D, slot: Option<usize>) -> &'c D {
    slot.and_then(|i| contexts.get(i)).unwrap_or(root)
}

/// Pre-order traversal of the subtree rooted at `id`
///
/// Uses an explicit work stack, so the depth of the tree is not limited by
/// the call stack. `leave_element` runs after each node's subtree.
pub fn walk<V>(tree: &IrTree, id: NodeId, visitor: &mut V, data: &V::Data) -> IrResult<()>
where
    V: IrVisitor + ?Sized,
{
    let mut contexts: Vec<V::Data> = Vec::new();
    let mut stack = vec![Step::Enter(id, None)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id, slot) => {
                let visit = accept(tree, id, visitor, context(&contexts[..], data, slot))?;
                stack.push(Step::Leave(id, slot));
                if let Visit::ContinueChildren(child_data) = visit {
                    contexts.push(child_data);
                    let child_slot = Some(contexts.len() - 1);
                    for &child in tree.children(id)?.iter().rev() {
                        stack.push(Step::Enter(child, child_slot));
                    }
                }
            }
            Step::Leave(id, slot) => {
                visitor.leave_element(tree, id, context(&contexts[..], data, slot));
            }
        }
    }
    Ok(())
}
