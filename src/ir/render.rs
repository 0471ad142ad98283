//! Pretty printing of IR nodes.

use serde::Serialize;
use std::collections::HashMap;

use super::node::{Literal, Modality, NodeId, NodeKind, Visibility};
use super::tree::IrTree;
use crate::error::{IrError, IrResult};
use crate::visitor::{walk, TreeDumper};

/// Serializable view of a subtree, used for JSON dumps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DumpNode {
    pub kind: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DumpNode>,
}

fn visibility_str(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Internal => "internal",
        Visibility::Private => "private",
    }
}

fn modality_str(modality: Modality) -> &'static str {
    match modality {
        Modality::Final => "final",
        Modality::Open => "open",
        Modality::Abstract => "abstract",
    }
}

impl IrTree {
    /// Render a single node on one line
    pub fn render(&self, id: NodeId) -> IrResult<String> {
        let node = self.node(id)?;
        let tag = node.tag();
        let mut line = match node.kind() {
            NodeKind::Module => format!("{} name:{}", tag, node.name()),
            NodeKind::Function {
                visibility,
                modality,
                ..
            } => format!(
                "{} name:{} visibility:{} modality:{} returnType:{}",
                tag,
                node.name(),
                visibility_str(*visibility),
                modality_str(*modality),
                node.ty()
            ),
            NodeKind::Property {
                visibility,
                modality,
                is_var,
                ..
            } => format!(
                "{} name:{} visibility:{} modality:{} type:{} {}",
                tag,
                node.name(),
                visibility_str(*visibility),
                modality_str(*modality),
                node.ty(),
                if *is_var { "var" } else { "val" }
            ),
            NodeKind::Getter {
                corresponding_property,
                ..
            }
            | NodeKind::Setter {
                corresponding_property,
                ..
            } => format!(
                "{} name:{} returnType:{} property:{}",
                tag,
                node.name(),
                node.ty(),
                corresponding_property
            ),
            NodeKind::Parameter { index, .. } => {
                format!("{} name:{} index:{} type:{}", tag, node.name(), index, node.ty())
            }
            NodeKind::Body => format!("{}", tag),
            NodeKind::Call { callee } => format!("{} {} type:{}", tag, callee, node.ty()),
            NodeKind::Return { target } => format!("{} type:{} from:{}", tag, node.ty(), target),
            NodeKind::GetValue { .. } => format!("{} '{}' type:{}", tag, node.name(), node.ty()),
            NodeKind::Literal(literal) => match literal {
                Literal::String(s) => format!("{} type:{} value={:?}", tag, node.ty(), s),
                Literal::Int(i) => format!("{} type:{} value={}", tag, node.ty(), i),
                Literal::Boolean(b) => format!("{} type:{} value={}", tag, node.ty(), b),
            },
            NodeKind::TypeRef => format!("{} type:{}", tag, node.ty()),
        };

        for annotation in node.annotations().keys() {
            line.push_str(&format!(" @{}", annotation));
        }
        Ok(line)
    }

    /// Render a node and all of its descendants, one node per line
    pub fn dump(&self, id: NodeId) -> IrResult<String> {
        let mut dumper = TreeDumper::new();
        walk(self, id, &mut dumper, &String::new())?;
        Ok(dumper.finish())
    }

    /// Build a serializable view of a subtree
    pub fn dump_node(&self, id: NodeId) -> IrResult<DumpNode> {
        // Children come after their parent in pre-order, so building in
        // reverse order always finds every child view ready.
        let mut order = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            order.push(current);
            pending.extend(self.children(current)?.iter().rev().copied());
        }

        let mut built: HashMap<NodeId, DumpNode> = HashMap::with_capacity(order.len());
        for &current in order.iter().rev() {
            let node = self.node(current)?;
            let children = node
                .children()
                .iter()
                .map(|child| {
                    built.remove(child).ok_or_else(|| {
                        IrError::invariant(format!("node #{} is reachable twice", child.index()))
                    })
                })
                .collect::<IrResult<Vec<_>>>()?;

            built.insert(
                current,
                DumpNode {
                    kind: node.tag().to_string(),
                    name: node.name().to_string(),
                    ty: node.ty().to_string(),
                    annotations: node.annotations().keys().map(ToString::to_string).collect(),
                    children,
                },
            );
        }

        built
            .remove(&id)
            .ok_or_else(|| IrError::invariant(format!("node #{} was not dumped", id.index())))
    }

    /// Render a subtree as pretty-printed JSON
    pub fn dump_json(&self, id: NodeId) -> IrResult<String> {
        let view = self.dump_node(id)?;
        serde_json::to_string_pretty(&view)
            .map_err(|e| IrError::invariant(format!("failed to serialize the dump: {}", e)))
    }
}
