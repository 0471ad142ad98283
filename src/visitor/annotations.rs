//! アノテーション付きプロパティの検出

use super::{IrVisitor, Visit};
use crate::ir::{AnnotationTag, IrTree, Name, NodeId};

/// 走査中に見つかったプロパティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedProperty {
    pub id: NodeId,
    pub name: Name,
    pub annotated: bool,
}

/// すべてのプロパティを記録し、指定アノテーションの有無を調べるビジター
#[derive(Debug)]
pub struct AnnotatedPropertyFinder {
    tag: AnnotationTag,
    found: Vec<AnnotatedProperty>,
}

impl AnnotatedPropertyFinder {
    pub fn new(tag: AnnotationTag) -> Self {
        Self {
            tag,
            found: Vec::new(),
        }
    }

    pub fn tag(&self) -> &AnnotationTag {
        &self.tag
    }

    /// 見つかったすべてのプロパティ（走査順）
    pub fn found(&self) -> &[AnnotatedProperty] {
        &self.found
    }

    /// アノテーションを持つプロパティのみ
    pub fn annotated(&self) -> impl Iterator<Item = &AnnotatedProperty> {
        self.found.iter().filter(|p| p.annotated)
    }
}

impl IrVisitor for AnnotatedPropertyFinder {
    type Data = ();

    fn visit_element(&mut self, _tree: &IrTree, _id: NodeId, _data: &()) -> Visit<()> {
        Visit::ContinueChildren(())
    }

    fn visit_property(&mut self, tree: &IrTree, id: NodeId, _data: &()) -> Visit<()> {
        if let Ok(node) = tree.node(id) {
            self.found.push(AnnotatedProperty {
                id,
                name: node.name().clone(),
                annotated: node.has_annotation(&self.tag),
            });
        }
        // アクセサ内のプロパティも検出するため子孫へ降りる
        Visit::ContinueChildren(())
    }
}
