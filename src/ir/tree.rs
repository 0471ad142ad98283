//! IRツリー本体
//!
//! ノードはアリーナに格納され、`NodeId` で参照される。親子関係は
//! `append_child` / `detach` によってのみ変更され、
//! 各ノードは常に高々1つの親しか持たない。

use super::name::Name;
use super::node::{AnnotationTag, Literal, Node, NodeId, NodeKind, NodeTag};
use super::symbol::Symbol;
use super::types::{IrBuiltIns, IrType};
use crate::error::{IrError, IrResult};

/// 1コンパイル単位分のIRツリー
#[derive(Debug, Clone)]
pub struct IrTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl IrTree {
    /// モジュールをルートとする空のツリーを作成
    pub fn new(module_name: Name, builtins: &IrBuiltIns) -> Self {
        let root = Node::new(NodeKind::Module, module_name, builtins.unit_type());
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// ツリー内のノード数（未接続のノードを含む）
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// ルートは常に存在するため、常に `false`
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// ノードを取得（このツリーに属さないIDは不変条件違反）
    pub fn node(&self, id: NodeId) -> IrResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| IrError::invariant(format!("node #{} does not belong to this tree", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> IrResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| IrError::invariant(format!("node #{} does not belong to this tree", id.0)))
    }

    /// 未接続のノードを作成
    ///
    /// 型は組み込み型ユニバースで解決できなければならない。
    pub fn create_node(
        &mut self,
        builtins: &IrBuiltIns,
        kind: NodeKind,
        name: Name,
        ty: IrType,
    ) -> IrResult<NodeId> {
        builtins.resolve(&ty)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, name, ty));
        Ok(id)
    }

    pub fn children(&self, id: NodeId) -> IrResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> IrResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// `child` を `parent` の下に置くと循環するか
    ///
    /// `parent` から上へ、`child` の部分木を下へ同時に辿り、
    /// 先に尽きた方で打ち切る。
    fn would_cycle(&self, parent: NodeId, child: NodeId) -> bool {
        let mut up = Some(parent);
        let mut down = vec![child];
        loop {
            match up {
                Some(id) if id == child => return true,
                Some(id) => up = self.nodes.get(id.0).and_then(|n| n.parent),
                None => return false,
            }
            match down.pop() {
                Some(id) if id == parent => return true,
                Some(id) => {
                    if let Some(node) = self.nodes.get(id.0) {
                        down.extend(node.children.iter().copied());
                    }
                }
                None => return false,
            }
        }
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> IrResult<()> {
        self.node(parent)?;
        let node = self.node(child)?;
        if child == self.root {
            return Err(IrError::invariant("the module root cannot be attached"));
        }
        if let Some(current) = node.parent {
            return Err(IrError::invariant(format!(
                "node #{} is already a child of #{}; detach it first",
                child.0, current.0
            )));
        }
        if self.would_cycle(parent, child) {
            return Err(IrError::invariant(format!(
                "attaching #{} under #{} would create a cycle",
                child.0, parent.0
            )));
        }
        Ok(())
    }

    /// 子ノードを末尾に追加し、親ポインタを設定する
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> IrResult<()> {
        self.check_attachable(parent, child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// ノードを親から切り離す（未接続なら何もしない）
    pub fn detach(&mut self, child: NodeId) -> IrResult<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != child);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// 指定した種類の最初の子ノード
    pub fn find_child(&self, parent: NodeId, tag: NodeTag) -> IrResult<Option<NodeId>> {
        for &child in self.children(parent)? {
            if self.node(child)?.tag() == tag {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// アノテーションを付与する（ホスト側のフロントエンドが使用）
    pub fn annotate(&mut self, id: NodeId, tag: AnnotationTag, args: Vec<Literal>) -> IrResult<()> {
        self.node_mut(id)?.annotations.insert(tag, args);
        Ok(())
    }

    /// ノード自身がアノテーションを持つか（祖先・子孫は探索しない）
    pub fn has_annotation(&self, id: NodeId, tag: &AnnotationTag) -> IrResult<bool> {
        Ok(self.node(id)?.has_annotation(tag))
    }

    /// 部分木の整合性を検証する
    pub fn verify(&self, id: NodeId, builtins: &IrBuiltIns) -> IrResult<()> {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            self.verify_node(id, builtins)?;
            pending.extend(self.children(id)?.iter().rev().copied());
        }
        Ok(())
    }

    fn verify_node(&self, id: NodeId, builtins: &IrBuiltIns) -> IrResult<()> {
        let node = self.node(id)?;
        builtins.resolve(node.ty())?;

        for &child in node.children() {
            if self.node(child)?.parent != Some(id) {
                return Err(IrError::invariant(format!(
                    "child #{} of #{} has a mismatched parent pointer",
                    child.0, id.0
                )));
            }
        }

        match node.kind() {
            NodeKind::Getter {
                corresponding_property,
                ..
            } => {
                self.verify_owner(id, corresponding_property)?;
                if self.find_child(id, NodeTag::Parameter)?.is_some() {
                    return Err(IrError::invariant("getter must not declare value parameters"));
                }
            }
            NodeKind::Setter {
                corresponding_property,
                ..
            } => {
                self.verify_owner(id, corresponding_property)?;
                self.verify_setter_parameter(id)?;
            }
            NodeKind::Call { callee } => {
                if node.children().len() != callee.arity() {
                    return Err(IrError::ArityMismatch {
                        callee: callee.fq_name().to_string(),
                        expected: callee.arity(),
                        found: node.children().len(),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn verify_owner(&self, accessor: NodeId, expected: &Symbol) -> IrResult<()> {
        let Some(owner) = self.parent(accessor)? else {
            return Ok(());
        };
        match self.node(owner)?.kind() {
            NodeKind::Property { symbol, .. } if symbol == expected => Ok(()),
            _ => Err(IrError::invariant(format!(
                "accessor #{} is not owned by its corresponding property {}",
                accessor.0, expected
            ))),
        }
    }

    fn verify_setter_parameter(&self, setter: NodeId) -> IrResult<()> {
        let params: Vec<&Node> = self
            .children(setter)?
            .iter()
            .map(|&c| self.node(c))
            .collect::<IrResult<Vec<_>>>()?
            .into_iter()
            .filter(|n| n.tag() == NodeTag::Parameter)
            .collect();

        match params.as_slice() {
            [param] if param.name().as_str() == "value"
                && matches!(param.kind(), NodeKind::Parameter { index: 0, .. }) =>
            {
                Ok(())
            }
            _ => Err(IrError::invariant(format!(
                "setter #{} must declare exactly one `value` parameter at index 0",
                setter.0
            ))),
        }
    }
}
