//! 関数本体（ブロックボディ）のビルダー

use std::ops::{Deref, DerefMut};

use super::IrBuilder;
use crate::error::{IrError, IrResult};
use crate::ir::{Name, NodeId, NodeKind, Symbol};

/// 本体の文を順に積み上げるビルダー
///
/// `IrBuilder` に `Deref` するため、式の構築メソッドをそのまま呼べる。
pub struct BodyBuilder<'b, 'a> {
    builder: &'b mut IrBuilder<'a>,
    owner: Symbol,
    parameters: Vec<NodeId>,
    statements: Vec<NodeId>,
}

impl<'b, 'a> BodyBuilder<'b, 'a> {
    /// 本体を所有する宣言のシンボル
    pub fn owner(&self) -> &Symbol {
        &self.owner
    }

    /// 所有する宣言の値パラメータ（宣言順）
    pub fn parameters(&self) -> &[NodeId] {
        &self.parameters
    }

    /// 文を末尾に追加する
    pub fn push(&mut self, statement: NodeId) -> IrResult<()> {
        if self.statements.contains(&statement) {
            return Err(IrError::invariant(format!(
                "statement #{} was pushed twice",
                statement.index()
            )));
        }
        self.builder.expect_unlinked(statement)?;
        self.statements.push(statement);
        Ok(())
    }

    /// 所有する宣言から値を返す文を追加する
    pub fn push_return(&mut self, value: NodeId) -> IrResult<NodeId> {
        let owner = self.owner.clone();
        let ret = self.builder.build_return(&owner, value)?;
        self.statements.push(ret);
        Ok(ret)
    }
}

impl<'b, 'a> Deref for BodyBuilder<'b, 'a> {
    type Target = IrBuilder<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.builder
    }
}

impl<'b, 'a> DerefMut for BodyBuilder<'b, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.builder
    }
}

impl<'a> IrBuilder<'a> {
    /// 本体を構築し、未接続のBodyノードを返す
    pub(crate) fn build_body<F>(
        &mut self,
        owner: &Symbol,
        parameters: Vec<NodeId>,
        configure: F,
    ) -> IrResult<NodeId>
    where
        F: FnOnce(&mut BodyBuilder<'_, 'a>) -> IrResult<()>,
    {
        let statements = {
            let mut body = BodyBuilder {
                builder: self,
                owner: owner.clone(),
                parameters,
                statements: Vec::new(),
            };
            configure(&mut body)?;
            body.statements
        };

        let unit = self.ctx.builtins.unit_type();
        let body = self.create(NodeKind::Body, Name::special("<body>"), unit)?;
        for statement in statements {
            self.tree.append_child(body, statement)?;
        }
        Ok(body)
    }
}
