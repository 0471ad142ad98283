//! IR構築モジュール
//!
//! 新しいノードは常に未接続の部分木として構築され、呼び出し側が
//! `IrTree::append_child` で明示的に接続する（2段階プロトコル）。
//! ビルダーは自分が構築中の部分木以外のノードを変更しない。

mod body;
mod declarations;

pub use body::BodyBuilder;
pub use declarations::{FunctionSpec, PropertySpec};

use crate::context::PluginContext;
use crate::error::{IrError, IrResult};
use crate::ir::{AnnotationTag, FqName, IrTree, IrType, Literal, Name, NodeId, NodeKind, Symbol};

/// IRノードのビルダー
pub struct IrBuilder<'a> {
    ctx: &'a PluginContext,
    tree: &'a mut IrTree,
    package: FqName,
}

impl<'a> IrBuilder<'a> {
    pub fn new(ctx: &'a PluginContext, tree: &'a mut IrTree) -> Self {
        Self {
            ctx,
            tree,
            package: FqName::new(""),
        }
    }

    /// 新しい宣言の完全修飾名に使うパッケージを指定
    pub fn in_package(mut self, package: impl Into<FqName>) -> Self {
        self.package = package.into();
        self
    }

    pub fn context(&self) -> &PluginContext {
        self.ctx
    }

    pub fn tree(&self) -> &IrTree {
        &*self.tree
    }

    pub(crate) fn create(&mut self, kind: NodeKind, name: Name, ty: IrType) -> IrResult<NodeId> {
        self.tree.create_node(&self.ctx.builtins, kind, name, ty)
    }

    /// 引数や値として使うノードが未接続であることを確認
    fn expect_unlinked(&self, id: NodeId) -> IrResult<()> {
        if self.tree.node(id)?.parent().is_some() || id == self.tree.root() {
            return Err(IrError::invariant(format!(
                "node #{} is already attached and cannot be reused as an operand",
                id.index()
            )));
        }
        Ok(())
    }

    /// 構築中のノードにアノテーションを付与する
    pub fn annotate(&mut self, id: NodeId, tag: AnnotationTag, args: Vec<Literal>) -> IrResult<()> {
        self.expect_unlinked(id)?;
        self.tree.annotate(id, tag, args)
    }

    /// 文字列リテラル
    pub fn build_string(&mut self, value: impl Into<String>) -> IrResult<NodeId> {
        let ty = self.ctx.builtins.string_type();
        self.create(
            NodeKind::Literal(Literal::String(value.into())),
            Name::special("<const>"),
            ty,
        )
    }

    /// 整数リテラル
    pub fn build_int(&mut self, value: i64) -> IrResult<NodeId> {
        let ty = self.ctx.builtins.int_type();
        self.create(NodeKind::Literal(Literal::Int(value)), Name::special("<const>"), ty)
    }

    /// 真偽値リテラル
    pub fn build_bool(&mut self, value: bool) -> IrResult<NodeId> {
        let ty = self.ctx.builtins.boolean_type();
        self.create(NodeKind::Literal(Literal::Boolean(value)), Name::special("<const>"), ty)
    }

    /// 型参照ノード
    pub fn build_type_ref(&mut self, ty: IrType) -> IrResult<NodeId> {
        self.create(NodeKind::TypeRef, Name::special("<type>"), ty)
    }

    /// 関数呼び出し
    ///
    /// 引数の数のみを検査し、引数の型は検査しない。
    pub fn build_call(&mut self, callee: &Symbol, args: Vec<NodeId>) -> IrResult<NodeId> {
        if args.len() != callee.arity() {
            return Err(IrError::ArityMismatch {
                callee: callee.fq_name().to_string(),
                expected: callee.arity(),
                found: args.len(),
            });
        }
        for &arg in &args {
            self.expect_unlinked(arg)?;
        }

        let name = Name::identifier(callee.fq_name().short_name());
        let call = self.create(
            NodeKind::Call {
                callee: callee.clone(),
            },
            name,
            callee.return_type().clone(),
        )?;
        for arg in args {
            self.tree.append_child(call, arg)?;
        }
        Ok(call)
    }

    /// `target` の宣言から値を返す文
    pub fn build_return(&mut self, target: &Symbol, value: NodeId) -> IrResult<NodeId> {
        self.expect_unlinked(value)?;
        let ty = self.ctx.builtins.nothing_type();
        let ret = self.create(
            NodeKind::Return {
                target: target.clone(),
            },
            Name::special("<return>"),
            ty,
        )?;
        self.tree.append_child(ret, value)?;
        Ok(ret)
    }

    /// 値パラメータの読み出し
    pub fn build_get(&mut self, parameter: NodeId) -> IrResult<NodeId> {
        let node = self.tree.node(parameter)?;
        let NodeKind::Parameter { symbol, .. } = node.kind() else {
            return Err(IrError::invariant(format!(
                "node #{} is not a value parameter",
                parameter.index()
            )));
        };
        let kind = NodeKind::GetValue {
            target: symbol.clone(),
        };
        let (name, ty) = (node.name().clone(), node.ty().clone());
        self.create(kind, name, ty)
    }
}
