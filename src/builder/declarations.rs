//! 宣言（関数・プロパティ・アクセサ）の構築

use super::body::BodyBuilder;
use super::IrBuilder;
use crate::error::{IrError, IrResult};
use crate::ir::{
    FqName, IrType, Modality, Name, NodeId, NodeKind, NodeTag, Symbol, SymbolKind, Visibility,
};

/// 関数宣言の設定
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: Name,
    pub visibility: Visibility,
    pub modality: Modality,
    pub return_type: IrType,
    pub value_parameters: Vec<(Name, IrType)>,
}

impl FunctionSpec {
    /// public / final の関数
    pub fn new(name: Name, return_type: IrType) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            modality: Modality::Final,
            return_type,
            value_parameters: Vec::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn value_parameter(mut self, name: Name, ty: IrType) -> Self {
        self.value_parameters.push((name, ty));
        self
    }
}

/// プロパティ宣言の設定
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub name: Name,
    pub ty: IrType,
    pub is_var: bool,
    pub visibility: Visibility,
    pub modality: Modality,
}

impl PropertySpec {
    /// 読み取り専用（val）のプロパティ
    pub fn val(name: Name, ty: IrType) -> Self {
        Self {
            name,
            ty,
            is_var: false,
            visibility: Visibility::Public,
            modality: Modality::Final,
        }
    }

    /// 可変（var）のプロパティ
    pub fn var(name: Name, ty: IrType) -> Self {
        Self {
            is_var: true,
            ..Self::val(name, ty)
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// プロパティノードから読み出した情報
struct PropertyInfo {
    symbol: Symbol,
    name: Name,
    ty: IrType,
    is_var: bool,
}

impl<'a> IrBuilder<'a> {
    fn qualify(&self, name: &Name) -> FqName {
        self.package.child(name)
    }

    /// 値パラメータを作成して `owner` に接続する
    fn add_value_parameters(
        &mut self,
        owner: NodeId,
        owner_fq: &FqName,
        parameters: &[(Name, IrType)],
    ) -> IrResult<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(parameters.len());
        for (index, (name, ty)) in parameters.iter().enumerate() {
            let symbol = Symbol::new(
                owner_fq.child(name),
                SymbolKind::ValueParameter,
                Vec::new(),
                ty.clone(),
            );
            let param = self.create(NodeKind::Parameter { symbol, index }, name.clone(), ty.clone())?;
            self.tree.append_child(owner, param)?;
            ids.push(param);
        }
        Ok(ids)
    }

    /// 関数宣言を構築する
    ///
    /// `configure` は本体の文を追加する。戻り値は未接続の関数ノード。
    pub fn build_function<F>(&mut self, spec: FunctionSpec, configure: F) -> IrResult<NodeId>
    where
        F: FnOnce(&mut BodyBuilder<'_, 'a>) -> IrResult<()>,
    {
        let fq_name = self.qualify(&spec.name);
        for (_, ty) in &spec.value_parameters {
            self.ctx.builtins.resolve(ty)?;
        }
        let symbol = Symbol::new(
            fq_name.clone(),
            SymbolKind::Function,
            spec.value_parameters.iter().map(|(_, ty)| ty.clone()).collect(),
            spec.return_type.clone(),
        );

        let function = self.create(
            NodeKind::Function {
                symbol: symbol.clone(),
                visibility: spec.visibility,
                modality: spec.modality,
            },
            spec.name.clone(),
            spec.return_type.clone(),
        )?;
        let parameters = self.add_value_parameters(function, &fq_name, &spec.value_parameters)?;
        let body = self.build_body(&symbol, parameters, configure)?;
        self.tree.append_child(function, body)?;

        log::debug!("built function {}", fq_name);
        Ok(function)
    }

    /// アクセサを持たないプロパティ宣言を構築する（未接続）
    pub fn build_property(&mut self, spec: PropertySpec) -> IrResult<NodeId> {
        let fq_name = self.qualify(&spec.name);
        let symbol = Symbol::new(fq_name.clone(), SymbolKind::Property, Vec::new(), spec.ty.clone());
        let property = self.create(
            NodeKind::Property {
                symbol,
                visibility: spec.visibility,
                modality: spec.modality,
                is_var: spec.is_var,
            },
            spec.name,
            spec.ty,
        )?;

        log::debug!("built property {}", fq_name);
        Ok(property)
    }

    fn property_info(&self, property: NodeId) -> IrResult<PropertyInfo> {
        let node = self.tree.node(property)?;
        match node.kind() {
            NodeKind::Property { symbol, is_var, .. } => Ok(PropertyInfo {
                symbol: symbol.clone(),
                name: node.name().clone(),
                ty: node.ty().clone(),
                is_var: *is_var,
            }),
            _ => Err(IrError::invariant(format!(
                "node #{} is not a property",
                property.index()
            ))),
        }
    }

    /// 既存のアクセサは置き換えない
    fn expect_no_accessor(&self, property: NodeId, tag: NodeTag) -> IrResult<()> {
        match self.tree.find_child(property, tag)? {
            Some(existing) => Err(IrError::invariant(format!(
                "property #{} already has a {} (#{})",
                property.index(),
                tag,
                existing.index()
            ))),
            None => Ok(()),
        }
    }

    /// ゲッターを構築してプロパティに接続する
    ///
    /// ゲッターはパラメータを持たず、プロパティの型を返す。
    /// すでにゲッターを持つプロパティには追加できない。
    pub fn add_getter<F>(&mut self, property: NodeId, configure: F) -> IrResult<NodeId>
    where
        F: FnOnce(&mut BodyBuilder<'_, 'a>) -> IrResult<()>,
    {
        let info = self.property_info(property)?;
        self.expect_no_accessor(property, NodeTag::Getter)?;
        let name = Name::getter_of(&info.name);
        let symbol = Symbol::new(self.qualify(&name), SymbolKind::Getter, Vec::new(), info.ty.clone());

        let getter = self.create(
            NodeKind::Getter {
                symbol: symbol.clone(),
                corresponding_property: info.symbol,
            },
            name,
            info.ty,
        )?;
        let body = self.build_body(&symbol, Vec::new(), configure)?;
        self.tree.append_child(getter, body)?;
        self.tree.append_child(property, getter)?;
        Ok(getter)
    }

    /// セッターを構築してプロパティに接続する
    ///
    /// セッターはインデックス0に `value` パラメータを1つだけ持ち、Unitを返す。
    /// `configure` にはその `value` パラメータが渡される。
    /// すでにセッターを持つプロパティには追加できない。
    pub fn add_setter<F>(&mut self, property: NodeId, configure: F) -> IrResult<NodeId>
    where
        F: FnOnce(&mut BodyBuilder<'_, 'a>, NodeId) -> IrResult<()>,
    {
        let info = self.property_info(property)?;
        if !info.is_var {
            return Err(IrError::invariant(format!(
                "read-only property {} cannot have a setter",
                info.name
            )));
        }
        self.expect_no_accessor(property, NodeTag::Setter)?;

        let name = Name::setter_of(&info.name);
        let fq_name = self.qualify(&name);
        let unit = self.ctx.builtins.unit_type();
        let symbol = Symbol::new(
            fq_name.clone(),
            SymbolKind::Setter,
            vec![info.ty.clone()],
            unit.clone(),
        );

        let setter = self.create(
            NodeKind::Setter {
                symbol: symbol.clone(),
                corresponding_property: info.symbol,
            },
            name,
            unit,
        )?;
        let parameters =
            self.add_value_parameters(setter, &fq_name, &[(Name::identifier("value"), info.ty)])?;
        let value = parameters[0];
        let body = self.build_body(&symbol, parameters, |body| configure(body, value))?;
        self.tree.append_child(setter, body)?;
        self.tree.append_child(property, setter)?;
        Ok(setter)
    }
}
