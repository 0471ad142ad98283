//! シンボルテーブルおよび参照解決

use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::name::FqName;
use super::types::IrType;
use crate::error::{IrError, IrResult};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// シンボルの一意なID（プロセス全体で重複しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u64);

impl SymbolId {
    fn fresh() -> Self {
        SymbolId(NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// シンボルが指す宣言の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Property,
    Getter,
    Setter,
    ValueParameter,
}

#[derive(Debug)]
struct SymbolInfo {
    id: SymbolId,
    fq_name: FqName,
    kind: SymbolKind,
    value_parameters: Vec<IrType>,
    return_type: IrType,
}

/// 宣言へのハンドル
///
/// 不変で、複製しても同じ宣言を指す。等価性はIDで判定する。
#[derive(Debug, Clone)]
pub struct Symbol(Arc<SymbolInfo>);

impl Symbol {
    pub fn new(
        fq_name: FqName,
        kind: SymbolKind,
        value_parameters: Vec<IrType>,
        return_type: IrType,
    ) -> Self {
        Symbol(Arc::new(SymbolInfo {
            id: SymbolId::fresh(),
            fq_name,
            kind,
            value_parameters,
            return_type,
        }))
    }

    pub fn id(&self) -> SymbolId {
        self.0.id
    }

    pub fn fq_name(&self) -> &FqName {
        &self.0.fq_name
    }

    pub fn kind(&self) -> SymbolKind {
        self.0.kind
    }

    /// 値パラメータの型
    pub fn value_parameters(&self) -> &[IrType] {
        &self.0.value_parameters
    }

    pub fn return_type(&self) -> &IrType {
        &self.0.return_type
    }

    /// 宣言されたパラメータ数
    pub fn arity(&self) -> usize {
        self.0.value_parameters.len()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.fq_name)
    }
}

/// 完全修飾名からシンボルへのテーブル
///
/// 生成パスの開始前に構築され、以降は読み取り専用で使われる。
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<FqName, Vec<Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい宣言を登録してそのシンボルを返す
    pub fn declare(
        &mut self,
        fq_name: impl Into<FqName>,
        kind: SymbolKind,
        value_parameters: Vec<IrType>,
        return_type: IrType,
    ) -> Symbol {
        let symbol = Symbol::new(fq_name.into(), kind, value_parameters, return_type);
        self.insert(symbol.clone());
        symbol
    }

    /// 既存のシンボルを登録（同一シンボルの重複登録は無視）
    pub fn insert(&mut self, symbol: Symbol) {
        let overloads = self.symbols.entry(symbol.fq_name().clone()).or_default();
        if !overloads.contains(&symbol) {
            overloads.push(symbol);
        }
    }

    /// 名前に一致するすべてのオーバーロード
    pub fn references(&self, fq_name: &FqName) -> &[Symbol] {
        self.symbols
            .get(fq_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 名前と条件に一致する唯一のシンボルを解決する
    pub fn resolve<P>(&self, fq_name: &FqName, predicate: P) -> IrResult<Symbol>
    where
        P: Fn(&Symbol) -> bool,
    {
        let mut candidates = self
            .references(fq_name)
            .iter()
            .filter(|symbol| predicate(symbol));

        match (candidates.next(), candidates.count()) {
            (None, _) => Err(IrError::unresolved(fq_name)),
            (Some(symbol), 0) => {
                log::debug!("resolved {} to {:?}", fq_name, symbol.id());
                Ok(symbol.clone())
            }
            (Some(_), rest) => Err(IrError::AmbiguousReference {
                name: fq_name.to_string(),
                candidates: rest + 1,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
