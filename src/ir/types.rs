//! 型定義と組み込み型ユニバース

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::name::FqName;
use crate::error::{IrError, IrResult};

/// IR上の型の表現
///
/// 型はクラス名（完全修飾名）とnull許容性の組で表す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IrType {
    pub classifier: FqName,
    pub nullable: bool,
}

impl IrType {
    pub fn new(classifier: impl Into<FqName>) -> Self {
        Self {
            classifier: classifier.into(),
            nullable: false,
        }
    }

    /// null許容版の型を返す
    pub fn make_nullable(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            nullable: true,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classifier.short_name())?;
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

const ANY: &str = "builtins.Any";
const UNIT: &str = "builtins.Unit";
const INT: &str = "builtins.Int";
const STRING: &str = "builtins.String";
const BOOLEAN: &str = "builtins.Boolean";
const NOTHING: &str = "builtins.Nothing";

/// 組み込み型ユニバース
///
/// ノードの型は構築時にここで解決できなければならない。
#[derive(Debug, Clone)]
pub struct IrBuiltIns {
    classes: IndexSet<FqName>,
}

impl Default for IrBuiltIns {
    fn default() -> Self {
        Self::new()
    }
}

impl IrBuiltIns {
    pub fn new() -> Self {
        let classes = [ANY, UNIT, INT, STRING, BOOLEAN, NOTHING]
            .into_iter()
            .map(FqName::new)
            .collect();
        Self { classes }
    }

    pub fn any_type(&self) -> IrType {
        IrType::new(ANY)
    }

    pub fn any_n_type(&self) -> IrType {
        IrType::new(ANY).make_nullable()
    }

    pub fn unit_type(&self) -> IrType {
        IrType::new(UNIT)
    }

    pub fn int_type(&self) -> IrType {
        IrType::new(INT)
    }

    pub fn string_type(&self) -> IrType {
        IrType::new(STRING)
    }

    pub fn boolean_type(&self) -> IrType {
        IrType::new(BOOLEAN)
    }

    pub fn nothing_type(&self) -> IrType {
        IrType::new(NOTHING)
    }

    /// ユーザー定義クラスを登録（ホストのフロントエンドが使用）
    pub fn register_class(&mut self, classifier: impl Into<FqName>) -> IrType {
        let classifier = classifier.into();
        self.classes.insert(classifier.clone());
        IrType {
            classifier,
            nullable: false,
        }
    }

    /// 型がこのユニバースで解決できるか確認
    pub fn resolve(&self, ty: &IrType) -> IrResult<()> {
        if self.classes.contains(&ty.classifier) {
            Ok(())
        } else {
            Err(IrError::unresolved(&ty.classifier))
        }
    }
}
