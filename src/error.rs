//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、IR生成パス全体で使用されるエラー型を提供します。
//! いずれのエラーも生成パスを即座に中断させ、部分的な出力は残しません。

use thiserror::Error;

/// IR生成の統一エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// 条件に一致するシンボル（または型）が存在しない
    #[error("未解決の参照: {name}")]
    UnresolvedReference { name: String },

    /// 条件に一致するシンボルが複数存在する
    #[error("曖昧な参照: {name} に一致する宣言が{candidates}個あります")]
    AmbiguousReference { name: String, candidates: usize },

    /// 呼び出しの引数の数が宣言と一致しない
    #[error("引数の数が一致しません: {callee} は{expected}個を期待しましたが、{found}個が渡されました")]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    /// ツリー構造の不変条件違反
    #[error("IRの不変条件違反: {message}")]
    InvariantViolation { message: String },
}

impl IrError {
    pub fn unresolved(name: impl ToString) -> Self {
        IrError::UnresolvedReference {
            name: name.to_string(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        IrError::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Result型のエイリアス
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = IrError::ArityMismatch {
            callee: "std.io.println".to_string(),
            expected: 1,
            found: 2,
        };
        assert!(err.to_string().contains("std.io.println"));

        let err = IrError::invariant("node already has a parent");
        assert!(matches!(err, IrError::InvariantViolation { .. }));
        assert!(err.to_string().contains("node already has a parent"));
    }
}
