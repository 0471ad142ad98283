//! 生成パスに渡されるサービスコンテキスト
//!
//! 型ユニバースとシンボルテーブルをまとめたもの。各コンポーネントには
//! 明示的な引数として渡される。

use crate::ir::{FqName, IrBuiltIns, IrType, SymbolKind, SymbolTable};

/// 標準出力関数の完全修飾名
pub const PRINTLN: &str = "std.io.println";

/// ホストコンパイラが提供するサービス
#[derive(Debug, Clone, Default)]
pub struct PluginContext {
    pub builtins: IrBuiltIns,
    pub symbols: SymbolTable,
}

impl PluginContext {
    pub fn new(builtins: IrBuiltIns, symbols: SymbolTable) -> Self {
        Self { builtins, symbols }
    }

    /// 標準ライブラリの宣言を登録したコンテキスト
    ///
    /// `println` は複数のオーバーロードを持つため、名前だけでは解決できない。
    pub fn with_stdlib() -> Self {
        let builtins = IrBuiltIns::new();
        let mut symbols = SymbolTable::new();
        let unit = builtins.unit_type();
        let println = FqName::new(PRINTLN);

        let overloads: [Vec<IrType>; 5] = [
            vec![],
            vec![builtins.any_n_type()],
            vec![builtins.int_type()],
            vec![builtins.string_type()],
            vec![builtins.boolean_type()],
        ];
        for params in overloads {
            symbols.declare(println.clone(), SymbolKind::Function, params, unit.clone());
        }
        symbols.declare(
            "std.io.print",
            SymbolKind::Function,
            vec![builtins.any_n_type()],
            unit,
        );

        log::debug!("stdlib context initialised with {} symbols", symbols.len());
        Self { builtins, symbols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_println_overloads() {
        let ctx = PluginContext::with_stdlib();
        assert_eq!(ctx.symbols.references(&FqName::new(PRINTLN)).len(), 5);
        assert_eq!(ctx.symbols.len(), 6);
    }
}
