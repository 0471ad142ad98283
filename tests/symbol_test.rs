//! シンボル解決テスト
//!
//! 完全修飾名と条件による一意なシンボルの解決をテストする。

use irgen::ir::{FqName, IrBuiltIns, SymbolKind, SymbolTable};
use irgen::{IrError, PluginContext};

fn println_table(builtins: &IrBuiltIns) -> SymbolTable {
    let mut table = SymbolTable::new();
    let unit = builtins.unit_type();
    table.declare("std.io.println", SymbolKind::Function, vec![], unit.clone());
    table.declare(
        "std.io.println",
        SymbolKind::Function,
        vec![builtins.any_n_type()],
        unit.clone(),
    );
    table.declare(
        "std.io.println",
        SymbolKind::Function,
        vec![builtins.int_type()],
        unit,
    );
    table
}

#[test]
fn test_resolve_unique_match() {
    let builtins = IrBuiltIns::new();
    let table = println_table(&builtins);
    let any_n = builtins.any_n_type();

    let symbol = table
        .resolve(&FqName::new("std.io.println"), |s| {
            matches!(s.value_parameters(), [ty] if *ty == any_n)
        })
        .expect("exactly one overload takes Any?");

    assert_eq!(symbol.arity(), 1);
    assert_eq!(symbol.value_parameters()[0], any_n);
    assert_eq!(symbol.kind(), SymbolKind::Function);
    assert!(table
        .references(&FqName::new("std.io.println"))
        .contains(&symbol));
}

#[test]
fn test_resolve_zero_matches_is_unresolved() {
    let builtins = IrBuiltIns::new();
    let table = println_table(&builtins);

    let result = table.resolve(&FqName::new("std.io.println"), |s| s.arity() == 3);
    assert_eq!(
        result,
        Err(IrError::UnresolvedReference {
            name: "std.io.println".to_string()
        })
    );

    let result = table.resolve(&FqName::new("std.io.missing"), |_| true);
    assert!(matches!(result, Err(IrError::UnresolvedReference { .. })));
}

#[test]
fn test_resolve_many_matches_is_ambiguous() {
    let builtins = IrBuiltIns::new();
    let table = println_table(&builtins);

    let result = table.resolve(&FqName::new("std.io.println"), |s| s.arity() == 1);
    assert_eq!(
        result,
        Err(IrError::AmbiguousReference {
            name: "std.io.println".to_string(),
            candidates: 2,
        })
    );
}

#[test]
fn test_resolution_returns_same_symbol() {
    let ctx = PluginContext::with_stdlib();
    let name = FqName::new("std.io.print");
    let first = ctx.symbols.resolve(&name, |_| true).unwrap();
    let second = ctx.symbols.resolve(&name, |_| true).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.id(), second.id());
}
