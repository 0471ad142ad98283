//! 生成ドライバーテスト
//!
//! 空のモジュールへの宣言の追加、既存の子ノードの順序維持、
//! 参照解決の失敗時に何も接続されないこと、診断出力をテストする。

use irgen::ir::{
    AnnotationTag, IrBuiltIns, IrTree, Name, NodeKind, NodeTag, SymbolKind, SymbolTable,
};
use irgen::{
    BufferedMessageCollector, FunctionSpec, GeneratorConfig, IrBuilder, IrError,
    IrGenerationExtension, PluginContext, PropertySpec, Severity, TemplateGenerator,
};
use pretty_assertions::assert_eq;

fn run(
    tree: &mut IrTree,
    ctx: &PluginContext,
    config: GeneratorConfig,
) -> (Result<(), IrError>, BufferedMessageCollector) {
    let mut generator = TemplateGenerator::new(BufferedMessageCollector::new(), config);
    let result = generator.generate(tree, ctx);
    (result, generator.into_collector())
}

#[test]
fn test_generates_main_and_test_property() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();

    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    result.expect("generation should succeed");

    let children = tree.children(root).unwrap().to_vec();
    assert_eq!(children.len(), 2);

    let main = tree.node(children[0]).unwrap();
    assert_eq!(main.tag(), NodeTag::Function);
    assert_eq!(main.name().as_str(), "main");
    assert_eq!(main.ty(), &ctx.builtins.unit_type());
    assert!(main.has_annotation(&AnnotationTag::Generated));

    let test = tree.node(children[1]).unwrap();
    assert_eq!(test.tag(), NodeTag::Property);
    assert_eq!(test.name().as_str(), "test");
    assert_eq!(test.ty(), &ctx.builtins.int_type());
    assert!(matches!(test.kind(), NodeKind::Property { is_var: true, .. }));

    assert!(tree.verify(root, &ctx.builtins).is_ok());
}

#[test]
fn test_dump_renders_nesting() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    result.unwrap();

    let expected = "\
MODULE name:<main>
  FUN name:main visibility:public modality:final returnType:Unit @Generated
    BLOCK_BODY
  PROPERTY name:test visibility:public modality:final type:Int var @Generated
    GETTER name:<get-test> returnType:Int property:'test'
      BLOCK_BODY
        RETURN type:Nothing from:'<get-test>'
          CONST type:Int value=4
    SETTER name:<set-test> returnType:Unit property:'test'
      VALUE_PARAMETER name:value index:0 type:Int
      BLOCK_BODY
        CALL 'std.io.println' type:Unit
          GET_VAR 'value' type:Int
";
    assert_eq!(tree.dump(tree.root()).unwrap(), expected);
}

#[test]
fn test_appends_after_existing_declarations() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();

    let existing = {
        let mut builder = IrBuilder::new(&ctx, &mut tree);
        let unit = ctx.builtins.unit_type();
        builder
            .build_function(FunctionSpec::new(Name::identifier("existing"), unit), |_| Ok(()))
            .unwrap()
    };
    tree.append_child(root, existing).unwrap();

    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    result.unwrap();

    let names: Vec<String> = tree
        .children(root)
        .unwrap()
        .iter()
        .map(|&c| tree.node(c).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["existing", "main", "test"]);
}

#[test]
fn test_unresolved_println_attaches_nothing() {
    let ctx = PluginContext::new(IrBuiltIns::new(), SymbolTable::new());
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();

    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    assert_eq!(
        result,
        Err(IrError::UnresolvedReference {
            name: "std.io.println".to_string()
        })
    );
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn test_ambiguous_println_attaches_nothing() {
    let builtins = IrBuiltIns::new();
    let mut symbols = SymbolTable::new();
    for _ in 0..2 {
        symbols.declare(
            "std.io.println",
            SymbolKind::Function,
            vec![builtins.any_n_type()],
            builtins.unit_type(),
        );
    }
    let ctx = PluginContext::new(builtins, symbols);
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();

    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    assert!(matches!(
        result,
        Err(IrError::AmbiguousReference { candidates: 2, .. })
    ));
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn test_reports_arguments_and_input_dump() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();
    let property = {
        let mut builder = IrBuilder::new(&ctx, &mut tree);
        let int = ctx.builtins.int_type();
        let property = builder
            .build_property(PropertySpec::var(Name::identifier("counter"), int))
            .unwrap();
        builder
            .annotate(property, AnnotationTag::SuspendProp, vec![])
            .unwrap();
        property
    };
    tree.append_child(root, property).unwrap();

    let config = GeneratorConfig {
        string: "hello".to_string(),
        file: "main.kt".to_string(),
        dump_tree: true,
    };
    let (result, collector) = run(&mut tree, &ctx, config);
    result.unwrap();

    let infos: Vec<&str> = collector.with_severity(Severity::Info).collect();
    assert!(infos.contains(&"Argument 'string' = hello"));
    assert!(infos.contains(&"Argument 'file' = main.kt"));

    let traces: Vec<&str> = collector.with_severity(Severity::Logging).collect();
    assert!(traces
        .iter()
        .any(|m| m.starts_with("MODULE name:<main> {") && m.contains("PROPERTY name:counter")));
    assert!(traces.contains(&"prop found: counter with annotation SuspendProp? true"));
}

#[test]
fn test_dump_is_optional() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let (result, collector) = run(&mut tree, &ctx, GeneratorConfig::default());
    result.unwrap();
    assert_eq!(collector.with_severity(Severity::Logging).count(), 0);
}

#[test]
fn test_config_from_json() {
    let config: GeneratorConfig =
        serde_json::from_str(r#"{ "string": "s", "dump_tree": true }"#).unwrap();
    assert_eq!(
        config,
        GeneratorConfig {
            string: "s".to_string(),
            file: String::new(),
            dump_tree: true,
        }
    );
}

#[test]
fn test_json_dump_contains_generated_declarations() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let (result, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    result.unwrap();

    let view = tree.dump_node(tree.root()).unwrap();
    assert_eq!(view.children.len(), 2);
    assert_eq!(view.children[1].kind, "PROPERTY");
    assert_eq!(view.children[1].children[1].kind, "SETTER");

    let json = tree.dump_json(tree.root()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["children"][0]["name"], "main");
    assert_eq!(value["children"][1]["type"], "Int");
}

#[test]
fn test_second_run_is_rejected() {
    let ctx = PluginContext::with_stdlib();
    let mut tree = IrTree::new(Name::special("<main>"), &ctx.builtins);
    let root = tree.root();

    let (first, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    first.unwrap();
    let nodes = tree.len();

    let (second, _) = run(&mut tree, &ctx, GeneratorConfig::default());
    assert!(matches!(second, Err(IrError::InvariantViolation { .. })));
    assert_eq!(tree.children(root).unwrap().len(), 2);
    assert_eq!(tree.len(), nodes);
}
