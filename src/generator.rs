//! IR生成ドライバー
//!
//! コンパイル単位ごとに1回だけ呼び出され、参照の解決、新しい宣言の構築、
//! モジュールへの接続を順に行う。途中で失敗した場合は何も接続しない。

use serde::{Deserialize, Serialize};

use crate::builder::{FunctionSpec, IrBuilder, PropertySpec};
use crate::context::{PluginContext, PRINTLN};
use crate::diagnostics::{MessageCollector, Severity};
use crate::error::{IrError, IrResult};
use crate::ir::{AnnotationTag, FqName, IrTree, Name, NodeId, NodeTag, Symbol};
use crate::visitor::{walk, AnnotatedPropertyFinder, TreeDumper};

/// ホストコンパイラから呼び出される生成フック
///
/// コンパイル単位ごとに1回だけ呼び出される。
pub trait IrGenerationExtension {
    fn generate(&mut self, tree: &mut IrTree, ctx: &PluginContext) -> IrResult<()>;
}

/// ジェネレーターの設定
///
/// `string` と `file` は診断出力にのみ使われる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub string: String,
    pub file: String,
    /// 生成前に入力ツリーをダンプする
    pub dump_tree: bool,
}

/// `main` 関数と `test` プロパティを生成するジェネレーター
pub struct TemplateGenerator<C: MessageCollector> {
    collector: C,
    config: GeneratorConfig,
}

impl<C: MessageCollector> TemplateGenerator<C> {
    pub fn new(collector: C, config: GeneratorConfig) -> Self {
        Self { collector, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn collector(&self) -> &C {
        &self.collector
    }

    pub fn into_collector(self) -> C {
        self.collector
    }

    /// 入力ツリーのダンプとアノテーション付きプロパティの報告
    fn trace_input(&mut self, tree: &IrTree) {
        let mut dumper = TreeDumper::with_braces();
        match walk(tree, tree.root(), &mut dumper, &String::new()) {
            Ok(()) => self.collector.report(Severity::Logging, &dumper.finish()),
            Err(e) => self
                .collector
                .report(Severity::Warning, &format!("failed to dump the input tree: {}", e)),
        }

        let mut finder = AnnotatedPropertyFinder::new(AnnotationTag::SuspendProp);
        if walk(tree, tree.root(), &mut finder, &()).is_ok() {
            for prop in finder.found() {
                self.collector.report(
                    Severity::Logging,
                    &format!(
                        "prop found: {} with annotation {}? {}",
                        prop.name,
                        finder.tag(),
                        prop.annotated
                    ),
                );
            }
        }
    }

    /// 以前の実行で生成された `main` がすでに接続されていないか確認
    fn expect_not_generated(tree: &IrTree) -> IrResult<()> {
        for &child in tree.children(tree.root())? {
            let node = tree.node(child)?;
            if node.tag() == NodeTag::Function
                && node.name().as_str() == "main"
                && node.has_annotation(&AnnotationTag::Generated)
            {
                return Err(IrError::invariant(format!(
                    "module {} already contains generated declarations",
                    tree.node(tree.root())?.name()
                )));
            }
        }
        Ok(())
    }

    fn resolve_println(&self, ctx: &PluginContext) -> IrResult<Symbol> {
        let any_n = ctx.builtins.any_n_type();
        ctx.symbols.resolve(&FqName::new(PRINTLN), |symbol| {
            matches!(symbol.value_parameters(), [ty] if *ty == any_n)
        })
    }

    /// `fun main(): Unit {}`
    fn build_main(builder: &mut IrBuilder<'_>) -> IrResult<NodeId> {
        let unit = builder.context().builtins.unit_type();
        builder.build_function(FunctionSpec::new(Name::identifier("main"), unit), |_| Ok(()))
    }

    /// `var test: Int` （ゲッターは4を返し、セッターは値をprintlnに渡す）
    fn build_test_property(builder: &mut IrBuilder<'_>, println: &Symbol) -> IrResult<NodeId> {
        let int = builder.context().builtins.int_type();
        let property = builder.build_property(PropertySpec::var(Name::identifier("test"), int))?;

        builder.add_getter(property, |body| {
            let four = body.build_int(4)?;
            body.push_return(four)?;
            Ok(())
        })?;

        builder.add_setter(property, |body, value| {
            let arg = body.build_get(value)?;
            let call = body.build_call(println, vec![arg])?;
            body.push(call)
        })?;

        Ok(property)
    }
}

impl<C: MessageCollector> IrGenerationExtension for TemplateGenerator<C> {
    fn generate(&mut self, tree: &mut IrTree, ctx: &PluginContext) -> IrResult<()> {
        self.collector.report(
            Severity::Info,
            &format!("Argument 'string' = {}", self.config.string),
        );
        self.collector
            .report(Severity::Info, &format!("Argument 'file' = {}", self.config.file));

        if self.config.dump_tree {
            self.trace_input(tree);
        }

        Self::expect_not_generated(tree)?;
        let println = self.resolve_println(ctx)?;

        let declarations = {
            let mut builder = IrBuilder::new(ctx, tree);
            let main = Self::build_main(&mut builder)?;
            let test = Self::build_test_property(&mut builder, &println)?;
            for id in [main, test] {
                builder.annotate(id, AnnotationTag::Generated, Vec::new())?;
            }
            vec![main, test]
        };

        // すべての宣言が整合していることを確認してから接続する
        for &declaration in &declarations {
            tree.verify(declaration, &ctx.builtins)?;
        }
        let root = tree.root();
        for &declaration in &declarations {
            tree.append_child(root, declaration)?;
            log::debug!("attached {}", tree.render(declaration)?);
        }

        self.collector.report(
            Severity::Info,
            &format!("generated {} declarations", declarations.len()),
        );
        Ok(())
    }
}
