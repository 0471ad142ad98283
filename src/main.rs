use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use irgen::ir::{AnnotationTag, FqName, IrTree, Name};
use irgen::{
    GeneratorConfig, IrBuilder, IrGenerationExtension, LogMessageCollector, PluginContext,
    PropertySpec, TemplateGenerator,
};

#[derive(Parser)]
#[command(name = "irgen")]
#[command(author, version, about = "IR generation plugin driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DumpFormat {
    /// Indented text, one node per line (default)
    #[value(name = "text")]
    Text,
    /// Pretty-printed JSON
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the generator over a module and dump the result
    Generate {
        /// Free-form string argument, reported as a diagnostic
        #[arg(long, default_value = "")]
        string: String,

        /// Free-form file argument, reported as a diagnostic
        #[arg(long, default_value = "")]
        file: String,

        /// Load the generator configuration from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dump the incoming tree before generation
        #[arg(long)]
        dump_tree: bool,

        /// Start from a sample module instead of an empty one
        #[arg(long)]
        sample: bool,

        /// Output format of the final tree
        #[arg(long = "format", value_enum, default_value = "text")]
        format: DumpFormat,
    },

    /// List the declarations known to the stdlib symbol table
    Symbols {
        /// Only show overloads of this fully-qualified name
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Generate {
            string,
            file,
            config,
            dump_tree,
            sample,
            format,
        } => load_config(config, string, file, dump_tree)
            .and_then(|config| generate(config, sample, format)),
        Commands::Symbols { name } => symbols(name),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Merge the optional config file with the command line flags
fn load_config(
    path: Option<PathBuf>,
    string: String,
    file: String,
    dump_tree: bool,
) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid generator config: {:?}", path))?
        }
        None => GeneratorConfig::default(),
    };

    if !string.is_empty() {
        config.string = string;
    }
    if !file.is_empty() {
        config.file = file;
    }
    config.dump_tree |= dump_tree;
    Ok(config)
}

/// A module with one `@SuspendProp var counter: Int` property
fn sample_module(ctx: &PluginContext) -> Result<IrTree> {
    let mut tree = IrTree::new(Name::special("<sample>"), &ctx.builtins);
    let root = tree.root();

    let property = {
        let mut builder = IrBuilder::new(ctx, &mut tree).in_package("sample");
        let int = builder.context().builtins.int_type();
        let property = builder.build_property(PropertySpec::var(Name::identifier("counter"), int))?;
        builder.add_getter(property, |body| {
            let zero = body.build_int(0)?;
            body.push_return(zero)?;
            Ok(())
        })?;
        builder.annotate(property, AnnotationTag::SuspendProp, Vec::new())?;
        property
    };
    tree.append_child(root, property)?;
    Ok(tree)
}

fn generate(config: GeneratorConfig, sample: bool, format: DumpFormat) -> Result<()> {
    let ctx = PluginContext::with_stdlib();
    let mut tree = if sample {
        sample_module(&ctx)?
    } else {
        IrTree::new(Name::special("<main>"), &ctx.builtins)
    };

    log::info!("Running generator (string={:?}, file={:?})", config.string, config.file);
    let mut generator = TemplateGenerator::new(LogMessageCollector, config);
    generator
        .generate(&mut tree, &ctx)
        .context("IR generation failed")?;

    println!("{}", "=== IR ===".blue().bold());
    let root = tree.root();
    match format {
        DumpFormat::Text => print!("{}", tree.dump(root)?),
        DumpFormat::Json => println!("{}", tree.dump_json(root)?),
    }
    println!("{}: generation finished", "success".green().bold());
    Ok(())
}

fn symbols(name: Option<String>) -> Result<()> {
    let ctx = PluginContext::with_stdlib();
    let names: Vec<FqName> = match name {
        Some(name) => vec![FqName::new(name)],
        None => vec![FqName::new("std.io.println"), FqName::new("std.io.print")],
    };

    for name in names {
        let overloads = ctx.symbols.references(&name);
        if overloads.is_empty() {
            anyhow::bail!("No declarations named {}", name);
        }
        for symbol in overloads {
            let params: Vec<String> = symbol
                .value_parameters()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!(
                "{} ({}): {}",
                symbol.fq_name().to_string().cyan(),
                params.join(", "),
                symbol.return_type()
            );
        }
    }
    Ok(())
}
