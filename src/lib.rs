//! IR Generation Toolkit
//!
//! This library provides an in-memory IR tree model together with the
//! building blocks a compiler generation plugin needs: symbol resolution,
//! a two-phase tree builder, a visitor engine and a generation driver.

pub mod builder;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod ir;
pub mod visitor;

// Re-export commonly used types
pub use builder::{BodyBuilder, FunctionSpec, IrBuilder, PropertySpec};
pub use context::PluginContext;
pub use diagnostics::{BufferedMessageCollector, LogMessageCollector, MessageCollector, Severity};
pub use error::{IrError, IrResult};
pub use generator::{GeneratorConfig, IrGenerationExtension, TemplateGenerator};
pub use ir::{IrTree, Name, NodeId, Symbol, SymbolTable};
pub use visitor::{walk, IrVisitor, Visit};
