//! ツリーを人間が読める文字列に変換するビジター

use std::fmt::Write;

use super::{IrVisitor, Visit};
use crate::ir::{IrTree, NodeId};

/// インデント文字列を子に引き継ぎながら各ノードを1行ずつ出力する
#[derive(Debug, Default)]
pub struct TreeDumper {
    out: String,
    braces: bool,
}

impl TreeDumper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 各ノードを `{` と `}` で囲んで出力する
    pub fn with_braces() -> Self {
        Self {
            out: String::new(),
            braces: true,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl IrVisitor for TreeDumper {
    type Data = String;

    fn visit_element(&mut self, tree: &IrTree, id: NodeId, indent: &String) -> Visit<String> {
        let line = tree
            .render(id)
            .unwrap_or_else(|e| format!("<malformed node: {}>", e));
        // Stringへの書き込みは失敗しない
        if self.braces {
            let _ = writeln!(self.out, "{}{} {{", indent, line);
        } else {
            let _ = writeln!(self.out, "{}{}", indent, line);
        }
        Visit::ContinueChildren(format!("  {}", indent))
    }

    fn leave_element(&mut self, _tree: &IrTree, _id: NodeId, indent: &String) {
        if self.braces {
            let _ = writeln!(self.out, "{}}}", indent);
        }
    }
}
