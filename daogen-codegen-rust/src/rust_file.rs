//! Structured Rust source files: imports followed by body items.

use daogen_codegen::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    /// Create a use statement for a module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    /// Add a symbol to import from the module.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// Add multiple symbols to import.
    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [symbol] => format!("use {}::{};", self.module, symbol),
            symbols => format!("use {}::{{{}}};", self.module, symbols.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A Rust file organized into imports and body items.
#[derive(Debug, Default)]
pub struct RustFile {
    doc: Option<String>,
    uses: Vec<Use>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner module documentation (`//!`).
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        self.uses.push(use_stmt);
        self
    }

    pub fn use_stmts(mut self, uses: impl IntoIterator<Item = Use>) -> Self {
        self.uses.extend(uses);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add a body element that is rendered without a blank line before it.
    pub fn attach<R: Renderable>(mut self, node: R) -> Self {
        match self.body.last_mut() {
            Some(last) => last.extend(node.to_fragments()),
            None => self.body.push(node.to_fragments()),
        }
        self
    }

    /// Render with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::RUST);

        if let Some(doc) = &self.doc {
            for line in doc.lines() {
                if line.is_empty() {
                    builder.push_line("//!");
                } else {
                    builder.push_line(&format!("//! {}", line));
                }
            }
            if !self.uses.is_empty() || !self.body.is_empty() {
                builder.push_blank();
            }
        }

        for use_stmt in &self.uses {
            builder.emit(use_stmt);
        }

        if !self.uses.is_empty() && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty() && self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = RustFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_use_forms() {
        assert_eq!(Use::new("super::tables").format(), "use super::tables;");
        assert_eq!(
            Use::new("daogen_runtime").symbol("Dao").format(),
            "use daogen_runtime::Dao;"
        );
        assert_eq!(
            Use::new("daogen_runtime").symbols(["Dao", "DaoResult"]).format(),
            "use daogen_runtime::{Dao, DaoResult};"
        );
    }

    #[test]
    fn test_doc_uses_and_body() {
        let file = RustFile::new()
            .doc("Generated enums.")
            .use_stmt(Use::new("daogen_runtime").symbol("SqlValue"))
            .add(CodeFragment::line("pub struct A;"))
            .add(CodeFragment::line("pub struct B;"))
            .attach(CodeFragment::line("pub struct C;"));
        assert_eq!(
            file.render(),
            "//! Generated enums.\n\nuse daogen_runtime::SqlValue;\n\npub struct A;\n\npub struct B;\npub struct C;\n"
        );
    }
}
