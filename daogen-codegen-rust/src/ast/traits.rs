//! Rust trait builder.

use daogen_codegen::{CodeFragment, Renderable};

use super::Fn;

/// A trait with required and default-bodied methods.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    doc: Option<String>,
    items: Vec<Vec<CodeFragment>>,
}

impl Trait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            items: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// A method without a body.
    pub fn required(mut self, method: Fn) -> Self {
        self.items.push(method.private().declaration());
        self
    }

    /// A method with a default body.
    pub fn provided(mut self, method: Fn) -> Self {
        self.items.push(method.private().to_fragments());
        self
    }
}

impl Renderable for Trait {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .doc
            .iter()
            .flat_map(|doc| doc.lines().map(CodeFragment::doc))
            .collect();

        let mut body = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            body.extend(item.iter().cloned());
        }
        fragments.push(CodeFragment::braced(
            format!("pub trait {} {{", self.name),
            body,
        ));
        fragments
    }
}
