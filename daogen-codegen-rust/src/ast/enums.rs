//! Rust enum builder.

use daogen_codegen::{CodeFragment, Renderable};

/// A unit variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derives(mut self, derives: &[&str]) -> Self {
        self.derives.extend(derives.iter().map(|d| d.to_string()));
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .flat_map(|variant| {
                let mut fragments = Vec::new();
                if let Some(doc) = &variant.doc {
                    fragments.push(CodeFragment::doc(doc));
                }
                fragments.push(CodeFragment::Line(format!("{},", variant.name)));
                fragments
            })
            .collect()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self
            .doc
            .iter()
            .flat_map(|doc| doc.lines().map(CodeFragment::doc))
            .collect();

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::Line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("pub enum {} {{", self.name),
                self.variants_to_fragments(),
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use daogen_codegen::builder::render;

    use super::*;

    #[test]
    fn test_enum_with_variants() {
        let e = render(
            &Enum::new("Status")
                .derives(&["Debug", "Clone", "Copy"])
                .variant(Variant::new("Active").doc("`ACTIVE`"))
                .variant(Variant::new("Inactive")),
        );
        assert_eq!(
            e,
            "#[derive(Debug, Clone, Copy)]\npub enum Status {\n    /// `ACTIVE`\n    Active,\n    Inactive,\n}\n"
        );
    }
}
