//! Rust struct builder.

use daogen_codegen::{CodeFragment, Renderable};

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub is_public: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

/// Builder for Rust structs.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    generics: Option<String>,
    doc: Option<String>,
    derives: Vec<String>,
    fields: Vec<Field>,
    is_public: bool,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: None,
            doc: None,
            derives: Vec::new(),
            fields: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Generic parameters, e.g. `X` for `struct FooDao<X>`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn derives(mut self, derives: &[&str]) -> Self {
        self.derives.extend(derives.iter().map(|d| d.to_string()));
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    fn header(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        match &self.generics {
            Some(generics) => format!("{}struct {}<{}>", vis, self.name, generics),
            None => format!("{}struct {}", vis, self.name),
        }
    }

    fn fields_to_fragments(&self) -> Vec<CodeFragment> {
        self.fields
            .iter()
            .flat_map(|field| {
                let vis = if field.is_public { "pub " } else { "" };
                let mut fragments = Vec::new();
                if let Some(doc) = &field.doc {
                    fragments.push(CodeFragment::doc(doc));
                }
                fragments.push(CodeFragment::Line(format!(
                    "{}{}: {},",
                    vis, field.name, field.ty
                )));
                fragments
            })
            .collect()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.extend(doc.lines().map(CodeFragment::doc));
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.header())));
        } else {
            fragments.push(CodeFragment::braced(
                format!("{} {{", self.header()),
                self.fields_to_fragments(),
            ));
        }

        fragments
    }
}
