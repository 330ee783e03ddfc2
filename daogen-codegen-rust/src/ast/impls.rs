//! Rust impl block builder.

use daogen_codegen::{CodeFragment, Renderable};

use super::Fn;

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    generics: Option<String>,
    trait_name: Option<String>,
    items: Vec<Vec<CodeFragment>>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generics: None,
            trait_name: None,
            items: Vec::new(),
        }
    }

    /// Generic parameters, e.g. `X: QueryExecutor` for `impl<X: QueryExecutor>`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    /// An associated type, e.g. `type Id = i32;`.
    pub fn assoc_type(mut self, name: &str, ty: &str) -> Self {
        self.items
            .push(vec![CodeFragment::Line(format!("type {} = {};", name, ty))]);
        self
    }

    /// Any other item, e.g. an associated constant.
    pub fn item(mut self, fragments: Vec<CodeFragment>) -> Self {
        self.items.push(fragments);
        self
    }

    /// Add a method. Methods of trait impls are rendered without `pub`, so
    /// call [`Impl::for_trait`] first.
    pub fn method(mut self, method: Fn) -> Self {
        let method = if self.trait_name.is_some() {
            method.private()
        } else {
            method
        };
        self.items.push(method.to_fragments());
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = Fn>) -> Self {
        for method in methods {
            self = self.method(method);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn format_header(&self) -> String {
        let generics = self
            .generics
            .as_ref()
            .map(|g| format!("<{}>", g))
            .unwrap_or_default();
        match &self.trait_name {
            Some(trait_name) => format!(
                "impl{} {} for {} {{",
                generics, trait_name, self.type_name
            ),
            None => format!("impl{} {} {{", generics, self.type_name),
        }
    }

    fn items_to_fragments(&self) -> Vec<CodeFragment> {
        self.items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| {
                let mut fragments = Vec::new();
                if i > 0 {
                    fragments.push(CodeFragment::Blank);
                }
                fragments.extend(item.iter().cloned());
                fragments
            })
            .collect()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            self.format_header(),
            self.items_to_fragments(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use daogen_codegen::builder::render;

    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_empty_impl() {
        assert_eq!(render(&Impl::new("Foo")), "impl Foo {\n}\n");
    }

    #[test]
    fn test_generic_trait_impl() {
        let i = render(
            &Impl::new("SomethingDao<X>")
                .generics("X: QueryExecutor")
                .method(Fn::new("count").param(Param::receiver("&self"))),
        );
        assert!(i.starts_with("impl<X: QueryExecutor> SomethingDao<X> {"));
        assert!(i.contains("    pub fn count(&self) {"));
    }

    #[test]
    fn test_trait_methods_are_not_pub() {
        let i = render(
            &Impl::new("Something")
                .for_trait("Default")
                .method(Fn::new("default").returns("Self").body_line("Self::new()")),
        );
        assert!(i.contains("    fn default() -> Self {"));
        assert!(!i.contains("pub fn"));
    }

    #[test]
    fn test_assoc_items() {
        let i = render(
            &Impl::new("Something")
                .for_trait("Identifiable")
                .assoc_type("Id", "i32")
                .item(vec![CodeFragment::block(
                    "const TABLE: TableMeta = TableMeta {",
                    vec![CodeFragment::line("name: \"something\",")],
                    Some("};".to_string()),
                )]),
        );
        assert_eq!(
            i,
            "impl Identifiable for Something {\n    type Id = i32;\n\n    const TABLE: TableMeta = TableMeta {\n        name: \"something\",\n    };\n}\n"
        );
    }
}
