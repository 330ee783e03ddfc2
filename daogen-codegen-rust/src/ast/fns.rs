//! Rust function and match builders.

use daogen_codegen::{CodeFragment, Renderable};

/// A parameter in a Rust function.
///
/// A parameter with an empty type renders as its name alone, which is how
/// receivers such as `&self` are written.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn receiver(receiver: impl Into<String>) -> Self {
        Self::new(receiver, "")
    }

    fn format(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// Builder for Rust functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    attrs: Vec<String>,
    is_public: bool,
    is_async: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

/// Parameter lists longer than this are written one per line.
const INLINE_PARAMS: usize = 3;

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
            is_async: false,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    /// Add a structured piece of the body.
    pub fn body_node(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    pub fn body_fragments(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signature as leading lines plus the final line, which ends at the
    /// return type.
    fn signature(&self) -> (Vec<CodeFragment>, String) {
        let vis = if self.is_public { "pub " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let ret = self
            .return_type
            .as_ref()
            .map(|ret| format!(" -> {}", ret))
            .unwrap_or_default();
        let params: Vec<String> = self.params.iter().map(Param::format).collect();

        if params.len() <= INLINE_PARAMS {
            let line = format!(
                "{}{}fn {}({}){}",
                vis,
                async_kw,
                self.name,
                params.join(", "),
                ret
            );
            return (Vec::new(), line);
        }
        let head = vec![
            CodeFragment::Line(format!("{}{}fn {}(", vis, async_kw, self.name)),
            CodeFragment::Indent(
                params
                    .into_iter()
                    .map(|param| CodeFragment::Line(format!("{},", param)))
                    .collect(),
            ),
        ];
        (head, format!("){}", ret))
    }

    fn doc_fragments(&self) -> Vec<CodeFragment> {
        self.doc
            .iter()
            .flat_map(|doc| doc.lines().map(CodeFragment::doc))
            .chain(
                self.attrs
                    .iter()
                    .map(|attr| CodeFragment::Line(format!("#[{}]", attr))),
            )
            .collect()
    }

    /// Fragments for a bodiless declaration, as required trait methods are written.
    pub fn declaration(&self) -> Vec<CodeFragment> {
        let (head, last) = self.signature();
        let mut fragments = self.doc_fragments();
        fragments.extend(head);
        fragments.push(CodeFragment::Line(format!("{};", last)));
        fragments
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let (head, last) = self.signature();
        let mut fragments = self.doc_fragments();
        fragments.extend(head);
        fragments.push(CodeFragment::braced(
            format!("{} {{", last),
            self.body.clone(),
        ));
        fragments
    }
}

/// One arm of a match expression.
#[derive(Debug, Clone)]
pub struct Arm {
    pattern: String,
    body: String,
}

impl Arm {
    pub fn new(pattern: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            body: body.into(),
        }
    }
}

/// A match expression with single-expression arms.
#[derive(Debug, Clone)]
pub struct Match {
    scrutinee: String,
    arms: Vec<Arm>,
}

impl Match {
    pub fn new(scrutinee: impl Into<String>) -> Self {
        Self {
            scrutinee: scrutinee.into(),
            arms: Vec::new(),
        }
    }

    pub fn arm(mut self, arm: Arm) -> Self {
        self.arms.push(arm);
        self
    }

    pub fn arms(mut self, arms: impl IntoIterator<Item = Arm>) -> Self {
        self.arms.extend(arms);
        self
    }
}

impl Renderable for Match {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let arms = self
            .arms
            .iter()
            .map(|arm| CodeFragment::Line(format!("{} => {},", arm.pattern, arm.body)))
            .collect();
        vec![CodeFragment::braced(
            format!("match {} {{", self.scrutinee),
            arms,
        )]
    }
}

#[cfg(test)]
mod tests {
    use daogen_codegen::builder::render;

    use super::*;

    #[test]
    fn test_fn_with_params() {
        let f = render(
            &Fn::new("add")
                .param(Param::new("a", "i32"))
                .param(Param::new("b", "i32"))
                .returns("i32")
                .body_line("a + b"),
        );
        assert_eq!(f, "pub fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n");
    }

    #[test]
    fn test_async_method() {
        let f = render(
            &Fn::new("count")
                .async_()
                .param(Param::receiver("&self"))
                .returns("DaoResult<u64>"),
        );
        assert!(f.starts_with("pub async fn count(&self) -> DaoResult<u64> {"));
    }

    #[test]
    fn test_attrs_follow_doc() {
        let f = render(
            &Fn::new("with_values")
                .doc("All columns.")
                .attr("allow(clippy::too_many_arguments)"),
        );
        assert!(f.starts_with(
            "/// All columns.\n#[allow(clippy::too_many_arguments)]\npub fn with_values() {"
        ));
    }

    #[test]
    fn test_long_parameter_list_breaks_per_line() {
        let f = render(
            &Fn::new("with_values")
                .param(Param::new("a", "Option<i32>"))
                .param(Param::new("b", "Option<String>"))
                .param(Param::new("c", "Option<bool>"))
                .param(Param::new("d", "Option<f64>"))
                .returns("Self")
                .body_line("todo!()"),
        );
        assert_eq!(
            f,
            "pub fn with_values(\n    a: Option<i32>,\n    b: Option<String>,\n    \
             c: Option<bool>,\n    d: Option<f64>,\n) -> Self {\n    todo!()\n}\n"
        );

        let three = render(
            &Fn::new("set")
                .param(Param::receiver("&mut self"))
                .param(Param::new("a", "i32"))
                .param(Param::new("b", "i32")),
        );
        assert!(three.starts_with("pub fn set(&mut self, a: i32, b: i32) {"));
    }

    #[test]
    fn test_long_declaration() {
        let f = Fn::new("build")
            .private()
            .param(Param::new("a", "i32"))
            .param(Param::new("b", "i32"))
            .param(Param::new("c", "i32"))
            .param(Param::new("d", "i32"));
        let rendered = render(&f.declaration());
        assert_eq!(
            rendered,
            "fn build(\n    a: i32,\n    b: i32,\n    c: i32,\n    d: i32,\n);\n"
        );
    }

    #[test]
    fn test_declaration() {
        let f = Fn::new("someid")
            .private()
            .doc("Value of `someid`.")
            .param(Param::receiver("&self"))
            .returns("Option<i32>");
        assert_eq!(
            f.declaration(),
            vec![
                CodeFragment::doc("Value of `someid`."),
                CodeFragment::line("fn someid(&self) -> Option<i32>;"),
            ]
        );
    }

    #[test]
    fn test_match() {
        let m = render(
            &Match::new("self")
                .arm(Arm::new("Status::Active", "\"ACTIVE\""))
                .arm(Arm::new("_", "unreachable!()")),
        );
        assert_eq!(
            m,
            "match self {\n    Status::Active => \"ACTIVE\",\n    _ => unreachable!(),\n}\n"
        );
    }
}
