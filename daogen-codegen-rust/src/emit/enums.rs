//! `enums.rs`: one Rust enum per database enum.

use daogen_codegen::CodeFragment;
use daogen_schema::EnumDescriptor;

use super::EmitContext;
use crate::ast::{Arm, Enum, Fn, Impl, Match, Param, Variant};
use crate::rust_file::RustFile;

pub(crate) fn enums_file(ctx: &EmitContext<'_>) -> String {
    let mut file = RustFile::new()
        .doc("Enums backed by string literals.")
        .use_stmt(ctx.runtime_use(&["EnumLiteral", "KeyValues", "SqlValue"]));

    for descriptor in ctx.schema.enums.values() {
        let name = ctx.naming.enum_name(&descriptor.name);
        let variants: Vec<(String, &str)> = descriptor
            .literals
            .iter()
            .map(|literal| (ctx.naming.variant_name(literal), literal.as_str()))
            .collect();

        file = file
            .add(enum_type(&name, descriptor, &variants))
            .add(literal_impl(&name, &variants))
            .add(sql_value_impl(&name))
            .add(key_values_impl(&name));
    }
    file.render()
}

fn enum_type(name: &str, descriptor: &EnumDescriptor, variants: &[(String, &str)]) -> Enum {
    variants.iter().fold(
        Enum::new(name)
            .doc(format!("Literals of the `{}` enum.", descriptor.name))
            .derives(&["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]),
        |e, (variant, literal)| e.variant(Variant::new(variant).doc(format!("`{}`", literal))),
    )
}

fn literal_impl(name: &str, variants: &[(String, &str)]) -> Impl {
    let literals = variants
        .iter()
        .map(|(_, literal)| format!("{:?}", literal))
        .collect::<Vec<_>>()
        .join(", ");

    let to_literal = Match::new("self").arms(variants.iter().map(|(variant, literal)| {
        Arm::new(format!("{}::{}", name, variant), format!("{:?}", literal))
    }));
    let from_literal = Match::new("literal")
        .arms(variants.iter().map(|(variant, literal)| {
            Arm::new(format!("{:?}", literal), format!("Some({}::{})", name, variant))
        }))
        .arm(Arm::new("_", "None"));

    Impl::new(name)
        .for_trait("EnumLiteral")
        .item(vec![CodeFragment::Line(format!(
            "const LITERALS: &'static [&'static str] = &[{}];",
            literals
        ))])
        .method(
            Fn::new("literal")
                .param(Param::receiver("&self"))
                .returns("&'static str")
                .body_node(to_literal),
        )
        .method(
            Fn::new("from_literal")
                .param(Param::new("literal", "&str"))
                .returns("Option<Self>")
                .body_node(from_literal),
        )
}

fn sql_value_impl(name: &str) -> Impl {
    Impl::new("SqlValue").for_trait(format!("From<{}>", name)).method(
        Fn::new("from")
            .param(Param::new("value", name))
            .returns("Self")
            .body_line("SqlValue::Text(value.literal().to_string())"),
    )
}

fn key_values_impl(name: &str) -> Impl {
    Impl::new(name).for_trait("KeyValues").method(
        Fn::new("key_values")
            .param(Param::receiver("&self"))
            .returns("Vec<SqlValue>")
            .body_line("vec![SqlValue::from(*self)]"),
    )
}
