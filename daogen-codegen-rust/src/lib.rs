//! Rust target for daogen.
//!
//! [`Generator`] turns a [`SchemaDescriptor`](daogen_schema::SchemaDescriptor)
//! into entity structs, shared-interface traits, backing records and DAOs
//! that run on `daogen_runtime`.

mod emit;
mod generator;
mod rust_file;
mod type_mapper;

pub mod ast;

pub use ast::{Arm, Enum, Field, Fn, Impl, Match, Param, Struct, Trait, Variant};
pub use daogen_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::{Generator, Output};
pub use rust_file::{RustFile, Use};
pub use type_mapper::{Access, RustTypeMapper};
