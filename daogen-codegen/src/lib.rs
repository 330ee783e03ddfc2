//! Language-agnostic generation engine for daogen.
//!
//! # Module Organization
//!
//! - [`builder`] - Structured document building (CodeBuilder, CodeFragment, etc.)
//! - [`classify`] - Column type classification (TypeClassifier)
//! - [`keys`] - Identity shapes from primary keys (KeyResolver)
//! - [`accessors`] - Lookup accessor planning for DAOs
//! - [`naming`] - Naming strategy for wire fields and identifiers
//! - [`diagnostic`] - Diagnostic records and the sink passed through a run
//! - [`language`] - Traits implemented by target-language generators

pub mod accessors;
pub mod builder;
pub mod classify;
pub mod diagnostic;
pub mod keys;
pub mod language;
pub mod naming;

pub use accessors::{Cardinality, GeneratedAccessor, ParamShape, Predicate, plan_accessors};
pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use classify::{Classification, CustomMapping, CustomTypeHandler, JsonKind, TypeClassifier};
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use keys::{KeyResolver, KeyShape};
pub use language::{GenerateResult, LanguageCodegen, PreviewFile, TypeMapper};
pub use naming::{DefaultNaming, JsonFieldMapping, NamingStrategy, escape_identifier, json_mappings};
