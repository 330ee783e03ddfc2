//! Core utilities and types for the daogen generator.
//!
//! This crate provides the file abstraction used to write generated sources
//! and the identifier helpers shared by the schema and codegen crates.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, GENERATED_HEADER, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{RUST_KEYWORDS, is_rust_keyword, to_pascal_case, to_snake_case};
