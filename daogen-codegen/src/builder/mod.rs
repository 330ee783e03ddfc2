//! Structured document building.
//!
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`CodeBuilder`] - Renders fragments with indentation in one pass
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::{CodeBuilder, render};
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
