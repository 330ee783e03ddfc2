//! Rust AST builders for generating structs, traits, enums, impls, and functions.
//!
//! Nodes implement [`Renderable`](daogen_codegen::Renderable), so they can be
//! emitted into a `CodeBuilder` or collected into a [`RustFile`](crate::RustFile).

mod enums;
mod fns;
mod impls;
mod structs;
mod traits;

pub use enums::{Enum, Variant};
pub use fns::{Arm, Fn, Match, Param};
pub use impls::Impl;
pub use structs::{Field, Struct};
pub use traits::Trait;
