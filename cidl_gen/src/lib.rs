//! Interface Definition to Rust Binding Compiler
//!
//! Classifies every argument of a parsed interface library, builds a
//! resolved declaration list, and renders it as Rust source: enumerations,
//! the provider-side interface traits with their ABI trampolines and
//! dispatch tables, and the consumer-side smart pointers.

pub mod classify;
pub mod codegen;
pub mod error;
pub mod naming;
pub mod options;

// Re-export commonly used items at the crate root
pub use codegen::shared::ir::LibraryIr;
pub use codegen::{build_ir, generate};
pub use error::{ClassifyError, GenError};
pub use naming::NamingTables;
pub use options::{GeneratorOptions, RenderContext};

// Re-export cidl_types for convenience
pub use cidl_types;
