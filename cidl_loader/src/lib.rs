//! Interface Definition Model Loading
//!
//! This crate loads serialized interface-definition models from disk,
//! locates libraries referenced by name in the search path, and builds
//! the interface arity index used by the generator's type classifier.

pub mod file;
pub mod resolver;

// Re-export commonly used types at the crate root
pub use file::{LoadError, ModelLoader, SEARCH_PATH_ENV};
pub use resolver::ModelResolver;

// Re-export cidl_types for convenience
pub use cidl_types;
