//! Interface Definition Model
//!
//! This crate contains the data structures describing a parsed
//! component-object interface library: libraries, enumerations,
//! interfaces, methods, arguments and their declared types.
//! It provides pure data structures without any file I/O or code
//! generation logic.

pub mod resolver;
pub mod types;
pub mod uuid;

// Re-export commonly used types at the crate root
pub use resolver::*;
pub use types::*;
pub use uuid::{CapeUuid, UuidParseError};
