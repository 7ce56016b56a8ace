pub mod consumer;
pub mod enums;
pub mod header;
pub mod helpers;
pub mod provider;
pub mod traits;

/* Re-export main public functions */
pub use consumer::emit_smart_pointer;
pub use enums::emit_enumeration;
pub use header::{emit_header, GENERATED_BANNER};
pub use provider::emit_impl_trait;
pub use traits::emit_interface_trait;
