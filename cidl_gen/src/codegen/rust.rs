use crate::codegen::rust_gen::{
  emit_enumeration, emit_header, emit_impl_trait, emit_interface_trait, emit_smart_pointer,
};
use crate::codegen::shared::ir::LibraryIr;
use crate::options::RenderContext;
use tracing::debug;

/* Renders a resolved library into a single Rust source text */
pub struct RustCodeGenerator {
  context: RenderContext,
}

impl RustCodeGenerator {
  pub fn new(context: RenderContext) -> Self {
    Self { context }
  }

  pub fn emit_code(&self, library: &LibraryIr) -> String {
    let mut output = emit_header(library, &self.context);

    /* Enumerations, in declaration order */
    if !library.enumerations.is_empty() {
      output.push_str("\n//Enumerations\n\n");
      for enumeration in &library.enumerations {
        debug!("emitting enumeration {}", enumeration.name);
        output.push_str(&emit_enumeration(enumeration, &self.context));
      }
    }

    /* Interfaces: contract, provider side, consumer side */
    if !library.interfaces.is_empty() {
      output.push_str("\n//Interfaces\n\n");
      for iface in &library.interfaces {
        debug!("emitting interface {}", iface.name);
        output.push_str(&emit_interface_trait(iface, &self.context));
        output.push_str(&emit_impl_trait(iface, &self.context));
        output.push_str(&emit_smart_pointer(iface, &self.context));
      }
    }

    output
  }
}
