pub mod rust;
pub mod rust_gen;
pub mod shared;

use crate::codegen::rust::RustCodeGenerator;
use crate::codegen::shared::builder::IrBuilder;
use crate::codegen::shared::ir::LibraryIr;
use crate::error::GenError;
use crate::naming::NamingTables;
use crate::options::GeneratorOptions;
use cidl_types::{InterfaceArityResolver, Library};
use tracing::info;

/// Resolves the first library into its declaration list.
///
/// Every other library only takes part in arity resolution through
/// `resolver`.
pub fn build_ir(
    libraries: &[Library],
    resolver: &dyn InterfaceArityResolver,
    tables: &NamingTables,
) -> Result<LibraryIr, GenError> {
    let library = libraries.first().ok_or(GenError::NoLibraries)?;
    IrBuilder::new(tables, resolver).build(library)
}

/// Generates the Rust bindings of the first library.
///
/// The whole text is built in memory; on error nothing is returned.
pub fn generate(
    libraries: &[Library],
    resolver: &dyn InterfaceArityResolver,
    tables: &NamingTables,
    options: &GeneratorOptions,
) -> Result<String, GenError> {
    let ir = build_ir(libraries, resolver, tables)?;
    let library = libraries.first().ok_or(GenError::NoLibraries)?;
    let generator = RustCodeGenerator::new(options.resolve(library));
    let code = generator.emit_code(&ir);
    info!(
        "generated {} enumeration(s) and {} interface(s) for library {}",
        ir.enumerations.len(),
        ir.interfaces.len(),
        ir.name
    );
    Ok(code)
}
