use super::helpers::uuid_literal;
use crate::codegen::shared::ir::LibraryIr;
use crate::naming::upper_case;
use crate::options::RenderContext;

pub const GENERATED_BANNER: &str = "// This file was generated by cidl2rs\n";

/* Banner, imports, and the library/category/interface identifiers */
pub fn emit_header(library: &LibraryIr, ctx: &RenderContext) -> String {
    let mut output = String::from(GENERATED_BANNER);

    if library.interfaces.is_empty() {
        output.push_str(&format!("use {}::CapeUUID;\n", ctx.support));
    } else {
        output.push_str(&format!("use {}::*;\n", ctx.support));
        output.push_str(&format!("use {}::cape_smart_pointer::CapeSmartPointer;\n", ctx.support));
        if library.has_generic_interfaces() {
            output.push_str("use std::marker::PhantomData;\n");
        }
    }
    if !library.enumerations.is_empty() {
        output.push_str("use std::fmt;\n");
        if library.has_bit_flags() {
            output.push_str("use bitflags::bitflags;\n");
        }
    }

    if !library.foreign_namespaces.is_empty() {
        output.push_str("\n//Foreign namespaces, must be imported by the including module:\n");
        for namespace in &library.foreign_namespaces {
            output.push_str(&format!("//  {}\n", namespace));
        }
    }

    output.push_str("\n//library ID\n");
    output.push_str(&format!("pub const LIBRARY_ID:CapeUUID={};\n", uuid_literal(&library.uuid)));

    if !library.categories.is_empty() {
        output.push_str("\n//Category IDs\n");
        for category in &library.categories {
            output.push_str(&format!(
                "pub const CATEGORYID_{}:CapeUUID={};\n",
                upper_case(&category.name),
                uuid_literal(&category.uuid)
            ));
        }
    }

    if !library.interfaces.is_empty() {
        output.push_str("\n//Interface IDs\n");
        for iface in &library.interfaces {
            output.push_str(&format!(
                "pub const {}:CapeUUID={};\n",
                iface.uuid_constant(),
                uuid_literal(&iface.uuid)
            ));
        }
    }

    output
}
