/* Helper utilities for Rust code generation */

use crate::classify::descriptor::{BasicKind, TypeDescriptor};
use crate::codegen::shared::ir::ArgumentIr;
use crate::options::RenderContext;
use cidl_types::CapeUuid;

/* Status code returned by trampolines and expected by accessors on success */
pub const NO_ERROR: &str = "COBIAERR_NOERROR";

/* Status code returned when a required pointer argument is null */
pub const NULL_POINTER: &str = "COBIAERR_NULLPOINTER";

/* Message used when a raw value does not match any enumeration item */
pub const INVALID_ENUMERATION: &str = "Invalid enumeration value";

/* `CapeUUID::from_slice(&[0x01u8,...])` */
pub fn uuid_literal(uuid: &CapeUuid) -> String {
    let bytes: Vec<String> = uuid.data.iter().map(|b| format!("0x{:02x}u8", b)).collect();
    format!("CapeUUID::from_slice(&[{}])", bytes.join(","))
}

/* Result payload: one value bare, otherwise a tuple (empty when there are none) */
pub fn return_shape(values: &[String]) -> String {
    if values.len() == 1 {
        values[0].clone()
    } else {
        format!("({})", values.join(","))
    }
}

/* Binding pattern mirroring `return_shape` */
pub fn binding_shape(names: &[String]) -> String {
    match names.len() {
        0 => "_".to_string(),
        1 => names[0].clone(),
        _ => format!("({})", names.join(",")),
    }
}

/* Type a return-bearing argument surfaces as */
pub fn return_type(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    match &arg.descriptor {
        TypeDescriptor::Basic(basic) => basic.rust_name(ctx),
        other => other.smart_name(ctx).unwrap_or_else(|| other.raw_name(ctx)),
    }
}

/// Structured type of a basic parameter.
///
/// An `[out]` enumeration that is not `[retval]` is written through a
/// caller-owned slot, so it keeps the raw ABI type on both sides.
pub fn basic_parameter_type(basic: &BasicKind, arg: &ArgumentIr, ctx: &RenderContext) -> String {
    if arg.is_out() {
        format!("&mut {}", basic.raw_name(ctx))
    } else {
        basic.rust_name(ctx)
    }
}

/* `if a.is_null()||b.is_null() {...}` guard, empty when nothing needs checking */
pub fn null_guard(names: &[&str], indent: &str) -> String {
    if names.is_empty() {
        return String::new();
    }
    let checks: Vec<String> = names.iter().map(|name| format!("{}.is_null()", name)).collect();
    format!(
        "{indent}if {} {{\n{indent}\treturn {};\n{indent}}}\n",
        checks.join("||"),
        NULL_POINTER,
        indent = indent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_literal_format() {
        let mut data = [0u8; 16];
        data[0] = 0xab;
        data[15] = 0x01;
        let literal = uuid_literal(&CapeUuid::from_bytes(data));
        assert!(literal.starts_with("CapeUUID::from_slice(&[0xabu8,0x00u8,"));
        assert!(literal.ends_with("0x01u8])"));
    }

    #[test]
    fn shapes() {
        assert_eq!(return_shape(&[]), "()");
        assert_eq!(return_shape(&["CapeReal".to_string()]), "CapeReal");
        assert_eq!(return_shape(&["A".to_string(), "B".to_string()]), "(A,B)");
        assert_eq!(binding_shape(&[]), "_");
        assert_eq!(binding_shape(&["_a".to_string(), "_b".to_string()]), "(_a,_b)");
    }

    #[test]
    fn null_guard_joins_checks() {
        assert_eq!(null_guard(&[], "\t\t"), "");
        assert_eq!(
            null_guard(&["a", "b"], "\t\t"),
            "\t\tif a.is_null()||b.is_null() {\n\t\t\treturn COBIAERR_NULLPOINTER;\n\t\t}\n"
        );
    }
}
