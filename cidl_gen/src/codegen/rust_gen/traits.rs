use super::helpers::{basic_parameter_type, return_shape, return_type};
use crate::classify::descriptor::TypeDescriptor;
use crate::codegen::shared::ir::{ArgumentIr, InterfaceIr, MethodIr};
use crate::options::RenderContext;

/* Capability contract implemented by providers */
pub fn emit_interface_trait(iface: &InterfaceIr, ctx: &RenderContext) -> String {
    let mut output = String::new();
    output.push_str(&format!("///{}\n///\n///{} interface\n///\n", iface.name, iface.name));
    output.push_str(&format!("pub trait {}{} {{\n", iface.name, iface.generic_params()));
    for method in &iface.methods {
        output.push_str(&emit_operation(method, ctx));
    }
    output.push_str("}\n\n");
    output
}

fn emit_operation(method: &MethodIr, ctx: &RenderContext) -> String {
    let mut signature = format!("\tfn {}(&mut self", method.rust_name);
    for arg in method.parameters() {
        signature.push_str(&format!(",{}:{}", arg.name, parameter_type(arg, ctx)));
    }
    let returns: Vec<String> = method.return_values().map(|arg| return_type(arg, ctx)).collect();
    signature.push_str(&format!(") -> Result<{},COBIAError>;\n", return_shape(&returns)));
    signature
}

/* Parameter type as seen by the provider */
fn parameter_type(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    match &arg.descriptor {
        TypeDescriptor::Basic(basic) => basic_parameter_type(basic, arg, ctx),
        TypeDescriptor::Data(data) => {
            let reference = if arg.is_out() { "&mut " } else { "&" };
            format!("{}{}", reference, data.surface_name(ctx, arg.direction))
        }
        other => other.smart_name(ctx).unwrap_or_else(|| other.raw_name(ctx)),
    }
}
