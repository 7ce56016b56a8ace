use super::helpers::{basic_parameter_type, return_shape, return_type, INVALID_ENUMERATION, NO_ERROR};
use crate::classify::descriptor::{turbofish, TypeDescriptor};
use crate::codegen::shared::ir::{ArgumentIr, InterfaceIr, MethodIr};
use crate::naming::{provider_type_param, to_snake_case};
use crate::options::RenderContext;

/// Emits the reference-counted handle used by consumers, with one accessor
/// per method dispatching through the raw vtable.
pub fn emit_smart_pointer(iface: &InterfaceIr, ctx: &RenderContext) -> String {
    let generic_params = iface.generic_params();
    let mut output = String::new();

    output.push_str(&format!("#[cape_smart_pointer({})]\n", iface.uuid_constant()));
    output.push_str(&format!("pub struct {}{} {{\n", iface.smart_name, generic_params));
    output.push_str(&format!(
        "\t{} interface: *mut {},\n",
        ctx.field_visibility(),
        ctx.native_path(&iface.name)
    ));
    for template_arg in &iface.template_args {
        output.push_str(&format!("\tphantom_{} : PhantomData<{}>,\n", to_snake_case(template_arg), template_arg));
    }
    output.push_str("}\n\n");

    output.push_str(&format!("impl{} {}{} {{\n\n", generic_params, iface.smart_name, iface.generic_args()));
    for method in &iface.methods {
        output.push_str(&emit_accessor(method, ctx));
    }
    output.push_str("}\n\n");
    output
}

fn emit_accessor(method: &MethodIr, ctx: &RenderContext) -> String {
    let mut type_params: Vec<String> = Vec::new();
    let mut params = String::new();
    for arg in method.parameters() {
        let param_type = match &arg.descriptor {
            TypeDescriptor::Data(data) => {
                let type_param = provider_type_param(&arg.name);
                type_params.push(format!("{}:{}", type_param, data.provider_name(arg.direction)));
                let reference = if arg.is_out() { "&mut " } else { "&" };
                format!("{}{}", reference, type_param)
            }
            TypeDescriptor::Basic(basic) => basic_parameter_type(basic, arg, ctx),
            other => format!("&{}", other.smart_name(ctx).unwrap_or_else(|| other.raw_name(ctx))),
        };
        params.push_str(&format!(",{}:{}", arg.name, param_type));
    }
    let generics = if type_params.is_empty() { String::new() } else { format!("<{}>", type_params.join(",")) };

    let returns: Vec<&ArgumentIr> = method.return_values().collect();
    let return_types: Vec<String> = returns.iter().map(|arg| return_type(arg, ctx)).collect();

    let mut output = format!(
        "\tpub fn {}{}(&self{}) -> Result<{},COBIAError> {{\n",
        method.rust_name,
        generics,
        params,
        return_shape(&return_types)
    );

    /* Local storage for every return-bearing output */
    for arg in &returns {
        let raw = arg.descriptor.raw_name(ctx);
        match &arg.descriptor {
            TypeDescriptor::Basic(basic) => output.push_str(&format!(
                "\t\tlet mut {}:{}={};\n",
                arg.name,
                raw,
                basic.init_value().unwrap_or("Default::default()")
            )),
            _ => output.push_str(&format!("\t\tlet mut {}: *mut {}=std::ptr::null_mut();\n", arg.name, raw)),
        }
    }

    let raw_args: String = method.arguments.iter().map(|arg| format!(",{}", raw_argument(arg, ctx))).collect();
    output.push_str("\t\tlet result_code = unsafe {\n");
    output.push_str(&format!(
        "\t\t\t((*(*self.interface).vTbl).{}.unwrap())((*self.interface).me{})\n",
        method.raw_slot, raw_args
    ));
    output.push_str("\t\t};\n");

    /* Transferred references are owned before any conversion can bail out */
    let prologue: String = returns
        .iter()
        .map(|arg| attachment(arg, ctx))
        .chain(returns.iter().map(|arg| conversion(arg, ctx)))
        .collect();
    let values: Vec<String> = returns.iter().map(|arg| arg.name.clone()).collect();
    output.push_str("\t\tmatch result_code {\n");
    if prologue.is_empty() {
        output.push_str(&format!("\t\t\t{} => Ok({}),\n", NO_ERROR, return_shape(&values)));
    } else {
        output.push_str(&format!("\t\t\t{} => {{\n", NO_ERROR));
        output.push_str(&prologue);
        output.push_str(&format!("\t\t\t\tOk({})\n", return_shape(&values)));
        output.push_str("\t\t\t},\n");
    }
    output.push_str("\t\t\t_ => Err(COBIAError::from_object(result_code,self))\n");
    output.push_str("\t\t}\n\t}\n\n");
    output
}

/* Raw-ABI form of one argument at the dispatch call */
fn raw_argument(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    let name = &arg.name;
    let raw = arg.descriptor.raw_name(ctx);
    match &arg.descriptor {
        TypeDescriptor::Data(data) => {
            format!("(&{}.{}() as *const {}).cast_mut()", name, data.to_raw_method(arg.direction), raw)
        }
        TypeDescriptor::Basic(_) if arg.retval => format!("&mut {} as *mut {}", name, raw),
        TypeDescriptor::Basic(_) if arg.is_out() => format!("{} as *mut {}", name, raw),
        TypeDescriptor::Basic(basic) if basic.is_window_id() => {
            format!("{}({})", ctx.support_path("CapeWindowIdToRaw"), name)
        }
        TypeDescriptor::Basic(basic) => format!("{}{}", name, basic.to_raw_suffix(ctx)),
        _ if arg.is_out() => format!("&mut {} as *mut *mut {}", name, raw),
        _ => format!("{}.as_interface_pointer() as *mut {}", name, raw),
    }
}

/* Takes ownership of the reference an interface output carries */
fn attachment(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    let name = &arg.name;
    match &arg.descriptor {
        TypeDescriptor::Object(object) => {
            format!("\t\t\t\tlet {name}={}::attach({name});\n", turbofish(&object.smart_name(ctx)))
        }
        TypeDescriptor::TemplateArgument(_) => {
            format!("\t\t\t\tlet {name}={}::attach({name});\n", ctx.support_path("CapeObject"))
        }
        _ => String::new(),
    }
}

/* Validating conversions run once the call succeeded */
fn conversion(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    let name = &arg.name;
    match &arg.descriptor {
        TypeDescriptor::Basic(basic) => match basic.unpacked_enumeration() {
            Some(_) => format!(
                "\t\t\t\tlet {name}=match {}::from({name}) {{\n\t\t\t\t\tSome(_{name}) => _{name},\n\t\t\t\t\tNone => {{return Err(COBIAError::Message(\"{}\".to_string()));}}\n\t\t\t\t}};\n",
                basic.rust_name(ctx),
                INVALID_ENUMERATION
            ),
            None => String::new(),
        },
        TypeDescriptor::TemplateArgument(parameter) => format!(
            "\t\t\t\tlet {name}=match {}::from_object(&{name}) {{\n\t\t\t\t\tOk(_{name}) => _{name},\n\t\t\t\t\tErr(e) => {{return Err(e);}}\n\t\t\t\t}};\n",
            parameter.name
        ),
        _ => String::new(),
    }
}
