use super::helpers::{binding_shape, null_guard, INVALID_ENUMERATION, NO_ERROR};
use crate::classify::descriptor::{turbofish, TypeDescriptor};
use crate::codegen::shared::ir::{ArgumentIr, InterfaceIr, MethodIr};
use crate::options::RenderContext;

/* Reference-count/query/error slots every vtable starts with */
const BASE_SLOTS: &[(&str, &str)] = &[
    ("addReference", "raw_add_reference"),
    ("release", "raw_release"),
    ("queryInterface", "raw_query_interface"),
    ("getLastError", "raw_get_last_error"),
];

/// Emits `<Interface>Impl`: registration, one trampoline per method, and the
/// static dispatch table installed by `init_interface`.
pub fn emit_impl_trait(iface: &InterfaceIr, ctx: &RenderContext) -> String {
    let impl_name = format!("{}Impl", iface.name);
    let generic_args = iface.generic_args();
    let native = ctx.native_path(&iface.name);
    let raw_interface = ctx.support_raw("ICapeInterface");

    let mut output = String::new();
    output.push_str(&format!(
        "pub trait {}{} : {}{} {{\n",
        impl_name,
        iface.generic_params(),
        iface.name,
        generic_args
    ));
    output.push_str(&format!("\ttype T: ICapeInterfaceImpl+{}{};\n\n", impl_name, generic_args));
    output.push_str(&format!("\tfn as_interface_pointer(&mut self) -> *mut {};\n\n", raw_interface));

    output.push_str(&format!(
        "\t///prepare {}_{} interface and return as generic ICapeInterface pointer\n",
        ctx.native_namespace, iface.name
    ));
    output.push_str(&format!("\tfn init_interface() -> {} {{\n", raw_interface));
    output.push_str(&format!("\t\t{} {{\n", raw_interface));
    output.push_str("\t\t\tme: std::ptr::null_mut(),\n");
    output.push_str(&format!("\t\t\tvTbl: (&Self::T::VTABLE as *const {}_VTable).cast_mut()\n", native));
    output.push_str(&format!("\t\t\t\tas *mut {},\n", ctx.support_raw("ICapeInterface_VTable")));
    output.push_str("\t\t}\n\t}\n\t\n");

    output.push_str(&format!(
        "\tfn init<Timpl: {}{}+ICapeInterfaceImpl>(u: &mut Timpl) {{\n",
        impl_name, generic_args
    ));
    output.push_str(&format!("\t\tlet iface: *mut {} =\n", native));
    output.push_str(&format!("\t\t\tu.as_interface_pointer() as *mut {};\n", native));
    output.push_str("\t\tunsafe { (*iface).me = u.get_self() as *const Timpl as *mut std::ffi::c_void };\n");
    output.push_str("\t\tu.add_interface(\n");
    output.push_str(&format!("\t\t\tstd::ptr::addr_of!({}_UUID),\n", native));
    output.push_str(&format!("\t\t\tiface as *mut {},\n", raw_interface));
    output.push_str("\t\t);\n\t}\n\t\n");

    for method in &iface.methods {
        output.push_str(&emit_trampoline(iface, method, ctx));
    }

    output.push_str(&format!("\tconst VTABLE: {}_VTable =\n", native));
    output.push_str(&format!("\t\t{}_VTable {{\n", native));
    output.push_str(&format!("\t\t\tbase: {} {{\n", ctx.support_raw("ICapeInterface_VTable")));
    for (slot, symbol) in BASE_SLOTS {
        output.push_str(&format!("\t\t\t\t{}: Some(Self::T::{}),\n", slot, symbol));
    }
    output.push_str("\t\t\t},\n");
    for method in &iface.methods {
        output.push_str(&format!("\t\t\t{}: Some(Self::T::{}),\n", method.raw_slot, method.native_symbol));
    }
    output.push_str("\t\t};\n");
    output.push_str("}\n\n");
    output
}

fn emit_trampoline(iface: &InterfaceIr, method: &MethodIr, ctx: &RenderContext) -> String {
    let context = method.error_context(iface);
    let mut output = format!("\textern \"C\" fn {}(me: *mut std::ffi::c_void", method.native_symbol);

    let mut guarded: Vec<&str> = Vec::new();
    for arg in &method.arguments {
        let raw = arg.descriptor.raw_name(ctx);
        let raw_type = match &arg.descriptor {
            TypeDescriptor::Basic(_) if arg.is_out() => format!("*mut {}", raw),
            TypeDescriptor::Basic(_) => raw,
            TypeDescriptor::Data(_) => format!("*mut {}", raw),
            _ if arg.is_out() => format!("*mut *mut {}", raw),
            _ => format!("*mut {}", raw),
        };
        if arg.is_out() || arg.descriptor.is_object_like() {
            guarded.push(&arg.name);
        }
        output.push_str(&format!(",{}:{}", arg.name, raw_type));
    }
    output.push_str(&format!(") -> {} {{\n", ctx.support_raw("CapeResult")));

    output.push_str(&null_guard(&guarded, "\t\t"));
    output.push_str("\t\tlet p = me as *mut Self::T;\n");
    output.push_str("\t\tlet myself=unsafe { &mut *p };\n");
    for arg in &method.arguments {
        output.push_str(&prelude(arg, &context, ctx));
    }

    let call_args: Vec<String> = method.parameters().map(|arg| call_argument(arg, ctx)).collect();
    output.push_str(&format!("\t\tmatch myself.{}({}) {{\n", method.rust_name, call_args.join(",")));

    let outputs: Vec<&ArgumentIr> = method
        .parameters()
        .filter(|arg| arg.is_out() && matches!(arg.descriptor, TypeDescriptor::Basic(_)))
        .collect();
    let returns: Vec<&ArgumentIr> = method.return_values().collect();
    if outputs.is_empty() && returns.is_empty() {
        output.push_str(&format!("\t\t\tOk(_) => {},\n", NO_ERROR));
    } else {
        let bindings: Vec<String> = returns.iter().map(|arg| format!("_{}", arg.name)).collect();
        output.push_str(&format!("\t\t\tOk({}) => {{\n", binding_shape(&bindings)));
        for arg in &outputs {
            output.push_str(&format!("\t\t\t\tunsafe{{*{}=_{};}}\n", arg.name, arg.name));
        }
        for arg in &returns {
            output.push_str(&format!(
                "\t\t\t\tunsafe{{*{}=_{}{};}}\n",
                arg.name,
                arg.name,
                write_back_suffix(arg, ctx)
            ));
        }
        output.push_str(&format!("\t\t\t\t{}\n\t\t\t}},\n", NO_ERROR));
    }
    output.push_str(&format!("\t\t\tErr(e) => myself.set_last_error(e,\"{}\")\n", context));
    output.push_str("\t\t}\n\t}\n\n");
    output
}

/* Rebuilds the structured form of one raw argument before the call */
fn prelude(arg: &ArgumentIr, context: &str, ctx: &RenderContext) -> String {
    let name = &arg.name;
    match &arg.descriptor {
        TypeDescriptor::Data(data) => {
            let surface = turbofish(&data.surface_name(ctx, arg.direction));
            if arg.is_out() {
                let raw = data.raw_name(ctx);
                format!(
                    "\t\tlet mut {name}=unsafe{{*((&{name} as *const *mut {raw}) as *mut *mut {raw})}};\n\t\tlet mut {name}={surface}::new(&mut {name});\n"
                )
            } else {
                format!("\t\tlet {name}={surface}::new(&{name});\n")
            }
        }
        TypeDescriptor::Object(object) if !arg.is_out() => {
            format!("\t\tlet {}={}::from_interface_pointer({});\n", name, turbofish(&object.smart_name(ctx)), name)
        }
        TypeDescriptor::TemplateArgument(parameter) if !arg.is_out() => {
            let object = ctx.support_path("CapeObject");
            format!(
                "\t\tlet {name}=match {}::from_object(&{object}::from_interface_pointer({name})) {{\n\t\t\tOk(_{name}) => _{name},\n\t\t\tErr(e) => {{return myself.set_last_error(e,\"{context}\");}}\n\t\t}};\n",
                parameter.name
            )
        }
        TypeDescriptor::Basic(_) if arg.is_return_value() => String::new(),
        TypeDescriptor::Basic(basic) if arg.is_out() => format!(
            "\t\tlet mut _{}:{}={};\n",
            name,
            basic.raw_name(ctx),
            basic.init_value().unwrap_or("Default::default()")
        ),
        TypeDescriptor::Basic(basic) => match basic.unpacked_enumeration() {
            Some(_) => format!(
                "\t\tlet {name}=match {}::from({name}) {{\n\t\t\tSome(_{name}) => _{name},\n\t\t\tNone => {{return myself.set_last_error(COBIAError::Message(\"{}\".to_string()),\"{context}\");}}\n\t\t}};\n",
                basic.rust_name(ctx),
                INVALID_ENUMERATION
            ),
            None => String::new(),
        },
        _ => String::new(),
    }
}

/* Argument passed to the provider's operation */
fn call_argument(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    match &arg.descriptor {
        TypeDescriptor::Basic(_) if arg.is_out() => format!("&mut _{}", arg.name),
        TypeDescriptor::Basic(basic) if basic.is_window_id() => {
            format!("{}({})", ctx.support_path("CapeWindowIdFromRaw"), arg.name)
        }
        TypeDescriptor::Data(_) if arg.is_out() => format!("&mut {}", arg.name),
        TypeDescriptor::Data(_) => format!("&{}", arg.name),
        _ => arg.name.clone(),
    }
}

/* Conversion applied when storing a returned value through its raw pointer */
fn write_back_suffix(arg: &ArgumentIr, ctx: &RenderContext) -> String {
    match &arg.descriptor {
        TypeDescriptor::Basic(basic) => basic.to_raw_suffix(ctx),
        TypeDescriptor::Object(_) => ".detach()".to_string(),
        TypeDescriptor::TemplateArgument(_) => {
            format!(".detach() as *mut {}", ctx.support_raw("ICapeInterface"))
        }
        TypeDescriptor::Data(_) => String::new(),
    }
}
