use crate::codegen::shared::ir::{EnumIr, EnumKind};
use crate::naming::example_variable_name;
use crate::options::{RenderContext, DEFAULT_SUPPORT_MODULE};

pub fn emit_enumeration(enumeration: &EnumIr, ctx: &RenderContext) -> String {
    match enumeration.kind {
        EnumKind::BitFlags => emit_bit_flags(enumeration),
        EnumKind::Plain => emit_plain(enumeration, ctx),
    }
}

/* Flag set with one named bit per item */
fn emit_bit_flags(enumeration: &EnumIr) -> String {
    let mut output = String::new();
    output.push_str("bitflags! {\n");
    output.push_str("\t#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]\n");
    output.push_str(&format!("\tpub struct {}: u32 {{\n", enumeration.name));
    for item in &enumeration.items {
        output.push_str(&format!("\t\tconst {} = 0x{:x};\n", item.name, item.value as u32));
    }
    output.push_str("\t}\n");
    output.push_str("}\n\n");
    output
}

fn emit_plain(enumeration: &EnumIr, ctx: &RenderContext) -> String {
    let name = &enumeration.name;
    let var = example_variable_name(name);
    let mut output = String::new();

    output.push_str(&format!("///{}\n///\n///{} enumeration\n///\n", name, name));
    output.push_str("#[repr(i32)]\n");
    output.push_str("#[derive(Debug,PartialEq,Eq,Clone,Copy)]\n");
    output.push_str(&format!("pub enum {} {{\n", name));
    for item in &enumeration.items {
        output.push_str(&format!("\t{} = {},\n", item.name, item.value));
    }
    output.push_str("}\n\n");

    output.push_str(&format!("impl {} {{\n", name));

    /* Declaration-ordered values backing the iterator */
    output.push_str("\t/// All values, in declaration order\n");
    let values: Vec<String> = enumeration.items.iter().map(|item| format!("{}::{}", name, item.name)).collect();
    output.push_str(&format!(
        "\tpub const VALUES: [{}; {}] = [{}];\n",
        name,
        values.len(),
        values.join(",")
    ));

    output.push_str(&format!("\t/// Convert from i32 to {}\n", name));
    output.push_str("\t///\n\t/// # Arguments\n\t///\n");
    output.push_str(&format!("\t/// * `value` - i32 value to be converted to {}\n", name));
    output.push_str("\t///\n\t/// # Examples\n\t///\n\t/// ```\n");
    output.push_str(&format!("\t/// use {}::*;\n", DEFAULT_SUPPORT_MODULE));
    output.push_str(&format!("\t/// use {}::{};\n", ctx.example_module, name));
    for (index, item) in enumeration.items.iter().enumerate() {
        output.push_str(&format!("\t/// let v{}={}::from({});\n", index, name, item.value));
        output.push_str(&format!("\t/// assert_eq!(v{}.unwrap(),{}::{});\n", index, name, item.name));
    }
    output.push_str("\t/// ```\n");
    output.push_str(&format!("\tpub fn from(value: i32) -> Option<{}> {{\n", name));
    output.push_str("\t\tmatch value {\n");
    for item in &enumeration.items {
        output.push_str(&format!("\t\t\t{} => Some({}::{}),\n", item.value, name, item.name));
    }
    output.push_str("\t\t\t_ => None,\n");
    output.push_str("\t\t}\n\t}\n");

    output.push_str("\t/// Convert to string\n");
    output.push_str("\tpub fn as_string(&self) -> &str {\n");
    output.push_str("\t\tmatch self {\n");
    for item in &enumeration.items {
        output.push_str(&format!("\t\t\tSelf::{} => \"{}\",\n", item.name, item.name));
    }
    output.push_str("\t\t}\n\t}\n");

    let example = iteration_example(name, &var, ctx);
    output.push_str("\t///get an iterator\n\t///\n\t/// # Examples\n\t///\n");
    for line in example.lines() {
        output.push_str(&format!("\t/// {}\n", line));
    }
    output.push_str(&format!("\tpub fn iter() -> {}Iterator {{\n", name));
    output.push_str(&format!("\t\t{}Iterator {{ current: 0 }}\n", name));
    output.push_str("\t}\n}\n\n");

    output.push_str(&format!("/// {} iterator\n///\n/// Iterates over all {} values\n///\n/// # Examples\n///\n", name, name));
    for line in example.lines() {
        output.push_str(&format!("/// {}\n", line));
    }
    output.push_str(&format!("pub struct {}Iterator {{\n", name));
    output.push_str("\tcurrent: usize,\n");
    output.push_str("}\n");
    output.push_str(&format!("impl Iterator for {}Iterator {{\n", name));
    output.push_str(&format!("\ttype Item = {};\n", name));
    output.push_str("\tfn next(&mut self) -> Option<Self::Item> {\n");
    output.push_str(&format!("\t\tlet result={}::VALUES.get(self.current).copied();\n", name));
    output.push_str("\t\tif result.is_some() {\n");
    output.push_str("\t\t\tself.current+=1;\n");
    output.push_str("\t\t}\n");
    output.push_str("\t\tresult\n");
    output.push_str("\t}\n}\n");

    output.push_str(&format!("impl fmt::Display for {} {{\n", name));
    output.push_str("\tfn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {\n");
    output.push_str("\t\twrite!(f,\"{}\",self.as_string())\n");
    output.push_str("\t}\n}\n");

    output
}

fn iteration_example(name: &str, var: &str, ctx: &RenderContext) -> String {
    format!(
        "```\nuse {support}::*;\nuse {module}::{name};\nfor {var} in {name}::iter() {{\n    println!(\"{{}}={{}}\",{var},{var} as i32);\n}}\n```\n",
        support = DEFAULT_SUPPORT_MODULE,
        module = ctx.example_module,
        name = name,
        var = var
    )
}
