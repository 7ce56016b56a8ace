use crate::uuid::CapeUuid;
use serde_derive::{Deserialize, Serialize};

/* Document produced by the interface-definition parser */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ModelFile {
    #[serde(default)]
    pub libraries: Vec<Library>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct CategoryId {
    pub name: String,
    pub uuid: CapeUuid,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Library {
    pub name: String,
    pub uuid: CapeUuid,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumItem {
    pub name: String,
    pub value: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Enumeration {
    pub name: String,
    #[serde(default)]
    pub items: Vec<EnumItem>,
}

impl Enumeration {
    /// True when the enumeration has at least two items and every value is a
    /// distinct-bit, nonzero power of two.
    pub fn is_bit_flag(&self) -> bool {
        self.items.len() >= 2
            && self.items.iter().all(|item| {
                let value = item.value as u32;
                value != 0 && value & (value - 1) == 0
            })
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Interface {
    pub name: String,
    pub uuid: CapeUuid,
    #[serde(default)]
    pub template_args: Vec<String>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn template_arg(&self, index: usize) -> Option<&str> {
        self.template_args.get(index).map(String::as_str)
    }
}

/* Attribute attached to a method or argument, e.g. `in`, `property_get` or `long_name("X")` */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(from = "AttributeRepr")]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), value: None }
    }

    pub fn with_value(name: &str, value: &str) -> Self {
        Self { name: name.to_string(), value: Some(value.to_string()) }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeRepr {
    Bare(String),
    Full {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
}

impl From<AttributeRepr> for Attribute {
    fn from(repr: AttributeRepr) -> Self {
        match repr {
            AttributeRepr::Bare(name) => Attribute { name, value: None },
            AttributeRepr::Full { name, value } => Attribute { name, value },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /* Status/result channel; every well-formed method declares `result` here */
    #[serde(default)]
    pub return_type: Option<DataType>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Argument {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub data_type: DataType,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DataTypeKind {
    Boolean,
    Integer,
    Real,
    Result,
    Uuid,
    Enumeration,
    WindowId,
    String,
    ArrayString,
    Value,
    ArrayInteger,
    ArrayBoolean,
    ArrayReal,
    ArrayValue,
    ArrayByte,
    ArrayEnumeration,
    Interface,
    TemplateArgument,
    Invalid,
}

impl DataTypeKind {
    /* Type name used by the runtime support library when none is declared */
    pub fn canonical_name(&self) -> &'static str {
        match self {
            DataTypeKind::Boolean => "CapeBoolean",
            DataTypeKind::Integer => "CapeInteger",
            DataTypeKind::Real => "CapeReal",
            DataTypeKind::Result => "CapeResult",
            DataTypeKind::Uuid => "CapeUUID",
            DataTypeKind::Enumeration => "CapeEnumeration",
            DataTypeKind::WindowId => "CapeWindowId",
            DataTypeKind::String => "CapeString",
            DataTypeKind::ArrayString => "CapeArrayString",
            DataTypeKind::Value => "CapeValue",
            DataTypeKind::ArrayInteger => "CapeArrayInteger",
            DataTypeKind::ArrayBoolean => "CapeArrayBoolean",
            DataTypeKind::ArrayReal => "CapeArrayReal",
            DataTypeKind::ArrayValue => "CapeArrayValue",
            DataTypeKind::ArrayByte => "CapeArrayByte",
            DataTypeKind::ArrayEnumeration => "CapeArrayEnumeration",
            DataTypeKind::Interface => "CapeObject",
            DataTypeKind::TemplateArgument => "",
            DataTypeKind::Invalid => "",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DataType {
    pub kind: DataTypeKind,
    /* Declared name, optionally namespace-qualified (`CAPEOPEN_1_2::ICapeIdentification`) */
    #[serde(default)]
    pub name: Option<String>,
    /* Index into the owning interface's template arguments (template-argument kind only) */
    #[serde(default)]
    pub template_index: Option<usize>,
    #[serde(default)]
    pub template_types: Vec<DataType>,
}

impl DataType {
    pub fn new(kind: DataTypeKind) -> Self {
        Self { kind, name: None, template_index: None, template_types: Vec::new() }
    }

    pub fn named(kind: DataTypeKind, name: &str) -> Self {
        Self { kind, name: Some(name.to_string()), template_index: None, template_types: Vec::new() }
    }

    pub fn template_argument(index: usize) -> Self {
        Self {
            kind: DataTypeKind::TemplateArgument,
            name: None,
            template_index: Some(index),
            template_types: Vec::new(),
        }
    }

    pub fn with_template_types(mut self, template_types: Vec<DataType>) -> Self {
        self.template_types = template_types;
        self
    }

    /* Declared name, falling back to the canonical runtime name */
    pub fn type_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.canonical_name())
    }
}
