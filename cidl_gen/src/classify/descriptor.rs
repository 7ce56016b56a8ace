//! Resolved argument type descriptors.
//!
//! A descriptor records only what classification decided: the category,
//! the resolved type paths and the template instantiation. Every name the
//! renderers need is a pure function of a descriptor and the
//! [`RenderContext`], so the variants cannot drift apart.

use crate::classify::namespace::TypePath;
use crate::naming::to_snake_case;
use crate::options::RenderContext;
use serde_derive::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::In => "In",
            Direction::Out => "Out",
        }
    }

    fn lower(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// Enumeration referenced by an argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumerationRef {
    /// The untyped `CapeEnumeration` of the support library.
    Generic,
    Named(TypePath),
}

impl EnumerationRef {
    pub fn display_name(&self, ctx: &RenderContext) -> String {
        match self {
            EnumerationRef::Generic => ctx.support_path("CapeEnumeration"),
            EnumerationRef::Named(path) => path.display_name(ctx),
        }
    }

    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        match self {
            EnumerationRef::Generic => ctx.support_raw("CapeEnumeration"),
            EnumerationRef::Named(path) => path.raw_name(ctx),
        }
    }

    fn collect_foreign(&self, namespaces: &mut BTreeSet<String>) {
        if let EnumerationRef::Named(path) = self {
            if let Some(namespace) = path.foreign_namespace() {
                namespaces.insert(namespace.to_string());
            }
        }
    }
}

/// Scalar passed by value, or through a raw pointer when `out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasicKind {
    Boolean,
    Integer,
    Real,
    Result,
    Uuid,
    Enumeration(EnumerationRef),
    WindowId,
}

impl BasicKind {
    pub fn rust_name(&self, ctx: &RenderContext) -> String {
        match self {
            BasicKind::Enumeration(enumeration) => enumeration.display_name(ctx),
            other => other.scalar_name().to_string(),
        }
    }

    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        match self {
            BasicKind::Enumeration(enumeration) => enumeration.raw_name(ctx),
            BasicKind::WindowId => ctx.support_raw("CapeWindowId"),
            other => other.scalar_name().to_string(),
        }
    }

    fn scalar_name(&self) -> &'static str {
        match self {
            BasicKind::Boolean => "CapeBoolean",
            BasicKind::Integer => "CapeInteger",
            BasicKind::Real => "CapeReal",
            BasicKind::Result => "CapeResult",
            BasicKind::Uuid => "CapeUUID",
            BasicKind::Enumeration(_) => "CapeEnumeration",
            BasicKind::WindowId => "CapeWindowId",
        }
    }

    /* Initial value of local output storage; window ids are never outputs */
    pub fn init_value(&self) -> Option<&'static str> {
        match self {
            BasicKind::Boolean => Some("false as CapeBoolean"),
            BasicKind::Integer | BasicKind::Enumeration(_) => Some("0"),
            BasicKind::Real => Some("0.0"),
            BasicKind::Result => Some("COBIAERR_NOERROR"),
            BasicKind::Uuid => Some("CapeUUID::null()"),
            BasicKind::WindowId => None,
        }
    }

    /* Named enumerations cross the ABI as their raw integer type */
    pub fn unpacked_enumeration(&self) -> Option<&TypePath> {
        match self {
            BasicKind::Enumeration(EnumerationRef::Named(path)) => Some(path),
            _ => None,
        }
    }

    /* Suffix turning a structured value into its raw form */
    pub fn to_raw_suffix(&self, ctx: &RenderContext) -> String {
        match self.unpacked_enumeration() {
            Some(path) => format!(" as {}", path.raw_name(ctx)),
            None => String::new(),
        }
    }

    pub fn is_window_id(&self) -> bool {
        matches!(self, BasicKind::WindowId)
    }
}

/// Structured value transported through a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    String,
    ArrayString,
    Value,
    ArrayInteger,
    ArrayBoolean,
    ArrayReal,
    ArrayValue,
    ArrayByte,
    ArrayEnumeration(EnumerationRef),
}

impl DataKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            DataKind::String => "CapeString",
            DataKind::ArrayString => "CapeArrayString",
            DataKind::Value => "CapeValue",
            DataKind::ArrayInteger => "CapeArrayInteger",
            DataKind::ArrayBoolean => "CapeArrayBoolean",
            DataKind::ArrayReal => "CapeArrayReal",
            DataKind::ArrayValue => "CapeArrayValue",
            DataKind::ArrayByte => "CapeArrayByte",
            DataKind::ArrayEnumeration(_) => "CapeArrayEnumeration",
        }
    }

    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        ctx.support_raw(&format!("I{}", self.type_name()))
    }

    /* Structured view, e.g. `CapeStringIn` or `CapeArrayEnumerationOut<Phase>` */
    pub fn surface_name(&self, ctx: &RenderContext, direction: Direction) -> String {
        let mut name = format!("{}{}", self.type_name(), direction.suffix());
        if let DataKind::ArrayEnumeration(element) = self {
            name.push_str(&format!("<{}>", element.display_name(ctx)));
        }
        name
    }

    /* Provider capability required from consumer arguments */
    pub fn provider_name(&self, direction: Direction) -> String {
        format!("{}Provider{}", self.type_name(), direction.suffix())
    }

    /* Provider method yielding the raw view, e.g. `as_cape_string_in` */
    pub fn to_raw_method(&self, direction: Direction) -> String {
        format!("as_{}_{}", to_snake_case(self.type_name()), direction.lower())
    }
}

/// Interface referenced by an object argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectInterface {
    /// The universal base interface `CapeObject`.
    Base,
    Named(TypePath),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateArg {
    /// Generic parameter of the owning interface.
    Parameter(String),
    Object(ObjectType),
}

impl TemplateArg {
    fn smart_name(&self, ctx: &RenderContext) -> String {
        match self {
            TemplateArg::Parameter(name) => name.clone(),
            TemplateArg::Object(object) => object.smart_name(ctx),
        }
    }

    fn display_name(&self, ctx: &RenderContext) -> String {
        match self {
            TemplateArg::Parameter(name) => name.clone(),
            TemplateArg::Object(object) => object.display_name(ctx),
        }
    }
}

/// Fully instantiated interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectType {
    pub interface: ObjectInterface,
    pub template_args: Vec<TemplateArg>,
}

impl ObjectType {
    pub fn base() -> Self {
        Self { interface: ObjectInterface::Base, template_args: Vec::new() }
    }

    /* Raw interface struct; generic instantiations share one raw layout */
    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        match &self.interface {
            ObjectInterface::Base => ctx.support_raw("ICapeInterface"),
            ObjectInterface::Named(path) => path.raw_name(ctx),
        }
    }

    pub fn smart_name(&self, ctx: &RenderContext) -> String {
        match &self.interface {
            ObjectInterface::Base => ctx.support_path("CapeObject"),
            ObjectInterface::Named(path) => {
                format!("{}{}", path.smart_pointer_name(ctx), self.arguments(|arg| arg.smart_name(ctx)))
            }
        }
    }

    pub fn display_name(&self, ctx: &RenderContext) -> String {
        match &self.interface {
            ObjectInterface::Base => ctx.support_raw("ICapeInterface"),
            ObjectInterface::Named(path) => {
                format!("{}{}", path.display_name(ctx), self.arguments(|arg| arg.display_name(ctx)))
            }
        }
    }

    fn arguments(&self, name: impl Fn(&TemplateArg) -> String) -> String {
        if self.template_args.is_empty() {
            return String::new();
        }
        let names: Vec<String> = self.template_args.iter().map(name).collect();
        format!("<{}>", names.join(","))
    }

    fn collect_foreign(&self, namespaces: &mut BTreeSet<String>) {
        if let ObjectInterface::Named(path) = &self.interface {
            if let Some(namespace) = path.foreign_namespace() {
                namespaces.insert(namespace.to_string());
            }
        }
        for arg in &self.template_args {
            if let TemplateArg::Object(object) = arg {
                object.collect_foreign(namespaces);
            }
        }
    }
}

/// Generic parameter of the owning interface used as an argument type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParameter {
    pub index: usize,
    pub name: String,
}

/// Classified argument type; exactly one category applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeDescriptor {
    Basic(BasicKind),
    Data(DataKind),
    Object(ObjectType),
    TemplateArgument(TemplateParameter),
}

impl TypeDescriptor {
    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        match self {
            TypeDescriptor::Basic(basic) => basic.raw_name(ctx),
            TypeDescriptor::Data(data) => data.raw_name(ctx),
            TypeDescriptor::Object(object) => object.raw_name(ctx),
            TypeDescriptor::TemplateArgument(_) => ctx.support_raw("ICapeInterface"),
        }
    }

    /* Consumer-facing type of object-like arguments */
    pub fn smart_name(&self, ctx: &RenderContext) -> Option<String> {
        match self {
            TypeDescriptor::Object(object) => Some(object.smart_name(ctx)),
            TypeDescriptor::TemplateArgument(parameter) => Some(parameter.name.clone()),
            _ => None,
        }
    }

    pub fn is_object_like(&self) -> bool {
        matches!(self, TypeDescriptor::Object(_) | TypeDescriptor::TemplateArgument(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            TypeDescriptor::Basic(_) => "basic",
            TypeDescriptor::Data(_) => "data-interface",
            TypeDescriptor::Object(_) => "object-interface",
            TypeDescriptor::TemplateArgument(_) => "template-argument",
        }
    }

    pub fn collect_foreign(&self, namespaces: &mut BTreeSet<String>) {
        match self {
            TypeDescriptor::Basic(BasicKind::Enumeration(enumeration))
            | TypeDescriptor::Data(DataKind::ArrayEnumeration(enumeration)) => {
                enumeration.collect_foreign(namespaces)
            }
            TypeDescriptor::Object(object) => object.collect_foreign(namespaces),
            _ => {}
        }
    }
}

/* `Collection<T>` -> `Collection::<T>` so the path is valid in expression position */
pub fn turbofish(type_name: &str) -> String {
    type_name.replace('<', "::<")
}
