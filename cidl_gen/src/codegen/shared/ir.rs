//! Resolved declaration list consumed by the renderers.
//!
//! The IR carries every classification decision for one library: enumeration
//! kinds, adjusted method names and a [`TypeDescriptor`] per argument.
//! Renderers only format it; they never consult the model or the resolver.
//!
//! # Example
//! ```
//! use cidl_gen::codegen::shared::ir::*;
//!
//! let phase = EnumIr {
//!     name: "Phase".into(),
//!     kind: EnumKind::Plain,
//!     items: vec![EnumItemIr { idl_name: "VAPOR".into(), name: "Vapor".into(), value: 0 }],
//! };
//! assert_eq!(phase.items[0].name, "Vapor");
//! ```

use crate::classify::descriptor::{Direction, TypeDescriptor};
use cidl_types::CapeUuid;
use serde_derive::Serialize;
use std::collections::BTreeSet;

/// Everything emitted for one library, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryIr {
    pub name: String,
    pub uuid: CapeUuid,
    pub categories: Vec<CategoryIr>,
    pub enumerations: Vec<EnumIr>,
    pub interfaces: Vec<InterfaceIr>,
    /// Namespaces referenced but not resolvable; the caller must import them.
    pub foreign_namespaces: BTreeSet<String>,
}

impl LibraryIr {
    pub fn has_generic_interfaces(&self) -> bool {
        self.interfaces.iter().any(InterfaceIr::is_generic)
    }

    pub fn has_bit_flags(&self) -> bool {
        self.enumerations.iter().any(|e| e.kind == EnumKind::BitFlags)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryIr {
    pub name: String,
    pub uuid: CapeUuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumKind {
    Plain,
    BitFlags,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumIr {
    pub name: String,
    pub kind: EnumKind,
    pub items: Vec<EnumItemIr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumItemIr {
    /// Name as declared.
    pub idl_name: String,
    /// Variant or flag name.
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterfaceIr {
    pub name: String,
    pub uuid: CapeUuid,
    /// Consumer smart-pointer type name.
    pub smart_name: String,
    pub template_args: Vec<String>,
    pub methods: Vec<MethodIr>,
}

impl InterfaceIr {
    pub fn is_generic(&self) -> bool {
        !self.template_args.is_empty()
    }

    /* `<T:CapeSmartPointer,U:CapeSmartPointer>`, empty when not generic */
    pub fn generic_params(&self) -> String {
        if !self.is_generic() {
            return String::new();
        }
        let bounded: Vec<String> =
            self.template_args.iter().map(|arg| format!("{}:CapeSmartPointer", arg)).collect();
        format!("<{}>", bounded.join(","))
    }

    /* `<T,U>`, empty when not generic */
    pub fn generic_args(&self) -> String {
        if !self.is_generic() {
            return String::new();
        }
        format!("<{}>", self.template_args.join(","))
    }

    pub fn uuid_constant(&self) -> String {
        format!("{}_UUID", self.name.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodIr {
    pub idl_name: String,
    /// Name after `property_get`/`property_set`/`long_name` handling.
    pub adjusted_name: String,
    /// Trait and accessor name.
    pub rust_name: String,
    /// Field of the raw vtable.
    pub raw_slot: String,
    /// Provider trampoline name.
    pub native_symbol: String,
    pub arguments: Vec<ArgumentIr>,
}

impl MethodIr {
    pub fn return_values(&self) -> impl Iterator<Item = &ArgumentIr> {
        self.arguments.iter().filter(|arg| arg.is_return_value())
    }

    pub fn parameters(&self) -> impl Iterator<Item = &ArgumentIr> {
        self.arguments.iter().filter(|arg| !arg.is_return_value())
    }

    /* Label recorded with errors raised by the provider */
    pub fn error_context(&self, interface: &InterfaceIr) -> String {
        format!("{}::{}", interface.name, self.adjusted_name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgumentIr {
    pub idl_name: String,
    /// Snake-case, keyword-escaped name.
    pub name: String,
    pub direction: Direction,
    pub retval: bool,
    pub descriptor: TypeDescriptor,
}

impl ArgumentIr {
    pub fn is_out(&self) -> bool {
        self.direction == Direction::Out
    }

    /// Basic `[out,retval]` values and every `[out]` object become part of
    /// the returned value instead of a parameter.
    pub fn is_return_value(&self) -> bool {
        match &self.descriptor {
            TypeDescriptor::Basic(_) => self.retval,
            TypeDescriptor::Data(_) => false,
            TypeDescriptor::Object(_) | TypeDescriptor::TemplateArgument(_) => self.is_out(),
        }
    }
}
