use crate::classify::Classifier;
use crate::codegen::shared::ir::*;
use crate::error::GenError;
use crate::naming::{native_symbol_name, smart_pointer_name, to_camel_case, to_snake_case, NamingTables};
use cidl_types::{DataTypeKind, Enumeration, Interface, InterfaceArityResolver, Library, Method};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Builds the resolved declaration list for one library.
pub struct IrBuilder<'a> {
    tables: &'a NamingTables,
    resolver: &'a dyn InterfaceArityResolver,
}

/* Method names after attribute handling */
struct MethodNames {
    adjusted: String,
    raw_slot: String,
}

impl<'a> IrBuilder<'a> {
    pub fn new(tables: &'a NamingTables, resolver: &'a dyn InterfaceArityResolver) -> Self {
        Self { tables, resolver }
    }

    pub fn build(&self, library: &Library) -> Result<LibraryIr, GenError> {
        let classifier = Classifier::new(library, self.resolver, self.tables);

        let categories = library
            .category_ids
            .iter()
            .map(|category| CategoryIr { name: category.name.clone(), uuid: category.uuid })
            .collect();

        let enumerations = library
            .enumerations
            .iter()
            .map(|enumeration| build_enumeration(enumeration, self.tables))
            .collect::<Result<Vec<_>, _>>()?;

        let interfaces = library
            .interfaces
            .iter()
            .map(|iface| self.build_interface(library, iface, &classifier))
            .collect::<Result<Vec<_>, _>>()?;

        let mut foreign_namespaces = BTreeSet::new();
        for iface in &interfaces {
            for method in &iface.methods {
                for arg in &method.arguments {
                    arg.descriptor.collect_foreign(&mut foreign_namespaces);
                }
            }
        }
        for namespace in &foreign_namespaces {
            warn!("types from namespace '{}' are referenced but not imported", namespace);
        }

        Ok(LibraryIr {
            name: library.name.clone(),
            uuid: library.uuid,
            categories,
            enumerations,
            interfaces,
            foreign_namespaces,
        })
    }

    fn build_interface(
        &self,
        library: &Library,
        iface: &Interface,
        classifier: &Classifier,
    ) -> Result<InterfaceIr, GenError> {
        let methods = iface
            .methods
            .iter()
            .map(|method| self.build_method(library, iface, method, classifier))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("interface {}: {} method(s)", iface.name, methods.len());
        Ok(InterfaceIr {
            name: iface.name.clone(),
            uuid: iface.uuid,
            smart_name: smart_pointer_name(&iface.name),
            template_args: iface.template_args.clone(),
            methods,
        })
    }

    fn build_method(
        &self,
        library: &Library,
        iface: &Interface,
        method: &Method,
        classifier: &Classifier,
    ) -> Result<MethodIr, GenError> {
        let names = method_names(iface, method)?;

        if method.return_type.as_ref().map(|rt| rt.kind) != Some(DataTypeKind::Result) {
            return Err(GenError::MissingStatusReturn {
                interface: iface.name.clone(),
                method: names.adjusted,
            });
        }

        let arguments = method
            .arguments
            .iter()
            .map(|arg| {
                classifier.classify_argument(arg, iface).map_err(|source| GenError::Argument {
                    library: library.name.clone(),
                    interface: iface.name.clone(),
                    method: names.adjusted.clone(),
                    argument: arg.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for arg in &arguments {
            debug!(
                "{}::{} argument {} is {}",
                iface.name,
                names.adjusted,
                arg.name,
                arg.descriptor.category()
            );
        }

        Ok(MethodIr {
            idl_name: method.name.clone(),
            rust_name: self.tables.escape(&to_snake_case(&names.adjusted)),
            native_symbol: native_symbol_name(&names.adjusted),
            adjusted_name: names.adjusted,
            raw_slot: names.raw_slot,
            arguments,
        })
    }
}

/* `property_get`/`property_set` prefix the name; `long_name` replaces it */
fn method_names(iface: &Interface, method: &Method) -> Result<MethodNames, GenError> {
    let mut names: Option<MethodNames> = None;
    for attribute in &method.attributes {
        let adjusted = match attribute.name.as_str() {
            "property_get" => MethodNames {
                adjusted: format!("Get{}", method.name),
                raw_slot: format!("get{}", method.name),
            },
            "property_set" => MethodNames {
                adjusted: format!("Set{}", method.name),
                raw_slot: format!("put{}", method.name),
            },
            "long_name" => {
                let long_name = attribute.value.clone().ok_or_else(|| GenError::LongNameWithoutValue {
                    interface: iface.name.clone(),
                    method: method.name.clone(),
                })?;
                MethodNames { adjusted: long_name.clone(), raw_slot: long_name }
            }
            other => {
                return Err(GenError::MethodAttribute {
                    interface: iface.name.clone(),
                    method: method.name.clone(),
                    attribute: other.to_string(),
                })
            }
        };
        if names.is_some() {
            return Err(GenError::ConflictingNameAttributes {
                interface: iface.name.clone(),
                method: method.name.clone(),
            });
        }
        names = Some(adjusted);
    }
    Ok(names.unwrap_or_else(|| MethodNames {
        adjusted: method.name.clone(),
        raw_slot: method.name.clone(),
    }))
}

fn build_enumeration(enumeration: &Enumeration, tables: &NamingTables) -> Result<EnumIr, GenError> {
    if enumeration.items.is_empty() {
        return Err(GenError::EmptyEnumeration(enumeration.name.clone()));
    }
    let kind = if enumeration.is_bit_flag() { EnumKind::BitFlags } else { EnumKind::Plain };

    if kind == EnumKind::Plain {
        let mut seen = HashSet::new();
        for item in &enumeration.items {
            if !seen.insert(item.value) {
                return Err(GenError::DuplicateEnumValue {
                    enumeration: enumeration.name.clone(),
                    value: item.value,
                });
            }
        }
    }

    /* Distinct declared names can still meet after case conversion */
    let mut items = Vec::with_capacity(enumeration.items.len());
    let mut names = HashSet::new();
    for item in &enumeration.items {
        let name = tables.escape(&to_camel_case(&item.name));
        if !names.insert(name.clone()) {
            return Err(GenError::DuplicateEnumItem { enumeration: enumeration.name.clone(), name });
        }
        items.push(EnumItemIr { idl_name: item.name.clone(), name, value: item.value });
    }

    debug!("enumeration {}: {:?} with {} item(s)", enumeration.name, kind, items.len());
    Ok(EnumIr { name: enumeration.name.clone(), kind, items })
}
