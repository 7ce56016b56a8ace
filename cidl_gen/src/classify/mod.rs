pub mod descriptor;
pub mod namespace;

use crate::codegen::shared::ir::ArgumentIr;
use crate::error::ClassifyError;
use crate::naming::{to_snake_case, NamingTables};
use cidl_types::{Argument, DataType, DataTypeKind, Interface, InterfaceArityResolver, Library};
use descriptor::{
    BasicKind, DataKind, Direction, EnumerationRef, ObjectInterface, ObjectType, TemplateArg,
    TemplateParameter, TypeDescriptor,
};
use namespace::{Origin, TypePath};
use std::collections::HashMap;

const BASE_INTERFACE: &str = "CapeObject";
const GENERIC_ENUMERATION: &str = "CapeEnumeration";

/// Resolves declared argument types of one library into descriptors.
///
/// Interfaces of the library itself are looked up locally first; anything
/// else goes through the external arity resolver.
pub struct Classifier<'a> {
    tables: &'a NamingTables,
    library: &'a str,
    local_arities: HashMap<&'a str, usize>,
    resolver: &'a dyn InterfaceArityResolver,
}

impl<'a> Classifier<'a> {
    pub fn new(
        library: &'a Library,
        resolver: &'a dyn InterfaceArityResolver,
        tables: &'a NamingTables,
    ) -> Self {
        let local_arities = library
            .interfaces
            .iter()
            .map(|iface| (iface.name.as_str(), iface.template_args.len()))
            .collect();
        Self { tables, library: &library.name, local_arities, resolver }
    }

    pub fn classify_argument(
        &self,
        argument: &Argument,
        interface: &Interface,
    ) -> Result<ArgumentIr, ClassifyError> {
        let (mut is_in, mut is_out, mut retval) = (false, false, false);
        for attribute in &argument.attributes {
            match attribute.name.as_str() {
                "in" => is_in = true,
                "out" => is_out = true,
                "retval" => retval = true,
                "orphan" => {}
                other => return Err(ClassifyError::InvalidAttribute(other.to_string())),
            }
        }
        if is_in == is_out {
            return Err(ClassifyError::Direction);
        }
        if retval && !is_out {
            return Err(ClassifyError::RetvalWithoutOut);
        }
        let direction = if is_out { Direction::Out } else { Direction::In };

        let descriptor = self.classify_type(&argument.data_type, direction, interface)?;
        Ok(ArgumentIr {
            idl_name: argument.name.clone(),
            name: self.tables.escape_argument(&to_snake_case(&argument.name)),
            direction,
            retval,
            descriptor,
        })
    }

    pub fn classify_type(
        &self,
        data_type: &DataType,
        direction: Direction,
        interface: &Interface,
    ) -> Result<TypeDescriptor, ClassifyError> {
        let descriptor = match data_type.kind {
            DataTypeKind::Boolean => TypeDescriptor::Basic(BasicKind::Boolean),
            DataTypeKind::Integer => TypeDescriptor::Basic(BasicKind::Integer),
            DataTypeKind::Real => TypeDescriptor::Basic(BasicKind::Real),
            DataTypeKind::Result => TypeDescriptor::Basic(BasicKind::Result),
            DataTypeKind::Uuid => TypeDescriptor::Basic(BasicKind::Uuid),
            DataTypeKind::Enumeration => {
                TypeDescriptor::Basic(BasicKind::Enumeration(self.enumeration_ref(data_type)))
            }
            DataTypeKind::WindowId => {
                if direction == Direction::Out {
                    return Err(ClassifyError::WindowIdOut);
                }
                TypeDescriptor::Basic(BasicKind::WindowId)
            }
            DataTypeKind::String => TypeDescriptor::Data(DataKind::String),
            DataTypeKind::ArrayString => TypeDescriptor::Data(DataKind::ArrayString),
            DataTypeKind::Value => TypeDescriptor::Data(DataKind::Value),
            DataTypeKind::ArrayInteger => TypeDescriptor::Data(DataKind::ArrayInteger),
            DataTypeKind::ArrayBoolean => TypeDescriptor::Data(DataKind::ArrayBoolean),
            DataTypeKind::ArrayReal => TypeDescriptor::Data(DataKind::ArrayReal),
            DataTypeKind::ArrayValue => TypeDescriptor::Data(DataKind::ArrayValue),
            DataTypeKind::ArrayByte => TypeDescriptor::Data(DataKind::ArrayByte),
            DataTypeKind::ArrayEnumeration => {
                let element = match data_type.template_types.as_slice() {
                    [element] => element,
                    other => return Err(ClassifyError::ArrayEnumerationArity(other.len())),
                };
                if element.kind != DataTypeKind::Enumeration {
                    return Err(ClassifyError::ArrayEnumerationElement(element.type_name().to_string()));
                }
                TypeDescriptor::Data(DataKind::ArrayEnumeration(self.enumeration_ref(element)))
            }
            DataTypeKind::Interface => TypeDescriptor::Object(self.classify_object(data_type, interface)?),
            DataTypeKind::TemplateArgument => {
                if !data_type.template_types.is_empty() {
                    return Err(ClassifyError::NestedTemplateArguments);
                }
                let (index, name) = self.template_parameter(data_type, interface)?;
                TypeDescriptor::TemplateArgument(TemplateParameter { index, name })
            }
            DataTypeKind::Invalid => {
                return Err(ClassifyError::InvalidType(data_type.type_name().to_string()))
            }
        };
        Ok(descriptor)
    }

    fn enumeration_ref(&self, data_type: &DataType) -> EnumerationRef {
        match data_type.name.as_deref() {
            None | Some(GENERIC_ENUMERATION) => EnumerationRef::Generic,
            Some(declared) => {
                EnumerationRef::Named(TypePath::resolve(declared, self.library, self.tables))
            }
        }
    }

    /* Interface reference, expanding its template arguments recursively */
    fn classify_object(
        &self,
        data_type: &DataType,
        interface: &Interface,
    ) -> Result<ObjectType, ClassifyError> {
        let declared = data_type.type_name();
        let (object_interface, expected) = if declared == BASE_INTERFACE {
            (ObjectInterface::Base, 0)
        } else {
            let path = TypePath::resolve(declared, self.library, self.tables);
            let expected = self
                .interface_arity(&path)
                .ok_or_else(|| ClassifyError::UnresolvedInterface(declared.to_string()))?;
            (ObjectInterface::Named(path), expected)
        };

        let found = data_type.template_types.len();
        if expected != found {
            return Err(ClassifyError::TemplateArity { name: declared.to_string(), expected, found });
        }

        let template_args = data_type
            .template_types
            .iter()
            .map(|template_type| self.template_arg(template_type, interface))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ObjectType { interface: object_interface, template_args })
    }

    fn template_arg(
        &self,
        template_type: &DataType,
        interface: &Interface,
    ) -> Result<TemplateArg, ClassifyError> {
        match template_type.kind {
            DataTypeKind::TemplateArgument => {
                if !template_type.template_types.is_empty() {
                    return Err(ClassifyError::NestedTemplateArguments);
                }
                let (_, name) = self.template_parameter(template_type, interface)?;
                Ok(TemplateArg::Parameter(name))
            }
            DataTypeKind::Interface => {
                Ok(TemplateArg::Object(self.classify_object(template_type, interface)?))
            }
            _ => Err(ClassifyError::InvalidTemplateArgument(template_type.type_name().to_string())),
        }
    }

    fn template_parameter(
        &self,
        data_type: &DataType,
        interface: &Interface,
    ) -> Result<(usize, String), ClassifyError> {
        let index = data_type.template_index.ok_or(ClassifyError::TemplateIndex(None))?;
        let name = interface.template_arg(index).ok_or(ClassifyError::TemplateIndex(Some(index)))?;
        Ok((index, name.to_string()))
    }

    fn interface_arity(&self, path: &TypePath) -> Option<usize> {
        if path.origin == Origin::Local {
            if let Some(arity) = self.local_arities.get(path.name.as_str()) {
                return Some(*arity);
            }
        }
        self.resolver.interface_arity(&path.lookup_name())
    }
}
