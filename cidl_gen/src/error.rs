use thiserror::Error;

/// Failure to classify one declared argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid attribute '{0}'")]
    InvalidAttribute(String),
    #[error("argument must be [in] or [out]")]
    Direction,
    #[error("argument is [retval] but not [out]")]
    RetvalWithoutOut,
    #[error("invalid data type '{0}'")]
    InvalidType(String),
    #[error("unable to resolve interface '{0}'")]
    UnresolvedInterface(String),
    #[error("interface '{name}' expects {expected} template argument(s), found {found}")]
    TemplateArity { name: String, expected: usize, found: usize },
    #[error("template argument cannot have template arguments")]
    NestedTemplateArguments,
    #[error("invalid template argument type '{0}'")]
    InvalidTemplateArgument(String),
    #[error("invalid template argument index {0:?}")]
    TemplateIndex(Option<usize>),
    #[error("CapeWindowId must be [in]")]
    WindowIdOut,
    #[error("CapeArrayEnumeration must have one template argument, found {0}")]
    ArrayEnumerationArity(usize),
    #[error("CapeArrayEnumeration template argument must be an enumeration, found '{0}'")]
    ArrayEnumerationElement(String),
}

/// Failure to build or render a library.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("no libraries found")]
    NoLibraries,
    #[error("argument {argument} of method {method} of interface {interface} in library {library}: {source}")]
    Argument {
        library: String,
        interface: String,
        method: String,
        argument: String,
        #[source]
        source: ClassifyError,
    },
    #[error("method {method} of interface {interface} has invalid attribute {attribute}")]
    MethodAttribute { interface: String, method: String, attribute: String },
    #[error("method {method} of interface {interface} has more than one naming attribute")]
    ConflictingNameAttributes { interface: String, method: String },
    #[error("method {method} of interface {interface} has a long_name attribute without a value")]
    LongNameWithoutValue { interface: String, method: String },
    #[error("method {method} of interface {interface} does not return a CapeResult")]
    MissingStatusReturn { interface: String, method: String },
    #[error("enumeration {0} has no items")]
    EmptyEnumeration(String),
    #[error("enumeration {enumeration} declares value {value} more than once")]
    DuplicateEnumValue { enumeration: String, value: i32 },
    #[error("enumeration {enumeration} has more than one item named {name}")]
    DuplicateEnumItem { enumeration: String, name: String },
}
