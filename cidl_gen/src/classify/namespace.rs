use crate::naming::{smart_pointer_name, NamingTables};
use crate::options::RenderContext;
use serde_derive::Serialize;

/* Where a named type lives relative to the library being generated */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    Local,
    /* Re-exported by the support library under `alias` */
    WellKnown { namespace: String, alias: String },
    /* Left unresolved; the caller must import the namespace */
    Foreign { namespace: String },
}

/// A declared type name with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypePath {
    pub origin: Origin,
    pub name: String,
}

impl TypePath {
    /// Resolves `Name` or `Namespace::Name` as seen from `library`.
    ///
    /// Only the first `::` separates the namespace, and only when it occurs
    /// before any template bracket.
    pub fn resolve(declared: &str, library: &str, tables: &NamingTables) -> Self {
        let (namespace, name) = split_namespace(declared);
        let origin = match namespace {
            None => Origin::Local,
            Some(namespace) if namespace == library => Origin::Local,
            Some(namespace) => match tables.namespace_alias(namespace) {
                Some(alias) => {
                    Origin::WellKnown { namespace: namespace.to_string(), alias: alias.to_string() }
                }
                None => Origin::Foreign { namespace: namespace.to_string() },
            },
        };
        Self { origin, name: name.to_string() }
    }

    /* Raw ABI declaration, e.g. `C::Thermo_Phase` or `cobia::C::CAPEOPEN_1_2_CapePhaseStatus` */
    pub fn raw_name(&self, ctx: &RenderContext) -> String {
        match &self.origin {
            Origin::Local => ctx.native_path(&self.name),
            Origin::WellKnown { namespace, .. } => {
                ctx.support_raw(&format!("{}_{}", namespace, self.name))
            }
            Origin::Foreign { namespace } => format!("{}::{}", namespace, self.name),
        }
    }

    /* Name of the declared type itself in generated code */
    pub fn display_name(&self, ctx: &RenderContext) -> String {
        self.qualify(ctx, &self.name)
    }

    /* Consumer smart-pointer name for an interface path */
    pub fn smart_pointer_name(&self, ctx: &RenderContext) -> String {
        self.qualify(ctx, &smart_pointer_name(&self.name))
    }

    /* Key used to look the interface up in the arity resolver */
    pub fn lookup_name(&self) -> String {
        match &self.origin {
            Origin::Local => self.name.clone(),
            Origin::WellKnown { namespace, .. } | Origin::Foreign { namespace } => {
                format!("{}::{}", namespace, self.name)
            }
        }
    }

    pub fn foreign_namespace(&self) -> Option<&str> {
        match &self.origin {
            Origin::Foreign { namespace } => Some(namespace),
            _ => None,
        }
    }

    fn qualify(&self, ctx: &RenderContext, item: &str) -> String {
        match &self.origin {
            Origin::Local => item.to_string(),
            Origin::WellKnown { alias, .. } => ctx.support_path(&format!("{}::{}", alias, item)),
            Origin::Foreign { namespace } => format!("{}::{}", namespace, item),
        }
    }
}

fn split_namespace(declared: &str) -> (Option<&str>, &str) {
    let bracket = declared.find('<').unwrap_or(declared.len());
    match declared.find("::") {
        Some(pos) if pos < bracket => (Some(&declared[..pos]), &declared[pos + 2..]),
        _ => (None, declared),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GeneratorOptions;
    use cidl_types::{CapeUuid, Library};

    fn context() -> RenderContext {
        GeneratorOptions::default().resolve(&Library {
            name: "Thermo".to_string(),
            uuid: CapeUuid::default(),
            category_ids: Vec::new(),
            enumerations: Vec::new(),
            interfaces: Vec::new(),
        })
    }

    #[test]
    fn local_names_are_stripped() {
        let tables = NamingTables::new();
        let ctx = context();
        for declared in ["Phase", "Thermo::Phase"] {
            let path = TypePath::resolve(declared, "Thermo", &tables);
            assert_eq!(path.origin, Origin::Local);
            assert_eq!(path.display_name(&ctx), "Phase");
            assert_eq!(path.raw_name(&ctx), "C::Thermo_Phase");
        }
    }

    #[test]
    fn well_known_namespace_is_aliased() {
        let tables = NamingTables::new();
        let ctx = context();
        let path = TypePath::resolve("CAPEOPEN_1_2::ICapeIdentification", "Thermo", &tables);
        assert_eq!(path.raw_name(&ctx), "cobia::C::CAPEOPEN_1_2_ICapeIdentification");
        assert_eq!(path.smart_pointer_name(&ctx), "cobia::cape_open_1_2::CapeIdentification");
        assert_eq!(path.lookup_name(), "CAPEOPEN_1_2::ICapeIdentification");
        assert_eq!(path.foreign_namespace(), None);
    }

    #[test]
    fn foreign_namespace_is_left_unresolved() {
        let tables = NamingTables::new();
        let ctx = context();
        let path = TypePath::resolve("Vendor::IWidget", "Thermo", &tables);
        assert_eq!(path.raw_name(&ctx), "Vendor::IWidget");
        assert_eq!(path.smart_pointer_name(&ctx), "Vendor::Widget");
        assert_eq!(path.foreign_namespace(), Some("Vendor"));
    }
}
