use cidl_types::{InterfaceArityResolver, Library};
use indexmap::IndexMap;

/* Arity index over every interface of every loaded library */
#[derive(Debug, Default, Clone)]
pub struct ModelResolver {
    /* `Library::Interface` and bare `Interface` keys; bare names are first-wins */
    arities: IndexMap<String, usize>,
}

impl ModelResolver {
    pub fn new(libraries: &[Library]) -> Self {
        let mut resolver = Self::default();
        for library in libraries {
            resolver.add_library(library);
        }
        resolver
    }

    pub fn add_library(&mut self, library: &Library) {
        for iface in &library.interfaces {
            let arity = iface.template_args.len();
            self.arities.insert(format!("{}::{}", library.name, iface.name), arity);
            self.arities.entry(iface.name.clone()).or_insert(arity);
        }
    }
}

impl InterfaceArityResolver for ModelResolver {
    fn interface_arity(&self, name: &str) -> Option<usize> {
        self.arities.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidl_types::{CapeUuid, Interface};

    fn library(name: &str, interfaces: &[(&str, usize)]) -> Library {
        Library {
            name: name.to_string(),
            uuid: CapeUuid::default(),
            category_ids: Vec::new(),
            enumerations: Vec::new(),
            interfaces: interfaces
                .iter()
                .map(|(iface, arity)| Interface {
                    name: iface.to_string(),
                    uuid: CapeUuid::default(),
                    template_args: (0..*arity).map(|i| format!("T{}", i)).collect(),
                    methods: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn qualified_and_bare_lookup() {
        let resolver = ModelResolver::new(&[
            library("Local", &[("ICollection", 1)]),
            library("Other", &[("ICollection", 2), ("IThing", 0)]),
        ]);
        assert_eq!(resolver.interface_arity("Local::ICollection"), Some(1));
        assert_eq!(resolver.interface_arity("Other::ICollection"), Some(2));
        assert_eq!(resolver.interface_arity("ICollection"), Some(1));
        assert_eq!(resolver.interface_arity("IThing"), Some(0));
        assert_eq!(resolver.interface_arity("IMissing"), None);
    }
}
