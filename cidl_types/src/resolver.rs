use std::collections::HashMap;

/* Name -> template arity lookup for interfaces, supplied by the type resolver */
pub trait InterfaceArityResolver {
    /// Returns the number of template parameters declared by the named
    /// interface, or `None` when the name is unknown. `name` may be bare
    /// (`ICapeCollection`) or namespace-qualified (`CAPEOPEN_1_2::ICapeCollection`).
    fn interface_arity(&self, name: &str) -> Option<usize>;
}

impl InterfaceArityResolver for HashMap<String, usize> {
    fn interface_arity(&self, name: &str) -> Option<usize> {
        self.get(name).copied()
    }
}

impl<R: InterfaceArityResolver + ?Sized> InterfaceArityResolver for &R {
    fn interface_arity(&self, name: &str) -> Option<usize> {
        (**self).interface_arity(name)
    }
}
