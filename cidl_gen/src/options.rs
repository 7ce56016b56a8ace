use crate::naming::default_example_module;
use cidl_types::Library;

/* Default alias of the runtime support library */
pub const DEFAULT_SUPPORT_MODULE: &str = "cobia";

/* Default alias of the raw-ABI module */
pub const DEFAULT_NATIVE_MODULE: &str = "C";

/// Options controlling the names the generated code refers to.
///
/// Unset fields are derived from the library being generated when the
/// options are resolved into a [`RenderContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path of the runtime support library (`-c`).
    pub support_module: String,
    /// Module name used in documentation examples (`-m`).
    pub example_module: Option<String>,
    /// Module holding the raw ABI declarations of this library (`-n`).
    pub native_module: String,
    /// Prefix of raw ABI declarations of this library (`-s`).
    pub native_namespace: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            support_module: DEFAULT_SUPPORT_MODULE.to_string(),
            example_module: None,
            native_module: DEFAULT_NATIVE_MODULE.to_string(),
            native_namespace: None,
        }
    }
}

impl GeneratorOptions {
    pub fn resolve(&self, library: &Library) -> RenderContext {
        RenderContext {
            library: library.name.clone(),
            support: self.support_module.clone(),
            example_module: self
                .example_module
                .clone()
                .unwrap_or_else(|| default_example_module(&library.name)),
            native_module: self.native_module.clone(),
            native_namespace: self.native_namespace.clone().unwrap_or_else(|| library.name.clone()),
        }
    }
}

/// Fully resolved naming configuration for one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub library: String,
    pub support: String,
    pub example_module: String,
    pub native_module: String,
    pub native_namespace: String,
}

impl RenderContext {
    /* `cobia::C::<name>` */
    pub fn support_raw(&self, name: &str) -> String {
        format!("{}::C::{}", self.support, name)
    }

    /* `cobia::<name>` */
    pub fn support_path(&self, name: &str) -> String {
        format!("{}::{}", self.support, name)
    }

    /* Raw ABI declaration of this library: `C::<namespace>_<name>` */
    pub fn native_path(&self, name: &str) -> String {
        format!("{}::{}_{}", self.native_module, self.native_namespace, name)
    }

    /* Visibility of the raw pointer held by consumer smart pointers */
    pub fn field_visibility(&self) -> &'static str {
        if self.support == "crate" {
            "pub(crate)"
        } else {
            "pub"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidl_types::CapeUuid;

    fn library(name: &str) -> Library {
        Library {
            name: name.to_string(),
            uuid: CapeUuid::default(),
            category_ids: Vec::new(),
            enumerations: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn defaults_derive_from_library() {
        let ctx = GeneratorOptions::default().resolve(&library("CAPEOPEN_1_2"));
        assert_eq!(ctx.support, "cobia");
        assert_eq!(ctx.example_module, "cape_open_1_2");
        assert_eq!(ctx.native_path("ICapeIdentification"), "C::CAPEOPEN_1_2_ICapeIdentification");
        assert_eq!(ctx.field_visibility(), "pub");
    }

    #[test]
    fn explicit_options_win() {
        let options = GeneratorOptions {
            support_module: "crate".to_string(),
            example_module: Some("thermo".to_string()),
            native_module: "ffi".to_string(),
            native_namespace: Some("TH".to_string()),
        };
        let ctx = options.resolve(&library("Thermo"));
        assert_eq!(ctx.support_raw("ICapeInterface"), "crate::C::ICapeInterface");
        assert_eq!(ctx.native_path("Phase"), "ffi::TH_Phase");
        assert_eq!(ctx.example_module, "thermo");
        assert_eq!(ctx.field_visibility(), "pub(crate)");
    }
}
