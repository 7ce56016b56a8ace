/* Naming utilities shared by the classifier and the renderers */

use indexmap::IndexMap;
use std::collections::HashSet;

/* Rust reserved keywords that need to be escaped */
const RUST_KEYWORDS: &[&str] = &[
  "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
  "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
  "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
  "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final", "macro",
  "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

/* Locals declared by generated trampolines and accessors */
const GENERATED_LOCALS: &[&str] = &["me", "p", "myself", "result_code"];

/* External libraries whose types are re-exported by the support library */
const KNOWN_NAMESPACES: &[(&str, &str)] = &[
  ("CAPEOPEN", "cape_open"),
  ("CAPEOPEN_1_2", "cape_open_1_2"),
];

/* Prefix applied to identifiers that collide with a keyword */
pub const KEYWORD_ESCAPE: char = '_';

/* Prefix of every raw ABI entry point */
pub const NATIVE_SYMBOL_TAG: &str = "raw";

/// Read-only lookup tables used during classification and rendering.
///
/// Built once per process and shared by reference; nothing mutates them
/// after construction.
#[derive(Debug, Clone)]
pub struct NamingTables {
  keywords: HashSet<&'static str>,
  locals: HashSet<&'static str>,
  namespaces: IndexMap<&'static str, &'static str>,
}

impl NamingTables {
  pub fn new() -> Self {
    Self {
      keywords: RUST_KEYWORDS.iter().copied().collect(),
      locals: GENERATED_LOCALS.iter().copied().collect(),
      namespaces: KNOWN_NAMESPACES.iter().copied().collect(),
    }
  }

  pub fn is_keyword(&self, word: &str) -> bool {
    self.keywords.contains(word)
  }

  /* Escape an identifier that collides with a keyword */
  pub fn escape(&self, identifier: &str) -> String {
    if self.is_keyword(identifier) {
      format!("{}{}", KEYWORD_ESCAPE, identifier)
    } else {
      identifier.to_string()
    }
  }

  /* Argument names must also stay clear of the generated locals */
  pub fn escape_argument(&self, identifier: &str) -> String {
    if self.locals.contains(identifier) {
      format!("{}{}", KEYWORD_ESCAPE, identifier)
    } else {
      self.escape(identifier)
    }
  }

  /* Module alias under the support library for a well-known namespace */
  pub fn namespace_alias(&self, namespace: &str) -> Option<&'static str> {
    self.namespaces.get(namespace).copied()
  }
}

impl Default for NamingTables {
  fn default() -> Self {
    Self::new()
  }
}

/// Converts `GetComponentName` to `get_component_name`.
///
/// A separator goes before each upper-case letter unless the previous
/// character is upper case (acronym runs stay joined), the letter starts the
/// identifier, or a separator already precedes it. The output contains no
/// upper-case letters, so converting it again is a no-op.
pub fn to_snake_case(identifier: &str) -> String {
  let mut name = String::with_capacity(identifier.len() + 4);
  let mut allow_separator = false;
  for c in identifier.chars() {
    if c.is_ascii_uppercase() {
      if allow_separator {
        name.push('_');
      }
      name.push(c.to_ascii_lowercase());
      allow_separator = false;
    } else {
      name.push(c);
      allow_separator = c != '_';
    }
  }
  name
}

/// Converts `CAPE_UNKNOWN_PHASE` to `CapeUnknownPhase`.
pub fn to_camel_case(identifier: &str) -> String {
  let mut result = String::with_capacity(identifier.len());
  let mut upper_case = true;
  for c in identifier.chars() {
    if c == '_' {
      upper_case = true;
    } else if upper_case {
      result.push(c.to_ascii_uppercase());
      upper_case = false;
    } else {
      result.push(c.to_ascii_lowercase());
    }
  }
  result
}

/// Name of the provider trampoline for a method: `GetName` becomes
/// `raw_get_name`. Every upper-case letter gets a separator, acronyms included.
pub fn native_symbol_name(method_name: &str) -> String {
  let mut result = String::with_capacity(method_name.len() + 8);
  for c in method_name.chars() {
    if c.is_ascii_uppercase() {
      result.push('_');
      result.push(c.to_ascii_lowercase());
    } else {
      result.push(c);
    }
  }
  if !result.starts_with('_') {
    result.insert(0, '_');
  }
  format!("{}{}", NATIVE_SYMBOL_TAG, result)
}

/* Consumer handle name: `ICapeIdentification` -> `CapeIdentification`, `Thing` -> `TThing` */
pub fn smart_pointer_name(interface_name: &str) -> String {
  match interface_name.strip_prefix('I') {
    Some(stripped) if !stripped.is_empty() => stripped.to_string(),
    _ => format!("T{}", interface_name),
  }
}

/* Constant-style name used for UUID constants */
pub fn upper_case(name: &str) -> String {
  name.to_ascii_uppercase()
}

/* Generic provider parameter for a data-interface argument: `_phase_list` -> `TypeOfPhaseList` */
pub fn provider_type_param(argument_name: &str) -> String {
  let trimmed = argument_name.strip_prefix(KEYWORD_ESCAPE).unwrap_or(argument_name);
  format!("TypeOf{}", to_camel_case_preserving(trimmed))
}

/* Like `to_camel_case`, but keeps the case of non-initial letters */
fn to_camel_case_preserving(identifier: &str) -> String {
  let mut result = String::with_capacity(identifier.len());
  let mut upper_case = true;
  for c in identifier.chars() {
    if c == '_' {
      upper_case = true;
    } else if upper_case {
      result.push(c.to_ascii_uppercase());
      upper_case = false;
    } else {
      result.push(c);
    }
  }
  result
}

/* Loop variable used in generated documentation examples */
pub fn example_variable_name(type_name: &str) -> String {
  let mut chars = type_name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_uppercase() => {
      format!("{}{}", first.to_ascii_lowercase(), chars.as_str())
    }
    _ => format!("_{}", type_name),
  }
}

/* Module name used in documentation examples when none is configured */
pub fn default_example_module(library_name: &str) -> String {
  to_snake_case(library_name).replacen("capeopen", "cape_open", 1)
}
