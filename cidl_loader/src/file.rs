use cidl_types::{Library, ModelFile};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/* Environment variable listing directories searched for libraries given by name */
pub const SEARCH_PATH_ENV: &str = "CIDL_PATH";

/* Extensions tried, in order, when a library is referenced by name */
const MODEL_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("'{0}' is neither a file nor a library found in the search path")]
    NotFound(String),
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/* Loads model documents and accumulates their libraries in load order */
pub struct ModelLoader {
    /* Track loaded files so a document named twice is read once */
    loaded_files: HashSet<PathBuf>,

    /* Directories searched for libraries given by name */
    search_dirs: Vec<PathBuf>,

    /* All libraries, first document first */
    libraries: Vec<Library>,
}

impl ModelLoader {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { loaded_files: HashSet::new(), search_dirs, libraries: Vec::new() }
    }

    /* Loader whose search path comes from `CIDL_PATH` */
    pub fn from_env() -> Self {
        let search_dirs = std::env::var_os(SEARCH_PATH_ENV)
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self::new(search_dirs)
    }

    /* Resolve a positional token to a document path */
    pub fn locate(&self, file_or_library: &str) -> Result<PathBuf, LoadError> {
        let direct = PathBuf::from(file_or_library);
        if direct.is_file() {
            return Ok(direct);
        }

        for dir in &self.search_dirs {
            for extension in MODEL_EXTENSIONS {
                let candidate = dir.join(format!("{}.{}", file_or_library, extension));
                if candidate.is_file() {
                    debug!("library '{}' found at {}", file_or_library, candidate.display());
                    return Ok(candidate);
                }
            }
        }

        Err(LoadError::NotFound(file_or_library.to_string()))
    }

    /* Load a file path or library name */
    pub fn load(&mut self, file_or_library: &str) -> Result<(), LoadError> {
        let path = self.locate(file_or_library)?;
        self.load_file(&path)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let canonical_path = path
            .canonicalize()
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

        if !self.loaded_files.insert(canonical_path) {
            debug!("skipping already loaded file: {}", path.display());
            return Ok(());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let model = parse_model(path, &contents)?;

        info!("loaded {} library(ies) from {}", model.libraries.len(), path.display());
        self.libraries.extend(model.libraries);
        Ok(())
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    pub fn into_libraries(self) -> Vec<Library> {
        self.libraries
    }
}

/* JSON by extension, YAML otherwise */
fn parse_model(path: &Path, contents: &str) -> Result<ModelFile, LoadError> {
    let is_json = path
        .extension()
        .map(|extension| extension.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let parsed = if is_json {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    } else {
        serde_yml::from_str(contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| LoadError::Parse { path: path.to_path_buf(), message })
}
