//! Source file loading for Auric
//!
//! Reads `.au` files relative to a base directory and parses them into
//! modules. Missing extensions are filled in.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use auric_ast::decl::Module;
use crate::module::parse_module;
use crate::parser::ParseError;

/// Extension of Auric source files
pub const EXTENSION: &str = "au";

/// Load error
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error reading {path}: {source}")]
    IoError { path: PathBuf, source: std::io::Error },

    #[error("Parse error in {path}: {source}")]
    ParseError { path: PathBuf, source: ParseError },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Loads source units from disk
pub struct Loader {
    /// Base directory for resolving relative paths
    base_dir: PathBuf,
}

impl Loader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Loader { base_dir: base_dir.as_ref().to_path_buf() }
    }

    /// Load and parse a module from a file path
    pub fn load_file(&self, path: impl AsRef<Path>) -> LoadResult<Module> {
        let path = self.resolve_path(path.as_ref())?;
        let source = fs::read_to_string(&path)
            .map_err(|e| LoadError::IoError { path: path.clone(), source: e })?;

        let module = parse_module(&source)
            .map_err(|e| LoadError::ParseError { path: path.clone(), source: e })?;

        debug!(
            path = %path.display(),
            signatures = module.signatures.len(),
            definitions = module.definitions.len(),
            "loaded module"
        );
        Ok(module)
    }

    /// Parse a module from an in-memory source string
    pub fn load_source(&self, source: &str) -> LoadResult<Module> {
        parse_module(source).map_err(|e| LoadError::ParseError { path: PathBuf::from("<source>"), source: e })
    }

    fn resolve_path(&self, path: &Path) -> LoadResult<PathBuf> {
        let path = if path.is_absolute() { path.to_path_buf() } else { self.base_dir.join(path) };

        if path.exists() {
            return Ok(path);
        }
        if path.extension().is_none() {
            let with_ext = path.with_extension(EXTENSION);
            if with_ext.exists() {
                return Ok(with_ext);
            }
        }
        Err(LoadError::FileNotFound(path))
    }
}

/// Load a file relative to the current directory
pub fn load_file(path: impl AsRef<Path>) -> LoadResult<Module> {
    let path = path.as_ref();
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path.file_name().map(PathBuf::from).unwrap_or_else(|| path.to_path_buf());
    Loader::new(base).load_file(name)
}

/// Parse a module from source text
pub fn load_source(source: &str) -> LoadResult<Module> {
    Loader::new(".").load_source(source)
}
