//! # Resolución de Paths
//! src/content/resolver.rs
//!
//! Traduce el path de un request a una entrada del sistema de archivos bajo
//! el content root:
//!
//! ```text
//! "/docs/a.txt"  →  <root>/docs/a.txt  →  File | Directory | Missing | Special
//! ```
//!
//! El path se concatena sobre el root con exactamente un separador. Los
//! componentes `..` (o un path absoluto que reaparece después de quitar las
//! barras iniciales) se rechazan antes de tocar el disco, y una entrada que
//! existe debe seguir bajo el root después de resolver symlinks.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Nombre del archivo índice de un directorio
pub const INDEX_FILE: &str = "index.html";

/// Errores al resolver o leer contenido
#[derive(Debug, Error)]
pub enum ContentError {
    /// La extensión pedida no está en la tabla de Content-Type
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// El path escapa del content root
    #[error("path escapes content root: {0}")]
    OutsideRoot(String),

    /// Falla de I/O al consultar o leer una entrada
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    fn io(path: &Path, source: io::Error) -> Self {
        ContentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Entrada del sistema de archivos a la que apunta un request
///
/// Se resuelve una vez por request y se descarta después de responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedResource {
    /// Archivo regular
    File(PathBuf),

    /// Directorio, con su `index.html` si existe
    Directory { path: PathBuf, index: Option<PathBuf> },

    /// No existe nada en ese path
    Missing,

    /// Existe pero no es archivo ni directorio (socket, fifo, ...)
    Special(PathBuf),
}

/// Directorio base bajo el cual viven todos los archivos servibles
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Concatena el path pedido sobre el root sin tocar el disco
    ///
    /// # Ejemplo
    /// ```
    /// use content_server::content::ContentRoot;
    /// use std::path::Path;
    ///
    /// let root = ContentRoot::new("./content");
    /// assert_eq!(root.map_path("/a/b.txt").unwrap(), Path::new("./content/a/b.txt"));
    /// assert!(root.map_path("/../secret").is_err());
    /// ```
    pub fn map_path(&self, request_path: &str) -> Result<PathBuf, ContentError> {
        let mut mapped = self.root.clone();
        for component in Path::new(request_path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(segment) => mapped.push(segment),
                Component::CurDir => {}
                _ => return Err(ContentError::OutsideRoot(request_path.to_string())),
            }
        }
        Ok(mapped)
    }

    /// Resuelve el path pedido a un [`ResolvedResource`]
    pub fn resolve(&self, request_path: &str) -> Result<ResolvedResource, ContentError> {
        let path = self.map_path(request_path)?;

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ResolvedResource::Missing),
            Err(e) => return Err(ContentError::io(&path, e)),
        };

        self.ensure_inside(&path, request_path)?;

        if metadata.is_file() {
            return Ok(ResolvedResource::File(path));
        }

        if metadata.is_dir() {
            let candidate = path.join(INDEX_FILE);
            let index = if candidate.exists() {
                self.ensure_inside(&candidate, request_path)?;
                Some(candidate)
            } else {
                None
            };
            return Ok(ResolvedResource::Directory { path, index });
        }

        Ok(ResolvedResource::Special(path))
    }

    /// Lee el contenido completo de un archivo como bytes
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, ContentError> {
        fs::read(path).map_err(|e| ContentError::io(path, e))
    }

    /// Verifica que una entrada existente siga bajo el root después de
    /// resolver symlinks
    fn ensure_inside(&self, path: &Path, request_path: &str) -> Result<(), ContentError> {
        let canonical_root = fs::canonicalize(&self.root).map_err(|e| ContentError::io(&self.root, e))?;
        let canonical = fs::canonicalize(path).map_err(|e| ContentError::io(path, e))?;

        if canonical.starts_with(&canonical_root) {
            Ok(())
        } else {
            Err(ContentError::OutsideRoot(request_path.to_string()))
        }
    }
}

impl Default for ContentRoot {
    fn default() -> Self {
        Self::new("./content")
    }
}
