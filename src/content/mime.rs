//! # Tabla de Content-Type
//! src/content/mime.rs
//!
//! Mapeo fijo extensión → MIME type. Una extensión desconocida no tiene
//! valor por defecto: el handler la trata como falla del request.
//!
//! Hay dos tablas base:
//!
//! | Tabla      | Extensiones                         |
//! |------------|-------------------------------------|
//! | `basic`    | html, txt                           |
//! | `extended` | html, txt, css, jpg, jpeg, png      |
//!
//! y se pueden agregar entradas extra desde la configuración.

use std::collections::HashMap;

const BASIC: &[(&str, &str)] = &[("html", "text/html"), ("txt", "text/plain")];

const EXTENDED: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("css", "text/css"),
    ("txt", "text/plain"),
    ("jpg", "image/jpg"),
    ("jpeg", "image/jpg"),
    ("png", "image/png"),
];

/// Mapa de extensión (en minúsculas) a MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeMap {
    entries: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Crea un mapa vacío
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Tabla mínima: html y txt
    pub fn basic() -> Self {
        Self::from_pairs(BASIC)
    }

    /// Tabla extendida: agrega css, jpg/jpeg y png
    pub fn extended() -> Self {
        Self::from_pairs(EXTENDED)
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::empty();
        for (ext, mime) in pairs {
            map.insert(ext, mime);
        }
        map
    }

    /// Agrega o reemplaza una entrada
    pub fn insert(&mut self, extension: &str, mime: &str) {
        self.entries
            .insert(extension.to_ascii_lowercase(), mime.to_string());
    }

    /// Busca el MIME type de una extensión
    ///
    /// # Ejemplo
    /// ```
    /// use content_server::content::ContentTypeMap;
    ///
    /// let map = ContentTypeMap::extended();
    /// assert_eq!(map.lookup("PNG"), Some("image/png"));
    /// assert_eq!(map.lookup("weird"), None);
    /// ```
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        self.entries
            .get(&extension.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Cantidad de extensiones registradas
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` si la tabla no tiene entradas
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContentTypeMap {
    fn default() -> Self {
        Self::extended()
    }
}

/// Extrae la "extensión" del path pedido (no del path resuelto)
///
/// Es el último segmento después de un `.`; los puntos finales se ignoran.
/// Si no hay ningún punto el resultado es el path completo, que nunca
/// coincide con una entrada de la tabla.
///
/// # Ejemplo
/// ```
/// use content_server::content::requested_extension;
///
/// assert_eq!(requested_extension("/docs/index.html"), "html");
/// assert_eq!(requested_extension("/docs"), "/docs");
/// ```
pub fn requested_extension(path: &str) -> &str {
    path.trim_end_matches('.').rsplit('.').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let map = ContentTypeMap::basic();
        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup("html"), Some("text/html"));
        assert_eq!(map.lookup("txt"), Some("text/plain"));
        assert_eq!(map.lookup("css"), None);
        assert_eq!(map.lookup("png"), None);
    }

    #[test]
    fn test_extended_table() {
        let map = ContentTypeMap::extended();
        assert_eq!(map.lookup("html"), Some("text/html"));
        assert_eq!(map.lookup("css"), Some("text/css"));
        assert_eq!(map.lookup("txt"), Some("text/plain"));
        assert_eq!(map.lookup("jpg"), Some("image/jpg"));
        assert_eq!(map.lookup("jpeg"), Some("image/jpg"));
        assert_eq!(map.lookup("png"), Some("image/png"));
    }

    #[test]
    fn test_default_is_extended() {
        assert_eq!(ContentTypeMap::default(), ContentTypeMap::extended());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let map = ContentTypeMap::basic();
        assert_eq!(map.lookup("HTML"), Some("text/html"));
        assert_eq!(map.lookup("Txt"), Some("text/plain"));
    }

    #[test]
    fn test_insert_custom_entry() {
        let mut map = ContentTypeMap::basic();
        map.insert("JS", "application/javascript");
        map.insert("txt", "text/markdown");

        assert_eq!(map.lookup("js"), Some("application/javascript"));
        assert_eq!(map.lookup("txt"), Some("text/markdown"));
    }

    #[test]
    fn test_empty_map() {
        let map = ContentTypeMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.lookup("html"), None);
    }

    // ==================== Extension ====================

    #[test]
    fn test_requested_extension_simple() {
        assert_eq!(requested_extension("/index.html"), "html");
        assert_eq!(requested_extension("/a/b/c.tar.gz"), "gz");
    }

    #[test]
    fn test_requested_extension_without_dot_is_whole_path() {
        assert_eq!(requested_extension("/docs"), "/docs");
        assert_eq!(requested_extension("/"), "/");
    }

    #[test]
    fn test_requested_extension_dot_in_directory() {
        // El segmento puede contener '/' si el punto está en un directorio
        assert_eq!(requested_extension("/v1.2/readme"), "2/readme");
    }

    #[test]
    fn test_requested_extension_trailing_dots() {
        assert_eq!(requested_extension("/a.txt."), "txt");
        assert_eq!(requested_extension("/a."), "/a");
        assert_eq!(requested_extension("..."), "");
    }
}
