//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 2\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! hi
//! ```
//!
//! Los headers se guardan en el orden en que se agregan. Una respuesta
//! "desnuda" (sin headers ni body) se serializa como status line + línea
//! vacía. No hay `Connection` header: el socket siempre se cierra después
//! de un intercambio.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use content_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_content(b"hi".to_vec(), "text/html");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nhi"));
//! ```

use super::StatusCode;

/// Versión que se escribe en la status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta; `None` significa que no se escribe nada
    body: Option<Vec<u8>>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Agrega un header al final de la lista
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Establece el body sin tocar los headers
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Establece el body junto con `Content-Length` y `Content-Type`
    ///
    /// `Content-Length` cuenta bytes, no caracteres.
    pub fn with_content(self, body: Vec<u8>, content_type: &str) -> Self {
        let length = body.len().to_string();
        self.with_header("Content-Length", &length)
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body, si existe
    pub fn to_bytes(&self) -> Vec<u8> {
        let body_len = self.body.as_ref().map_or(0, Vec::len);
        let mut result = Vec::with_capacity(64 + body_len);

        result.extend_from_slice(format!("{} {}\r\n", HTTP_VERSION, self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");

        if let Some(body) = &self.body {
            result.extend_from_slice(body);
        }

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca el primer header con ese nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene el body, vacío si no hay
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// Indica si la respuesta no tiene headers ni body
    pub fn is_bare(&self) -> bool {
        self.headers.is_empty() && self.body.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response_is_bare() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
        assert!(response.is_bare());
    }

    #[test]
    fn test_bare_serialization() {
        let bytes = Response::new(StatusCode::NotFound).to_bytes();
        assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_headers_keep_insertion_order() {
        let response = Response::new(StatusCode::Ok)
            .with_header("B", "2")
            .with_header("A", "1");

        let names: Vec<&str> = response.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_with_content() {
        let response = Response::new(StatusCode::Ok).with_content(b"hi".to_vec(), "text/html");

        assert_eq!(response.header("Content-Length"), Some("2"));
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert_eq!(response.body(), b"hi");
        assert!(!response.is_bare());
    }

    #[test]
    fn test_content_length_counts_bytes() {
        // "ñ" ocupa 2 bytes en UTF-8
        let response = Response::new(StatusCode::Ok).with_content("ñ".as_bytes().to_vec(), "text/plain");
        assert_eq!(response.header("Content-Length"), Some("2"));
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok).with_content(b"Test".to_vec(), "text/plain");
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nContent-Type: text/plain\r\n\r\nTest"
        );
    }

    #[test]
    fn test_binary_body() {
        let binary = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];
        let response = Response::new(StatusCode::Ok).with_content(binary.clone(), "image/png");
        let bytes = response.to_bytes();

        assert!(bytes.ends_with(&binary));
        assert_eq!(response.header("Content-Length"), Some("6"));
    }

    #[test]
    fn test_empty_body_is_not_bare() {
        let response = Response::new(StatusCode::Ok).with_body(Vec::new());
        assert!(!response.is_bare());
        assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
    }
}
