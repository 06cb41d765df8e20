//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo lee la primera línea de cada conexión. Headers y body del
//! request nunca se consumen.
//!
//! ## Formato
//!
//! ```text
//! GET /index.html HTTP/1.1
//! ```
//!
//! La línea se separa por espacios simples (no por whitespace en general):
//! un doble espacio produce un token vacío y por lo tanto un request inválido.
//! Los tokens vacíos al final se descartan, así que un espacio final no
//! cambia el conteo.

use std::str::FromStr;
use thiserror::Error;

/// Métodos HTTP reconocidos
///
/// Solo GET se sirve; el resto se reconoce para poder contestar 405
/// en lugar de 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Comparación exacta y sensible a mayúsculas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(ParseError::UnknownMethod(s.to_string())),
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// La línea no tiene exactamente tres tokens
    #[error("expected 3 tokens in request line, got {0}")]
    TokenCount(usize),

    /// Método fuera de {GET, POST, PUT, DELETE}
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),
}

/// Request line parseada: `METHOD PATH VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,

    /// Path tal cual llegó (ej: "/docs/index.html")
    path: String,

    /// Versión del protocolo; se guarda pero no se valida
    version: String,
}

impl RequestLine {
    /// Parsea una request line
    ///
    /// Se aceptan terminadores `\r\n` o `\n` al final.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use content_server::http::{Method, RequestLine};
    ///
    /// let line = RequestLine::parse("GET /index.html HTTP/1.1\r\n").unwrap();
    /// assert_eq!(line.method(), Method::GET);
    /// assert_eq!(line.path(), "/index.html");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let line = raw.trim_end_matches(&['\r', '\n'][..]);
        let tokens = split_tokens(line);

        if tokens.len() != 3 {
            return Err(ParseError::TokenCount(tokens.len()));
        }

        let method = tokens[0].parse::<Method>()?;

        Ok(RequestLine {
            method,
            path: tokens[1].to_string(),
            version: tokens[2].to_string(),
        })
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Separa por espacios simples y descarta los tokens vacíos finales
fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = line.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let line = RequestLine::parse("GET / HTTP/1.1").unwrap();

        assert_eq!(line.method(), Method::GET);
        assert_eq!(line.path(), "/");
        assert_eq!(line.version(), "HTTP/1.1");
    }

    #[test]
    fn test_parse_strips_line_terminators() {
        let crlf = RequestLine::parse("GET /a.txt HTTP/1.0\r\n").unwrap();
        let lf = RequestLine::parse("GET /a.txt HTTP/1.0\n").unwrap();

        assert_eq!(crlf, lf);
        assert_eq!(crlf.version(), "HTTP/1.0");
    }

    #[test]
    fn test_parse_all_methods() {
        for (raw, method) in [
            ("GET", Method::GET),
            ("POST", Method::POST),
            ("PUT", Method::PUT),
            ("DELETE", Method::DELETE),
        ] {
            let line = RequestLine::parse(&format!("{} /x HTTP/1.1", raw)).unwrap();
            assert_eq!(line.method(), method);
            assert_eq!(line.method().as_str(), raw);
        }
    }

    #[test]
    fn test_version_is_not_validated() {
        let line = RequestLine::parse("GET / banana").unwrap();
        assert_eq!(line.version(), "banana");
    }

    // ==================== Token Count ====================

    #[test]
    fn test_too_few_tokens() {
        assert_eq!(RequestLine::parse("GET /"), Err(ParseError::TokenCount(2)));
        assert_eq!(RequestLine::parse("GET"), Err(ParseError::TokenCount(1)));
    }

    #[test]
    fn test_too_many_tokens() {
        assert_eq!(
            RequestLine::parse("GET / HTTP/1.1 extra"),
            Err(ParseError::TokenCount(4))
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(RequestLine::parse(""), Err(ParseError::TokenCount(0)));
        assert_eq!(RequestLine::parse("\r\n"), Err(ParseError::TokenCount(0)));
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        assert_eq!(
            RequestLine::parse("GET  / HTTP/1.1"),
            Err(ParseError::TokenCount(4))
        );
    }

    #[test]
    fn test_trailing_space_is_ignored() {
        let line = RequestLine::parse("GET / HTTP/1.1  ").unwrap();
        assert_eq!(line.version(), "HTTP/1.1");
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(
            RequestLine::parse("GET\t/\tHTTP/1.1"),
            Err(ParseError::TokenCount(1))
        );
    }

    // ==================== Method ====================

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            RequestLine::parse("PATCH / HTTP/1.1"),
            Err(ParseError::UnknownMethod("PATCH".to_string()))
        );
    }

    #[test]
    fn test_method_is_case_sensitive() {
        assert!(matches!(
            RequestLine::parse("get / HTTP/1.1"),
            Err(ParseError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::TokenCount(2).to_string(),
            "expected 3 tokens in request line, got 2"
        );
        assert_eq!(
            ParseError::UnknownMethod("HEAD".into()).to_string(),
            "unknown HTTP method: HEAD"
        );
    }
}
