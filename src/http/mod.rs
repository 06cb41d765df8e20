//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Subconjunto mínimo de HTTP/1.1:
//!
//! - Parsing de la request line (headers y body del request se ignoran)
//! - Construcción de responses
//! - Tabla cerrada de status codes
//!
//! No hay chunked transfer encoding ni conexiones persistentes: cada
//! conexión transporta exactamente un request y una response.

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, RequestLine};
pub use response::Response;
pub use status::StatusCode;
