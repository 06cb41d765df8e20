//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Lee la request line y la pasa al `RequestHandler`
//! 4. Escribe la respuesta con el `ResponseWriter` y cierra

pub mod tcp;
pub mod writer;

// Re-exportar para facilitar el uso
pub use tcp::Server;
pub use writer::ResponseWriter;
