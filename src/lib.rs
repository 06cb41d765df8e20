//! # Content Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo de archivos estáticos: acepta una conexión,
//! lee una sola request line, resuelve el path bajo un content root y
//! escribe status line, headers y body. Una petición por conexión.
//!
//! ## Arquitectura
//!
//! - `http`: request line, responses y tabla de status codes
//! - `content`: content root, resolución de paths y tabla de Content-Type
//! - `handler`: de request line a response
//! - `faults`: estrategias de inyección de fallas
//! - `server`: accept loop y escritura de respuestas
//! - `config`: CLI y variables de entorno
//! - `error`: errores del servidor y de cada conexión
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use content_server::config::Config;
//! use content_server::server::Server;
//!
//! let mut config = Config::default();
//! config.max_connections = Some(11);
//!
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el accept loop");
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod faults;
pub mod handler;
pub mod http;
pub mod server;
