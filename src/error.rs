//! # Errores del Servidor
//! src/error.rs
//!
//! Dos niveles:
//!
//! - [`ServerError`]: impide arrancar el servidor (bind, configuración) o
//!   lo detiene (falla persistente de `accept`)
//! - [`ConnectionError`]: afecta solo a una conexión; se registra, la
//!   conexión se cierra y el accept loop sigue

use crate::config::ConfigError;
use std::io;
use thiserror::Error;

/// Errores fatales del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Falla de `accept` que no se resuelve reintentando (ej: EMFILE)
    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
}

/// Errores de una conexión individual
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// El cliente cerró sin mandar ningún byte
    #[error("no request line received")]
    NoRequestLine,

    /// Se agotó el tiempo esperando la request line
    #[error("timed out waiting for request line")]
    ReadTimeout,

    /// La request line supera el largo máximo; se responde 400
    #[error("request line exceeds {0} bytes")]
    RequestLineTooLong(u64),

    #[error("connection I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConnectionError {
    /// Clasifica un error de lectura
    pub fn from_read(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => ConnectionError::ReadTimeout,
            _ => ConnectionError::Io(error),
        }
    }
}
