//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./content_server --port 8080 \
//!   --content-root ./content \
//!   --max-connections 11 \
//!   --mime-table basic \
//!   --fault-every 100
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 CONTENT_ROOT=/srv/www FAILURE_POLICY=surface ./content_server
//! ```

use crate::content::ContentTypeMap;
use crate::http::StatusCode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Tabla base de Content-Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MimeTableKind {
    /// html y txt
    Basic,
    /// html, txt, css, jpg, jpeg, png
    Extended,
}

/// Qué hacer cuando un archivo existe pero no se puede servir
/// (extensión desconocida o falla de lectura)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Registrar el error y responder 200 desnudo
    Degrade,
    /// Registrar el error y responder 500
    Surface,
}

/// Cómo se atienden las conexiones aceptadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionMode {
    /// Una conexión a la vez, en el thread del accept loop
    Sequential,
    /// Un thread por conexión
    Threaded,
}

/// Entrada extra de la tabla de Content-Type (`ext=mime/type`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeEntry {
    pub extension: String,
    pub mime: String,
}

impl std::str::FromStr for MimeEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (extension, mime) = s
            .split_once('=')
            .ok_or_else(|| format!("expected EXT=TYPE, got '{}'", s))?;
        let extension = extension.trim().trim_start_matches('.');
        let mime = mime.trim();

        if extension.is_empty() || mime.is_empty() {
            return Err(format!("expected EXT=TYPE, got '{}'", s));
        }

        Ok(MimeEntry {
            extension: extension.to_string(),
            mime: mime.to_string(),
        })
    }
}

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max connections must be >= 1 when set")]
    ZeroMaxConnections,

    #[error("read timeout must be > 0")]
    ZeroReadTimeout,

    #[error("fault interval must be >= 1 when set")]
    ZeroFaultInterval,

    #[error("fault probability must be within 0.0..=1.0, got {0}")]
    InvalidFaultProbability(f64),

    #[error("fault status {0} is not a supported status code")]
    UnsupportedFaultStatus(u16),
}

/// Configuración del servidor de contenido estático
#[derive(Debug, Clone, Parser)]
#[command(name = "content_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos, una petición por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el cual se sirven los archivos
    #[arg(long = "content-root", default_value = "./content", env = "CONTENT_ROOT")]
    pub content_root: PathBuf,

    // === Conexiones ===

    /// Detener el servidor después de N conexiones aceptadas (sin valor = nunca)
    #[arg(long = "max-connections", env = "MAX_CONNECTIONS")]
    pub max_connections: Option<u64>,

    /// Tiempo máximo de espera por la request line, en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Secuencial o un thread por conexión
    #[arg(long, value_enum, default_value = "sequential", env = "CONNECTION_MODE")]
    pub mode: ConnectionMode,

    // === Contenido ===

    /// Tabla base de Content-Type
    #[arg(long = "mime-table", value_enum, default_value = "extended", env = "MIME_TABLE")]
    pub mime_table: MimeTableKind,

    /// Entradas extra de Content-Type, repetible (ej: --mime js=application/javascript)
    #[arg(long = "mime", value_name = "EXT=TYPE")]
    pub extra_mime: Vec<MimeEntry>,

    /// Respuesta ante extensión desconocida o falla de lectura
    #[arg(long = "failure-policy", value_enum, default_value = "degrade", env = "FAILURE_POLICY")]
    pub failure_policy: FailurePolicy,

    // === Inyección de fallas ===

    /// Status con el que se reemplaza la respuesta al inyectar una falla
    #[arg(long = "fault-status", default_value = "418", env = "FAULT_STATUS")]
    pub fault_status: u16,

    /// Inyectar una falla cada N respuestas
    #[arg(long = "fault-every", env = "FAULT_EVERY")]
    pub fault_every: Option<u64>,

    /// Probabilidad (0.0 - 1.0) de inyectar una falla en cada respuesta
    #[arg(long = "fault-probability", default_value = "0.0", env = "FAULT_PROBABILITY")]
    pub fault_probability: f64,

    /// Semilla del generador de la inyección probabilística
    #[arg(long = "fault-seed", env = "FAULT_SEED")]
    pub fault_seed: Option<u64>,

    // === Logging ===

    /// Filtro de tracing cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use content_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura de la request line
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Status de la inyección de fallas; 418 si el valor no está en la tabla
    pub fn fault_status(&self) -> StatusCode {
        StatusCode::from_u16(self.fault_status).unwrap_or(StatusCode::ImATeapot)
    }

    /// Tabla de Content-Type: la base elegida más las entradas extra
    pub fn content_types(&self) -> ContentTypeMap {
        let mut map = match self.mime_table {
            MimeTableKind::Basic => ContentTypeMap::basic(),
            MimeTableKind::Extended => ContentTypeMap::extended(),
        };
        for entry in &self.extra_mime {
            map.insert(&entry.extension, &entry.mime);
        }
        map
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == Some(0) {
            return Err(ConfigError::ZeroMaxConnections);
        }

        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }

        if self.fault_every == Some(0) {
            return Err(ConfigError::ZeroFaultInterval);
        }

        if !(0.0..=1.0).contains(&self.fault_probability) {
            return Err(ConfigError::InvalidFaultProbability(self.fault_probability));
        }

        if StatusCode::from_u16(self.fault_status).is_none() {
            return Err(ConfigError::UnsupportedFaultStatus(self.fault_status));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(address = %self.address(), "network");
        info!(content_root = %self.content_root.display(), mime_table = ?self.mime_table,
            extra_mime = self.extra_mime.len(), failure_policy = ?self.failure_policy, "content");

        match self.max_connections {
            Some(max) => info!(mode = ?self.mode, max_connections = max,
                read_timeout_ms = self.read_timeout_ms, "connections"),
            None => info!(mode = ?self.mode, max_connections = "unlimited",
                read_timeout_ms = self.read_timeout_ms, "connections"),
        }

        if self.fault_every.is_some() || self.fault_probability > 0.0 {
            info!(status = self.fault_status, every = ?self.fault_every,
                probability = self.fault_probability, seed = ?self.fault_seed, "fault injection");
        } else {
            info!("fault injection disabled");
        }
    }
}

impl Default for Config {
    /// Configuración por defecto, igual a los defaults del CLI
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            content_root: PathBuf::from("./content"),
            max_connections: None,
            read_timeout_ms: 5_000,
            mode: ConnectionMode::Sequential,
            mime_table: MimeTableKind::Extended,
            extra_mime: Vec::new(),
            failure_policy: FailurePolicy::Degrade,
            fault_status: 418,
            fault_every: None,
            fault_probability: 0.0,
            fault_seed: None,
            log_level: "info".to_string(),
        }
    }
}
