//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Accept loop del servidor. Cada conexión transporta exactamente un
//! request: se lee una línea, se responde y se cierra.
//!
//! Dos modos:
//! - `sequential`: la conexión se atiende completa antes del siguiente
//!   `accept`
//! - `threaded`: un thread por conexión; el contrato de una petición por
//!   conexión no cambia
//!
//! Con `max_connections` el loop termina después de aceptar N conexiones
//! (en modo `threaded` espera a que terminen los threads en curso). Una
//! conexión que no manda request line es un error de esa conexión, no del
//! servidor. Una falla de `accept` transitoria se registra y el loop sigue;
//! una persistente (ej: EMFILE) termina `run` con [`ServerError::Accept`].

use crate::config::{Config, ConnectionMode};
use crate::error::{ConnectionError, ServerError};
use crate::faults::FaultPlan;
use crate::handler::RequestHandler;
use crate::http::{Response, StatusCode};
use crate::server::ResponseWriter;
use std::io::{self, BufRead, BufReader, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Largo máximo de la request line en bytes, terminador incluido
pub const MAX_REQUEST_LINE: u64 = 8192;

/// Bytes que se descartan del resto de una línea demasiado larga antes de
/// responder
const MAX_DISCARD: u64 = 64 * 1024;

/// Servidor HTTP de contenido estático
pub struct Server {
    config: Config,
    listener: TcpListener,
    handler: Arc<RequestHandler>,
    writer: Arc<ResponseWriter>,
}

impl Server {
    /// Valida la configuración y abre el socket
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        config.validate()?;

        let handler = RequestHandler::from_config(&config);
        let writer = ResponseWriter::new(FaultPlan::from_config(&config));
        Self::bind_with(config, handler, writer)
    }

    /// Igual que [`Server::bind`] pero con handler y writer explícitos
    pub fn bind_with(
        config: Config,
        handler: RequestHandler,
        writer: ResponseWriter,
    ) -> Result<Self, ServerError> {
        let address = config.address();
        info!("[*] Iniciando servidor en {}", address);

        let listener =
            TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self {
            config,
            listener,
            handler: Arc::new(handler),
            writer: Arc::new(writer),
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Corre el accept loop
    ///
    /// Retorna la cantidad de conexiones aceptadas cuando se alcanza
    /// `max_connections`; sin límite no retorna.
    pub fn run(self) -> Result<u64, ServerError> {
        let mode = self.config.mode;
        let max_connections = self.config.max_connections;
        let read_timeout = self.config.read_timeout();

        match self.local_addr() {
            Ok(addr) => info!("[+] Servidor escuchando en {} (modo {:?})", addr, mode),
            Err(e) => warn!(error = %e, "no se pudo obtener la dirección local"),
        }

        let mut accepted: u64 = 0;
        let mut workers: Vec<JoinHandle<()>> = Vec::new();
        let mut outcome = Ok(());

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) if is_transient_accept_error(&e) => {
                    warn!(error = %e, "error transitorio al aceptar conexión");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "error persistente al aceptar conexión, deteniendo servidor");
                    outcome = Err(ServerError::Accept(e));
                    break;
                }
            };

            accepted += 1;

            match mode {
                ConnectionMode::Sequential => {
                    serve_connection(stream, &self.handler, &self.writer, read_timeout);
                }
                ConnectionMode::Threaded => {
                    let handler = Arc::clone(&self.handler);
                    let writer = Arc::clone(&self.writer);
                    workers.retain(|worker| !worker.is_finished());
                    workers.push(thread::spawn(move || {
                        serve_connection(stream, &handler, &writer, read_timeout);
                    }));
                }
            }

            if max_connections.is_some_and(|max| accepted >= max) {
                info!(accepted, "límite de conexiones alcanzado, deteniendo servidor");
                break;
            }
        }

        for worker in workers {
            if worker.join().is_err() {
                error!("un thread de conexión terminó con panic");
            }
        }

        outcome.map(|()| accepted)
    }
}

/// `true` si la falla de `accept` afecta solo a la conexión entrante y
/// tiene sentido seguir aceptando
pub fn is_transient_accept_error(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("listener", &self.listener)
            .field("mode", &self.config.mode)
            .field("max_connections", &self.config.max_connections)
            .finish_non_exhaustive()
    }
}

/// Atiende una conexión y registra el resultado
fn serve_connection(
    stream: TcpStream,
    handler: &RequestHandler,
    writer: &ResponseWriter,
    read_timeout: Duration,
) {
    let start = Instant::now();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    match handle_connection(stream, handler, writer, read_timeout) {
        Ok(status) => info!(
            %peer,
            %status,
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "conexión atendida"
        ),
        Err(e) => warn!(%peer, error = %e, "conexión descartada"),
    }
}

/// Lee la request line, responde y cierra
///
/// Una línea que supera [`MAX_REQUEST_LINE`] se responde con 400.
pub fn handle_connection(
    stream: TcpStream,
    handler: &RequestHandler,
    writer: &ResponseWriter,
    read_timeout: Duration,
) -> Result<StatusCode, ConnectionError> {
    stream.set_read_timeout(Some(read_timeout))?;

    let mut reader = BufReader::new(&stream);
    let response = match read_request_line(&mut reader) {
        Ok(line) => handler.handle(&line),
        Err(ConnectionError::RequestLineTooLong(limit)) => {
            warn!(limit, "request line demasiado larga");
            discard_line(&mut reader);
            Response::new(StatusCode::BadRequest)
        }
        Err(e) => return Err(e),
    };

    let status = writer.write(&mut &stream, response)?;

    // El peer puede haber cerrado ya; no cambia el resultado
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        debug!(error = %e, "shutdown después de responder");
    }

    Ok(status)
}

/// Lee una línea (hasta `\n` o EOF) del reader
///
/// Una línea parcial al llegar EOF se acepta; cero bytes es
/// [`ConnectionError::NoRequestLine`]. Los bytes que no son UTF-8 válido
/// se reemplazan por `U+FFFD`.
pub fn read_request_line<R: BufRead>(reader: &mut R) -> Result<String, ConnectionError> {
    let mut raw = Vec::new();

    let read = reader
        .take(MAX_REQUEST_LINE + 1)
        .read_until(b'\n', &mut raw)
        .map_err(ConnectionError::from_read)?;

    if read == 0 {
        return Err(ConnectionError::NoRequestLine);
    }

    if read as u64 > MAX_REQUEST_LINE {
        return Err(ConnectionError::RequestLineTooLong(MAX_REQUEST_LINE));
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Consume el resto de la línea para que el cierre no descarte la respuesta
fn discard_line<R: BufRead>(reader: &mut R) {
    let mut rest = Vec::new();
    if let Err(e) = reader.take(MAX_DISCARD).read_until(b'\n', &mut rest) {
        debug!(error = %e, "no se pudo descartar el resto de la línea");
    }
}
