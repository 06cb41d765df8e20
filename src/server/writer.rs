//! # Escritura de Respuestas
//! src/server/writer.rs
//!
//! Serializa una [`Response`] al stream de la conexión. Antes de escribir
//! consulta su estrategia de inyección de fallas: si dispara, la respuesta
//! prevista se descarta y se escribe una desnuda con el status inyectado.

use crate::faults::{FaultInjector, FaultPlan};
use crate::http::{Response, StatusCode};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Escritor de respuestas con inyección de fallas
pub struct ResponseWriter {
    faults: Box<dyn FaultInjector>,
}

impl ResponseWriter {
    pub fn new<F: FaultInjector + 'static>(faults: F) -> Self {
        Self {
            faults: Box::new(faults),
        }
    }

    /// Escritor que nunca inyecta fallas
    pub fn plain() -> Self {
        Self::new(FaultPlan::none())
    }

    /// Aplica la inyección de fallas a la respuesta prevista
    pub fn prepare(&self, response: Response) -> Response {
        match self.faults.intercept() {
            Some(status) => {
                warn!(intended = %response.status(), injected = %status, "falla inyectada");
                Response::new(status)
            }
            None => response,
        }
    }

    /// Escribe la respuesta y retorna el status efectivamente enviado
    pub fn write<W: Write>(&self, out: &mut W, response: Response) -> io::Result<StatusCode> {
        let response = self.prepare(response);
        let bytes = response.to_bytes();

        out.write_all(&bytes)?;
        out.flush()?;

        debug!(status = %response.status(), bytes = bytes.len(), "respuesta escrita");
        Ok(response.status())
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::plain()
    }
}

impl std::fmt::Debug for ResponseWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseWriter").finish_non_exhaustive()
    }
}
