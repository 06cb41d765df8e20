//! # Manejo de Requests
//! src/handler/mod.rs
//!
//! Convierte una request line en una [`Response`]:
//!
//! ```text
//! línea → RequestLine → método → ContentRoot::resolve → Response
//! ```
//!
//! | Situación                              | Respuesta                         |
//! |----------------------------------------|-----------------------------------|
//! | ≠ 3 tokens / método desconocido        | 400                               |
//! | POST, PUT, DELETE                      | 405                               |
//! | no existe o escapa del root            | 404                               |
//! | archivo con extensión conocida         | 200 + Content-Length/Content-Type |
//! | directorio con `index.html`            | 200 + text/html                   |
//! | directorio sin índice / entrada rara   | 200 desnudo                       |
//! | extensión desconocida / falla de I/O   | según `FailurePolicy`             |
//!
//! La extensión se toma del path pedido, no del path resuelto: para
//! `/docs` la "extensión" es `/docs`.

use crate::config::{Config, FailurePolicy};
use crate::content::{requested_extension, ContentError, ContentRoot, ContentTypeMap, ResolvedResource};
use crate::http::{Method, RequestLine, Response, StatusCode};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Content-Type del índice de un directorio
const INDEX_CONTENT_TYPE: &str = "text/html";

/// Resuelve requests contra un content root
#[derive(Debug, Clone)]
pub struct RequestHandler {
    root: ContentRoot,
    content_types: ContentTypeMap,
    failure_policy: FailurePolicy,
}

impl RequestHandler {
    pub fn new(root: ContentRoot, content_types: ContentTypeMap, failure_policy: FailurePolicy) -> Self {
        Self {
            root,
            content_types,
            failure_policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContentRoot::new(config.content_root.clone()),
            config.content_types(),
            config.failure_policy,
        )
    }

    pub fn root(&self) -> &ContentRoot {
        &self.root
    }

    /// Procesa una request line cruda
    pub fn handle(&self, raw: &str) -> Response {
        info!("Procesando request: {:?}", raw);

        let request = match RequestLine::parse(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Bad request: {:?}", raw);
                return Response::new(StatusCode::BadRequest);
            }
        };

        if request.method() != Method::GET {
            debug!(method = request.method().as_str(), "método no permitido");
            return Response::new(StatusCode::MethodNotAllowed);
        }

        self.serve(request.path())
    }

    /// Sirve un GET ya validado
    fn serve(&self, path: &str) -> Response {
        let resource = match self.root.resolve(path) {
            Ok(resource) => resource,
            Err(ContentError::OutsideRoot(p)) => {
                warn!(path = %p, "path fuera del content root");
                return Response::new(StatusCode::NotFound);
            }
            Err(e) => return self.failure(e),
        };

        debug!(?resource, "recurso resuelto");

        match resource {
            ResolvedResource::Missing => Response::new(StatusCode::NotFound),
            ResolvedResource::File(file) => self.serve_file(&file, requested_extension(path)),
            ResolvedResource::Directory { index: Some(index), .. } => {
                self.serve_bytes(&index, INDEX_CONTENT_TYPE)
            }
            ResolvedResource::Directory { index: None, .. } | ResolvedResource::Special(_) => {
                Response::new(StatusCode::Ok)
            }
        }
    }

    fn serve_file(&self, file: &Path, extension: &str) -> Response {
        match self.content_types.lookup(extension) {
            Some(content_type) => self.serve_bytes(file, content_type),
            None => self.failure(ContentError::UnsupportedMediaType(extension.to_string())),
        }
    }

    fn serve_bytes(&self, file: &Path, content_type: &str) -> Response {
        match self.root.read(file) {
            Ok(body) => Response::new(StatusCode::Ok).with_content(body, content_type),
            Err(e) => self.failure(e),
        }
    }

    /// Falla al servir un recurso que existe
    fn failure(&self, e: ContentError) -> Response {
        error!(error = %e, policy = ?self.failure_policy, "no se pudo servir el recurso");
        match self.failure_policy {
            FailurePolicy::Degrade => Response::new(StatusCode::Ok),
            FailurePolicy::Surface => Response::new(StatusCode::InternalServerError),
        }
    }
}
