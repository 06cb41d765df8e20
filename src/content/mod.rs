//! # Contenido Estático
//! src/content/mod.rs
//!
//! - `mime`: tabla extensión → Content-Type
//! - `resolver`: content root y resolución de paths

pub mod mime;
pub mod resolver;

pub use mime::{requested_extension, ContentTypeMap};
pub use resolver::{ContentError, ContentRoot, ResolvedResource, INDEX_FILE};
