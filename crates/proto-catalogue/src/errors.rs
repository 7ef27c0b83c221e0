//! Errores del catálogo (simples por diseño).
//!
//! Taxonomía de la superficie request/response: duplicados y misses se
//! señalan con `None`, los fallos de persistencia se registran y se degrada
//! a memoria. La única condición fatal es un snapshot imposible de parsear,
//! que aborta solo esa llamada de import.

use proto_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("unparsable snapshot: {0}")]
    SnapshotParse(String),
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<serde_json::Error> for CatalogueError {
    fn from(e: serde_json::Error) -> Self {
        CatalogueError::SnapshotParse(e.to_string())
    }
}
