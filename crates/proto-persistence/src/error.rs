//! Errores de persistencia.
//! Mapea fallos de IO / serialización a variantes semánticas del contrato
//! clave-valor. El catálogo los registra y degrada a memoria; nunca los
//! propaga en el camino caliente.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("transient IO error: {0}")]
    TransientIo(String),
    #[error("not found")]
    NotFound,
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unknown store error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        Self::TransientIo(e.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
