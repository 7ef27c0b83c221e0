//! proto-persistence
//!
//! Capa de persistencia clave-valor del catálogo. El núcleo trata la copia
//! en memoria como estado autoritativo de la sesión: las escrituras son
//! fire-and-forget y las lecturas se esperan una única vez al arranque.
//!
//! Módulos:
//! - `kv`: contrato `KeyValueStore` + backends en memoria y JSON-por-bucket.
//! - `config`: carga de configuración desde .env.
//! - `error`: variantes semánticas de fallo del store.

pub mod config;
pub mod error;
pub mod kv;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use kv::{InMemoryStore, JsonFileStore, KeyValueStore, BUCKET_CELLS, BUCKET_MOLECULES, BUCKET_ORGANISMS,
             BUCKET_POLYMERS};
