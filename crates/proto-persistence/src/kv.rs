//! Contrato clave-valor del catálogo.
//!
//! El catálogo escribe fire-and-forget (el resultado se ignora en el camino
//! caliente) y lee una sola vez al arranque. Los buckets esperados son
//! `molecules`, `polymers`, `cells` y `organisms`, uno por colección del
//! catálogo.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::PersistenceError;

/// Nombres de bucket usados por el catálogo.
pub const BUCKET_MOLECULES: &str = "molecules";
pub const BUCKET_POLYMERS: &str = "polymers";
pub const BUCKET_CELLS: &str = "cells";
pub const BUCKET_ORGANISMS: &str = "organisms";

/// Almacenamiento clave-valor por bucket.
pub trait KeyValueStore {
    /// Inserta o reemplaza un registro.
    fn put(&mut self, bucket: &str, key: &str, value: &Value) -> Result<(), PersistenceError>;
    /// Lee un registro; `Ok(None)` si no existe.
    fn get(&self, bucket: &str, key: &str) -> Result<Option<Value>, PersistenceError>;
    /// Borra un registro; borrar una clave inexistente no es error.
    fn delete(&mut self, bucket: &str, key: &str) -> Result<(), PersistenceError>;
    /// Lista todos los registros de un bucket (orden no especificado).
    fn list(&self, bucket: &str) -> Result<Vec<(String, Value)>, PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    buckets: HashMap<String, HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn put(&mut self, bucket: &str, key: &str, value: &Value) -> Result<(), PersistenceError> {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.buckets.get(bucket).and_then(|b| b.get(key)).cloned())
    }

    fn delete(&mut self, bucket: &str, key: &str) -> Result<(), PersistenceError> {
        if let Some(b) = self.buckets.get_mut(bucket) {
            b.remove(key);
        }
        Ok(())
    }

    fn list(&self, bucket: &str) -> Result<Vec<(String, Value)>, PersistenceError> {
        Ok(self.buckets
               .get(bucket)
               .map(|b| b.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
               .unwrap_or_default())
    }
}

/// Store durable mínimo: un archivo JSON (objeto clave → registro) por
/// bucket bajo `data_dir`. Cada `put`/`delete` reescribe el archivo del
/// bucket completo; suficiente para el contrato (las mecánicas de un store
/// real quedan fuera de alcance).
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", bucket))
    }

    fn read_bucket(&self, bucket: &str) -> Result<serde_json::Map<String, Value>, PersistenceError> {
        let path = self.bucket_path(bucket);
        if !path.exists() {
            return Ok(serde_json::Map::new());
        }
        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(PersistenceError::Unknown(format!("bucket {} no es un objeto JSON", bucket))),
        }
    }

    fn write_bucket(&self, bucket: &str, map: &serde_json::Map<String, Value>) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        fs::write(self.bucket_path(bucket), raw)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn put(&mut self, bucket: &str, key: &str, value: &Value) -> Result<(), PersistenceError> {
        let mut map = self.read_bucket(bucket)?;
        map.insert(key.to_string(), value.clone());
        self.write_bucket(bucket, &map)
    }

    fn get(&self, bucket: &str, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.read_bucket(bucket)?.get(key).cloned())
    }

    fn delete(&mut self, bucket: &str, key: &str) -> Result<(), PersistenceError> {
        let mut map = self.read_bucket(bucket)?;
        if map.remove(key).is_some() {
            self.write_bucket(bucket, &map)?;
        }
        Ok(())
    }

    fn list(&self, bucket: &str) -> Result<Vec<(String, Value)>, PersistenceError> {
        Ok(self.read_bucket(bucket)?.into_iter().collect())
    }
}
