//! Constantes del núcleo de catálogo.
//!
//! Agrupa los umbrales geométricos y la versión de esquema del snapshot.
//! Cambios en estos valores alteran decisiones de reshape/clustering pero
//! nunca los fingerprints de contenido.

/// Distancia máxima (px) entre un átomo y su slot objetivo antes de que la
/// estructura requiera reshape.
pub const RESHAPE_TOLERANCE_PX: f64 = 8.0;

/// Radio (px) de adyacencia entre polímeros para la detección de
/// ensamblajes emergentes.
pub const CLUSTER_RADIUS: f64 = 120.0;

/// Versión lógica del esquema de snapshot exportado. Se incluye en el
/// snapshot para detectar drift al importar.
pub const CATALOGUE_SCHEMA_VERSION: u32 = 1;
