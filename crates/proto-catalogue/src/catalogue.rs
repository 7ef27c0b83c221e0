//! Catálogo: orquestador de las tres colecciones.
//!
//! Invariantes:
//! - fingerprint ↔ entrada es 1:1; un registro duplicado devuelve `None` y
//!   nunca fusiona. Los ensamblajes se indexan además por id declarativo
//!   (la clave bajo la que persisten).
//! - el set estático de monómeros vive en el `TemplateRegistry` y el
//!   descubrimiento no lo muta.
//! - los fallos del store se registran con `log::warn!` y el catálogo
//!   degrada a memoria: disponibilidad sobre durabilidad.
//!
//! Toda mutación ocurre sobre `&mut self` en un solo hilo lógico; no hay
//! carreras posibles sobre un mismo fingerprint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use proto_domain::{is_valid, molecule_fingerprint, ElementRegistry, Molecule, StructureGraph, Vec2};
use proto_persistence::{KeyValueStore, PersistenceError, BUCKET_CELLS, BUCKET_MOLECULES, BUCKET_ORGANISMS,
                        BUCKET_POLYMERS};

use crate::blueprint::{CellBlueprint, MoleculeBlueprint, PolymerBlueprint};
use crate::constants::CATALOGUE_SCHEMA_VERSION;
use crate::errors::CatalogueError;
use crate::listener::{BlueprintAdded, CatalogueListener};
use crate::templates::TemplateRegistry;

/// Nivel de un blueprint de ensamblaje: célula estática u organismo
/// emergente. Decide el bucket persistido y el arreglo del snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyLevel {
    Cell,
    Organism,
}

#[derive(Debug, Clone)]
struct AssemblyEntry {
    blueprint: CellBlueprint,
    level: AssemblyLevel,
}

/// Snapshot exportable de las colecciones (formas de registro externas).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub schema_version: u32,
    pub molecules: Vec<MoleculeBlueprint>,
    #[serde(default)]
    pub polymers: Vec<PolymerBlueprint>,
    pub cells: Vec<CellBlueprint>,
    pub organisms: Vec<CellBlueprint>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub purged_invalid: usize,
    pub purged_duplicates: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub struct Catalogue<S: KeyValueStore> {
    molecules: IndexMap<String, MoleculeBlueprint>,
    polymers: IndexMap<String, PolymerBlueprint>,
    /// Ensamblajes por id declarativo (la clave persistida).
    assemblies: IndexMap<String, AssemblyEntry>,
    /// Índice fingerprint → id para la deduplicación declarativa.
    assembly_index: IndexMap<String, String>,
    templates: TemplateRegistry,
    elements: ElementRegistry,
    store: S,
    listener: Option<Box<dyn CatalogueListener>>,
}

impl<S: KeyValueStore> Catalogue<S> {
    pub fn new(elements: ElementRegistry, templates: TemplateRegistry, store: S) -> Self {
        Self { molecules: IndexMap::new(),
               polymers: IndexMap::new(),
               assemblies: IndexMap::new(),
               assembly_index: IndexMap::new(),
               templates,
               elements,
               store,
               listener: None }
    }

    /// Suscriptor único: reemplaza al anterior si lo hubiera.
    pub fn set_listener(&mut self, listener: Box<dyn CatalogueListener>) {
        self.listener = Some(listener);
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    pub fn polymer_count(&self) -> usize {
        self.polymers.len()
    }

    pub fn assembly_count(&self) -> usize {
        self.assemblies.len()
    }

    // ------------------------------------------------------------------
    // Registro
    // ------------------------------------------------------------------

    /// Registra una estructura descubierta. `None` si el fingerprint ya
    /// existe (sin fusión). El alta exitosa persiste fire-and-forget y
    /// notifica exactamente una vez al suscriptor.
    pub fn register(&mut self, graph: &StructureGraph, name: Option<&str>) -> Option<MoleculeBlueprint> {
        let fingerprint = molecule_fingerprint(graph);
        if self.molecules.contains_key(&fingerprint) {
            return None;
        }
        let molecule = Molecule::from_graph(graph, &self.elements);
        let name = name.map(|n| n.to_string()).unwrap_or_else(|| molecule.formula.clone());
        let blueprint = MoleculeBlueprint::from_graph(graph, &self.elements, &name);
        self.persist_molecule(&blueprint);
        self.molecules.insert(fingerprint, blueprint.clone());
        self.notify(BlueprintAdded::Molecule(blueprint.clone()));
        Some(blueprint)
    }

    /// Registra un template de polímero descubierto, deduplicado por su
    /// fingerprint de requisitos. Además del registro propio, estampa
    /// categoría y nombre de polímero sobre el registro de molécula del
    /// monómero referenciado.
    pub fn register_polymer(&mut self, blueprint: PolymerBlueprint) -> Option<PolymerBlueprint> {
        if self.polymers.contains_key(&blueprint.fingerprint) {
            return None;
        }
        let monomer_fp = self.templates
                             .monomer(&blueprint.monomer_id)
                             .map(|m| m.fingerprint.clone());
        if let Some(fp) = monomer_fp {
            if let Some(record) = self.molecules.get_mut(&fp) {
                record.polymer_category = Some(blueprint.polymer_type.to_string());
                record.polymer_name = Some(blueprint.name.clone());
                let copy = record.clone();
                self.persist_molecule(&copy);
            }
        }
        self.persist_polymer(&blueprint);
        self.polymers.insert(blueprint.fingerprint.clone(), blueprint.clone());
        self.notify(BlueprintAdded::Polymer(blueprint.clone()));
        Some(blueprint)
    }

    /// Registra un blueprint de ensamblaje (célula estática u organismo
    /// emergente), deduplicado por su fingerprint declarativo.
    pub fn register_assembly(&mut self, blueprint: CellBlueprint, level: AssemblyLevel) -> Option<CellBlueprint> {
        let fingerprint = blueprint.fingerprint();
        if self.assembly_index.contains_key(&fingerprint) || self.assemblies.contains_key(&blueprint.id) {
            return None;
        }
        self.persist_assembly(&blueprint, level);
        self.assembly_index.insert(fingerprint, blueprint.id.clone());
        self.assemblies.insert(blueprint.id.clone(),
                               AssemblyEntry { blueprint: blueprint.clone(),
                                               level });
        self.notify(BlueprintAdded::Cell(blueprint.clone()));
        Some(blueprint)
    }

    // ------------------------------------------------------------------
    // Consulta
    // ------------------------------------------------------------------

    pub fn lookup_molecule(&self, fingerprint: &str) -> Option<&MoleculeBlueprint> {
        self.molecules.get(fingerprint)
    }

    pub fn lookup_polymer(&self, fingerprint: &str) -> Option<&PolymerBlueprint> {
        self.polymers.get(fingerprint)
    }

    pub fn lookup_assembly(&self, id: &str) -> Option<&CellBlueprint> {
        self.assemblies.get(id).map(|e| &e.blueprint)
    }

    /// Match case-insensitive sobre nombre y fórmula. Resultado sin orden
    /// definido; ordena quien consume.
    pub fn search(&self, needle: &str) -> Vec<&MoleculeBlueprint> {
        let needle = needle.to_lowercase();
        self.molecules
            .values()
            .filter(|m| m.name.to_lowercase().contains(&needle) || m.formula.to_lowercase().contains(&needle))
            .collect()
    }

    // ------------------------------------------------------------------
    // Descubrimiento y limpieza
    // ------------------------------------------------------------------

    /// Registra cada candidato estable y aún desconocido. Idempotente:
    /// repetir sobre el mismo set nunca agranda el catálogo.
    pub fn auto_discover(&mut self, candidates: &[StructureGraph]) -> usize {
        let mut registered = 0;
        for graph in candidates {
            let molecule = Molecule::from_graph(graph, &self.elements);
            if !molecule.is_stable {
                continue;
            }
            if self.register(graph, None).is_some() {
                registered += 1;
            }
        }
        registered
    }

    /// Barrido de reconciliación: re-valida cada entrada reconstruyendo su
    /// grafo y purga las inválidas (también su copia persistida). Entre
    /// entradas válidas con la misma fórmula normalizada sobrevive solo la
    /// de `created_at` más reciente. Corre completo, una vez por carga.
    pub fn cleanup(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();

        let invalid: Vec<String> = self.molecules
                                       .iter()
                                       .filter(|(_, bp)| {
                                           let graph = bp.instantiate_at(Vec2::default());
                                           !is_valid(&graph, &self.elements)
                                       })
                                       .map(|(fp, _)| fp.clone())
                                       .collect();
        for fp in invalid {
            self.molecules.shift_remove(&fp);
            self.delete_persisted(BUCKET_MOLECULES, &fp);
            report.purged_invalid += 1;
        }

        // dedup por fórmula: gana la creación más tardía
        let mut latest_by_formula: IndexMap<String, (String, chrono::DateTime<chrono::Utc>)> = IndexMap::new();
        let mut doomed: Vec<String> = Vec::new();
        for (fp, bp) in &self.molecules {
            match latest_by_formula.get(&bp.formula).cloned() {
                Some((winner_fp, winner_ts)) => {
                    if bp.created_at > winner_ts {
                        doomed.push(winner_fp);
                        latest_by_formula.insert(bp.formula.clone(), (fp.clone(), bp.created_at));
                    } else {
                        doomed.push(fp.clone());
                    }
                }
                None => {
                    latest_by_formula.insert(bp.formula.clone(), (fp.clone(), bp.created_at));
                }
            }
        }
        for fp in doomed {
            self.molecules.shift_remove(&fp);
            self.delete_persisted(BUCKET_MOLECULES, &fp);
            report.purged_duplicates += 1;
        }

        report
    }

    // ------------------------------------------------------------------
    // Export / import / carga
    // ------------------------------------------------------------------

    pub fn export(&self) -> Snapshot {
        let cells = self.assemblies
                        .values()
                        .filter(|e| e.level == AssemblyLevel::Cell)
                        .map(|e| e.blueprint.clone())
                        .collect();
        let organisms = self.assemblies
                            .values()
                            .filter(|e| e.level == AssemblyLevel::Organism)
                            .map(|e| e.blueprint.clone())
                            .collect();
        Snapshot { schema_version: CATALOGUE_SCHEMA_VERSION,
                   molecules: self.molecules.values().cloned().collect(),
                   polymers: self.polymers.values().cloned().collect(),
                   cells,
                   organisms }
    }

    /// Import aditivo: cualquier fingerprint ya presente se salta, nunca se
    /// sobreescribe.
    pub fn import(&mut self, snapshot: Snapshot) -> ImportReport {
        let mut report = ImportReport::default();
        for bp in snapshot.molecules {
            if self.molecules.contains_key(&bp.fingerprint) {
                report.skipped += 1;
                continue;
            }
            self.persist_molecule(&bp);
            self.molecules.insert(bp.fingerprint.clone(), bp);
            report.imported += 1;
        }
        for bp in snapshot.polymers {
            if self.polymers.contains_key(&bp.fingerprint) {
                report.skipped += 1;
                continue;
            }
            self.persist_polymer(&bp);
            self.polymers.insert(bp.fingerprint.clone(), bp);
            report.imported += 1;
        }
        for (batch, level) in [(snapshot.cells, AssemblyLevel::Cell), (snapshot.organisms, AssemblyLevel::Organism)] {
            for bp in batch {
                let fp = bp.fingerprint();
                if self.assembly_index.contains_key(&fp) || self.assemblies.contains_key(&bp.id) {
                    report.skipped += 1;
                    continue;
                }
                self.persist_assembly(&bp, level);
                self.assembly_index.insert(fp, bp.id.clone());
                self.assemblies.insert(bp.id.clone(), AssemblyEntry { blueprint: bp, level });
                report.imported += 1;
            }
        }
        report
    }

    /// Parsea y aplica un snapshot JSON. Un snapshot imposible de parsear
    /// aborta solo esta llamada y deja el catálogo intacto.
    pub fn import_json(&mut self, raw: &Value) -> Result<ImportReport, CatalogueError> {
        let snapshot: Snapshot = serde_json::from_value(raw.clone())?;
        Ok(self.import(snapshot))
    }

    /// Lectura única de arranque: rellena las colecciones desde el store.
    /// Registros individuales malformados se saltan con warning (el cleanup
    /// posterior reconcilia el drift de esquema).
    pub fn load_from_store(&mut self) -> usize {
        let mut loaded = 0;
        for (key, value) in self.list_persisted(BUCKET_MOLECULES) {
            match serde_json::from_value::<MoleculeBlueprint>(value) {
                Ok(bp) if !self.molecules.contains_key(&bp.fingerprint) => {
                    self.molecules.insert(bp.fingerprint.clone(), bp);
                    loaded += 1;
                }
                Ok(_) => {}
                Err(e) => log::warn!("registro de molécula malformado ({}): {}", key, e),
            }
        }
        for (key, value) in self.list_persisted(BUCKET_POLYMERS) {
            match serde_json::from_value::<PolymerBlueprint>(value) {
                Ok(bp) if !self.polymers.contains_key(&bp.fingerprint) => {
                    self.polymers.insert(bp.fingerprint.clone(), bp);
                    loaded += 1;
                }
                Ok(_) => {}
                Err(e) => log::warn!("registro de polímero malformado ({}): {}", key, e),
            }
        }
        for (bucket, level) in [(BUCKET_CELLS, AssemblyLevel::Cell), (BUCKET_ORGANISMS, AssemblyLevel::Organism)] {
            for (key, value) in self.list_persisted(bucket) {
                match serde_json::from_value::<CellBlueprint>(value) {
                    Ok(bp) => {
                        let fp = bp.fingerprint();
                        if !self.assembly_index.contains_key(&fp) && !self.assemblies.contains_key(&bp.id) {
                            self.assembly_index.insert(fp, bp.id.clone());
                            self.assemblies.insert(bp.id.clone(), AssemblyEntry { blueprint: bp, level });
                            loaded += 1;
                        }
                    }
                    Err(e) => log::warn!("registro de ensamblaje malformado ({}): {}", key, e),
                }
            }
        }
        loaded
    }

    // ------------------------------------------------------------------
    // Persistencia fire-and-forget
    // ------------------------------------------------------------------

    fn persist_molecule(&mut self, blueprint: &MoleculeBlueprint) {
        match serde_json::to_value(blueprint) {
            Ok(value) => self.put_persisted(BUCKET_MOLECULES, &blueprint.fingerprint, &value),
            Err(e) => log::warn!("no se pudo serializar molécula {}: {}", blueprint.fingerprint, e),
        }
    }

    fn persist_polymer(&mut self, blueprint: &PolymerBlueprint) {
        match serde_json::to_value(blueprint) {
            Ok(value) => self.put_persisted(BUCKET_POLYMERS, &blueprint.fingerprint, &value),
            Err(e) => log::warn!("no se pudo serializar polímero {}: {}", blueprint.fingerprint, e),
        }
    }

    fn persist_assembly(&mut self, blueprint: &CellBlueprint, level: AssemblyLevel) {
        let bucket = match level {
            AssemblyLevel::Cell => BUCKET_CELLS,
            AssemblyLevel::Organism => BUCKET_ORGANISMS,
        };
        match serde_json::to_value(blueprint) {
            Ok(value) => self.put_persisted(bucket, &blueprint.id, &value),
            Err(e) => log::warn!("no se pudo serializar ensamblaje {}: {}", blueprint.id, e),
        }
    }

    fn put_persisted(&mut self, bucket: &str, key: &str, value: &Value) {
        if let Err(e) = self.store.put(bucket, key, value) {
            warn_degraded(bucket, key, &e);
        }
    }

    fn delete_persisted(&mut self, bucket: &str, key: &str) {
        if let Err(e) = self.store.delete(bucket, key) {
            warn_degraded(bucket, key, &e);
        }
    }

    fn list_persisted(&self, bucket: &str) -> Vec<(String, Value)> {
        match self.store.list(bucket) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("lectura de bucket {} falló, arrancando vacío: {}", bucket, e);
                Vec::new()
            }
        }
    }

    fn notify(&mut self, event: BlueprintAdded) {
        if let Some(listener) = self.listener.as_mut() {
            listener.blueprint_added(&event);
        }
    }
}

fn warn_degraded(bucket: &str, key: &str, e: &PersistenceError) {
    log::warn!("store no disponible ({}:{}), catálogo degradado a memoria: {}", bucket, key, e);
}
