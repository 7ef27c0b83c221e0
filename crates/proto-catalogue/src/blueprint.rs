//! Blueprints persistidos del catálogo.
//!
//! Un blueprint es la forma durable de un descubrimiento: layout de átomos
//! como offsets relativos al centro de masa (invariante a traslación) más
//! metadatos. Las formas serde siguen el contrato de registro externo
//! (camelCase: `atomData`, `relX`, ...).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use proto_domain::{ElementRegistry, Molecule, StructureGraph, Vec2};

use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomRecord {
    pub index: usize,
    pub symbol: String,
    pub rel_x: f64,
    pub rel_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRecord {
    pub atom1_index: usize,
    pub atom2_index: usize,
    pub order: u8,
}

/// Registro persistido de una molécula descubierta.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeBlueprint {
    pub fingerprint: String,
    pub name: String,
    pub formula: String,
    pub atom_data: Vec<AtomRecord>,
    pub bond_data: Vec<BondRecord>,
    pub mass: f64,
    pub is_stable: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_monomer: bool,
    #[serde(default)]
    pub monomer_id: Option<String>,
    #[serde(default)]
    pub polymer_category: Option<String>,
    #[serde(default)]
    pub polymer_name: Option<String>,
    #[serde(default)]
    pub cell_role: Option<String>,
}

impl MoleculeBlueprint {
    /// Captura un blueprint desde el grafo actual. Los offsets se toman
    /// respecto al centro de masa para que el layout sea relocalizable.
    pub fn from_graph(graph: &StructureGraph, elements: &ElementRegistry, name: &str) -> Self {
        let molecule = Molecule::from_graph(graph, elements);
        let center = graph.center_of_mass(elements);
        let atoms: Vec<_> = graph.atoms().collect();
        let atom_data = atoms.iter()
                             .enumerate()
                             .map(|(index, atom)| AtomRecord { index,
                                                               symbol: atom.symbol.clone(),
                                                               rel_x: atom.position.x - center.x,
                                                               rel_y: atom.position.y - center.y })
                             .collect();
        let bond_data = graph.bonds()
                             .map(|bond| {
                                 let a = atoms.iter().position(|x| x.id == bond.atom_a).unwrap_or(0);
                                 let b = atoms.iter().position(|x| x.id == bond.atom_b).unwrap_or(0);
                                 BondRecord { atom1_index: a,
                                              atom2_index: b,
                                              order: bond.order }
                             })
                             .collect();
        Self { fingerprint: molecule.fingerprint.clone(),
               name: name.to_string(),
               formula: molecule.formula.clone(),
               atom_data,
               bond_data,
               mass: molecule.mass,
               is_stable: molecule.is_stable,
               created_at: Utc::now(),
               description: String::new(),
               tags: Vec::new(),
               is_monomer: false,
               monomer_id: None,
               polymer_category: None,
               polymer_name: None,
               cell_role: None }
    }

    /// Reconstruye la arena en `origin` a partir del layout persistido.
    /// Enlaces con índices fuera de rango se omiten (drift de esquema; el
    /// cleanup los purga vía re-validación).
    pub fn instantiate_at(&self, origin: Vec2) -> StructureGraph {
        let mut graph = StructureGraph::new();
        let ids: Vec<_> = self.atom_data
                              .iter()
                              .map(|rec| graph.add_atom(&rec.symbol, Vec2::new(origin.x + rec.rel_x, origin.y + rec.rel_y)))
                              .collect();
        for bond in &self.bond_data {
            if let (Some(a), Some(b)) = (ids.get(bond.atom1_index), ids.get(bond.atom2_index)) {
                let _ = graph.add_bond(*a, *b, bond.order);
            }
        }
        graph
    }

    pub fn with_monomer(mut self, monomer_id: &str) -> Self {
        self.is_monomer = true;
        self.monomer_id = Some(monomer_id.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// Tupla de requisito `role:referenceId:threshold:count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTuple {
    pub role: String,
    pub reference_id: String,
    pub threshold: usize,
    pub count: usize,
}

/// Fingerprint declarativo: hash del JSON canónico de las tuplas ordenadas,
/// de modo que dos templates con el mismo conjunto de requisitos colapsan a
/// una entrada sin importar el orden de los roles.
pub fn requirement_fingerprint(tuples: &[RequirementTuple]) -> String {
    let mut sorted: Vec<&RequirementTuple> = tuples.iter().collect();
    sorted.sort_by_key(|t| (t.role.clone(), t.reference_id.clone(), t.threshold, t.count));
    let items: Vec<serde_json::Value> = sorted.iter()
                                              .map(|t| {
                                                  serde_json::json!({ "role": t.role,
                                                                      "referenceId": t.reference_id,
                                                                      "threshold": t.threshold,
                                                                      "count": t.count })
                                              })
                                              .collect();
    hash_value(&serde_json::Value::Array(items))
}

/// Template de polímero, estático o descubierto.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymerBlueprint {
    pub fingerprint: String,
    pub name: String,
    /// Referencia al monómero (id en el set de templates).
    pub monomer_id: String,
    pub min_monomers: usize,
    pub polymer_type: proto_domain::PolymerType,
    pub role: String,
    pub essential: bool,
}

impl PolymerBlueprint {
    pub fn new(name: &str, monomer_id: &str, min_monomers: usize, polymer_type: proto_domain::PolymerType, essential: bool) -> Self {
        let role = polymer_type.role().to_string();
        let fingerprint = requirement_fingerprint(&[RequirementTuple { role: role.clone(),
                                                                       reference_id: monomer_id.to_string(),
                                                                       threshold: min_monomers,
                                                                       count: 1 }]);
        Self { fingerprint,
               name: name.to_string(),
               monomer_id: monomer_id.to_string(),
               min_monomers,
               polymer_type,
               role,
               essential }
    }
}

/// Requisito de un rol en un blueprint celular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequirement {
    pub polymer_id: String,
    pub min_chain_len: usize,
    pub count: usize,
}

/// Blueprint estático de una célula: mapa rol → requisito.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBlueprint {
    pub id: String,
    pub name: String,
    pub species: String,
    pub requirements: IndexMap<String, RoleRequirement>,
    pub color: String,
}

impl CellBlueprint {
    pub fn new(id: &str, name: &str, species: &str, requirements: IndexMap<String, RoleRequirement>, color: &str) -> Self {
        Self { id: id.to_string(),
               name: name.to_string(),
               species: species.to_string(),
               requirements,
               color: color.to_string() }
    }

    /// Fingerprint declarativo del conjunto de requisitos (orden de roles
    /// irrelevante).
    pub fn fingerprint(&self) -> String {
        let tuples: Vec<RequirementTuple> = self.requirements
                                                .iter()
                                                .map(|(role, req)| RequirementTuple { role: role.clone(),
                                                                                      reference_id: req.polymer_id.clone(),
                                                                                      threshold: req.min_chain_len,
                                                                                      count: req.count })
                                                .collect();
        requirement_fingerprint(&tuples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_domain::PolymerType;

    #[test]
    fn requirement_fingerprint_ignores_role_order() {
        let a = vec![RequirementTuple { role: "membrane".into(), reference_id: "LIPID_CHAIN".into(), threshold: 4, count: 1 },
                     RequirementTuple { role: "nucleoid".into(), reference_id: "DNA_STRAND".into(), threshold: 8, count: 1 },];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(requirement_fingerprint(&a), requirement_fingerprint(&b));
    }

    #[test]
    fn polymer_blueprints_with_equal_requirements_collide() {
        let x = PolymerBlueprint::new("A", "ETHYLENE", 4, PolymerType::Lipid, true);
        let y = PolymerBlueprint::new("B", "ETHYLENE", 4, PolymerType::Lipid, false);
        assert_eq!(x.fingerprint, y.fingerprint);
    }
}
