//! Arena de átomos y enlaces.
//!
//! Los enlaces guardan *identificadores* de átomos (no referencias con
//! ownership) y cada átomo mantiene un índice de identificadores de sus
//! enlaces incidentes. Ambos viven en la arena indexada por id, lo que
//! elimina el ciclo átomo↔enlace. Los átomos sobreviven a sus enlaces:
//! quitar un átomo desengancha sus enlaces, nunca al revés.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::ElementRegistry;
use crate::errors::DomainError;
use crate::geometry::Vec2;

pub const MIN_BOND_ORDER: u8 = 1;
pub const MAX_BOND_ORDER: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BondId(pub Uuid);

impl AtomId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AtomId {
    fn default() -> Self {
        Self::new()
    }
}

impl BondId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BondId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    pub symbol: String,
    pub position: Vec2,
    /// Índice de enlaces incidentes (solo ids, los enlaces viven en la arena).
    pub bond_ids: Vec<BondId>,
}

/// Par ordenado de átomos más orden de enlace 1..=3. No posee átomos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    pub id: BondId,
    pub atom_a: AtomId,
    pub atom_b: AtomId,
    pub order: u8,
}

/// Subgrafo átomo/enlace. Propietario de los átomos que contiene; se
/// reasignan al dividir o fusionar estructuras. Nunca se persiste tal cual:
/// la forma durable es el blueprint (layout relativo + metadatos).
#[derive(Debug, Clone, Default)]
pub struct StructureGraph {
    atoms: IndexMap<AtomId, Atom>,
    bonds: IndexMap<BondId, Bond>,
}

impl StructureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, symbol: &str, position: Vec2) -> AtomId {
        let id = AtomId::new();
        self.atoms.insert(id,
                          Atom { id,
                                 symbol: symbol.to_string(),
                                 position,
                                 bond_ids: Vec::new() });
        id
    }

    /// Crea un enlace entre dos átomos existentes y actualiza ambos índices.
    ///
    /// # Errores
    /// `ValidationError` si el orden está fuera de 1..=3, los átomos no
    /// existen o el enlace es un lazo (mismo átomo en ambos extremos).
    pub fn add_bond(&mut self, atom_a: AtomId, atom_b: AtomId, order: u8) -> Result<BondId, DomainError> {
        if !(MIN_BOND_ORDER..=MAX_BOND_ORDER).contains(&order) {
            return Err(DomainError::ValidationError(format!("orden de enlace inválido: {}", order)));
        }
        if atom_a == atom_b {
            return Err(DomainError::ValidationError("un enlace no puede unir un átomo consigo mismo".to_string()));
        }
        if !self.atoms.contains_key(&atom_a) || !self.atoms.contains_key(&atom_b) {
            return Err(DomainError::ValidationError("enlace sobre átomo inexistente".to_string()));
        }
        let id = BondId::new();
        self.bonds.insert(id, Bond { id, atom_a, atom_b, order });
        self.atoms.get_mut(&atom_a).unwrap().bond_ids.push(id);
        self.atoms.get_mut(&atom_b).unwrap().bond_ids.push(id);
        Ok(id)
    }

    pub fn remove_bond(&mut self, bond_id: BondId) {
        if let Some(bond) = self.bonds.shift_remove(&bond_id) {
            for atom_id in [bond.atom_a, bond.atom_b] {
                if let Some(atom) = self.atoms.get_mut(&atom_id) {
                    atom.bond_ids.retain(|b| *b != bond_id);
                }
            }
        }
    }

    /// Quita un átomo desenganchando primero sus enlaces incidentes.
    pub fn remove_atom(&mut self, atom_id: AtomId) {
        let incident: Vec<BondId> = match self.atoms.get(&atom_id) {
            Some(atom) => atom.bond_ids.clone(),
            None => return,
        };
        for bond_id in incident {
            self.remove_bond(bond_id);
        }
        self.atoms.shift_remove(&atom_id);
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(&id)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(&id)
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.values()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Suma de órdenes de enlace incidentes sobre un átomo.
    pub fn incident_order(&self, atom_id: AtomId) -> u32 {
        match self.atoms.get(&atom_id) {
            Some(atom) => atom.bond_ids
                              .iter()
                              .filter_map(|b| self.bonds.get(b))
                              .map(|b| b.order as u32)
                              .sum(),
            None => 0,
        }
    }

    /// Conteo de átomos por símbolo (multiconjunto de elementos).
    pub fn element_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for atom in self.atoms.values() {
            *counts.entry(atom.symbol.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Centro de masa ponderado por masa atómica. Los símbolos desconocidos
    /// pesan como masa 1.
    pub fn center_of_mass(&self, elements: &ElementRegistry) -> Vec2 {
        if self.atoms.is_empty() {
            return Vec2::default();
        }
        let mut total = 0.0;
        let mut acc = Vec2::default();
        for atom in self.atoms.values() {
            let mass = elements.lookup(&atom.symbol).map(|e| e.mass).unwrap_or(1.0);
            acc.x += atom.position.x * mass;
            acc.y += atom.position.y * mass;
            total += mass;
        }
        Vec2 { x: acc.x / total, y: acc.y / total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_bond_updates_both_atom_indexes() {
        let mut g = StructureGraph::new();
        let a = g.add_atom("H", Vec2::new(0.0, 0.0));
        let b = g.add_atom("H", Vec2::new(10.0, 0.0));
        let bond = g.add_bond(a, b, 1).unwrap();
        assert_eq!(g.atom(a).unwrap().bond_ids, vec![bond]);
        assert_eq!(g.atom(b).unwrap().bond_ids, vec![bond]);
    }

    #[test]
    fn bond_order_out_of_range_is_rejected() {
        let mut g = StructureGraph::new();
        let a = g.add_atom("C", Vec2::default());
        let b = g.add_atom("C", Vec2::default());
        assert!(g.add_bond(a, b, 0).is_err());
        assert!(g.add_bond(a, b, 4).is_err());
    }

    #[test]
    fn removing_atom_detaches_incident_bonds() {
        let mut g = StructureGraph::new();
        let a = g.add_atom("O", Vec2::default());
        let b = g.add_atom("H", Vec2::new(5.0, 0.0));
        let c = g.add_atom("H", Vec2::new(-5.0, 0.0));
        g.add_bond(a, b, 1).unwrap();
        g.add_bond(a, c, 1).unwrap();
        g.remove_atom(a);
        assert_eq!(g.bond_count(), 0);
        // los átomos restantes sobreviven al enlace
        assert_eq!(g.atom_count(), 2);
        assert!(g.atom(b).unwrap().bond_ids.is_empty());
    }

    #[test]
    fn incident_order_sums_bond_orders() {
        let mut g = StructureGraph::new();
        let c1 = g.add_atom("C", Vec2::default());
        let c2 = g.add_atom("C", Vec2::new(10.0, 0.0));
        let h = g.add_atom("H", Vec2::new(-10.0, 0.0));
        g.add_bond(c1, c2, 2).unwrap();
        g.add_bond(c1, h, 1).unwrap();
        assert_eq!(g.incident_order(c1), 3);
        assert_eq!(g.incident_order(c2), 2);
    }
}
