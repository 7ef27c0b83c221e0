//! Instancia efímera de polímero: lista ordenada de monómeros, tipo
//! declarado y secuencia. Un polímero "sellado" ya no acepta monómeros y
//! queda elegible para la detección de ensamblajes de orden superior.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Vec2;
use crate::molecule::Molecule;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolymerType {
    Lipid,
    NucleicAcid,
    Protein,
    Carbohydrate,
    Other(String),
}

impl PolymerType {
    /// Rol funcional que el tipo puede satisfacer en un blueprint celular.
    pub fn role(&self) -> &'static str {
        match self {
            PolymerType::Lipid => "membrane",
            PolymerType::NucleicAcid => "nucleoid",
            PolymerType::Protein => "ribosome",
            PolymerType::Carbohydrate | PolymerType::Other(_) => "other",
        }
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolymerType::Lipid => write!(f, "lipid"),
            PolymerType::NucleicAcid => write!(f, "nucleic-acid"),
            PolymerType::Protein => write!(f, "protein"),
            PolymerType::Carbohydrate => write!(f, "carbohydrate"),
            PolymerType::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polymer {
    pub id: Uuid,
    pub polymer_type: PolymerType,
    /// Lista ordenada de monómeros; la secuencia se deriva de ella.
    pub monomers: Vec<Molecule>,
    pub sequence: String,
    pub center: Vec2,
    pub sealed: bool,
    /// Reclamado por un ensamblaje de orden superior.
    pub assigned: bool,
}

impl Polymer {
    pub fn new(polymer_type: PolymerType, monomers: Vec<Molecule>, center: Vec2) -> Self {
        let sequence = monomers.iter().map(|m| m.formula.clone()).collect::<Vec<_>>().join("-");
        Self { id: Uuid::new_v4(),
               polymer_type,
               monomers,
               sequence,
               center,
               sealed: false,
               assigned: false }
    }

    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    pub fn chain_len(&self) -> usize {
        self.monomers.len()
    }

    /// Todos los monómeros comparten fórmula (homogeneidad requerida por los
    /// templates de polímero).
    pub fn is_homogeneous(&self) -> bool {
        match self.monomers.first() {
            Some(first) => self.monomers.iter().all(|m| m.formula == first.formula),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monomer(formula: &str) -> Molecule {
        Molecule { fingerprint: format!("fp-{}", formula),
                   formula: formula.to_string(),
                   mass: 1.0,
                   is_stable: true,
                   atom_count: 2,
                   bond_count: 1 }
    }

    #[test]
    fn sequence_joins_monomer_formulas() {
        let p = Polymer::new(PolymerType::Lipid, vec![monomer("C2H4"), monomer("C2H4")], Vec2::default());
        assert_eq!(p.sequence, "C2H4-C2H4");
        assert_eq!(p.chain_len(), 2);
    }

    #[test]
    fn homogeneity_detects_mixed_chains() {
        let homo = Polymer::new(PolymerType::Lipid, vec![monomer("C2H4"), monomer("C2H4")], Vec2::default());
        let mixed = Polymer::new(PolymerType::Lipid, vec![monomer("C2H4"), monomer("H2O")], Vec2::default());
        assert!(homo.is_homogeneous());
        assert!(!mixed.is_homogeneous());
    }
}
