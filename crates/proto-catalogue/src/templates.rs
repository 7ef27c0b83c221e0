//! Registro de templates declarativos.
//!
//! Inmutable e inyectable: el set estático de monómeros se siembra al
//! arranque y el descubrimiento nunca lo muta. Los templates de polímero se
//! guardan EN ORDEN DE DECLARACIÓN porque la clasificación de polímeros es
//! first-match-wins sobre ese orden (política explícita, ver matcher).

use indexmap::IndexMap;

use proto_domain::{ElementRegistry, PolymerType, StructureGraph, Vec2};

use crate::blueprint::{CellBlueprint, MoleculeBlueprint, PolymerBlueprint, RoleRequirement};

pub const MONOMER_ETHYLENE: &str = "ETHYLENE";
pub const MONOMER_NUCLEOTIDE_UNIT: &str = "NUCLEOTIDE_UNIT";
pub const MONOMER_AMINO_UNIT: &str = "AMINO_UNIT";
pub const CELL_PROTOCELL: &str = "PROTOCELL";

#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    monomers: IndexMap<String, MoleculeBlueprint>,
    polymer_templates: Vec<PolymerBlueprint>,
    cells: IndexMap<String, CellBlueprint>,
}

impl TemplateRegistry {
    pub fn new(monomers: Vec<(String, MoleculeBlueprint)>,
               polymer_templates: Vec<PolymerBlueprint>,
               cells: Vec<CellBlueprint>)
               -> Self {
        Self { monomers: monomers.into_iter().collect(),
               polymer_templates,
               cells: cells.into_iter().map(|c| (c.id.clone(), c)).collect() }
    }

    /// Tablas estáticas de la simulación.
    pub fn builtin(elements: &ElementRegistry) -> Self {
        let monomers = vec![(MONOMER_ETHYLENE.to_string(),
                             MoleculeBlueprint::from_graph(&ethylene_graph(), elements, "Ethylene").with_monomer(MONOMER_ETHYLENE)
                                                                                                   .with_tags(&["monomer", "lipid"])),
                            (MONOMER_NUCLEOTIDE_UNIT.to_string(),
                             MoleculeBlueprint::from_graph(&formaldehyde_graph(), elements, "Nucleotide unit").with_monomer(MONOMER_NUCLEOTIDE_UNIT)
                                                                                                              .with_tags(&["monomer", "nucleic-acid"])),
                            (MONOMER_AMINO_UNIT.to_string(),
                             MoleculeBlueprint::from_graph(&methylamine_graph(), elements, "Amino unit").with_monomer(MONOMER_AMINO_UNIT)
                                                                                                        .with_tags(&["monomer", "protein"])),];
        let polymer_templates = vec![PolymerBlueprint::new("Lipid chain", MONOMER_ETHYLENE, 4, PolymerType::Lipid, true),
                                     PolymerBlueprint::new("DNA strand", MONOMER_NUCLEOTIDE_UNIT, 8, PolymerType::NucleicAcid, true),
                                     PolymerBlueprint::new("Peptide", MONOMER_AMINO_UNIT, 6, PolymerType::Protein, false),];
        let mut requirements = IndexMap::new();
        requirements.insert("membrane".to_string(),
                            RoleRequirement { polymer_id: "Lipid chain".to_string(),
                                              min_chain_len: 4,
                                              count: 1 });
        requirements.insert("nucleoid".to_string(),
                            RoleRequirement { polymer_id: "DNA strand".to_string(),
                                              min_chain_len: 8,
                                              count: 1 });
        let cells = vec![CellBlueprint::new(CELL_PROTOCELL, "Protocell", "protocellula prima", requirements, "#7fd4a0")];
        Self::new(monomers, polymer_templates, cells)
    }

    pub fn monomer(&self, id: &str) -> Option<&MoleculeBlueprint> {
        self.monomers.get(id)
    }

    pub fn list_monomers(&self) -> impl Iterator<Item = &MoleculeBlueprint> {
        self.monomers.values()
    }

    /// Templates de polímero en orden de declaración.
    pub fn polymer_templates(&self) -> &[PolymerBlueprint] {
        &self.polymer_templates
    }

    pub fn cell(&self, id: &str) -> Option<&CellBlueprint> {
        self.cells.get(id)
    }

    pub fn list_cells(&self) -> impl Iterator<Item = &CellBlueprint> {
        self.cells.values()
    }
}

/// C2H4: un doble enlace C=C y cuatro C-H.
pub fn ethylene_graph() -> StructureGraph {
    let mut g = StructureGraph::new();
    let c1 = g.add_atom("C", Vec2::new(-7.5, 0.0));
    let c2 = g.add_atom("C", Vec2::new(7.5, 0.0));
    let h1 = g.add_atom("H", Vec2::new(-15.0, 9.0));
    let h2 = g.add_atom("H", Vec2::new(-15.0, -9.0));
    let h3 = g.add_atom("H", Vec2::new(15.0, 9.0));
    let h4 = g.add_atom("H", Vec2::new(15.0, -9.0));
    g.add_bond(c1, c2, 2).unwrap();
    g.add_bond(c1, h1, 1).unwrap();
    g.add_bond(c1, h2, 1).unwrap();
    g.add_bond(c2, h3, 1).unwrap();
    g.add_bond(c2, h4, 1).unwrap();
    g
}

/// CH2O: C=O más dos C-H.
pub fn formaldehyde_graph() -> StructureGraph {
    let mut g = StructureGraph::new();
    let c = g.add_atom("C", Vec2::new(0.0, 0.0));
    let o = g.add_atom("O", Vec2::new(12.0, 0.0));
    let h1 = g.add_atom("H", Vec2::new(-8.0, 9.0));
    let h2 = g.add_atom("H", Vec2::new(-8.0, -9.0));
    g.add_bond(c, o, 2).unwrap();
    g.add_bond(c, h1, 1).unwrap();
    g.add_bond(c, h2, 1).unwrap();
    g
}

/// CH5N: metilamina, C saturado contra N-H2.
pub fn methylamine_graph() -> StructureGraph {
    let mut g = StructureGraph::new();
    let c = g.add_atom("C", Vec2::new(0.0, 0.0));
    let n = g.add_atom("N", Vec2::new(13.0, 0.0));
    let h1 = g.add_atom("H", Vec2::new(-9.0, 8.0));
    let h2 = g.add_atom("H", Vec2::new(-9.0, -8.0));
    let h3 = g.add_atom("H", Vec2::new(0.0, -12.0));
    let h4 = g.add_atom("H", Vec2::new(20.0, 8.0));
    let h5 = g.add_atom("H", Vec2::new(20.0, -8.0));
    g.add_bond(c, n, 1).unwrap();
    g.add_bond(c, h1, 1).unwrap();
    g.add_bond(c, h2, 1).unwrap();
    g.add_bond(c, h3, 1).unwrap();
    g.add_bond(n, h4, 1).unwrap();
    g.add_bond(n, h5, 1).unwrap();
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_domain::is_valid;

    #[test]
    fn builtin_monomers_are_stable() {
        let elements = ElementRegistry::standard();
        for graph in [ethylene_graph(), formaldehyde_graph(), methylamine_graph()] {
            assert!(is_valid(&graph, &elements));
        }
        let registry = TemplateRegistry::builtin(&elements);
        for monomer in registry.list_monomers() {
            assert!(monomer.is_stable, "monomer {} must be stable", monomer.name);
        }
    }

    #[test]
    fn polymer_templates_keep_declaration_order() {
        let registry = TemplateRegistry::builtin(&ElementRegistry::standard());
        let names: Vec<_> = registry.polymer_templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Lipid chain", "DNA strand", "Peptide"]);
    }
}
