//! Matching jerárquico de requisitos (rol → polímeros candidatos).
//!
//! `check_requirements` nunca muta los candidatos; los conteos por rol son
//! no negativos y monótonos respecto al tamaño del set candidato.
//!
//! La clasificación de polímeros es first-match-wins EN ORDEN DE
//! DECLARACIÓN de los templates. Es una política deliberada (y testeable),
//! no un accidente del layout de la tabla: si dos templates pudieran
//! matchear, gana el declarado primero.

use indexmap::IndexMap;

use proto_domain::Polymer;

use crate::blueprint::{CellBlueprint, PolymerBlueprint};
use crate::templates::TemplateRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleStatus {
    pub have: usize,
    pub need: usize,
    pub satisfied: bool,
}

#[derive(Debug, Clone)]
pub struct RequirementReport {
    pub roles: IndexMap<String, RoleStatus>,
    pub satisfied: bool,
}

/// Evalúa los requisitos de un blueprint celular contra un set de polímeros
/// candidatos. Por rol: (tipo declarado coincide con el template referido)
/// ∧ (longitud de cadena ≥ mínimo).
pub fn check_requirements(cell: &CellBlueprint, candidates: &[Polymer], registry: &TemplateRegistry) -> RequirementReport {
    let mut roles = IndexMap::new();
    let mut satisfied = true;
    for (role, req) in &cell.requirements {
        let template = registry.polymer_templates().iter().find(|t| t.name == req.polymer_id);
        let have = match template {
            Some(template) => candidates.iter()
                                        .filter(|p| p.polymer_type == template.polymer_type && p.chain_len() >= req.min_chain_len)
                                        .count(),
            // rol que referencia un template inexistente: nunca satisfacible
            None => 0,
        };
        let status = RoleStatus { have,
                                  need: req.count,
                                  satisfied: have >= req.count };
        satisfied = satisfied && status.satisfied;
        roles.insert(role.clone(), status);
    }
    RequirementReport { roles, satisfied }
}

/// Decide la "utilidad" de un polímero probándolo contra cada template
/// registrado, en orden de declaración. Predicado de match: igualdad de
/// tipo ∧ largo mínimo de monómeros ∧ homogeneidad de fórmula entre
/// monómeros. El primer match gana.
pub fn classify_polymer<'a>(polymer: &Polymer, registry: &'a TemplateRegistry) -> Option<&'a PolymerBlueprint> {
    registry.polymer_templates()
            .iter()
            .find(|t| template_matches(t, polymer))
}

fn template_matches(template: &PolymerBlueprint, polymer: &Polymer) -> bool {
    polymer.polymer_type == template.polymer_type
    && polymer.chain_len() >= template.min_monomers
    && polymer.is_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_domain::{ElementRegistry, Molecule, Polymer, PolymerType, Vec2};

    fn monomer(formula: &str) -> Molecule {
        Molecule { fingerprint: format!("fp-{}", formula),
                   formula: formula.to_string(),
                   mass: 1.0,
                   is_stable: true,
                   atom_count: 2,
                   bond_count: 1 }
    }

    fn chain(polymer_type: PolymerType, formula: &str, len: usize) -> Polymer {
        Polymer::new(polymer_type, (0..len).map(|_| monomer(formula)).collect(), Vec2::default())
    }

    #[test]
    fn classification_respects_declaration_order() {
        // two overlapping lipid templates: the first declared must win
        let registry = TemplateRegistry::new(vec![],
                                             vec![PolymerBlueprint::new("Short lipid", "ETHYLENE", 2, PolymerType::Lipid, false),
                                                  PolymerBlueprint::new("Long lipid", "ETHYLENE", 2, PolymerType::Lipid, true),],
                                             vec![]);
        let p = chain(PolymerType::Lipid, "C2H4", 5);
        let hit = classify_polymer(&p, &registry).unwrap();
        assert_eq!(hit.name, "Short lipid");
    }

    #[test]
    fn heterogeneous_chains_never_classify() {
        let registry = TemplateRegistry::builtin(&ElementRegistry::standard());
        let mut p = chain(PolymerType::Lipid, "C2H4", 5);
        p.monomers.push(monomer("H2O"));
        assert!(classify_polymer(&p, &registry).is_none());
    }
}
