//! Validador de saturación de valencia.
//!
//! Una estructura es válida si y solo si cada átomo suma un orden de enlace
//! incidente EXACTAMENTE igual a la valencia de su elemento. Sub-saturación
//! y sobre-saturación invalidan por igual; una sola violación invalida la
//! estructura completa (sin crédito parcial). Se usa al registrar y en los
//! barridos periódicos del catálogo.

use crate::element::ElementRegistry;
use crate::graph::StructureGraph;

/// Mínimo de átomos para que una estructura sea evaluable.
pub const MIN_ATOMS: usize = 2;
/// Mínimo de enlaces para que una estructura sea evaluable.
pub const MIN_BONDS: usize = 1;

/// `is_valid(atoms, bonds) -> bool` sobre la arena.
pub fn is_valid(graph: &StructureGraph, elements: &ElementRegistry) -> bool {
    if graph.atom_count() < MIN_ATOMS || graph.bond_count() < MIN_BONDS {
        return false;
    }
    for atom in graph.atoms() {
        let info = match elements.lookup(&atom.symbol) {
            Some(info) => info,
            None => return false,
        };
        if graph.incident_order(atom.id) != info.valence {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    fn water(bond_count: usize) -> StructureGraph {
        let mut g = StructureGraph::new();
        let o = g.add_atom("O", Vec2::default());
        let h1 = g.add_atom("H", Vec2::new(10.0, 0.0));
        let h2 = g.add_atom("H", Vec2::new(-10.0, 0.0));
        if bond_count >= 1 {
            g.add_bond(o, h1, 1).unwrap();
        }
        if bond_count >= 2 {
            g.add_bond(o, h2, 1).unwrap();
        }
        g
    }

    #[test]
    fn saturated_water_is_valid() {
        assert!(is_valid(&water(2), &ElementRegistry::standard()));
    }

    #[test]
    fn undersaturated_water_is_invalid() {
        // al O le falta un enlace: sin crédito parcial
        assert!(!is_valid(&water(1), &ElementRegistry::standard()));
    }

    #[test]
    fn oversaturated_pair_is_invalid() {
        let mut g = StructureGraph::new();
        let h1 = g.add_atom("H", Vec2::default());
        let h2 = g.add_atom("H", Vec2::new(5.0, 0.0));
        g.add_bond(h1, h2, 2).unwrap();
        assert!(!is_valid(&g, &ElementRegistry::standard()));
    }

    #[test]
    fn unknown_element_is_invalid() {
        let mut g = StructureGraph::new();
        let a = g.add_atom("Zz", Vec2::default());
        let b = g.add_atom("H", Vec2::new(5.0, 0.0));
        g.add_bond(a, b, 1).unwrap();
        assert!(!is_valid(&g, &ElementRegistry::standard()));
    }

    #[test]
    fn below_minimum_counts_is_invalid() {
        let mut lone = StructureGraph::new();
        lone.add_atom("H", Vec2::default());
        assert!(!is_valid(&lone, &ElementRegistry::standard()));

        let mut unbonded = StructureGraph::new();
        unbonded.add_atom("H", Vec2::default());
        unbonded.add_atom("H", Vec2::new(5.0, 0.0));
        assert!(!is_valid(&unbonded, &ElementRegistry::standard()));
    }
}
