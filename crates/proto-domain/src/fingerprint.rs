//! Fingerprint molecular determinista.
//!
//! La clave se deriva de topología + composición elemental y es invariante
//! bajo reordenamiento de átomos/enlaces y bajo traslación (no usa posiciones
//! absolutas). Entradas estructuralmente equivalentes colisionan siempre:
//! esa colisión es la identidad que deduplica el catálogo.
//!
//! Canonicalización: tres listas ordenadas — conteos de elementos, tuplas de
//! enlace `(sym_menor, sym_mayor, orden)` y firmas por átomo
//! `símbolo[órdenes incidentes ordenados]` — unidas en un texto estable y
//! hasheadas con SHA-256.

use sha2::{Digest, Sha256};

use crate::graph::StructureGraph;

/// Calcula el fingerprint canónico de una estructura.
pub fn molecule_fingerprint(graph: &StructureGraph) -> String {
    let mut element_counts: Vec<String> = graph.element_counts()
                                               .into_iter()
                                               .map(|(sym, n)| format!("{}{}", sym, n))
                                               .collect();
    element_counts.sort();

    let mut bond_tuples: Vec<String> = graph.bonds()
                                            .map(|b| {
                                                let sa = &graph.atom(b.atom_a).map(|a| a.symbol.clone()).unwrap_or_default();
                                                let sb = &graph.atom(b.atom_b).map(|a| a.symbol.clone()).unwrap_or_default();
                                                let (lo, hi) = if sa <= sb { (sa, sb) } else { (sb, sa) };
                                                format!("{}-{}:{}", lo, hi, b.order)
                                            })
                                            .collect();
    bond_tuples.sort();

    let mut atom_signatures: Vec<String> = graph.atoms()
                                                .map(|atom| {
                                                    let mut orders: Vec<u8> = atom.bond_ids
                                                                                  .iter()
                                                                                  .filter_map(|b| graph.bond(*b))
                                                                                  .map(|b| b.order)
                                                                                  .collect();
                                                    orders.sort();
                                                    let orders: Vec<String> = orders.iter().map(|o| o.to_string()).collect();
                                                    format!("{}[{}]", atom.symbol, orders.join(","))
                                                })
                                                .collect();
    atom_signatures.sort();

    let canonical = format!("elements:{}|bonds:{}|atoms:{}",
                            element_counts.join(","),
                            bond_tuples.join(","),
                            atom_signatures.join(","));

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    fn ethylene(offset: Vec2, reversed: bool) -> StructureGraph {
        let mut g = StructureGraph::new();
        let mut hydrogens = Vec::new();
        // el orden de inserción varía según `reversed`
        if reversed {
            for i in 0..4 {
                hydrogens.push(g.add_atom("H", Vec2::new(offset.x + i as f64, offset.y + 20.0)));
            }
        }
        let c1 = g.add_atom("C", offset);
        let c2 = g.add_atom("C", Vec2::new(offset.x + 15.0, offset.y));
        if !reversed {
            for i in 0..4 {
                hydrogens.push(g.add_atom("H", Vec2::new(offset.x + i as f64, offset.y + 20.0)));
            }
        }
        g.add_bond(c1, c2, 2).unwrap();
        g.add_bond(c1, hydrogens[0], 1).unwrap();
        g.add_bond(c1, hydrogens[1], 1).unwrap();
        g.add_bond(c2, hydrogens[2], 1).unwrap();
        g.add_bond(c2, hydrogens[3], 1).unwrap();
        g
    }

    #[test]
    fn fingerprint_invariant_under_reordering() {
        let a = ethylene(Vec2::default(), false);
        let b = ethylene(Vec2::default(), true);
        assert_eq!(molecule_fingerprint(&a), molecule_fingerprint(&b));
    }

    #[test]
    fn fingerprint_invariant_under_translation() {
        let a = ethylene(Vec2::default(), false);
        let b = ethylene(Vec2::new(500.0, -300.0), false);
        assert_eq!(molecule_fingerprint(&a), molecule_fingerprint(&b));
    }

    #[test]
    fn different_bond_order_changes_fingerprint() {
        let mut single = StructureGraph::new();
        let a = single.add_atom("C", Vec2::default());
        let b = single.add_atom("C", Vec2::new(10.0, 0.0));
        single.add_bond(a, b, 1).unwrap();

        let mut double = StructureGraph::new();
        let a = double.add_atom("C", Vec2::default());
        let b = double.add_atom("C", Vec2::new(10.0, 0.0));
        double.add_bond(a, b, 2).unwrap();

        assert_ne!(molecule_fingerprint(&single), molecule_fingerprint(&double));
    }
}
