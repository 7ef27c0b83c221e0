//! Vista efímera de una estructura conexa: fórmula, masa y estabilidad se
//! recomputan del grafo actual y nunca se persisten directamente.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::ElementRegistry;
use crate::fingerprint::molecule_fingerprint;
use crate::graph::StructureGraph;
use crate::validity::is_valid;

/// Fórmula en orden de Hill: C primero, H segundo, resto alfabético.
/// Los conteos 1 se omiten (`H2O`, `C2H4`, `CH4`).
pub fn formula(graph: &StructureGraph) -> String {
    let counts = graph.element_counts();
    let mut parts: Vec<(String, usize)> = Vec::new();
    if let Some(c) = counts.get("C") {
        parts.push(("C".to_string(), *c));
    }
    if let Some(h) = counts.get("H") {
        parts.push(("H".to_string(), *h));
    }
    for (sym, n) in &counts {
        if sym != "C" && sym != "H" {
            parts.push((sym.clone(), *n));
        }
    }
    parts.into_iter()
         .map(|(sym, n)| if n == 1 { sym } else { format!("{}{}", sym, n) })
         .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub fingerprint: String,
    pub formula: String,
    pub mass: f64,
    pub is_stable: bool,
    pub atom_count: usize,
    pub bond_count: usize,
}

impl Molecule {
    /// Snapshot derivado del grafo actual.
    pub fn from_graph(graph: &StructureGraph, elements: &ElementRegistry) -> Self {
        let mass = graph.atoms()
                        .map(|a| elements.lookup(&a.symbol).map(|e| e.mass).unwrap_or(0.0))
                        .sum();
        Self { fingerprint: molecule_fingerprint(graph),
               formula: formula(graph),
               mass,
               is_stable: is_valid(graph, elements),
               atom_count: graph.atom_count(),
               bond_count: graph.bond_count() }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} mass={:.3} stable={}>", self.formula, self.mass, self.is_stable)
    }
}
