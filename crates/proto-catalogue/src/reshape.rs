//! Formas estables canónicas y decisión de reshape.
//!
//! Este módulo solo decide y calcula la configuración objetivo; mover los
//! átomos es trabajo del colaborador de física (`PhysicsPort`), cuyo
//! resultado no se espera.
//!
//! La asignación de slots es greedy por clase de símbolo: cada átomo, en
//! orden de entrada arbitrario, toma el slot libre más cercano de su mismo
//! símbolo. No hay paso de intercambio, así que no es globalmente óptima —
//! limitación documentada y asumida.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use proto_domain::{formula, AtomId, ElementRegistry, StructureGraph, Vec2};

use crate::constants::RESHAPE_TOLERANCE_PX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSlot {
    pub symbol: String,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormBond {
    pub slot_a: usize,
    pub slot_b: usize,
    pub order: u8,
}

/// Template geométrico canónico de una fórmula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableForm {
    pub name: String,
    pub formula: String,
    pub slots: Vec<FormSlot>,
    pub bonds: Vec<FormBond>,
}

impl StableForm {
    /// Construye la forma normalizando los offsets al centro de masa, de
    /// modo que una estructura ya canónica ancle con desplazamiento cero.
    pub fn new(name: &str, formula: &str, mut slots: Vec<FormSlot>, bonds: Vec<FormBond>, elements: &ElementRegistry) -> Self {
        let mut total = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for slot in &slots {
            let mass = elements.lookup(&slot.symbol).map(|e| e.mass).unwrap_or(1.0);
            cx += slot.offset.x * mass;
            cy += slot.offset.y * mass;
            total += mass;
        }
        if total > 0.0 {
            for slot in &mut slots {
                slot.offset.x -= cx / total;
                slot.offset.y -= cy / total;
            }
        }
        Self { name: name.to_string(),
               formula: formula.to_string(),
               slots,
               bonds }
    }

    fn element_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for slot in &self.slots {
            *counts.entry(slot.symbol.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Orden de enlace esperado para un par de símbolos; primera coincidencia.
    fn expected_order(&self, sym_a: &str, sym_b: &str) -> Option<u8> {
        self.bonds.iter().find_map(|b| {
                             let sa = &self.slots[b.slot_a].symbol;
                             let sb = &self.slots[b.slot_b].symbol;
                             if (sa == sym_a && sb == sym_b) || (sa == sym_b && sb == sym_a) {
                                 Some(b.order)
                             } else {
                                 None
                             }
                         })
    }
}

/// Registro inmutable de formas estables, indexado por fórmula.
#[derive(Debug, Clone)]
pub struct StableFormRegistry {
    forms: IndexMap<String, StableForm>,
}

impl StableFormRegistry {
    pub fn new(forms: Vec<StableForm>) -> Self {
        Self { forms: forms.into_iter().map(|f| (f.formula.clone(), f)).collect() }
    }

    pub fn builtin(elements: &ElementRegistry) -> Self {
        let water = StableForm::new("Water",
                                    "H2O",
                                    vec![FormSlot { symbol: "O".into(), offset: Vec2::new(0.0, 0.0) },
                                         // geometría doblada, ~104.5° entre O-H
                                         FormSlot { symbol: "H".into(), offset: Vec2::new(-31.6, -24.5) },
                                         FormSlot { symbol: "H".into(), offset: Vec2::new(31.6, -24.5) },],
                                    vec![FormBond { slot_a: 0, slot_b: 1, order: 1 },
                                         FormBond { slot_a: 0, slot_b: 2, order: 1 },],
                                    elements);
        let co2 = StableForm::new("Carbon dioxide",
                                  "CO2",
                                  vec![FormSlot { symbol: "C".into(), offset: Vec2::new(0.0, 0.0) },
                                       FormSlot { symbol: "O".into(), offset: Vec2::new(-40.0, 0.0) },
                                       FormSlot { symbol: "O".into(), offset: Vec2::new(40.0, 0.0) },],
                                  vec![FormBond { slot_a: 0, slot_b: 1, order: 2 },
                                       FormBond { slot_a: 0, slot_b: 2, order: 2 },],
                                  elements);
        let methane = StableForm::new("Methane",
                                      "CH4",
                                      vec![FormSlot { symbol: "C".into(), offset: Vec2::new(0.0, 0.0) },
                                           FormSlot { symbol: "H".into(), offset: Vec2::new(0.0, 40.0) },
                                           FormSlot { symbol: "H".into(), offset: Vec2::new(38.0, -12.4) },
                                           FormSlot { symbol: "H".into(), offset: Vec2::new(-38.0, -12.4) },
                                           FormSlot { symbol: "H".into(), offset: Vec2::new(0.0, -40.0) },],
                                      vec![FormBond { slot_a: 0, slot_b: 1, order: 1 },
                                           FormBond { slot_a: 0, slot_b: 2, order: 1 },
                                           FormBond { slot_a: 0, slot_b: 3, order: 1 },
                                           FormBond { slot_a: 0, slot_b: 4, order: 1 },],
                                      elements);
        let ethylene = StableForm::new("Ethylene",
                                       "C2H4",
                                       vec![FormSlot { symbol: "C".into(), offset: Vec2::new(-20.0, 0.0) },
                                            FormSlot { symbol: "C".into(), offset: Vec2::new(20.0, 0.0) },
                                            FormSlot { symbol: "H".into(), offset: Vec2::new(-40.0, 24.0) },
                                            FormSlot { symbol: "H".into(), offset: Vec2::new(-40.0, -24.0) },
                                            FormSlot { symbol: "H".into(), offset: Vec2::new(40.0, 24.0) },
                                            FormSlot { symbol: "H".into(), offset: Vec2::new(40.0, -24.0) },],
                                       vec![FormBond { slot_a: 0, slot_b: 1, order: 2 },
                                            FormBond { slot_a: 0, slot_b: 2, order: 1 },
                                            FormBond { slot_a: 0, slot_b: 3, order: 1 },
                                            FormBond { slot_a: 1, slot_b: 4, order: 1 },
                                            FormBond { slot_a: 1, slot_b: 5, order: 1 },],
                                       elements);
        Self::new(vec![water, co2, methane, ethylene])
    }

    pub fn lookup(&self, formula: &str) -> Option<&StableForm> {
        self.forms.get(formula)
    }

    pub fn list_all(&self) -> impl Iterator<Item = &StableForm> {
        self.forms.values()
    }

    /// Forma canónica cuya fórmula coincide con la del grafo.
    pub fn for_graph(&self, graph: &StructureGraph) -> Option<&StableForm> {
        self.lookup(&formula(graph))
    }
}

/// Decisión de reshape más configuración objetivo por átomo.
#[derive(Debug, Clone)]
pub struct ReshapePlan {
    pub needs_reshaping: bool,
    pub targets: Vec<(AtomId, Vec2)>,
}

/// Colaborador de física: mueve átomos hacia su objetivo con el tiempo.
/// El núcleo no espera el resultado.
pub trait PhysicsPort {
    fn move_atom(&mut self, atom: AtomId, target: Vec2);
}

/// Calcula el plan de reshape de una estructura contra una forma canónica.
/// `None` si el multiconjunto de elementos difiere del de la forma (el
/// match por fórmula no basta: la forma debe cubrir cada átomo).
pub fn plan_reshape(graph: &StructureGraph, form: &StableForm, elements: &ElementRegistry) -> Option<ReshapePlan> {
    if graph.element_counts() != form.element_counts() {
        return None;
    }

    let anchor = graph.center_of_mass(elements);
    let mut claimed = vec![false; form.slots.len()];
    let mut targets: Vec<(AtomId, Vec2)> = Vec::with_capacity(graph.atom_count());

    // greedy: slot libre más cercano de la misma clase de símbolo
    for atom in graph.atoms() {
        let mut best: Option<(usize, f64)> = None;
        for (i, slot) in form.slots.iter().enumerate() {
            if claimed[i] || slot.symbol != atom.symbol {
                continue;
            }
            let target = anchor.add(&slot.offset);
            let d = atom.position.distance(&target);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((i, d));
            }
        }
        // el gate de multiconjunto garantiza un slot por átomo
        let (slot_idx, _) = best?;
        claimed[slot_idx] = true;
        targets.push((atom.id, anchor.add(&form.slots[slot_idx].offset)));
    }

    let mut needs_reshaping = graph.bond_count() != form.bonds.len();

    if !needs_reshaping {
        for bond in graph.bonds() {
            let sym_a = graph.atom(bond.atom_a).map(|a| a.symbol.clone()).unwrap_or_default();
            let sym_b = graph.atom(bond.atom_b).map(|a| a.symbol.clone()).unwrap_or_default();
            match form.expected_order(&sym_a, &sym_b) {
                Some(order) if order == bond.order => {}
                _ => {
                    needs_reshaping = true;
                    break;
                }
            }
        }
    }

    if !needs_reshaping {
        for (atom_id, target) in &targets {
            let position = graph.atom(*atom_id).map(|a| a.position).unwrap_or_default();
            if position.distance(target) > RESHAPE_TOLERANCE_PX {
                needs_reshaping = true;
                break;
            }
        }
    }

    Some(ReshapePlan { needs_reshaping, targets })
}

/// Entrega el plan al colaborador de física, un llamado por átomo.
pub fn apply_plan(plan: &ReshapePlan, port: &mut dyn PhysicsPort) {
    for (atom_id, target) in &plan.targets {
        port.move_atom(*atom_id, *target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_domain::ElementRegistry;

    #[test]
    fn builtin_forms_cover_expected_formulas() {
        let registry = StableFormRegistry::builtin(&ElementRegistry::standard());
        for formula in ["H2O", "CO2", "CH4", "C2H4"] {
            assert!(registry.lookup(formula).is_some(), "missing form {}", formula);
        }
    }

    #[test]
    fn form_offsets_are_mass_centered() {
        let elements = ElementRegistry::standard();
        let registry = StableFormRegistry::builtin(&elements);
        let water = registry.lookup("H2O").unwrap();
        let mut cx = 0.0;
        let mut total = 0.0;
        for slot in &water.slots {
            let mass = elements.lookup(&slot.symbol).unwrap().mass;
            cx += slot.offset.x * mass;
            total += mass;
        }
        assert!((cx / total).abs() < 1e-9);
    }
}
