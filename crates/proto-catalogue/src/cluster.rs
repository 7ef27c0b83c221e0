//! Detección de ensamblajes emergentes por clustering espacial.
//!
//! Solo participan polímeros sellados y no asignados con centro conocido.
//! La adyacencia es distancia < radio; los componentes conexos se
//! descubren por BFS desde cada polímero no visitado, así que son
//! disjuntos dentro de una pasada: un polímero queda reclamado por a lo
//! sumo un componente.

use std::collections::VecDeque;

use uuid::Uuid;

use proto_domain::{centroid, Polymer, PolymerType, Vec2};

/// Componente calificado: particiona sus miembros por tipo declarado.
#[derive(Debug, Clone)]
pub struct AssemblyCandidate {
    pub members: Vec<Uuid>,
    pub membrane: Vec<Uuid>,
    pub nucleoid: Vec<Uuid>,
    pub ribosome: Vec<Uuid>,
    pub other: Vec<Uuid>,
    pub center: Vec2,
}

/// Descubre componentes conexos entre polímeros elegibles y devuelve un
/// candidato por componente que pase el gate de composición: al menos un
/// miembro con rol lipídico y uno con rol de ácido nucleico.
pub fn detect_assemblies(polymers: &[Polymer], radius: f64) -> Vec<AssemblyCandidate> {
    let eligible: Vec<&Polymer> = polymers.iter().filter(|p| p.sealed && !p.assigned).collect();
    let n = eligible.len();
    let mut visited = vec![false; n];
    let mut candidates = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        // BFS sobre la relación de adyacencia
        let mut component = Vec::new();
        let mut queue = VecDeque::from([seed]);
        visited[seed] = true;
        while let Some(i) = queue.pop_front() {
            component.push(i);
            for j in 0..n {
                if !visited[j] && eligible[i].center.distance(&eligible[j].center) < radius {
                    visited[j] = true;
                    queue.push_back(j);
                }
            }
        }

        let has_lipid = component.iter().any(|&i| eligible[i].polymer_type == PolymerType::Lipid);
        let has_nucleic = component.iter().any(|&i| eligible[i].polymer_type == PolymerType::NucleicAcid);
        if !(has_lipid && has_nucleic) {
            continue;
        }

        let mut candidate = AssemblyCandidate { members: Vec::new(),
                                                membrane: Vec::new(),
                                                nucleoid: Vec::new(),
                                                ribosome: Vec::new(),
                                                other: Vec::new(),
                                                center: centroid(&component.iter().map(|&i| eligible[i].center).collect::<Vec<_>>()) };
        for &i in &component {
            let p = eligible[i];
            candidate.members.push(p.id);
            match p.polymer_type {
                PolymerType::Lipid => candidate.membrane.push(p.id),
                PolymerType::NucleicAcid => candidate.nucleoid.push(p.id),
                PolymerType::Protein => candidate.ribosome.push(p.id),
                _ => candidate.other.push(p.id),
            }
        }
        candidates.push(candidate);
    }

    candidates
}
