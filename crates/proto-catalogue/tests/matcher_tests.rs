use proto_catalogue::{check_requirements, classify_polymer, TemplateRegistry};
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

fn registry() -> TemplateRegistry {
    TemplateRegistry::builtin(&ElementRegistry::standard())
}

#[test]
fn zero_candidates_is_unsatisfied() {
    let registry = registry();
    let cell = registry.cell("PROTOCELL").unwrap();
    let report = check_requirements(cell, &[], &registry);
    assert!(!report.satisfied);
    for status in report.roles.values() {
        assert_eq!(status.have, 0);
        assert!(!status.satisfied);
    }
}

#[test]
fn one_matching_polymer_per_role_satisfies() {
    let registry = registry();
    let cell = registry.cell("PROTOCELL").unwrap();
    let candidates = vec![chain(PolymerType::Lipid, "C2H4", 4), chain(PolymerType::NucleicAcid, "CH2O", 8)];
    let report = check_requirements(cell, &candidates, &registry);
    assert!(report.satisfied);
    assert_eq!(report.roles["membrane"].have, 1);
    assert_eq!(report.roles["nucleoid"].have, 1);
}

#[test]
fn short_chains_do_not_count() {
    let registry = registry();
    let cell = registry.cell("PROTOCELL").unwrap();
    // lipid below the membrane minimum chain length
    let candidates = vec![chain(PolymerType::Lipid, "C2H4", 3), chain(PolymerType::NucleicAcid, "CH2O", 8)];
    let report = check_requirements(cell, &candidates, &registry);
    assert!(!report.satisfied);
    assert_eq!(report.roles["membrane"].have, 0);
    assert!(report.roles["nucleoid"].satisfied);
}

#[test]
fn counts_are_monotonic_in_candidate_set_size() {
    let registry = registry();
    let cell = registry.cell("PROTOCELL").unwrap();
    let mut candidates = vec![chain(PolymerType::Lipid, "C2H4", 4)];
    let small = check_requirements(cell, &candidates, &registry);
    candidates.push(chain(PolymerType::Lipid, "C2H4", 6));
    candidates.push(chain(PolymerType::NucleicAcid, "CH2O", 9));
    let large = check_requirements(cell, &candidates, &registry);
    for (role, status) in &small.roles {
        assert!(large.roles[role].have >= status.have);
    }
    // candidates themselves are untouched
    assert_eq!(candidates.len(), 3);
}

#[test]
fn classification_tests_templates_in_declaration_order() {
    let registry = registry();
    let lipid = chain(PolymerType::Lipid, "C2H4", 5);
    assert_eq!(classify_polymer(&lipid, &registry).unwrap().name, "Lipid chain");

    let nucleic = chain(PolymerType::NucleicAcid, "CH2O", 8);
    assert_eq!(classify_polymer(&nucleic, &registry).unwrap().name, "DNA strand");

    // below minimum length: no template matches
    let short = chain(PolymerType::NucleicAcid, "CH2O", 3);
    assert!(classify_polymer(&short, &registry).is_none());
}
