/// Demo mínima del catálogo: siembra templates, registra estructuras,
/// corre un cleanup y muestra detección de ensamblajes.
use proto_catalogue::templates::ethylene_graph;
use proto_catalogue::{check_requirements, detect_assemblies, plan_reshape, Catalogue, StableFormRegistry,
                      TemplateRegistry, CLUSTER_RADIUS};
use proto_domain::{ElementRegistry, Molecule, Polymer, PolymerType, StructureGraph, Vec2};
use proto_persistence::{InMemoryStore, JsonFileStore, KeyValueStore, StoreConfig};

fn water() -> StructureGraph {
    let mut g = StructureGraph::new();
    let o = g.add_atom("O", Vec2::new(0.0, 0.0));
    let h1 = g.add_atom("H", Vec2::new(60.0, 0.0));
    let h2 = g.add_atom("H", Vec2::new(-60.0, 0.0));
    g.add_bond(o, h1, 1).unwrap();
    g.add_bond(o, h2, 1).unwrap();
    g
}

fn run_demo<S: KeyValueStore>(mut catalogue: Catalogue<S>) {
    let loaded = catalogue.load_from_store();
    println!("registros cargados del store: {}", loaded);
    let report = catalogue.cleanup();
    println!("cleanup: {:?}", report);

    let discovered = catalogue.auto_discover(&[water(), ethylene_graph(), water()]);
    println!("descubiertas {} estructuras nuevas", discovered);
    for hit in catalogue.search("h2o") {
        println!("  search h2o -> {} ({})", hit.name, hit.formula);
    }

    // decisión de reshape para el agua estirada
    let elements = ElementRegistry::standard();
    let forms = StableFormRegistry::builtin(&elements);
    let g = water();
    if let Some(form) = forms.for_graph(&g) {
        if let Some(plan) = plan_reshape(&g, form, &elements) {
            println!("agua estirada needs_reshaping={}", plan.needs_reshaping);
        }
    }

    // requisitos del protocell contra dos cadenas selladas
    let monomer = Molecule::from_graph(&ethylene_graph(), &elements);
    let lipid = Polymer::new(PolymerType::Lipid, vec![monomer.clone(); 4], Vec2::new(0.0, 0.0)).sealed();
    let nucleotide = Molecule::from_graph(&proto_catalogue::templates::formaldehyde_graph(), &elements);
    let nucleic = Polymer::new(PolymerType::NucleicAcid, vec![nucleotide; 8], Vec2::new(80.0, 0.0)).sealed();
    let candidates = vec![lipid, nucleic];
    let cell = catalogue.templates().cell("PROTOCELL").unwrap();
    let report = check_requirements(cell, &candidates, catalogue.templates());
    println!("PROTOCELL satisfied={}", report.satisfied);

    let groups = detect_assemblies(&candidates, CLUSTER_RADIUS);
    println!("ensamblajes emergentes detectados: {}", groups.len());
}

fn main() {
    let elements = ElementRegistry::standard();
    let templates = TemplateRegistry::builtin(&elements);

    let file_store = if cfg!(feature = "file_demo") {
        let config = StoreConfig::from_env();
        match JsonFileStore::new(&config.data_dir) {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("store de archivos no disponible, usando memoria: {}", e);
                None
            }
        }
    } else {
        None
    };

    match file_store {
        Some(store) => run_demo(Catalogue::new(elements, templates, store)),
        None => run_demo(Catalogue::new(elements, templates, InMemoryStore::new())),
    }
}
