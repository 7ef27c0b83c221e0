//! Tabla de elementos: colaborador consultado por el validador y los
//! fingerprints de masa/fórmula.
//!
//! El registro es inmutable e inyectable (no estado global ambiente): los
//! tests pueden sustituirlo por fixtures mediante `from_elements`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub symbol: String,
    pub name: String,
    /// Orden de enlace total máximo que un átomo del elemento sostiene.
    pub valence: u32,
    pub mass: f64,
    pub color: String,
}

impl ElementInfo {
    pub fn new(symbol: &str, name: &str, valence: u32, mass: f64, color: &str) -> Self {
        Self { symbol: symbol.to_string(),
               name: name.to_string(),
               valence,
               mass,
               color: color.to_string() }
    }
}

/// Registro inmutable de elementos, indexado por símbolo normalizado.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    elements: IndexMap<String, ElementInfo>,
}

impl ElementRegistry {
    /// Construye un registro a partir de un iterador de elementos. El último
    /// elemento con un símbolo repetido gana.
    pub fn from_elements<I>(elements: I) -> Self
        where I: IntoIterator<Item = ElementInfo>
    {
        let mut map = IndexMap::new();
        for e in elements {
            map.insert(normalize_symbol(&e.symbol), e);
        }
        Self { elements: map }
    }

    /// Tabla estándar usada por la simulación.
    pub fn standard() -> Self {
        Self::from_elements(vec![ElementInfo::new("H", "Hydrogen", 1, 1.008, "#ffffff"),
                                 ElementInfo::new("C", "Carbon", 4, 12.011, "#333333"),
                                 ElementInfo::new("N", "Nitrogen", 3, 14.007, "#3050f8"),
                                 ElementInfo::new("O", "Oxygen", 2, 15.999, "#ff0d0d"),
                                 ElementInfo::new("P", "Phosphorus", 5, 30.974, "#ff8000"),
                                 ElementInfo::new("S", "Sulfur", 6, 32.06, "#ffff30"),
                                 ElementInfo::new("Na", "Sodium", 1, 22.990, "#ab5cf2"),
                                 ElementInfo::new("Cl", "Chlorine", 1, 35.45, "#1ff01f"),])
    }

    /// `lookup(symbol) -> {valence, mass, color, name} | none`
    pub fn lookup(&self, symbol: &str) -> Option<&ElementInfo> {
        self.elements.get(&normalize_symbol(symbol))
    }

    pub fn list_all(&self) -> impl Iterator<Item = &ElementInfo> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Normaliza un símbolo químico: primera letra mayúscula, resto minúsculas.
fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
