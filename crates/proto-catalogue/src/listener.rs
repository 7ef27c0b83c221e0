//! Notificación "blueprint added": un único suscriptor recibe cada alta
//! exitosa del catálogo con su discriminador de tipo.

use crate::blueprint::{CellBlueprint, MoleculeBlueprint, PolymerBlueprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintKind {
    Molecule,
    Polymer,
    Cell,
}

/// Payload de la notificación.
#[derive(Debug, Clone)]
pub enum BlueprintAdded {
    Molecule(MoleculeBlueprint),
    Polymer(PolymerBlueprint),
    Cell(CellBlueprint),
}

impl BlueprintAdded {
    pub fn kind(&self) -> BlueprintKind {
        match self {
            BlueprintAdded::Molecule(_) => BlueprintKind::Molecule,
            BlueprintAdded::Polymer(_) => BlueprintKind::Polymer,
            BlueprintAdded::Cell(_) => BlueprintKind::Cell,
        }
    }
}

pub trait CatalogueListener {
    fn blueprint_added(&mut self, event: &BlueprintAdded);
}
