// proto-domain library entry point
pub mod element;
pub mod errors;
pub mod fingerprint;
pub mod geometry;
pub mod graph;
pub mod molecule;
pub mod polymer;
pub mod validity;
pub use element::{ElementInfo, ElementRegistry};
pub use errors::DomainError;
pub use fingerprint::molecule_fingerprint;
pub use geometry::{centroid, Vec2};
pub use graph::{Atom, AtomId, Bond, BondId, StructureGraph};
pub use molecule::{formula, Molecule};
pub use polymer::{Polymer, PolymerType};
pub use validity::is_valid;
