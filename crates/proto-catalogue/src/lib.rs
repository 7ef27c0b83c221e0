//! proto-catalogue: catálogo químico y motor de validez estructural.
pub mod blueprint;
pub mod catalogue;
pub mod cluster;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod listener;
pub mod matcher;
pub mod reshape;
pub mod templates;

pub use blueprint::{AtomRecord, BondRecord, CellBlueprint, MoleculeBlueprint, PolymerBlueprint, RequirementTuple,
                    RoleRequirement, requirement_fingerprint};
pub use catalogue::{AssemblyLevel, Catalogue, CleanupReport, ImportReport, Snapshot};
pub use cluster::{detect_assemblies, AssemblyCandidate};
pub use constants::{CLUSTER_RADIUS, RESHAPE_TOLERANCE_PX};
pub use errors::CatalogueError;
pub use listener::{BlueprintAdded, BlueprintKind, CatalogueListener};
pub use matcher::{check_requirements, classify_polymer, RequirementReport, RoleStatus};
pub use reshape::{apply_plan, plan_reshape, PhysicsPort, ReshapePlan, StableForm, StableFormRegistry};
pub use templates::TemplateRegistry;
