//! Owned representation of parsed macromolecular structures.
//!
//! - [`atom`] – Named atom with Cartesian coordinates and occupancy.
//! - [`types`] – Canonical amino acids and the closed residue classification.
//! - [`residue`] – Residues with author numbering and their atoms.
//! - [`structure`] – Chains, models, and whole structures.
//!
//! Ownership runs strictly downward: a [`Structure`](structure::Structure) owns its
//! models, a model its chains, a chain its residues, a residue its atoms. Chains refer
//! back to their structure by identifier only.

pub mod atom;
pub mod residue;
pub mod structure;
pub mod types;

pub use atom::Atom;
pub use residue::{Residue, ResidueId};
pub use structure::{Chain, Model, Structure};
pub use types::{AminoAcid, ResidueKind};
