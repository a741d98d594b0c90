//! Sequence-motif localization and backbone internal-coordinate extraction for
//! protein structures.
//!
//! Given an amino-acid motif such as `"TAY"`, the crate finds every place the
//! motif occurs in a chain's residue sequence, only counting windows that are
//! structurally contiguous, and reports the geometry of each matched residue:
//! backbone bond lengths and bond angles, the phi/psi/omega torsions and,
//! optionally, side-chain geometry down to the chi angles.
//!
//! # Features
//!
//! - **Gap-aware matching**: windows never span a break in residue numbering
//!   (or, optionally, a broken peptide bond)
//! - **Undefined, not wrong**: a missing atom or degenerate geometry leaves only
//!   the affected value undefined
//! - **PDB and mmCIF input**, plain or gzip-compressed, with alternate
//!   locations resolved by occupancy
//! - **Batch scanning** over a directory or a chain query list, on a bounded
//!   worker pool, with failed targets recorded instead of aborting the run
//! - **Wide CSV/TSV, long CSV and JSON output**
//!
//! # Quick Start
//!
//! ```
//! use motif_ic::model::{Chain, Model, Residue, Structure};
//! use motif_ic::scan::{self, Motif, ScanConfig};
//!
//! // A three-residue chain with idealized backbone positions.
//! let mut chain = Chain::new("A", "demo");
//! for (i, name) in ["THR", "ALA", "TYR"].into_iter().enumerate() {
//!     let x = i as f64 * 3.8;
//!     chain.add_residue(
//!         Residue::new(i as i32 + 1, name)
//!             .with_atom("N", [x, 0.0, 0.0])
//!             .with_atom("CA", [x + 1.46, 0.0, 0.0])
//!             .with_atom("C", [x + 1.98, 1.42, 0.0])
//!             .with_atom("O", [x + 1.30, 2.45, 0.0]),
//!     );
//! }
//! let mut model = Model::new(1);
//! model.add_chain(chain);
//! let mut structure = Structure::new("demo", "demo.pdb");
//! structure.add_model(model);
//!
//! let motif = Motif::new("TAY")?;
//! let hits = scan::scan(&structure, "A", &motif, &ScanConfig::default())?;
//!
//! assert_eq!(hits.len(), 1);
//! let (found, geometry) = &hits[0];
//! assert_eq!((found.start, found.end), (0, 2));
//! assert_eq!(geometry.residues.len(), 3);
//!
//! // No residue precedes the first one, so its phi is undefined.
//! assert!(geometry.residues[0].dihedrals.phi.is_none());
//! assert!(geometry.residues[1].dihedrals.phi.is_some());
//! # Ok::<(), motif_ic::scan::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`]: owned structure hierarchy (structure, model, chain, residue, atom)
//! - [`scan`]: sequence view, motif matcher, geometry and result records
//! - [`io`]: structure loading, chain queries and report writers
//! - [`batch`]: scanning many structures and merging their reports

pub mod batch;
pub mod io;
pub mod model;
pub mod scan;

pub use batch::run_batch;
pub use model::{Chain, Model, Residue, Structure};
pub use scan::{Motif, ScanConfig, ScanReport};
