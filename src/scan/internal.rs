//! Internal coordinate extraction for matched residue windows.
//!
//! Every residue of a window yields one [`ResidueGeometry`] of uniform shape.
//! Quantities whose atoms are absent (chain terminus, gap, missing atom) or whose
//! bond vectors collapse are reported as `None` instead of failing the window.

use super::error::Error;
use super::geometry::{self, Point};
use super::sequence::ContiguousRun;
use crate::model::residue::{Residue, ResidueId};
use log::warn;
use serde::Serialize;
use std::ops::Range;

/// Backbone bond lengths in Å.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BackboneBonds {
    pub n_ca: Option<f64>,
    pub ca_c: Option<f64>,
    pub c_o: Option<f64>,
    /// Peptide bond to N of the next residue.
    pub c_n: Option<f64>,
}

/// Backbone bond angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BackboneAngles {
    pub n_ca_c: Option<f64>,
    pub ca_c_o: Option<f64>,
    /// CA(i)-C(i)-N(i+1).
    pub ca_c_n: Option<f64>,
    /// C(i-1)-N(i)-CA(i).
    pub c_n_ca: Option<f64>,
}

/// Backbone torsions in degrees within (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BackboneDihedrals {
    pub phi: Option<f64>,
    pub psi: Option<f64>,
    pub omega: Option<f64>,
}

/// Geometry of one residue of a match window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueGeometry {
    /// 0-based index of the residue in its chain.
    pub position: usize,
    pub residue_id: ResidueId,
    pub residue_name: String,
    pub code: char,
    pub bonds: BackboneBonds,
    pub angles: BackboneAngles,
    pub dihedrals: BackboneDihedrals,
    /// Side-chain terms are empty unless side chains were requested.
    pub side_chain_bonds: Vec<SideChainTerm>,
    pub side_chain_angles: Vec<SideChainTerm>,
    /// chi1 onwards.
    pub chi: Vec<Option<f64>>,
}

/// A side-chain bond length or bond angle keyed by its atom names, e.g. `CB:OG`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideChainTerm {
    pub id: &'static str,
    pub value: Option<f64>,
}

/// Category of a single internal coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    BondLength,
    BondAngle,
    Dihedral,
}

impl CoordinateKind {
    pub fn label(&self) -> &'static str {
        match self {
            CoordinateKind::BondLength => "bond_lengths",
            CoordinateKind::BondAngle => "bond_angles",
            CoordinateKind::Dihedral => "dihedral_angles",
        }
    }
}

pub const CHI_LABELS: [&str; 5] = ["chi1", "chi2", "chi3", "chi4", "chi5"];

impl ResidueGeometry {
    /// Flattens the record into `(kind, id, value)` triples: bond lengths,
    /// then bond angles, then dihedrals, backbone before side chain in each.
    pub fn terms(&self) -> Vec<(CoordinateKind, &'static str, Option<f64>)> {
        use CoordinateKind::*;
        let side_chain = |kind: CoordinateKind, list: &[SideChainTerm]| {
            list.iter()
                .map(move |t| (kind, t.id, t.value))
                .collect::<Vec<_>>()
        };
        let mut terms = vec![
            (BondLength, "N:CA", self.bonds.n_ca),
            (BondLength, "CA:C", self.bonds.ca_c),
            (BondLength, "C:O", self.bonds.c_o),
            (BondLength, "C:N", self.bonds.c_n),
        ];
        terms.extend(side_chain(BondLength, &self.side_chain_bonds));
        terms.extend([
            (BondAngle, "N:CA:C", self.angles.n_ca_c),
            (BondAngle, "CA:C:O", self.angles.ca_c_o),
            (BondAngle, "CA:C:N", self.angles.ca_c_n),
            (BondAngle, "C:N:CA", self.angles.c_n_ca),
        ]);
        terms.extend(side_chain(BondAngle, &self.side_chain_angles));
        terms.extend([
            (Dihedral, "phi", self.dihedrals.phi),
            (Dihedral, "psi", self.dihedrals.psi),
            (Dihedral, "omega", self.dihedrals.omega),
        ]);
        terms.extend(
            self.chi
                .iter()
                .zip(CHI_LABELS)
                .map(|(value, label)| (Dihedral, label, *value)),
        );
        terms
    }
}

/// Per-residue geometry of one match, in window order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InternalCoordinateSet {
    pub residues: Vec<ResidueGeometry>,
}

impl InternalCoordinateSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Extracts geometry for `window` (indices into `run`).
///
/// Neighbours needed for phi, psi, omega and the peptide-bond terms are taken
/// from the same run, so terms crossing a gap or a terminus come out undefined.
pub fn extract(
    run: &ContiguousRun<'_>,
    window: Range<usize>,
    side_chains: bool,
) -> InternalCoordinateSet {
    let entries = run.entries();
    let residues = window
        .filter_map(|i| {
            let entry = entries.get(i)?;
            let prev = i.checked_sub(1).and_then(|j| run.residue(j));
            let next = run.residue(i + 1);
            Some(residue_geometry(
                prev,
                entry.residue,
                next,
                entry.position,
                entry.code as char,
                side_chains,
            ))
        })
        .collect();
    InternalCoordinateSet { residues }
}

fn residue_geometry(
    prev: Option<&Residue>,
    this: &Residue,
    next: Option<&Residue>,
    position: usize,
    code: char,
    side_chains: bool,
) -> ResidueGeometry {
    let cur = Some(this);
    let length = |a: (Option<&Residue>, &str), b: (Option<&Residue>, &str)| {
        points([a, b]).map(|[p, q]| geometry::distance(p, q))
    };
    let angle = |term: &str, refs: [(Option<&Residue>, &str); 3]| {
        points(refs).and_then(|[a, b, c]| settle(geometry::bond_angle(a, b, c), term, this))
    };
    let torsion = |term: &str, refs: [(Option<&Residue>, &str); 4]| {
        points(refs)
            .and_then(|[a, b, c, d]| settle(geometry::dihedral(a, b, c, d), term, this))
    };

    let bonds = BackboneBonds {
        n_ca: length((cur, "N"), (cur, "CA")),
        ca_c: length((cur, "CA"), (cur, "C")),
        c_o: length((cur, "C"), (cur, "O")),
        c_n: length((cur, "C"), (next, "N")),
    };
    let angles = BackboneAngles {
        n_ca_c: angle("N-CA-C", [(cur, "N"), (cur, "CA"), (cur, "C")]),
        ca_c_o: angle("CA-C-O", [(cur, "CA"), (cur, "C"), (cur, "O")]),
        ca_c_n: angle("CA-C-N", [(cur, "CA"), (cur, "C"), (next, "N")]),
        c_n_ca: angle("C-N-CA", [(prev, "C"), (cur, "N"), (cur, "CA")]),
    };
    let dihedrals = BackboneDihedrals {
        phi: torsion("phi", [(prev, "C"), (cur, "N"), (cur, "CA"), (cur, "C")]),
        psi: torsion("psi", [(cur, "N"), (cur, "CA"), (cur, "C"), (next, "N")]),
        omega: torsion("omega", [(prev, "CA"), (prev, "C"), (cur, "N"), (cur, "CA")]),
    };

    let (side_chain_bonds, side_chain_angles, chi) = match this.kind.amino_acid() {
        Some(aa) if side_chains => (
            aa.side_chain_bonds()
                .iter()
                .map(|&id| SideChainTerm {
                    id,
                    value: atom_names::<2>(id).and_then(|[a, b]| length((cur, a), (cur, b))),
                })
                .collect(),
            aa.side_chain_angles()
                .iter()
                .map(|&id| SideChainTerm {
                    id,
                    value: atom_names::<3>(id).and_then(|names| angle(id, names.map(|n| (cur, n)))),
                })
                .collect(),
            aa.chi_atoms()
                .iter()
                .zip(CHI_LABELS)
                .map(|(&quad, label)| torsion(label, quad.map(|name| (cur, name))))
                .collect(),
        ),
        _ => (Vec::new(), Vec::new(), Vec::new()),
    };

    ResidueGeometry {
        position,
        residue_id: this.id,
        residue_name: this.name.clone(),
        code,
        bonds,
        angles,
        dihedrals,
        side_chain_bonds,
        side_chain_angles,
        chi,
    }
}

fn atom_names<const N: usize>(id: &'static str) -> Option<[&'static str; N]> {
    let mut out = [""; N];
    let mut parts = id.split(':');
    for slot in out.iter_mut() {
        *slot = parts.next()?;
    }
    parts.next().is_none().then_some(out)
}

fn points<const N: usize>(refs: [(Option<&Residue>, &str); N]) -> Option<[Point; N]> {
    let mut out = [[0.0; 3]; N];
    for (slot, (residue, name)) in out.iter_mut().zip(refs) {
        *slot = residue?.position(name)?;
    }
    Some(out)
}

fn settle(value: Result<f64, Error>, term: &str, residue: &Residue) -> Option<f64> {
    match value {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("{term} undefined at {} {}: {e}", residue.name, residue.id);
            None
        }
    }
}
