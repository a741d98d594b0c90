use super::config::GapPolicy;
use super::error::Error;
use super::geometry;
use crate::model::residue::Residue;
use crate::model::structure::Chain;
use crate::model::types::ResidueKind;

/// One-letter code standing in for a non-standard residue under [`GapPolicy::Permissive`].
pub const SENTINEL: u8 = b'X';

/// A residue as seen by the matcher: its one-letter code, its index in the chain,
/// and a handle to the residue itself.
#[derive(Debug, Clone, Copy)]
pub struct ViewEntry<'a> {
    pub code: u8,
    pub position: usize,
    pub residue: &'a Residue,
}

/// Ordered, policy-filtered view of a chain's residues.
///
/// Construction validates residue ordering once; iteration is lazy and can be
/// restarted any number of times.
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a> {
    chain: &'a Chain,
    policy: GapPolicy,
    peptide_bond_cutoff: Option<f64>,
}

impl<'a> SequenceView<'a> {
    pub fn new(chain: &'a Chain, policy: GapPolicy) -> Result<Self, Error> {
        let view = Self {
            chain,
            policy,
            peptide_bond_cutoff: None,
        };
        view.validate()?;
        Ok(view)
    }

    /// Treats index-consecutive residues as a gap when their C–N distance exceeds
    /// `cutoff` Å or either atom is missing.
    pub fn with_peptide_bond_cutoff(mut self, cutoff: Option<f64>) -> Self {
        self.peptide_bond_cutoff = cutoff;
        self
    }

    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    pub fn iter(&self) -> impl Iterator<Item = ViewEntry<'a>> + use<'a> {
        let policy = self.policy;
        self.chain
            .residues()
            .iter()
            .enumerate()
            .filter_map(move |(position, residue)| {
                code_for(residue, policy).map(|code| ViewEntry {
                    code,
                    position,
                    residue,
                })
            })
    }

    /// The full one-letter sequence, gaps included.
    pub fn sequence(&self) -> String {
        self.iter().map(|e| e.code as char).collect()
    }

    /// Splits the view into maximal runs of residues with no gap between them.
    pub fn runs(&self) -> Vec<ContiguousRun<'a>> {
        let mut runs = Vec::new();
        let mut current: Vec<ViewEntry<'a>> = Vec::new();
        for entry in self.iter() {
            let split = current
                .last()
                .is_some_and(|prev| !self.is_linked(prev.residue, entry.residue));
            if split {
                runs.push(ContiguousRun {
                    entries: std::mem::take(&mut current),
                });
            }
            current.push(entry);
        }
        if !current.is_empty() {
            runs.push(ContiguousRun { entries: current });
        }
        runs
    }

    fn is_linked(&self, prev: &Residue, next: &Residue) -> bool {
        if !prev.id.is_followed_by(&next.id) {
            return false;
        }
        match self.peptide_bond_cutoff {
            None => true,
            Some(cutoff) => match (prev.position("C"), next.position("N")) {
                (Some(c), Some(n)) => geometry::distance(c, n) <= cutoff,
                _ => false,
            },
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let mut entries = self.iter();
        let Some(mut prev) = entries.next() else {
            return Ok(());
        };
        for entry in entries {
            if entry.residue.id <= prev.residue.id {
                return Err(Error::malformed_chain(
                    &self.chain.structure_id,
                    &self.chain.id,
                    prev.residue.id,
                    entry.residue.id,
                ));
            }
            prev = entry;
        }
        Ok(())
    }
}

/// Maximal gap-free stretch of a [`SequenceView`].
#[derive(Debug, Clone)]
pub struct ContiguousRun<'a> {
    entries: Vec<ViewEntry<'a>>,
}

impl<'a> ContiguousRun<'a> {
    pub fn entries(&self) -> &[ViewEntry<'a>] {
        &self.entries
    }

    pub fn codes(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.code).collect()
    }

    pub fn sequence(&self) -> String {
        self.entries.iter().map(|e| e.code as char).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn residue(&self, index: usize) -> Option<&'a Residue> {
        self.entries.get(index).map(|e| e.residue)
    }
}

fn code_for(residue: &Residue, policy: GapPolicy) -> Option<u8> {
    match residue.kind {
        ResidueKind::AminoAcid(aa) => Some(aa.one_letter() as u8),
        ResidueKind::Water => None,
        ResidueKind::Other => match policy {
            GapPolicy::Permissive if is_polymer_like(residue) => Some(SENTINEL),
            _ => None,
        },
    }
}

/// Non-standard residues only enter the chain sequence when they carry a
/// peptide backbone; ions and ligands never do.
fn is_polymer_like(residue: &Residue) -> bool {
    ["N", "CA", "C"].iter().all(|name| residue.atom(name).is_some())
}
