use super::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How residues outside the twenty canonical amino acids enter the sequence view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Non-standard residues are dropped and break any window spanning them.
    #[default]
    Strict,
    /// Non-standard residues stay in the view as the sentinel `X`.
    Permissive,
}

impl fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapPolicy::Strict => write!(f, "strict"),
            GapPolicy::Permissive => write!(f, "permissive"),
        }
    }
}

/// Treatment of quantities whose atoms are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingAtomPolicy {
    #[default]
    PropagateUndefined,
}

impl fmt::Display for MissingAtomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingAtomPolicy::PropagateUndefined => write!(f, "propagate-undefined"),
        }
    }
}

/// Engine configuration threaded through every scan call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub gap_policy: GapPolicy,
    pub missing_atom_policy: MissingAtomPolicy,
    /// Model serial to scan; `None` selects the first model.
    pub model: Option<usize>,
    /// Also extract side-chain geometry, chi torsions included.
    pub side_chains: bool,
    /// Maximum C(i)–N(i+1) distance in Å for two residues to count as bonded.
    /// Unset by default, so chain breaks come from residue numbering alone;
    /// 1.8 is the usual covalent cutoff when distance checks are wanted.
    pub peptide_bond_cutoff: Option<f64>,
}

impl ScanConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    pub fn with_model(mut self, serial: usize) -> Self {
        self.model = Some(serial);
        self
    }

    pub fn with_side_chains(mut self, enabled: bool) -> Self {
        self.side_chains = enabled;
        self
    }

    pub fn with_peptide_bond_cutoff(mut self, cutoff: f64) -> Self {
        self.peptide_bond_cutoff = Some(cutoff);
        self
    }
}
