//! Error types for motif scanning.
//!
//! Every variant describes a failure scoped to a single (structure, chain)
//! pair or a single geometric term; batch drivers turn them into skip records
//! instead of aborting the run.

use crate::model::residue::ResidueId;
use thiserror::Error;

/// Errors that can occur while scanning a chain for a motif.
#[derive(Debug, Error)]
pub enum Error {
    /// The motif is empty or contains characters other than ASCII letters.
    #[error("invalid motif '{motif}': {detail}")]
    InvalidMotif {
        /// The rejected motif text.
        motif: String,
        /// Why it was rejected.
        detail: String,
    },

    /// The requested chain is not present in the designated model.
    #[error("chain '{chain_id}' not found in structure '{structure_id}'")]
    ChainNotFound {
        structure_id: String,
        chain_id: String,
    },

    /// The designated model is not present in the structure.
    ///
    /// `model` is `None` when the first model was requested from a structure
    /// that has none.
    #[error(
        "model {} not found in structure '{structure_id}' ({available} model(s) present)",
        model_label(.model)
    )]
    ModelNotFound {
        structure_id: String,
        model: Option<usize>,
        available: usize,
    },

    /// Residue numbering in a chain is not strictly increasing.
    ///
    /// Aborts scanning of that chain only.
    #[error(
        "malformed chain '{chain_id}' in '{structure_id}': residue {current} follows {previous}"
    )]
    MalformedChain {
        structure_id: String,
        chain_id: String,
        previous: ResidueId,
        current: ResidueId,
    },

    /// A bond vector needed for an angle or dihedral has near-zero length.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Failed to parse a scan configuration file.
    #[error("invalid scan configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Creates an [`InvalidMotif`](Error::InvalidMotif) error.
    pub fn invalid_motif(motif: &str, details: impl Into<String>) -> Self {
        Self::InvalidMotif {
            motif: motif.to_string(),
            detail: details.into(),
        }
    }

    /// Creates a [`ChainNotFound`](Error::ChainNotFound) error.
    pub fn chain_not_found(structure_id: &str, chain_id: &str) -> Self {
        Self::ChainNotFound {
            structure_id: structure_id.to_string(),
            chain_id: chain_id.to_string(),
        }
    }

    pub fn model_not_found(structure_id: &str, model: Option<usize>, available: usize) -> Self {
        Self::ModelNotFound {
            structure_id: structure_id.to_string(),
            model,
            available,
        }
    }

    /// Creates a [`MalformedChain`](Error::MalformedChain) error.
    ///
    /// # Arguments
    ///
    /// * `structure_id` - Identifier of the owning structure
    /// * `chain_id` - Chain identifier
    /// * `previous` - Last accepted residue id
    /// * `current` - Residue id that broke the ordering
    pub fn malformed_chain(
        structure_id: &str,
        chain_id: &str,
        previous: ResidueId,
        current: ResidueId,
    ) -> Self {
        Self::MalformedChain {
            structure_id: structure_id.to_string(),
            chain_id: chain_id.to_string(),
            previous,
            current,
        }
    }

    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::DegenerateGeometry(details.into())
    }
}

fn model_label(model: &Option<usize>) -> String {
    match model {
        Some(serial) => serial.to_string(),
        None => "(first)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_chain_message_names_both_residues() {
        let err = Error::malformed_chain(
            "1ABC",
            "A",
            ResidueId::new(10, Some('B')),
            ResidueId::from(9),
        );
        assert_eq!(
            err.to_string(),
            "malformed chain 'A' in '1ABC': residue 9 follows 10B"
        );
    }

    #[test]
    fn chain_not_found_message() {
        let err = Error::chain_not_found("1ABC", "Z");
        assert_eq!(err.to_string(), "chain 'Z' not found in structure '1ABC'");
    }

    #[test]
    fn model_not_found_labels_default_model() {
        assert_eq!(
            Error::model_not_found("1ABC", Some(3), 1).to_string(),
            "model 3 not found in structure '1ABC' (1 model(s) present)"
        );
        assert_eq!(
            Error::model_not_found("1ABC", None, 0).to_string(),
            "model (first) not found in structure '1ABC' (0 model(s) present)"
        );
    }

    #[test]
    fn config_error_wraps_toml() {
        let toml_err = toml::from_str::<toml::Table>("gap_policy = ").unwrap_err();
        let err: Error = toml_err.into();
        assert!(err.to_string().starts_with("invalid scan configuration:"));
    }
}
