mod config;
mod error;
pub mod geometry;
pub mod internal;
pub mod matcher;
pub mod record;
pub mod sequence;

pub use config::{GapPolicy, MissingAtomPolicy, ScanConfig};
pub use error::Error;
pub use internal::{InternalCoordinateSet, ResidueGeometry, SideChainTerm};
pub use matcher::Motif;
pub use record::{Match, MatchRecord, ScanReport, SkippedTarget};
pub use sequence::SequenceView;

use crate::model::structure::{Chain, Model, Structure};
use log::debug;

/// Locates every occurrence of `motif` in one chain of the designated model and
/// extracts the geometry of each matched window.
///
/// Results come in ascending start position. Failures are scoped to this
/// (structure, chain) pair.
pub fn scan(
    structure: &Structure,
    chain_id: &str,
    motif: &Motif,
    config: &ScanConfig,
) -> Result<Vec<(Match, InternalCoordinateSet)>, Error> {
    let model = select_model(structure, config)?;
    let chain = model
        .chain(chain_id)
        .ok_or_else(|| Error::chain_not_found(&structure.id, chain_id))?;
    scan_chain(chain, model.serial, motif, config)
}

/// Returns the model `config` designates: the configured serial, or the first.
pub fn select_model<'s>(
    structure: &'s Structure,
    config: &ScanConfig,
) -> Result<&'s Model, Error> {
    structure.model(config.model).ok_or_else(|| {
        Error::model_not_found(&structure.id, config.model, structure.model_count())
    })
}

pub fn scan_chain(
    chain: &Chain,
    model: usize,
    motif: &Motif,
    config: &ScanConfig,
) -> Result<Vec<(Match, InternalCoordinateSet)>, Error> {
    let view = SequenceView::new(chain, config.gap_policy)?
        .with_peptide_bond_cutoff(config.peptide_bond_cutoff);
    let width = motif.len();

    let mut hits = Vec::new();
    for run in view.runs() {
        let codes = run.codes();
        for start in matcher::find_in_run(&codes, motif) {
            let end = start + width - 1;
            let (first, last) = (&run.entries()[start], &run.entries()[end]);
            let matched = Match {
                structure_id: chain.structure_id.clone(),
                model,
                chain_id: chain.id.clone(),
                start: first.position,
                end: last.position,
                first_residue: first.residue.id,
                last_residue: last.residue.id,
                sequence: String::from_utf8_lossy(&codes[start..=end]).into_owned(),
            };
            let geometry = internal::extract(&run, start..end + 1, config.side_chains);
            hits.push((matched, geometry));
        }
    }

    debug!(
        "{} chain {}: {} match(es) for {}",
        chain.structure_id,
        chain.id,
        hits.len(),
        motif
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::residue::Residue;
    use crate::model::types::AminoAcid;

    const SERIALS_1_TO_8: [i32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    /// Backbone wound on a helix so every term is well defined.
    fn chain_from(structure_id: &str, chain_id: &str, serials: &[i32], seq: &str) -> Chain {
        let residues = serials.iter().zip(seq.chars()).map(|(&serial, code)| {
            let name = AminoAcid::from_one_letter(code)
                .map(|aa| aa.three_letter())
                .unwrap_or("MSE");
            let t = serial as f64;
            let helix = |radius: f64, phase: f64, rise: f64| {
                let angle = t * 1.745 + phase;
                [radius * angle.cos(), radius * angle.sin(), 1.5 * t + rise]
            };
            Residue::new(serial, name)
                .with_atom("N", helix(2.0, 0.0, 0.0))
                .with_atom("CA", helix(2.3, 0.5, 0.5))
                .with_atom("C", helix(1.9, 1.0, 1.0))
                .with_atom("O", helix(2.8, 1.1, 1.2))
        });
        Chain::new(chain_id, structure_id).with_residues(residues.collect::<Vec<_>>())
    }

    fn structure_with(chains: Vec<Chain>) -> Structure {
        let mut structure = Structure::new("1ABC", "1abc.pdb");
        let mut model = Model::new(1);
        for chain in chains {
            model.add_chain(chain);
        }
        structure.add_model(model);
        structure
    }

    #[test]
    fn end_to_end_single_match() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &SERIALS_1_TO_8, "MKTAYIAK")]);
        let motif = Motif::new("TAY").unwrap();
        let hits = scan(&structure, "A", &motif, &ScanConfig::default()).unwrap();

        assert_eq!(hits.len(), 1);
        let (m, geometry) = &hits[0];
        assert_eq!(m.structure_id, "1ABC");
        assert_eq!(m.chain_id, "A");
        assert_eq!(m.model, 1);
        assert_eq!((m.start, m.end), (2, 4));
        assert_eq!(m.sequence, "TAY");
        assert_eq!(m.first_residue.serial, 3);
        assert_eq!(m.last_residue.serial, 5);

        assert_eq!(geometry.len(), 3);
        let positions: Vec<usize> = geometry.residues.iter().map(|g| g.position).collect();
        assert_eq!(positions, vec![2, 3, 4]);
        for g in &geometry.residues {
            assert!(g.dihedrals.phi.is_some());
            assert!(g.dihedrals.psi.is_some());
            assert!(g.dihedrals.omega.is_some());
        }
    }

    #[test]
    fn match_at_chain_start_has_undefined_phi() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &SERIALS_1_TO_8, "MKTAYIAK")]);
        let motif = Motif::new("MKT").unwrap();
        let hits = scan(&structure, "A", &motif, &ScanConfig::default()).unwrap();
        let first = &hits[0].1.residues[0];
        assert!(first.dihedrals.phi.is_none());
        assert!(first.dihedrals.omega.is_none());
        assert!(first.dihedrals.psi.is_some());
    }

    #[test]
    fn gap_breaks_motif_contiguity() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 2, 3, 6, 7, 8], "ACDACD")]);
        let motif = Motif::new("DA").unwrap();
        let hits = scan(&structure, "A", &motif, &ScanConfig::default()).unwrap();
        assert!(hits.is_empty());

        let motif = Motif::new("CD").unwrap();
        let hits = scan(&structure, "A", &motif, &ScanConfig::default()).unwrap();
        let starts: Vec<usize> = hits.iter().map(|(m, _)| m.start).collect();
        assert_eq!(starts, vec![1, 4]);
        // neighbours across the gap are absent
        assert!(hits[0].1.residues[1].dihedrals.psi.is_none());
        assert!(hits[1].1.residues[0].dihedrals.phi.is_some());
    }

    #[test]
    fn overlapping_windows_each_get_geometry() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 2, 3, 4], "AAAA")]);
        let motif = Motif::new("AA").unwrap();
        let hits = scan(&structure, "A", &motif, &ScanConfig::default()).unwrap();
        let starts: Vec<usize> = hits.iter().map(|(m, _)| m.start).collect();
        assert_eq!(starts, vec![0, 1, 2]);
        assert!(hits.iter().all(|(_, g)| g.len() == 2));
    }

    #[test]
    fn permissive_sentinel_blocks_match_but_strict_splits_run() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 2, 3, 4, 5], "GAXAG")]);
        let strict = ScanConfig::default();
        let permissive = ScanConfig::default().with_gap_policy(GapPolicy::Permissive);

        let motif = Motif::new("AXA").unwrap();
        assert!(scan(&structure, "A", &motif, &permissive).unwrap().is_empty());
        assert!(scan(&structure, "A", &motif, &strict).unwrap().is_empty());

        let motif = Motif::new("GA").unwrap();
        let hits = scan(&structure, "A", &motif, &permissive).unwrap();
        assert_eq!(hits.len(), 1);
        let g = &hits[0].1.residues[1];
        assert!(g.dihedrals.psi.is_some());

        let hits = scan(&structure, "A", &motif, &strict).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].1.residues[1].dihedrals.psi.is_none());
    }

    #[test]
    fn scanning_twice_is_identical() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &SERIALS_1_TO_8, "MKTAYIAK")]);
        let motif = Motif::new("AK").unwrap();
        let config = ScanConfig::default().with_side_chains(true);
        let first = scan(&structure, "A", &motif, &config).unwrap();
        let second = scan(&structure, "A", &motif, &config).unwrap();
        assert_eq!(first, second);
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_chain_and_model_are_errors() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 2], "MK")]);
        let motif = Motif::new("MK").unwrap();
        assert!(matches!(
            scan(&structure, "B", &motif, &ScanConfig::default()),
            Err(Error::ChainNotFound { .. })
        ));
        assert!(matches!(
            scan(&structure, "A", &motif, &ScanConfig::default().with_model(2)),
            Err(Error::ModelNotFound { model: Some(2), available: 1, .. })
        ));
    }

    #[test]
    fn malformed_chain_is_reported() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 3, 2], "MKT")]);
        let motif = Motif::new("MK").unwrap();
        assert!(matches!(
            scan(&structure, "A", &motif, &ScanConfig::default()),
            Err(Error::MalformedChain { .. })
        ));
    }

    #[test]
    fn motif_longer_than_every_run_is_empty() {
        let structure = structure_with(vec![chain_from("1ABC", "A", &[1, 2, 5, 6], "MKTA")]);
        let motif = Motif::new("MKT").unwrap();
        assert!(scan(&structure, "A", &motif, &ScanConfig::default()).unwrap().is_empty());
    }
}
