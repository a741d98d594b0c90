//! Multi-structure driver.
//!
//! Each (structure, chain) pair is scanned independently. Structures are
//! distributed over a bounded worker pool when more than one job is requested,
//! and per-structure reports are merged back in query order, so the final
//! report is identical regardless of the number of workers.

use crate::io::{ChainSelection, StructureQuery, StructureReader};
use crate::model::structure::Structure;
use crate::scan::{self, Motif, ScanConfig, ScanReport};
use log::{debug, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

/// Scans every query and merges the results in query order.
///
/// `on_done` is called once per query as soon as it finishes, possibly from a
/// worker thread.
pub fn run_batch<F>(
    queries: &[StructureQuery],
    reader: &StructureReader,
    motif: &Motif,
    config: &ScanConfig,
    jobs: usize,
    on_done: F,
) -> ScanReport
where
    F: Fn(&StructureQuery, &ScanReport) + Sync,
{
    let scan_one = |query: &StructureQuery| {
        let report = scan_query(query, reader, motif, config);
        on_done(query, &report);
        report
    };

    if jobs <= 1 || queries.len() <= 1 {
        return queries.iter().map(&scan_one).collect();
    }

    match ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => {
            debug!("scanning {} structures on {} workers", queries.len(), jobs);
            let reports: Vec<ScanReport> =
                pool.install(|| queries.par_iter().map(&scan_one).collect());
            reports.into_iter().collect()
        }
        Err(e) => {
            warn!("cannot start worker pool ({e}); scanning sequentially");
            queries.iter().map(&scan_one).collect()
        }
    }
}

/// Loads and scans one query. A load failure becomes a structure skip.
pub fn scan_query(
    query: &StructureQuery,
    reader: &StructureReader,
    motif: &Motif,
    config: &ScanConfig,
) -> ScanReport {
    match reader.load(&query.protein_id, &query.path) {
        Ok(structure) => scan_structure(&structure, &query.chains, motif, config),
        Err(e) => {
            warn!("skipping {}: {e}", query.protein_id);
            let mut report = ScanReport::new();
            report.skip_structure(&query.protein_id, e);
            report
        }
    }
}

/// Scans the selected chains of the designated model.
///
/// A missing model skips the structure; a missing or malformed chain skips only
/// that chain.
pub fn scan_structure(
    structure: &Structure,
    chains: &ChainSelection,
    motif: &Motif,
    config: &ScanConfig,
) -> ScanReport {
    let mut report = ScanReport::new();
    let model = match scan::select_model(structure, config) {
        Ok(model) => model,
        Err(e) => {
            warn!("skipping {}: {e}", structure.id);
            report.skip_structure(&structure.id, e);
            return report;
        }
    };
    report.structures_scanned = 1;

    let chain_ids: Vec<&str> = match chains {
        ChainSelection::All => model.chain_ids(),
        ChainSelection::Only(ids) => ids.iter().map(String::as_str).collect(),
    };

    for chain_id in chain_ids {
        let result = model
            .chain(chain_id)
            .ok_or_else(|| scan::Error::chain_not_found(&structure.id, chain_id))
            .and_then(|chain| scan::scan_chain(chain, model.serial, motif, config));
        match result {
            Ok(hits) => report.push_chain(hits),
            Err(e) => {
                warn!("skipping {} chain {}: {e}", structure.id, chain_id);
                report.skip_chain(&structure.id, chain_id, e);
            }
        }
    }
    report
}
