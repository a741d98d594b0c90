use std::io::Write;

use anyhow::{Context, Result};
use log::warn;

use motif_ic::io::load_structure;
use motif_ic::scan::{self, SequenceView};

use crate::cli::SeqArgs;
use crate::config::build_scan_config;
use crate::io::create_output;
use crate::util::text::fasta_lines;

const FASTA_WIDTH: usize = 60;

/// Prints one FASTA record per contiguous run of each chain in the designated
/// model, exactly as the matcher sees it.
pub fn run_seq(args: SeqArgs) -> Result<()> {
    let config = build_scan_config(&args.scan)?;
    let structure = load_structure(&args.file, args.input.format.into(), args.input.gzipped)
        .with_context(|| format!("Failed to load structure: {}", args.file.display()))?;
    let model = scan::select_model(&structure, &config)?;

    let mut out = create_output(args.output.as_deref())?;
    for chain in model.chains() {
        let view = match SequenceView::new(chain, config.gap_policy) {
            Ok(view) => view.with_peptide_bond_cutoff(config.peptide_bond_cutoff),
            Err(e) => {
                warn!("skipping chain {}: {e}", chain.id);
                continue;
            }
        };

        for (index, run) in view.runs().iter().enumerate() {
            let (Some(first), Some(last)) = (run.entries().first(), run.entries().last()) else {
                continue;
            };
            writeln!(
                out,
                ">{}_{}_{} model={} residues={}-{} positions={}-{}",
                structure.id,
                chain.id,
                index + 1,
                model.serial,
                first.residue.id,
                last.residue.id,
                first.position,
                last.position,
            )?;
            for line in fasta_lines(&run.sequence(), FASTA_WIDTH) {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
