use std::fs;

use anyhow::{Context, Result};

use motif_ic::scan::ScanConfig;

use crate::cli::ScanOptions;

/// Builds the engine configuration: the TOML file if given, then command-line
/// overrides on top.
pub fn build_scan_config(opts: &ScanOptions) -> Result<ScanConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            ScanConfig::from_toml_str(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => ScanConfig::default(),
    };

    if let Some(policy) = opts.gap_policy {
        config = config.with_gap_policy(policy.into());
    }
    if let Some(serial) = opts.model {
        config = config.with_model(serial);
    }
    if opts.side_chains {
        config = config.with_side_chains(true);
    }
    if let Some(cutoff) = opts.peptide_bond_cutoff {
        anyhow::ensure!(
            cutoff.is_finite() && cutoff > 0.0,
            "Peptide bond cutoff must be a positive distance, got {cutoff}"
        );
        config = config.with_peptide_bond_cutoff(cutoff);
    }

    Ok(config)
}
