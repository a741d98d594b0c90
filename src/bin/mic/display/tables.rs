use std::io::{self, Write};

use motif_ic::scan::{ScanConfig, ScanReport};

use crate::util::text::{plural, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Listed rows of the skipped-target table before it is elided.
const MAX_SKIPPED_ROWS: usize = 15;

pub struct ScanSettings<'a> {
    pub motif: &'a str,
    pub source: String,
    pub structures: usize,
    pub config: &'a ScanConfig,
    pub jobs: usize,
}

pub fn print_scan_settings(settings: &ScanSettings<'_>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let config = settings.config;
    let mut rows = vec![
        ("Motif", settings.motif.to_string()),
        ("Source", settings.source.clone()),
        ("Structures", settings.structures.to_string()),
        ("Gap Policy", config.gap_policy.to_string()),
        (
            "Model",
            config
                .model
                .map_or_else(|| "first".to_string(), |m| m.to_string()),
        ),
        (
            "Side Chains",
            if config.side_chains { "bonds, angles, chi1-chi5" } else { "off" }.to_string(),
        ),
    ];
    if let Some(cutoff) = config.peptide_bond_cutoff {
        rows.push(("C-N Cutoff (Å)", format!("{cutoff:.2}")));
    }
    rows.push(("Workers", settings.jobs.to_string()));

    print_kv_table(&mut out, "Scan Settings", &rows);
}

/// Skipped whole structures and skipped single chains.
fn skipped_counts(report: &ScanReport) -> (usize, usize) {
    let structures = report
        .skipped
        .iter()
        .filter(|s| s.chain_id.is_none())
        .count();
    (structures, report.skipped.len() - structures)
}

/// One-line skip count for runs without the summary tables.
pub fn skip_summary(report: &ScanReport) -> Option<String> {
    if report.skipped.is_empty() {
        return None;
    }
    let (structures, chains) = skipped_counts(report);
    Some(format!(
        "skipped {} and {} (use --outfmt json to list them)",
        plural(structures, "structure", "structures"),
        plural(chains, "chain", "chains"),
    ))
}

pub fn print_run_summary(report: &ScanReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let (skipped_structures, skipped_chains) = skipped_counts(report);

    let rows = vec![
        ("Structures", report.structures_scanned.to_string()),
        ("Chains", report.chains_scanned.to_string()),
        ("Matches", report.match_count().to_string()),
        ("Residue Rows", report.residue_count().to_string()),
        ("Skipped Files", skipped_structures.to_string()),
        ("Skipped Chains", skipped_chains.to_string()),
    ];

    print_kv_table(&mut out, "Scan Summary", &rows);
}

pub fn print_skipped(report: &ScanReport) {
    if report.skipped.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let id_w = 10usize;
    let chain_w = 5usize;
    let sep_overhead = 8;
    let reason_w = SAFE_TABLE_WIDTH.saturating_sub(id_w + chain_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Skipped Targets ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{i_line}┬{c_line}┬{r_line}┐",
        INDENT,
        i_line = "─".repeat(id_w + 2),
        c_line = "─".repeat(chain_w + 2),
        r_line = "─".repeat(reason_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<id_w$} │ {:<chain_w$} │ {:<reason_w$} │",
        INDENT, "Protein", "Chain", "Reason",
    );
    let _ = writeln!(
        out,
        "{}├{i_line}┼{c_line}┼{r_line}┤",
        INDENT,
        i_line = "─".repeat(id_w + 2),
        c_line = "─".repeat(chain_w + 2),
        r_line = "─".repeat(reason_w + 2)
    );

    for skipped in report.skipped.iter().take(MAX_SKIPPED_ROWS) {
        let _ = writeln!(
            out,
            "{}│ {:<id_w$} │ {:<chain_w$} │ {:<reason_w$} │",
            INDENT,
            truncate(&skipped.protein_id, id_w),
            truncate(skipped.chain_id.as_deref().unwrap_or("*"), chain_w),
            truncate(&skipped.reason, reason_w),
        );
    }

    if report.skipped.len() > MAX_SKIPPED_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<id_w$} │ {:<chain_w$} │ {:<reason_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more)", report.skipped.len() - MAX_SKIPPED_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{i_line}┴{c_line}┴{r_line}┘",
        INDENT,
        i_line = "─".repeat(id_w + 2),
        c_line = "─".repeat(chain_w + 2),
        r_line = "─".repeat(reason_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
