//! Result writers: one row per residue per match.

use super::Error;
use crate::scan::internal::ResidueGeometry;
use crate::scan::{Match, ScanReport};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One wide row per residue, comma separated.
    #[default]
    Csv,
    /// Same columns as [`Csv`](OutputFormat::Csv), tab separated.
    Tsv,
    /// One row per coordinate value.
    Long,
    /// The full report, skipped targets included.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Tsv => write!(f, "TSV"),
            OutputFormat::Long => write!(f, "long CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

const LONG_HEADER: [&str; 8] = [
    "Protein",
    "Model",
    "Chain",
    "Position",
    "Residue Name",
    "Coordinate Type",
    "Coordinate ID",
    "Coordinate Value",
];

#[derive(Serialize)]
struct WideRow<'a> {
    protein: &'a str,
    model: usize,
    chain: &'a str,
    match_start: usize,
    match_end: usize,
    matched_sequence: &'a str,
    position: usize,
    residue_number: i32,
    insertion_code: Option<char>,
    residue_name: &'a str,
    residue_code: char,
    n_ca: Option<f64>,
    ca_c: Option<f64>,
    c_o: Option<f64>,
    c_n: Option<f64>,
    n_ca_c: Option<f64>,
    ca_c_o: Option<f64>,
    ca_c_n: Option<f64>,
    c_n_ca: Option<f64>,
    phi: Option<f64>,
    psi: Option<f64>,
    omega: Option<f64>,
    chi1: Option<f64>,
    chi2: Option<f64>,
    chi3: Option<f64>,
    chi4: Option<f64>,
    chi5: Option<f64>,
}

impl<'a> WideRow<'a> {
    fn new(m: &'a Match, g: &'a ResidueGeometry) -> Self {
        let chi = |i: usize| g.chi.get(i).copied().flatten();
        Self {
            protein: &m.structure_id,
            model: m.model,
            chain: &m.chain_id,
            match_start: m.start,
            match_end: m.end,
            matched_sequence: &m.sequence,
            position: g.position,
            residue_number: g.residue_id.serial,
            insertion_code: g.residue_id.insertion_code,
            residue_name: &g.residue_name,
            residue_code: g.code,
            n_ca: g.bonds.n_ca,
            ca_c: g.bonds.ca_c,
            c_o: g.bonds.c_o,
            c_n: g.bonds.c_n,
            n_ca_c: g.angles.n_ca_c,
            ca_c_o: g.angles.ca_c_o,
            ca_c_n: g.angles.ca_c_n,
            c_n_ca: g.angles.c_n_ca,
            phi: g.dihedrals.phi,
            psi: g.dihedrals.psi,
            omega: g.dihedrals.omega,
            chi1: chi(0),
            chi2: chi(1),
            chi3: chi(2),
            chi4: chi(3),
            chi5: chi(4),
        }
    }
}

/// Writes `report` to `writer`. `header` controls the column-name row of the
/// tabular formats.
pub fn write_report<W: Write>(
    report: &ScanReport,
    format: OutputFormat,
    writer: W,
    header: bool,
) -> Result<(), Error> {
    match format {
        OutputFormat::Csv => write_wide(report, writer, b',', header),
        OutputFormat::Tsv => write_wide(report, writer, b'\t', header),
        OutputFormat::Long => write_long(report, writer, header),
        OutputFormat::Json => write_json(report, writer),
    }
}

fn write_wide<W: Write>(
    report: &ScanReport,
    writer: W,
    delimiter: u8,
    header: bool,
) -> Result<(), Error> {
    let mut csv = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(header)
        .from_writer(writer);
    for record in &report.records {
        for residue in &record.geometry.residues {
            csv.serialize(WideRow::new(&record.matched, residue))?;
        }
    }
    csv.flush()?;
    Ok(())
}

fn write_long<W: Write>(report: &ScanReport, writer: W, header: bool) -> Result<(), Error> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    if header {
        csv.write_record(LONG_HEADER)?;
    }
    for record in &report.records {
        let m = &record.matched;
        let model = m.model.to_string();
        for residue in &record.geometry.residues {
            let position = residue.residue_id.to_string();
            for (kind, id, value) in residue.terms() {
                let Some(value) = value else { continue };
                csv.write_record([
                    m.structure_id.as_str(),
                    model.as_str(),
                    m.chain_id.as_str(),
                    position.as_str(),
                    residue.residue_name.as_str(),
                    kind.label(),
                    id,
                    format!("{value:.6}").as_str(),
                ])?;
            }
        }
    }
    csv.flush()?;
    Ok(())
}

fn write_json<W: Write>(report: &ScanReport, mut writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
