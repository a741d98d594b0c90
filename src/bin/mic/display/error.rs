use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_scan_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use motif_ic::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Open { source, .. } => self.collect_std_io_hints(source),

            IoError::Parse { format, .. } => {
                self.add(format!("The file could not be read as {format}"));
                self.add("Check --format matches the files (pdb or cif)");
                self.add("Pass -g/--gzipped for .gz files");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::Decompress { .. } => {
                self.add("The file is not valid gzip data");
                self.add("Drop -g/--gzipped if the files are not compressed");
            }

            IoError::Query { line, .. } => {
                self.add(format!("Check line {line} of the query list"));
                self.add("Each row needs: Protein ID, File Path, Chain");
                self.add("Use --no-query-header if the first row is data");
            }

            IoError::Output(_) => {
                self.add("Results could not be written");
                self.add("Check the output path and available disk space");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::NotADirectory => {
                self.add("STRUCTURE_DIR must be a directory");
            }

            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                self.add("File contains invalid or truncated data");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: motif_ic::io::Format) {
        use motif_ic::io::Format;

        match format {
            Format::Pdb => {
                self.add("PDB: Check ATOM/HETATM record formatting (columns 1-80)");
            }

            Format::Mmcif => {
                self.add("mmCIF: Verify the _atom_site loop structure");
            }
        }
    }

    fn collect_scan_hints(&mut self, err: &Error) {
        use motif_ic::scan::Error as ScanError;

        let Some(scan_err) = err.downcast_ref::<ScanError>() else {
            return;
        };

        self.mark_typed();

        match scan_err {
            ScanError::InvalidMotif { .. } => {
                self.add("Motifs use one-letter amino-acid codes, e.g. TAY");
                self.add("Only ASCII letters are allowed; spaces and digits are rejected");
            }

            ScanError::ModelNotFound { available, .. } => {
                self.add(format!("The structure has {available} model(s)"));
                self.add("Omit --model to scan the first model");
            }

            ScanError::ChainNotFound { .. } => {
                self.add("Check the chain ids in the query list");
                self.add("List chains with `mic seq <FILE>`");
            }

            ScanError::MalformedChain { .. } => {
                self.add("Residue numbering in the chain is out of order");
            }

            ScanError::DegenerateGeometry(_) => {
                self.add("Input may contain overlapping atom coordinates");
            }

            ScanError::Config(_) => {
                self.add("The config file has invalid TOML or an unknown key");
                self.add("Known keys: gap_policy, missing_atom_policy, model, side_chains, peptide_bond_cutoff");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no structure files") {
            self.add("Check STRUCTURE_DIR or provide a query list with -q");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
