use std::io::Write;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use motif_ic::batch::run_batch;
use motif_ic::io::{
    Format, OutputFormat, StructureQuery, StructureReader, directory_queries, read_query_csv,
    write_report,
};
use motif_ic::scan::{Motif, ScanReport};

use crate::cli::ScanArgs;
use crate::config::build_scan_config;
use crate::display::{
    Context as DisplayContext, Progress, ScanBar, ScanSettings, print_run_summary,
    print_scan_settings, print_skipped, skip_summary,
};
use crate::io::{OutputTarget, create_output};
use crate::util::text::plural;

const TOTAL_STEPS: u8 = 3;

pub fn run_scan(args: ScanArgs, ctx: DisplayContext) -> Result<()> {
    let motif = Motif::new(&args.motif)?;
    if !motif.is_upper_case() {
        warn!("motif '{motif}' has lower-case letters; sequences are upper case and will not match");
    }
    let config = build_scan_config(&args.scan)?;
    let format: Format = args.input.format.into();
    let output_format: OutputFormat = args.output.outfmt.into();
    let jobs = args.jobs.max(1);

    let reader = StructureReader::new(format)
        .gzipped(args.input.gzipped)
        .base_dir(&args.structure_dir);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Collecting structures");
    let queries = collect_queries(&args)?;
    if queries.is_empty() {
        bail!(
            "No structure files to scan in {}",
            args.structure_dir.display()
        );
    }
    let source = match &args.query_list {
        Some(path) => format!("query list {}", path.display()),
        None => format!("directory {}", args.structure_dir.display()),
    };
    let collect_substeps = [
        format!("{} from {source}", plural(queries.len(), "structure", "structures")),
        format!(
            "{format}{}",
            if args.input.gzipped { ", gzip-compressed" } else { "" }
        ),
    ];
    progress.complete_step("Collecting structures", &as_strs(&collect_substeps));

    if ctx.interactive {
        print_scan_settings(&ScanSettings {
            motif: motif.as_str(),
            source,
            structures: queries.len(),
            config: &config,
            jobs,
        });
    }

    progress.step("Scanning structures");
    progress.suspend();
    let bar = ScanBar::new(progress.is_interactive(), queries.len());
    let report = run_batch(&queries, &reader, &motif, &config, jobs, |query, _| {
        bar.advance(&query.protein_id);
    });
    bar.finish();
    info!(
        "scanned {} structures, {} chains: {} matches",
        report.structures_scanned,
        report.chains_scanned,
        report.match_count()
    );
    let scan_substeps = [
        plural(report.match_count(), "match", "matches"),
        format!(
            "{} skipped",
            plural(report.skipped.len(), "target", "targets")
        ),
    ];
    progress.complete_step("Scanning structures", &as_strs(&scan_substeps));

    if ctx.interactive {
        print_run_summary(&report);
        print_skipped(&report);
    } else if let Some(line) = skip_summary(&report) {
        warn!("{line}");
    }

    progress.step("Writing output");
    write_output(&report, &args, output_format)?;
    let write_substeps = [format!(
        "{output_format} to {}",
        OutputTarget::describe(args.output.output.as_deref())
    )];
    progress.complete_step("Writing output", &as_strs(&write_substeps));

    progress.finish();

    Ok(())
}

fn collect_queries(args: &ScanArgs) -> Result<Vec<StructureQuery>> {
    match &args.query_list {
        Some(path) => read_query_csv(path, !args.no_query_header)
            .with_context(|| format!("Failed to read query list: {}", path.display())),
        None => directory_queries(&args.structure_dir).with_context(|| {
            format!(
                "Failed to list structure directory: {}",
                args.structure_dir.display()
            )
        }),
    }
}

fn write_output(report: &ScanReport, args: &ScanArgs, format: OutputFormat) -> Result<()> {
    let mut out = create_output(args.output.output.as_deref())?;
    write_report(report, format, &mut out, !args.output.no_header)
        .context("Failed to write results")?;
    out.flush().context("Failed to write results")?;
    Ok(())
}

fn as_strs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}
