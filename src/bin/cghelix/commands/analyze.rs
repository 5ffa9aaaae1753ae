use std::io::Write;

use anyhow::{Context, Result, bail};
use nalgebra::Vector3;
use tracing::{debug, info};

use cghelix::io::{Format, read_structure, write_centers, write_table};
use cghelix::{Frame, HelicalAnalysis, Residue, analyze};

use crate::cli::AnalyzeArgs;
use crate::config::build_analysis_config;
use crate::display::{
    Context as DisplayContext, Progress, print_parameter_summary, print_structure_info,
};
use crate::io::{
    OutputKind, OutputSpec, create_output, infer_input_format, open_input, stdin_is_tty,
};
use crate::util::path::prefixed;

const TOTAL_STEPS: u8 = 3;

pub fn run_analyze(args: AnalyzeArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: cghelix analyze -i <INPUT> -o <PREFIX> or pipe data via stdin."
        );
    }

    let input_format = resolve_input_format(&args)?;
    let output_specs = resolve_outputs(&args);
    let config = build_analysis_config(&args.analysis)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let residues = read_residues(&args, input_format)?;
    info!(residues = residues.len(), format = %input_format, "structure read");
    progress.complete_step(
        "Reading structure",
        &[
            format!("Parse {} file", input_format),
            format!("Group beads into {} residues", residues.len()),
        ],
    );

    if ctx.interactive {
        print_structure_info(&residues);
    }

    progress.step("Computing helical parameters");
    let analysis = analyze(&residues, &config).context("Helical analysis failed")?;
    progress.complete_step("Computing helical parameters", &analysis_details(&args, &analysis));

    if ctx.interactive {
        print_parameter_summary("Base-Pair Parameters", &analysis.base_pairs.summary());
        print_parameter_summary("Step Parameters", &analysis.steps.summary());
        print_parameter_summary("Local Helical Parameters", &analysis.local.summary());
    }

    progress.step("Writing output");
    write_outputs(&analysis, &output_specs)?;
    let write_details: Vec<String> = output_specs
        .iter()
        .map(|spec| {
            format!(
                "Write {} → {}",
                spec.kind.label(),
                spec.path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            )
        })
        .collect();
    progress.complete_step("Writing output", &write_details);

    progress.finish();

    Ok(())
}

fn resolve_input_format(args: &AnalyzeArgs) -> Result<Format> {
    if let Some(fmt) = args.input_format {
        return Ok(fmt.into());
    }

    if let Some(path) = &args.io.input {
        if let Some(fmt) = infer_input_format(path) {
            return Ok(fmt);
        }
        bail!(
            "Cannot infer format from '{}'. Use --infmt to specify.",
            path.display()
        );
    }

    bail!("Reading from stdin requires --infmt");
}

fn resolve_outputs(args: &AnalyzeArgs) -> Vec<OutputSpec> {
    let mut kinds = vec![
        OutputKind::BasePairTable,
        OutputKind::StepTable,
        OutputKind::LocalTable,
    ];
    if args.output.centers {
        kinds.extend([
            OutputKind::BaseCenters,
            OutputKind::PairCenters,
            OutputKind::StepCenters,
        ]);
    }

    kinds
        .into_iter()
        .map(|kind| OutputSpec {
            path: prefixed(&args.io.output, kind.suffix()),
            kind,
        })
        .collect()
}

fn read_residues(args: &AnalyzeArgs, format: Format) -> Result<Vec<Residue>> {
    let input = open_input(args.io.input.as_deref())?;
    read_structure(input, format).context("Failed to read structure")
}

fn analysis_details(args: &AnalyzeArgs, analysis: &HelicalAnalysis) -> Vec<String> {
    let worst_fit = analysis.fit_rmsd.iter().copied().fold(0.0, f64::max);

    let mut details = vec![
        format!(
            "Fit {} base frames (max RMSD {:.3} Å)",
            analysis.base_frames.len(),
            worst_fit
        ),
        format!("Build {} base-pair frames", analysis.pair_count()),
        format!("Build {} step frames", analysis.step_count()),
    ];
    if args.analysis.reference.is_some() {
        details.push("Use custom reference geometry".to_string());
    }
    if args.analysis.parallel {
        details.push(format!(
            "Run on {} threads",
            rayon::current_num_threads()
        ));
    }
    details
}

fn origins(frames: &[Frame]) -> Vec<Vector3<f64>> {
    frames.iter().map(|f| f.origin).collect()
}

fn write_outputs(analysis: &HelicalAnalysis, specs: &[OutputSpec]) -> Result<()> {
    use OutputKind::*;

    for spec in specs {
        debug!(path = %spec.path.display(), kind = spec.kind.label(), "writing output");
        let mut writer = create_output(Some(spec.path.as_path()))?;

        let written = match spec.kind {
            BasePairTable => write_table(&mut writer, &analysis.base_pairs),
            StepTable => write_table(&mut writer, &analysis.steps),
            LocalTable => write_table(&mut writer, &analysis.local),
            BaseCenters => write_centers(
                &mut writer,
                "base origins",
                &origins(&analysis.base_frames),
            ),
            PairCenters => write_centers(
                &mut writer,
                "base-pair origins",
                &origins(&analysis.pair_frames),
            ),
            StepCenters => write_centers(
                &mut writer,
                "mid-step origins",
                &origins(&analysis.step_frames),
            ),
        };
        written.with_context(|| format!("Failed to write {}", spec.path.display()))?;

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", spec.path.display()))?;
    }

    Ok(())
}
