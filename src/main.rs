use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use spyder::{io, score_batch, RegionFilter, TurnList};

/// Compute Diarization Error Rate between a reference and hypothesis RTTM.
#[derive(Parser)]
#[command(name = "spyder")]
#[command(author, version, about = "Diarization Error Rate scorer", long_about = None)]
struct Cli {
    /// Reference RTTM file
    ref_rttm: PathBuf,

    /// Hypothesis RTTM file
    hyp_rttm: PathBuf,

    /// UEM file restricting the scoring domain
    #[arg(short, long)]
    uem: Option<PathBuf>,

    /// Print a row for every recording, not just the Overall row
    #[arg(short = 'p', long = "per-file")]
    per_file: bool,

    /// Skip recordings missing from the hypothesis set instead of scoring them as total miss
    #[arg(short = 's', long = "skip-missing")]
    skip_missing: bool,

    /// Region class to score
    #[arg(short, long, default_value = "all")]
    regions: String,

    /// Collar size in seconds
    #[arg(short, long, default_value_t = 0.0)]
    collar: f64,

    /// Print the resolved reference/hypothesis speaker map for every recording
    #[arg(short = 'm', long = "print-speaker-map")]
    print_speaker_map: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let regions: RegionFilter = cli
        .regions
        .parse()
        .map_err(|e: spyder::DerError| anyhow::anyhow!(e))?;

    info!("Loading reference RTTM from {:?}", cli.ref_rttm);
    let ref_turns = io::parse_rttm_file(&cli.ref_rttm).context("failed to parse reference RTTM")?;

    info!("Loading hypothesis RTTM from {:?}", cli.hyp_rttm);
    let hyp_turns = io::parse_rttm_file(&cli.hyp_rttm).context("failed to parse hypothesis RTTM")?;

    let uem_turns: Option<BTreeMap<String, TurnList>> = match &cli.uem {
        Some(path) => {
            info!("Loading UEM from {:?}", path);
            Some(io::parse_uem_file(path).context("failed to parse UEM file")?)
        }
        None => None,
    };

    let metrics = score_batch(
        ref_turns,
        hyp_turns,
        uem_turns,
        regions,
        cli.collar,
        cli.skip_missing,
    )?;

    info!("Evaluated {} recordings on `{}` regions.", metrics.len() - 1, cli.regions);

    if cli.print_speaker_map {
        print!("{}", io::render_speaker_maps(&metrics));
    }
    println!("{}", io::render_table(&metrics, cli.per_file));

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
