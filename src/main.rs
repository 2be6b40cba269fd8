mod config;
mod convert;
mod error;
mod logging;
mod word2vec;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::convert::{ConversionReport, HeaderDims};
use crate::error::ConvertError;
use crate::logging::LoggingConfig;
use crate::word2vec::Word2VecModel;

const ABOUT: &str = "Convert GloVe vectors in text format into the word2vec text format.\n\n\
The only difference between the two formats is an extra header line in word2vec,\n\
which contains the number of vectors and their dimensionality (two integers).";

#[derive(Parser, Debug)]
#[command(name = "glove2w2v", version, about = ABOUT)]
struct Cli {
    /// Input file, in GloVe format (read-only).
    #[arg(short, long)]
    input: PathBuf,

    /// Output file, in word2vec text format (will be overwritten!).
    #[arg(short, long)]
    output: PathBuf,

    /// Write the historical fixed header width (50) instead of the detected dimensionality.
    #[arg(long)]
    legacy_header: bool,

    /// Load the converted file and run a couple of similarity queries.
    #[arg(long)]
    check: bool,

    /// Print a JSON conversion report on stdout.
    #[arg(long)]
    json: bool,

    /// Log level spec (e.g. "info", "debug").
    #[arg(long, default_value = config::logging::DEFAULT_LEVEL)]
    log_level: String,

    /// Also write rotating log files into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() {
    // Paths need not be UTF-8; only display them lossily.
    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let program = args
        .first()
        .and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "glove2w2v".to_string());

    if args.len() < 2 {
        println!("USAGE: {program} --input <GloVe vector file> --output <Word2vec vector file>\n\n{ABOUT}");
        std::process::exit(1);
    }

    let cli = Cli::parse();
    let log_cfg = LoggingConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    };
    let logger = match logging::init_logging(&log_cfg) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("[glove2w2v] fatal error: {e:?}");
            std::process::exit(1);
        }
    };

    log::info!("running {}", args.join(" "));
    let code = match real_main(&cli) {
        Ok(()) => {
            log::info!("finished running {}", program);
            0
        }
        Err(e) => {
            eprintln!("[glove2w2v] fatal error: {e:?}");
            log::error!("Fatal error: {:?}", e);
            1
        }
    };

    // Flush file logs before exiting.
    drop(logger);
    std::process::exit(code);
}

fn real_main(cli: &Cli) -> anyhow::Result<()> {
    let header_dims = if cli.legacy_header {
        HeaderDims::legacy()
    } else {
        HeaderDims::Computed
    };

    let info = convert::convert(&cli.input, &cli.output, header_dims)
        .with_context(|| format!("converting {} to {}", cli.input.display(), cli.output.display()))?;
    log::info!(
        "converted model with {} vectors and {} dimensions",
        info.vectors,
        info.dimensions
    );

    if cli.check {
        run_check(&cli.output)?;
    }

    if cli.json {
        let report = ConversionReport::new(&cli.input, &cli.output, &info, header_dims);
        println!("{}", serde_json::to_string(&report).context("failed serializing report")?);
    }

    Ok(())
}

/// Load the converted file and log a nearest-neighbour and a pairwise query.
/// Query words missing from the vocabulary are only warned about.
fn run_check(path: &Path) -> anyhow::Result<()> {
    let model = Word2VecModel::load(path).context("converted model failed to load")?;
    log::info!("model {} successfully loaded", model);
    if model.is_empty() {
        log::warn!("Converted model has no vectors, skipping queries");
        return Ok(());
    }
    log::info!("testing the model....");

    let word = config::check::NEIGHBOR_WORD;
    let topn = config::check::NEIGHBOR_TOPN;
    match model.most_similar(&[word], topn) {
        Ok(top) => log::info!("top-{} most similar words to {:?}: {:?}", topn, word, top),
        Err(ConvertError::UnknownWord(w)) => log::warn!("Skipping neighbour query, {:?} not in vocabulary", w),
        Err(e) => return Err(e.into()),
    }

    let (a, b) = config::check::PAIR;
    match model.similarity(a, b) {
        Ok(score) => log::info!("similarity score between {:?} and {:?}: {}", a, b, score),
        Err(ConvertError::UnknownWord(w)) => log::warn!("Skipping similarity query, {:?} not in vocabulary", w),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
