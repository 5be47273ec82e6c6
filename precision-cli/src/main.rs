use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dwt_precision::array::write_array;
use dwt_precision::reference::{self, Dim};
use dwt_precision::transform::default_output_dir;
use dwt_precision::{backend, compare, generate};
use dwt_precision::{Algorithm, ComparisonPair, Config, Precision, TransformRunner, Wavelet};

/// Precision experiments for single-level wavelet transforms.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Experiment configuration
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one random signal per configured input
    Generate {
        #[arg(long, default_value = "data/input")]
        output: PathBuf,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Transform every (wavelet, input) pair at one precision
    Transform {
        #[arg(long, default_value = "data/input")]
        input: PathBuf,
        /// Defaults to data/output-<precision>, or data/output-reference for f64
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = Precision::F64)]
        precision: Precision,
        #[arg(long, default_value_t = Algorithm::Convolution)]
        algorithm: Algorithm,
    },
    /// Compare coefficient directories and print error statistics
    Compare {
        /// CMP=REF directory pair; repeatable
        #[arg(long = "pair", value_parser = parse_pair)]
        pairs: Vec<ComparisonPair>,
        /// Exit with an error if any unit failed
        #[arg(long)]
        strict: bool,
    },
    /// Write packed seeded f32 reference coefficients
    Reference {
        #[arg(long)]
        wavelet: Wavelet,
        /// batch,channels,height,width
        #[arg(long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,
        /// 1d or 2d
        #[arg(long)]
        dim: Dim,
        #[arg(long, default_value_t = reference::DEFAULT_SEED)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

fn parse_pair(s: &str) -> Result<ComparisonPair, String> {
    match s.split_once('=') {
        Some((cmp, reference)) if !cmp.is_empty() && !reference.is_empty() => {
            Ok(ComparisonPair::new(cmp, reference))
        }
        _ => Err(format!("expected CMP=REF, got `{s}`")),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(&cli.config).with_context(|| format!("loading {}", cli.config.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Generate { output, seed } => {
            let config = load_config(&cli)?;
            generate::generate_signals(&config.inputs, output, *seed)
                .with_context(|| format!("generating signals into {}", output.display()))?;
        }
        Commands::Transform {
            input,
            output,
            precision,
            algorithm,
        } => {
            let config = load_config(&cli)?;
            let output = output
                .clone()
                .unwrap_or_else(|| default_output_dir(*algorithm, *precision));
            let b = backend(*algorithm, *precision);
            TransformRunner::new(b.as_ref(), input, &output)
                .run(&config)
                .with_context(|| format!("{} transform into {}", b.label(), output.display()))?;
        }
        Commands::Compare { pairs, strict } => {
            let config = load_config(&cli)?;
            let pairs = if pairs.is_empty() {
                config.comparison_pairs()
            } else {
                pairs.clone()
            };
            let report = compare::run(&config, &pairs);
            print!("{report}");
            if *strict && report.failures() > 0 {
                bail!("{} comparison units failed", report.failures());
            }
        }
        Commands::Reference {
            wavelet,
            shape,
            dim,
            seed,
            output,
        } => {
            let case = reference::generate_reference(wavelet, shape, *dim, *seed)?;
            write_array(output, &case.output)
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!(
                "{dim} reference for {wavelet} {:?} -> {} {:?}",
                shape,
                output.display(),
                case.output.shape()
            );
        }
    }
    Ok(())
}
