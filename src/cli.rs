use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::core::batch::{resolve_root, run_batch, run_single, BatchJob};
use crate::core::cache::FileCache;
use crate::core::codec::{Codec, DEFAULT_CRF};
use crate::core::command::{input_args, output_args, EncodeSettings};
use crate::core::decimate::decimate;
use crate::core::error::ScriptError;
use crate::core::job::BatchReport;
use crate::core::quote::quotify;
use crate::core::remux::remux_directory;
use crate::core::runner::{ProcessInvoker, DEFAULT_PROGRAM};

#[derive(Debug, Parser)]
#[command(name = "ffscripts", version, about = "Batch helpers around ffmpeg")]
pub struct Cli {
    /// Encoder binary to run
    #[arg(long, global = true, env = "FFSCRIPTS_FFMPEG", default_value = DEFAULT_PROGRAM)]
    pub ffmpeg: String,
    /// Where the last batch directory is remembered
    #[arg(long = "cache-file", global = true, env = "FFSCRIPTS_CACHE")]
    pub cache_file: Option<PathBuf>,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encode one file, or every file in <path>/mezzanine into <path>/post
    Encode(EncodeArgs),
    /// Drop duplicate frames and re-encode to DNxHR HQX
    Decimate(DecimateArgs),
    /// Stream-copy files into a different container
    Remux(RemuxArgs),
    /// Wrap every token of a text file in double quotes
    Quotify(QuotifyArgs),
}

#[derive(Debug, Parser)]
pub struct EncodeArgs {
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,
    #[arg(long = "crf", default_value_t = DEFAULT_CRF)]
    pub crf: f64,
    #[arg(short = 'r', long = "fps", value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,
    #[arg(short = 'c', long = "codec", value_enum, default_value_t = Codec::H264)]
    pub codec: Codec,
    /// Append a reversed copy and loop the result
    #[arg(short = 'l', long = "loop")]
    pub looped: bool,
    /// Suffix to remove from input names
    #[arg(short = 's', long = "suffix", default_value = "-master", allow_hyphen_values = true)]
    pub suffix: String,
    /// Use directory mode
    #[arg(short = 'd', long = "directory")]
    pub directory: bool,
    /// Use the cached directory
    #[arg(long = "cd", visible_alias = "cached")]
    pub cached: bool,
}

#[derive(Debug, Parser)]
pub struct DecimateArgs {
    pub input: PathBuf,
}

#[derive(Debug, Parser)]
pub struct RemuxArgs {
    pub directory: PathBuf,
    /// Only files whose name ends with this are remuxed
    pub extension: String,
    pub new_extension: String,
}

#[derive(Debug, Parser)]
pub struct QuotifyArgs {
    pub input: PathBuf,
}

pub fn encode_args_to_settings(args: &EncodeArgs) -> EncodeSettings {
    let profile = args.codec.profile(args.crf);
    EncodeSettings {
        input_args: input_args(args.fps),
        output_args: output_args(args.looped, profile.output_args()),
        extension: profile.extension().to_string(),
        suffix: args.suffix.clone(),
    }
}

pub fn execute(cli: Cli) -> Result<(), ScriptError> {
    let mut invoker = ProcessInvoker::new(cli.ffmpeg);

    match cli.command {
        Commands::Encode(args) => {
            let settings = encode_args_to_settings(&args);
            if args.directory {
                let mut cache =
                    FileCache::new(cli.cache_file.unwrap_or_else(FileCache::default_location));
                debug!(cache = %cache.path().display(), "directory cache");
                let root = resolve_root(args.path.as_deref(), args.cached, &mut cache)?;
                let report = run_batch(&BatchJob::new(&root, settings), &mut invoker)?;
                log_report(&report);
            } else {
                let path = args.path.ok_or(ScriptError::MissingPath)?;
                let output = run_single(&path, &settings, &mut invoker)?;
                info!("encoded {}", output.display());
            }
        }
        Commands::Decimate(args) => {
            let output = decimate(&args.input, &mut invoker)?;
            info!("decimation complete: {}", output.display());
        }
        Commands::Remux(args) => {
            let report = remux_directory(
                &args.directory,
                &args.extension,
                &args.new_extension,
                &mut invoker,
            )?;
            log_report(&report);
        }
        Commands::Quotify(args) => {
            let output = quotify(&args.input)?;
            info!("wrote {}", output.display());
        }
    }

    Ok(())
}

fn log_report(report: &BatchReport) {
    for job in &report.jobs {
        match &job.error {
            Some(err) => warn!("failed: {} ({err})", job.input.display()),
            None => debug!(elapsed = ?job.elapsed(), "finished {}", job.output.display()),
        }
    }
    info!(
        "{} of {} files finished, {} failed",
        report.finished(),
        report.jobs.len(),
        report.failed()
    );
}
