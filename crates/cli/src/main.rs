use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use shelver_core::config::CONFIG_ENV;
use shelver_core::{
    load_layered, validate_config, Config, FsReconciler, LogFormat, LoggingConfig, Mp4TagReader,
    Organizer,
};

/// Exit code when the walk completed but some files could not be reconciled.
const EXIT_PARTIAL_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Sort tagged movies and TV episodes into a library"
)]
struct Args {
    /// Directory holding the files to organise
    #[arg(value_hint = clap::ValueHint::DirPath)]
    source: PathBuf,

    /// Library root for movies
    #[arg(long, value_name = "DIR")]
    movies: Option<PathBuf>,

    /// Library root for TV shows
    #[arg(long, value_name = "DIR")]
    tv: Option<PathBuf>,

    /// Move files instead of copying them
    #[arg(short = 'm', long = "move")]
    move_files: bool,

    /// Recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Only log what would be done
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Rename files inside their current directory
    #[arg(short, long = "inplace")]
    in_place: bool,

    /// Configuration file
    #[arg(short, long, env = CONFIG_ENV, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Overlays the command line on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        let placement = &mut config.placement;
        if let Some(movies) = &self.movies {
            placement.movies = Some(movies.clone());
        }
        if let Some(tv) = &self.tv {
            placement.tv = Some(tv.clone());
        }
        placement.move_files |= self.move_files;
        placement.recursive |= self.recursive;
        placement.dry_run |= self.dry_run;
        placement.in_place |= self.in_place;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = resolve_config(&args);
    let logging = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging, args.verbose);

    let result = match config {
        Ok(config) => run(&args, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_layered(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config".to_string(),
    })?;
    args.apply(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig, verbose: u8) {
    let default_directive = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match logging.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}

async fn run(args: &Args, config: Config) -> Result<ExitCode> {
    let options = config.placement_options(&args.source);
    info!(
        source = %args.source.display(),
        movies = %options.movies_root.display(),
        tv = %options.tv_root.display(),
        move_files = options.move_files,
        in_place = options.in_place,
        dry_run = options.dry_run,
        "Starting"
    );

    let organizer = Organizer::new(
        Mp4TagReader::new(),
        FsReconciler::new(config.reconciler.clone()),
        options,
    )
    .with_fail_fast(config.placement.fail_fast);

    let summary = organizer
        .run(&args.source)
        .await
        .with_context(|| format!("Failed to organise {:?}", args.source))?;

    if config.logging.format == LogFormat::Json {
        let report = serde_json::to_string(&summary).context("Failed to encode run summary")?;
        println!("{}", report);
    }

    if summary.has_failures() {
        for failure in &summary.failures {
            error!(file = %failure.path.display(), error = %failure.error, "Not placed");
        }
        return Ok(ExitCode::from(EXIT_PARTIAL_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "shelver",
            "/downloads",
            "--tv",
            "/srv/tv",
            "-m",
            "-n",
            "-vv",
        ]);
        let mut config = Config::default();
        config.placement.movies = Some(PathBuf::from("/srv/movies"));
        config.placement.recursive = true;

        args.apply(&mut config);

        assert_eq!(config.placement.movies, Some(PathBuf::from("/srv/movies")));
        assert_eq!(config.placement.tv, Some(PathBuf::from("/srv/tv")));
        assert!(config.placement.move_files);
        assert!(config.placement.dry_run);
        assert!(config.placement.recursive);
        assert!(!config.placement.in_place);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_long_flag_names() {
        let args = Args::parse_from(["shelver", "/downloads", "--move", "--inplace", "--dry-run"]);
        assert!(args.move_files);
        assert!(args.in_place);
        assert!(args.dry_run);
    }

    #[test]
    fn test_source_is_required() {
        assert!(Args::try_parse_from(["shelver"]).is_err());
    }
}
