use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use passgen::{Config, Mode};

mod form;
mod generate;
mod table;

#[derive(Parser)]
#[command(version, about = "Generate random passwords from a chosen set of character classes.")]
enum Args {
    /// Generate a password and print it to stdout.
    Generate(generate::GenerateArgs),
    /// Fill in the password form interactively: pick a length and the character classes, then
    /// generate, regenerate, copy, or reset.
    Form {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        mode: Option<Mode>,
    },
    /// List the character classes and the characters each one contributes.
    Classes {
        #[arg(long, default_value_t = Mode::Corrected)]
        mode: Mode,
    },
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Generate(args) => generate::generate_password(args)?,
        Args::Form { config, mode } => form::run_form(config, mode)?,
        Args::Classes { mode } => table::list_classes(mode)?,
    }

    Ok(())
}

fn main() {
    init_tracing();
    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Load the config from `config_path`, `$PASSGEN_CONFIG`, or the default location.
///
/// A file named explicitly must exist; a missing file at the default location means defaults.
fn load_config(config_path: Option<PathBuf>) -> Result<Config, ProgError> {
    let explicit = config_path.or_else(|| env::var_os("PASSGEN_CONFIG").map(PathBuf::from));
    let config = match explicit {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path)?
        }
        None => match default_config() {
            Some(path) => Config::load_or_default(&path)?,
            None => {
                tracing::debug!("HOME is not set; using the default config");
                Config::default()
            }
        },
    };
    Ok(config)
}

fn default_config() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".passgen");
    p.push("config.yaml");
    Some(p)
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Invalid(#[from] passgen::ValidationError),
    #[error("Cannot generate a password: {0}")]
    Generation(#[from] passgen::GenerationError),
    #[error("Config error: {0}")]
    Config(#[from] passgen::ConfigError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
