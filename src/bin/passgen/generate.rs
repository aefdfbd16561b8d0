use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::ProgError;
use passgen::password_generation;
use passgen::{CharacterClass, GenerationRequest, Mode, Secret};

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Number of characters; must be between 4 and 16 unless `--unchecked` is given.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    length: Option<i64>,
    /// Include lowercase letters.
    #[arg(short, long)]
    lowercase: bool,
    /// Include uppercase letters.
    #[arg(short, long)]
    uppercase: bool,
    /// Include digits.
    #[arg(short, long)]
    digits: bool,
    /// Include symbols.
    #[arg(short, long)]
    symbols: bool,
    /// `faithful` matches the mobile form, missing `8` and dropped characters included.
    #[arg(long)]
    mode: Option<Mode>,
    /// Seed the generator, making the output reproducible.
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the length and class checks, and call the generator directly.
    #[arg(long)]
    unchecked: bool,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
    /// Copy the password to the clipboard instead of printing it.
    #[arg(long)]
    copy: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

impl GenerateArgs {
    fn selected_classes(&self) -> Vec<CharacterClass> {
        let toggles = [self.lowercase, self.uppercase, self.digits, self.symbols];
        CharacterClass::ALL
            .into_iter()
            .zip(toggles)
            .filter_map(|(class, on)| on.then_some(class))
            .collect()
    }
}

pub(crate) fn generate_password(args: GenerateArgs) -> Result<(), ProgError> {
    let config = crate::load_config(args.config.clone())?;
    let mode = args.mode.unwrap_or(config.mode);
    let length = args.length.unwrap_or(config.length);
    let classes = {
        let selected = args.selected_classes();
        if selected.is_empty() {
            config.classes()
        } else {
            selected
        }
    };

    let password = match args.seed {
        Some(seed) => {
            tracing::warn!(seed, "seeded generator; the password can be reproduced from the seed");
            let mut rng = StdRng::seed_from_u64(seed);
            generate_with(&mut rng, length, &classes, mode, args.unchecked)?
        }
        None => {
            let mut rng = rand::thread_rng();
            generate_with(&mut rng, length, &classes, mode, args.unchecked)?
        }
    };

    if usize::try_from(length).map_or(false, |len| password.char_count() < len) {
        tracing::warn!(
            requested = length,
            generated = password.char_count(),
            "some characters were dropped by the faithful index selection"
        );
    }

    if args.copy {
        send_to_clipboard(password.as_str().as_bytes())?;
        eprintln!("Copied to the clipboard.");
    } else if args.json {
        let output = JsonOutput {
            password: &password,
            length: password.char_count(),
            classes: &classes,
            mode,
        };
        println!(
            "{}",
            serde_json::to_string(&output).context("failed to encode the result as JSON")?
        );
    } else {
        println!("{}", password.as_str());
    }
    Ok(())
}

fn generate_with<R>(
    rng: &mut R,
    length: i64,
    classes: &[CharacterClass],
    mode: Mode,
    unchecked: bool,
) -> Result<Secret, ProgError>
where
    R: Rng + ?Sized,
{
    let classes = classes.iter().copied();
    if unchecked {
        return match mode {
            Mode::Faithful => Ok(password_generation::generate_faithful(rng, length, classes)),
            Mode::Corrected => {
                let length = usize::try_from(length).unwrap_or(0);
                Ok(password_generation::generate(rng, length, classes)?)
            }
        };
    }
    let request = GenerationRequest::new(length, classes)?;
    Ok(request.generate(rng, mode))
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    password: &'a Secret,
    length: usize,
    classes: &'a [CharacterClass],
    mode: Mode,
}

pub(crate) fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut cmd = clipboard_cmd();
    cmd.stdin(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to start the clipboard command ({:?})", cmd))?;
    child
        .stdin
        .as_mut()
        .context("the clipboard command has no stdin")?
        .write_all(data)
        .context("failed to write to the clipboard command")?;
    let exit_status = child
        .wait()
        .context("failed to wait for the clipboard command")?;
    if !exit_status.success() {
        anyhow::bail!("the clipboard command exited with {}", exit_status);
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
