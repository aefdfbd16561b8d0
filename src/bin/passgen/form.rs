//! The interactive password form.

use std::path::PathBuf;

use anyhow::Context;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

use crate::ProgError;
use passgen::{CharacterClass, Mode, PasswordForm};

const CLASS_LABELS: [&str; 4] = [
    "Include LowerCase",
    "Include UpperCase",
    "Include Numbers",
    "Include Symbols",
];

enum NextStep {
    GenerateAgain,
    Copy,
    Reset,
    Quit,
}

static NEXT_STEPS: &[(&str, NextStep)] = &[
    ("Generate again", NextStep::GenerateAgain),
    ("Copy to the clipboard", NextStep::Copy),
    ("Reset", NextStep::Reset),
    ("Quit", NextStep::Quit),
];

pub(crate) fn run_form(config_path: Option<PathBuf>, mode: Option<Mode>) -> Result<(), ProgError> {
    let config = crate::load_config(config_path)?;
    let mode = mode.unwrap_or(config.mode);
    let mut form = PasswordForm::from_config(&config);
    let mut rng = rand::thread_rng();
    let theme = ColorfulTheme::default();

    eprintln!("{}", style("Password Generator").bold());
    loop {
        let length_text = Input::<String>::with_theme(&theme)
            .with_prompt("Password Length")
            .with_initial_text(form.length_text())
            .allow_empty(true)
            .validate_with(|text: &String| PasswordForm::check_length_text(text).map(|_| ()))
            .interact_text()
            .context("failed to read the password length")?;
        form.set_length_text(length_text);

        let defaults = CharacterClass::ALL.map(|class| form.is_enabled(class));
        let chosen = MultiSelect::with_theme(&theme)
            .with_prompt("Character classes (space to toggle)")
            .items(&CLASS_LABELS)
            .defaults(&defaults)
            .interact()
            .context("failed to read the character classes")?;
        for (index, class) in CharacterClass::ALL.into_iter().enumerate() {
            form.set_enabled(class, chosen.contains(&index));
        }

        match form.submit(&mut rng, mode) {
            Ok(password) => {
                tracing::info!(length = password.char_count(), %mode, "password generated");
                eprintln!("{}", style("Result:").bold());
                println!("{}", password.as_str());
            }
            Err(err) => {
                eprintln!("{}", style(err).red());
                continue;
            }
        }

        let labels: Vec<&str> = NEXT_STEPS.iter().map(|(label, _)| *label).collect();
        let selection = Select::with_theme(&theme)
            .items(&labels)
            .default(0)
            .interact()
            .context("failed to get your answer to a prompt")?;
        match NEXT_STEPS[selection].1 {
            NextStep::GenerateAgain => continue,
            NextStep::Copy => {
                let password = form
                    .password()
                    .context("a password should have been generated")?;
                crate::generate::send_to_clipboard(password.as_str().as_bytes())?;
                eprintln!("Copied to the clipboard.");
                return Ok(());
            }
            NextStep::Reset => form.reset(),
            NextStep::Quit => return Ok(()),
        }
    }
}
