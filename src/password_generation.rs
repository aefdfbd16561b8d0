//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::character_class::{build_alphabet, CharacterClass};
use crate::{Mode, Secret};

const MAX_RESERVED: usize = 64;

/// How a position in the alphabet is picked for each character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexSelection {
    /// Scale a unit float by the alphabet length and round to the nearest integer.
    ///
    /// Only the first character gets a half-width share of draws, `[0, 0.5)`; the last character
    /// gets a full share. The other half-width share, draws scaling into `[len - 0.5, len)`,
    /// rounds up to `alphabet.len()`, which selects nothing, so the character is dropped.
    Rounded,
    /// Pick an index in `0..alphabet.len()` with equal probability.
    Uniform,
}

impl From<Mode> for IndexSelection {
    fn from(mode: Mode) -> IndexSelection {
        match mode {
            Mode::Faithful => IndexSelection::Rounded,
            Mode::Corrected => IndexSelection::Uniform,
        }
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("no character classes are enabled, so there are no characters to pick from")]
    EmptyAlphabet,
}

/// Generate a simple, impossible-to-guess password by just randomly sampling the given alphabet.
///
/// These are ugly, hard to remember passwords, but perfect if you're just copying them from a
/// keyring.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate_random_password<R>(
    rng: &mut R,
    alphabet: &[char],
    len: usize,
) -> Result<Secret, GenerationError>
where
    R: Rng + ?Sized,
{
    if len == 0 {
        return Ok(Secret(String::new()));
    }
    if alphabet.is_empty() {
        return Err(GenerationError::EmptyAlphabet);
    }
    Ok(sample_alphabet(rng, alphabet, len, IndexSelection::Uniform))
}

/// Sample `len` characters from `alphabet`.
///
/// With [`IndexSelection::Rounded`] the result can be shorter than `len`; an empty alphabet gives
/// an empty string for either selection.
pub fn sample_alphabet<R>(
    rng: &mut R,
    alphabet: &[char],
    len: usize,
    selection: IndexSelection,
) -> Secret
where
    R: Rng + ?Sized,
{
    // `len` is caller-controlled, so don't reserve for it up front.
    let mut secret = Secret(String::with_capacity(len.min(MAX_RESERVED)));
    if alphabet.is_empty() {
        return secret;
    }
    for _ in 0..len {
        let ch = match selection {
            IndexSelection::Rounded => {
                let draw: f64 = rng.gen();
                let index = (draw * alphabet.len() as f64).round() as usize;
                alphabet.get(index)
            }
            IndexSelection::Uniform => alphabet.choose(rng),
        };
        if let Some(ch) = ch {
            secret.0.push(*ch);
        }
    }
    secret
}

/// Generate a password of `length` characters from the enabled `classes`.
///
/// Fails with [`GenerationError::EmptyAlphabet`] when no class is enabled and `length` is
/// non-zero.
pub fn generate<R, I>(rng: &mut R, length: usize, classes: I) -> Result<Secret, GenerationError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = CharacterClass>,
{
    let alphabet = build_alphabet(classes, Mode::Corrected);
    tracing::debug!(length, alphabet_size = alphabet.len(), "generating password");
    generate_random_password(rng, &alphabet, length)
}

/// Generate a password exactly the way the mobile form did.
///
/// Uses the nine-digit alphabet and [`IndexSelection::Rounded`]. Never fails: a non-positive
/// `length` or an empty set of classes gives an empty string, and rounded draws past the end of
/// the alphabet leave the password short.
pub fn generate_faithful<R, I>(rng: &mut R, length: i64, classes: I) -> Secret
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = CharacterClass>,
{
    let alphabet = build_alphabet(classes, Mode::Faithful);
    let len = usize::try_from(length).unwrap_or(0);
    tracing::debug!(length, alphabet_size = alphabet.len(), "generating password (faithful)");
    sample_alphabet(rng, &alphabet, len, IndexSelection::Rounded)
}
