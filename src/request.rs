use std::collections::BTreeSet;

use rand::Rng;
use serde::Deserialize;

use crate::character_class::{build_alphabet, CharacterClass};
use crate::password_generation::{self, IndexSelection};
use crate::{Mode, Secret};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 16;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Length is required")]
    LengthRequired,
    #[error("Length must be a number")]
    LengthNotANumber(String),
    #[error("Should be min of 4 characters")]
    LengthTooShort(i64),
    #[error("Should be max of 16 characters")]
    LengthTooLong(i64),
    #[error("Select at least one character class")]
    NoClassesEnabled,
}

/// The values collected by a password form: a length and one toggle per character class.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct FormInput {
    pub length: i64,
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub digits: bool,
    #[serde(default)]
    pub symbols: bool,
}

impl FormInput {
    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> {
        let toggles = [self.lowercase, self.uppercase, self.digits, self.symbols];
        CharacterClass::ALL
            .into_iter()
            .zip(toggles)
            .filter_map(|(class, on)| on.then_some(class))
    }
}

/// A validated request for a password: a length within bounds, and at least one class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationRequest {
    length: usize,
    classes: BTreeSet<CharacterClass>,
}

impl GenerationRequest {
    pub fn new<I>(length: i64, classes: I) -> Result<GenerationRequest, ValidationError>
    where
        I: IntoIterator<Item = CharacterClass>,
    {
        let length = check_length(length)?;
        let classes: BTreeSet<_> = classes.into_iter().collect();
        if classes.is_empty() {
            return Err(ValidationError::NoClassesEnabled);
        }
        Ok(GenerationRequest { length, classes })
    }

    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The enabled classes, in alphabet order.
    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.classes.iter().copied()
    }

    pub fn includes(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn alphabet(&self, mode: Mode) -> Vec<char> {
        build_alphabet(self.classes(), mode)
    }

    pub fn generate<R>(&self, rng: &mut R, mode: Mode) -> Secret
    where
        R: Rng + ?Sized,
    {
        let alphabet = self.alphabet(mode);
        tracing::debug!(
            length = self.length,
            alphabet_size = alphabet.len(),
            %mode,
            "generating password"
        );
        // The alphabet is never empty here, since construction requires a class.
        password_generation::sample_alphabet(
            rng,
            &alphabet,
            self.length,
            IndexSelection::from(mode),
        )
    }
}

impl TryFrom<FormInput> for GenerationRequest {
    type Error = ValidationError;

    fn try_from(input: FormInput) -> Result<GenerationRequest, ValidationError> {
        GenerationRequest::new(input.length, input.classes())
    }
}

/// Builds a [`GenerationRequest`] one toggle at a time.
///
/// Starts from the form's defaults: lowercase on, everything else off, and no length.
#[derive(Clone, Debug)]
pub struct GenerationRequestBuilder {
    length: Option<i64>,
    classes: BTreeSet<CharacterClass>,
}

impl Default for GenerationRequestBuilder {
    fn default() -> Self {
        GenerationRequestBuilder {
            length: None,
            classes: BTreeSet::from([CharacterClass::Lowercase]),
        }
    }
}

impl GenerationRequestBuilder {
    pub fn length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn class(mut self, class: CharacterClass, enabled: bool) -> Self {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(&class);
        }
        self
    }

    pub fn lowercase(self, enabled: bool) -> Self {
        self.class(CharacterClass::Lowercase, enabled)
    }

    pub fn uppercase(self, enabled: bool) -> Self {
        self.class(CharacterClass::Uppercase, enabled)
    }

    pub fn digits(self, enabled: bool) -> Self {
        self.class(CharacterClass::Digit, enabled)
    }

    pub fn symbols(self, enabled: bool) -> Self {
        self.class(CharacterClass::Symbol, enabled)
    }

    pub fn build(self) -> Result<GenerationRequest, ValidationError> {
        let length = self.length.ok_or(ValidationError::LengthRequired)?;
        GenerationRequest::new(length, self.classes)
    }
}

/// Parse the text of a length field.
pub(crate) fn parse_length(text: &str) -> Result<i64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::LengthRequired);
    }
    text.parse::<i64>()
        .map_err(|_| ValidationError::LengthNotANumber(text.to_owned()))
}

fn check_length(length: i64) -> Result<usize, ValidationError> {
    if length < MIN_LENGTH as i64 {
        Err(ValidationError::LengthTooShort(length))
    } else if length > MAX_LENGTH as i64 {
        Err(ValidationError::LengthTooLong(length))
    } else {
        Ok(length as usize)
    }
}
