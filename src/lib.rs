use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod character_class;
pub mod config;
mod form;
pub mod password_generation;
mod request;

pub use character_class::CharacterClass;
pub use config::{Config, ConfigError};
pub use form::PasswordForm;
pub use password_generation::GenerationError;
pub use request::{
    FormInput, GenerationRequest, GenerationRequestBuilder, ValidationError, MAX_LENGTH,
    MIN_LENGTH,
};

/// Which behaviour the generator follows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Reproduce the mobile form exactly: the digit set lacks `8`, and indices are rounded, which
    /// can drop characters.
    Faithful,
    /// Ten digits and an unbiased index; the password always has the requested length.
    #[default]
    Corrected,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Faithful => "faithful",
            Mode::Corrected => "corrected",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faithful" => Ok(Mode::Faithful),
            "corrected" => Ok(Mode::Corrected),
            other => Err(format!(
                "unknown mode {:?}; expected \"faithful\" or \"corrected\"",
                other
            )),
        }
    }
}

/// A generated password.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters, as opposed to the number of bytes.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
