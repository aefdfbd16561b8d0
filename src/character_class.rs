//! The character classes a password can draw from, and assembly of the alphabet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Mode;

/// A named category of characters contributing a fixed slice of the alphabet.
///
/// The derived ordering is the order in which classes are concatenated into an alphabet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
/// The digit set the mobile form shipped with; it has no `8`.
pub static FAITHFUL_DIGITS: &str = "012345679";
pub static SYMBOLS: &str = "!@#$%^&*()_+";

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Digit => "digit",
            CharacterClass::Symbol => "symbol",
        }
    }

    /// The literal characters this class contributes under the given mode.
    pub fn alphabet(self, mode: Mode) -> &'static str {
        match (self, mode) {
            (CharacterClass::Lowercase, _) => LOWERCASE,
            (CharacterClass::Uppercase, _) => UPPERCASE,
            (CharacterClass::Digit, Mode::Faithful) => FAITHFUL_DIGITS,
            (CharacterClass::Digit, Mode::Corrected) => DIGITS,
            (CharacterClass::Symbol, _) => SYMBOLS,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowercase" | "lower" => Ok(CharacterClass::Lowercase),
            "uppercase" | "upper" => Ok(CharacterClass::Uppercase),
            "digit" | "digits" | "numbers" => Ok(CharacterClass::Digit),
            "symbol" | "symbols" => Ok(CharacterClass::Symbol),
            other => Err(format!("unknown character class {:?}", other)),
        }
    }
}

/// Concatenate the alphabets of `classes`.
///
/// Classes are always laid out lowercase, uppercase, digit, symbol regardless of the order they
/// are passed in; a class listed twice contributes once. No classes yields an empty alphabet.
pub fn build_alphabet<I>(classes: I, mode: Mode) -> Vec<char>
where
    I: IntoIterator<Item = CharacterClass>,
{
    let mut enabled = [false; 4];
    for class in classes {
        enabled[class as usize] = true;
    }

    let mut alphabet = Vec::new();
    for class in CharacterClass::ALL {
        if enabled[class as usize] {
            alphabet.extend(class.alphabet(mode).chars());
        }
    }
    alphabet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_alphabet_sizes() {
        assert_eq!(CharacterClass::Lowercase.alphabet(Mode::Corrected).len(), 26);
        assert_eq!(CharacterClass::Uppercase.alphabet(Mode::Corrected).len(), 26);
        assert_eq!(CharacterClass::Digit.alphabet(Mode::Corrected).len(), 10);
        assert_eq!(CharacterClass::Digit.alphabet(Mode::Faithful).len(), 9);
        assert_eq!(CharacterClass::Symbol.alphabet(Mode::Faithful).len(), 12);
    }

    #[test]
    fn faithful_digits_have_no_eight() {
        assert!(!CharacterClass::Digit.alphabet(Mode::Faithful).contains('8'));
        assert!(CharacterClass::Digit.alphabet(Mode::Corrected).contains('8'));
    }

    #[test]
    fn alphabet_uses_class_order() {
        let alphabet = build_alphabet(
            [CharacterClass::Symbol, CharacterClass::Digit, CharacterClass::Lowercase],
            Mode::Corrected,
        );
        let expected: Vec<char> = "abcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+"
            .chars()
            .collect();
        assert_eq!(alphabet, expected);
    }

    #[test]
    fn duplicate_classes_contribute_once() {
        let alphabet = build_alphabet(
            [CharacterClass::Uppercase, CharacterClass::Uppercase],
            Mode::Faithful,
        );
        assert_eq!(alphabet.len(), 26);
    }

    #[test]
    fn no_classes_is_empty() {
        assert!(build_alphabet([], Mode::Corrected).is_empty());
    }

    #[test]
    fn parse_class_names() {
        assert_eq!("numbers".parse::<CharacterClass>(), Ok(CharacterClass::Digit));
        assert_eq!("upper".parse::<CharacterClass>(), Ok(CharacterClass::Uppercase));
        assert!("emoji".parse::<CharacterClass>().is_err());
    }
}
