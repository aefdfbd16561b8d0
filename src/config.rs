//! Defaults for the generator, read from a YAML file.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::character_class::CharacterClass;
use crate::Mode;

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Length used when none is given on the command line.
    pub length: i64,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            length: 8,
            lowercase: true,
            uppercase: false,
            digits: false,
            symbols: false,
            mode: Mode::default(),
        }
    }
}

impl Config {
    /// Load the configuration at `path`.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(ConfigErrorRepr::Io)?;
        Self::from_reader(file)
    }

    /// Load the configuration at `path`, falling back to the defaults if there is no such file.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match File::open(path) {
            Ok(file) => Self::from_reader(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Config::default())
            }
            Err(err) => Err(ConfigErrorRepr::Io(err).into()),
        }
    }

    pub fn from_reader(rdr: impl Read) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_reader(rdr).map_err(ConfigErrorRepr::Parse)?)
    }

    /// The classes switched on by default, in alphabet order.
    pub fn classes(&self) -> Vec<CharacterClass> {
        let toggles = [self.lowercase, self.uppercase, self.digits, self.symbols];
        CharacterClass::ALL
            .into_iter()
            .zip(toggles)
            .filter_map(|(class, on)| on.then_some(class))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ConfigError(ConfigErrorRepr);

impl From<ConfigErrorRepr> for ConfigError {
    fn from(err: ConfigErrorRepr) -> ConfigError {
        ConfigError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum ConfigErrorRepr {
    #[error("I/O error reading config: {0}")]
    Io(io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_form() {
        let config = Config::default();
        assert_eq!(config.length, 8);
        assert_eq!(config.classes(), vec![CharacterClass::Lowercase]);
        assert_eq!(config.mode, Mode::Corrected);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_reader("length: 12\nsymbols: true\nmode: faithful\n".as_bytes())
            .unwrap();
        assert_eq!(config.length, 12);
        assert_eq!(
            config.classes(),
            vec![CharacterClass::Lowercase, CharacterClass::Symbol]
        );
        assert_eq!(config.mode, Mode::Faithful);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_reader("colour: red\n".as_bytes()).is_err());
        assert!(Config::from_reader("mode: exact\n".as_bytes()).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"uppercase: true\ndigits: true\n").unwrap();
        file.flush().unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(config.uppercase);
        assert!(config.digits);
        assert!(config.lowercase);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }
}
