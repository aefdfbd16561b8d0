use rand::Rng;

use crate::character_class::CharacterClass;
use crate::request::{parse_length, GenerationRequest, ValidationError};
use crate::{Config, Mode, Secret};

/// The state behind a password form: the length field, the class toggles, and the last result.
///
/// Nothing here knows how the form is drawn; a front end reads and writes the fields, then calls
/// [`PasswordForm::submit`] or [`PasswordForm::reset`].
#[derive(Clone, Debug)]
pub struct PasswordForm {
    length_text: String,
    enabled: [bool; 4],
    defaults: [bool; 4],
    password: Option<Secret>,
}

impl Default for PasswordForm {
    fn default() -> Self {
        PasswordForm::with_defaults([true, false, false, false])
    }
}

impl PasswordForm {
    pub fn new() -> PasswordForm {
        PasswordForm::default()
    }

    /// A form whose toggles start out (and reset to) the classes enabled in `config`.
    pub fn from_config(config: &Config) -> PasswordForm {
        PasswordForm::with_defaults([
            config.lowercase,
            config.uppercase,
            config.digits,
            config.symbols,
        ])
    }

    fn with_defaults(defaults: [bool; 4]) -> PasswordForm {
        PasswordForm {
            length_text: String::new(),
            enabled: defaults,
            defaults,
            password: None,
        }
    }

    pub fn length_text(&self) -> &str {
        &self.length_text
    }

    pub fn set_length_text(&mut self, text: impl Into<String>) {
        self.length_text = text.into();
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        self.enabled[class as usize]
    }

    pub fn set_enabled(&mut self, class: CharacterClass, enabled: bool) {
        self.enabled[class as usize] = enabled;
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        self.enabled[class as usize] = !self.enabled[class as usize];
    }

    pub fn enabled_classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.is_enabled(*class))
    }

    /// Check the length field on its own, the way it is checked as the user types.
    pub fn validate_length(&self) -> Result<i64, ValidationError> {
        Self::check_length_text(&self.length_text)
    }

    pub fn check_length_text(text: &str) -> Result<i64, ValidationError> {
        let length = parse_length(text)?;
        GenerationRequest::new(length, CharacterClass::ALL)?;
        Ok(length)
    }

    pub fn validate(&self) -> Result<GenerationRequest, ValidationError> {
        let length = parse_length(&self.length_text)?;
        GenerationRequest::new(length, self.enabled_classes())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate the form and, if it passes, generate and keep a new password.
    pub fn submit<R>(&mut self, rng: &mut R, mode: Mode) -> Result<&Secret, ValidationError>
    where
        R: Rng + ?Sized,
    {
        let request = self.validate()?;
        let password = request.generate(rng, mode);
        Ok(&*self.password.insert(password))
    }

    /// The password from the last successful submit, if there has been one since the last reset.
    pub fn password(&self) -> Option<&Secret> {
        self.password.as_ref()
    }

    pub fn is_generated(&self) -> bool {
        self.password.is_some()
    }

    pub fn reset(&mut self) {
        self.length_text.clear();
        self.enabled = self.defaults;
        self.password = None;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn starts_with_lowercase_only() {
        let form = PasswordForm::new();
        assert_eq!(
            form.enabled_classes().collect::<Vec<_>>(),
            vec![CharacterClass::Lowercase]
        );
        assert_eq!(form.length_text(), "");
        assert!(!form.is_generated());
    }

    #[test]
    fn empty_length_is_required() {
        let form = PasswordForm::new();
        assert_eq!(form.validate(), Err(ValidationError::LengthRequired));
        assert!(!form.is_valid());
    }

    #[test]
    fn length_messages() {
        let mut form = PasswordForm::new();
        form.set_length_text("2");
        assert_eq!(
            form.validate_length().unwrap_err().to_string(),
            "Should be min of 4 characters"
        );
        form.set_length_text("40");
        assert_eq!(
            form.validate_length().unwrap_err().to_string(),
            "Should be max of 16 characters"
        );
        form.set_length_text("ten");
        assert_eq!(
            form.validate_length().unwrap_err().to_string(),
            "Length must be a number"
        );
        form.set_length_text("10");
        assert_eq!(form.validate_length(), Ok(10));
    }

    #[test]
    fn toggling_everything_off_is_invalid() {
        let mut form = PasswordForm::new();
        form.set_length_text("8");
        form.toggle(CharacterClass::Lowercase);
        assert_eq!(form.validate(), Err(ValidationError::NoClassesEnabled));
        // The length on its own is still fine.
        assert_eq!(form.validate_length(), Ok(8));
    }

    #[test]
    fn submit_keeps_password() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut form = PasswordForm::new();
        form.set_length_text("12");
        form.set_enabled(CharacterClass::Digit, true);
        let pw = form.submit(&mut rng, Mode::Corrected).unwrap().clone();
        assert_eq!(pw.char_count(), 12);
        assert!(pw
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(form.password(), Some(&pw));
    }

    #[test]
    fn failed_submit_keeps_previous_password() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut form = PasswordForm::new();
        form.set_length_text("8");
        let pw = form.submit(&mut rng, Mode::Corrected).unwrap().clone();
        form.set_length_text("99");
        assert!(form.submit(&mut rng, Mode::Corrected).is_err());
        assert_eq!(form.password(), Some(&pw));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut form = PasswordForm::new();
        form.set_length_text("8");
        form.toggle(CharacterClass::Symbol);
        form.toggle(CharacterClass::Uppercase);
        form.submit(&mut rng, Mode::Faithful).unwrap();

        form.reset();
        assert_eq!(form.length_text(), "");
        assert_eq!(form.password(), None);
        assert_eq!(
            form.enabled_classes().collect::<Vec<_>>(),
            vec![CharacterClass::Lowercase]
        );
    }

    #[test]
    fn config_defaults_survive_reset() {
        let config = Config {
            lowercase: false,
            digits: true,
            ..Config::default()
        };
        let mut form = PasswordForm::from_config(&config);
        form.toggle(CharacterClass::Lowercase);
        form.reset();
        assert_eq!(
            form.enabled_classes().collect::<Vec<_>>(),
            vec![CharacterClass::Digit]
        );
    }
}
