//! Host-owned interactive session state.

use tracing::{debug, info};

use crate::{
    builder::{self, GenerationStage},
    catalog,
    error::ValidationError,
    models::{GameForm, GameRecord},
};

/// Selected language plus the single "current record" slot.
///
/// The slot is only ever replaced with a fully built record; failed actions
/// leave it as it was.
#[derive(Debug, Clone)]
pub struct SessionState {
    language: &'static str,
    current: Option<GameRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            language: catalog::DEFAULT_LANGUAGE,
            current: None,
        }
    }
}

impl SessionState {
    /// Start a session in `language`.
    pub fn new(language: &str) -> Result<Self, ValidationError> {
        let mut state = Self::default();
        state.select_language(language)?;
        Ok(state)
    }

    /// Code of the selected language.
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Change the selected language. Existing records keep their language.
    pub fn select_language(&mut self, code: &str) -> Result<(), ValidationError> {
        let entry = catalog::language(code)
            .ok_or_else(|| ValidationError::UnknownLanguage(code.to_string()))?;
        debug!(language = entry.code, "language selected");
        self.language = entry.code;
        Ok(())
    }

    /// Record currently on display, if any.
    pub fn current(&self) -> Option<&GameRecord> {
        self.current.as_ref()
    }

    /// Replace the current record with the pre-built game at `index`.
    pub fn load_prebuilt(&mut self, index: usize) -> Result<&GameRecord, ValidationError> {
        let template = catalog::prebuilt(index).ok_or(ValidationError::UnknownPrebuilt(index))?;
        let record = builder::from_prebuilt(template, self.language);
        info!(title = %record.title, language = self.language, "pre-built game loaded");
        Ok(&*self.current.insert(record))
    }

    /// Generate a custom game from `form` and make it current.
    pub fn submit_form<F>(
        &mut self,
        form: &GameForm,
        on_progress: F,
    ) -> Result<&GameRecord, ValidationError>
    where
        F: FnMut(GenerationStage),
    {
        let record = builder::generate(form, self.language, on_progress)?;
        Ok(&*self.current.insert(record))
    }

    /// Drop the current record.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormField;

    #[test]
    fn starts_empty_in_default_language() {
        let state = SessionState::default();
        assert_eq!(state.language(), "english");
        assert!(state.current().is_none());
    }

    #[test]
    fn rejects_unknown_language() {
        let mut state = SessionState::default();
        assert_eq!(
            state.select_language("klingon"),
            Err(ValidationError::UnknownLanguage("klingon".to_string()))
        );
        assert_eq!(state.language(), "english");
        assert!(SessionState::new("klingon").is_err());
    }

    #[test]
    fn prebuilt_selection_uses_session_language() -> Result<(), ValidationError> {
        let mut state = SessionState::new("hindi")?;
        let record = state.load_prebuilt(0)?;
        assert_eq!(record.title, "Ramayana Quest");
        assert_eq!(record.genre, "adventure");
        assert_eq!(record.language, "hindi");
        Ok(())
    }

    #[test]
    fn out_of_range_prebuilt_keeps_current() -> Result<(), ValidationError> {
        let mut state = SessionState::new("bengali")?;
        state.load_prebuilt(2)?;
        assert_eq!(state.load_prebuilt(99), Err(ValidationError::UnknownPrebuilt(99)));
        assert_eq!(state.current().map(|r| r.title.as_str()), Some("Festival Celebrations"));
        Ok(())
    }

    #[test]
    fn invalid_form_keeps_current_record() -> Result<(), ValidationError> {
        let mut state = SessionState::default();
        state.load_prebuilt(1)?;
        let form = GameForm::new("", "Quiz", "Art - Warli", "");
        let result = state.submit_form(&form, |_| {});
        assert_eq!(result, Err(ValidationError::MissingField(FormField::Title)));
        assert_eq!(state.current().map(|r| r.title.as_str()), Some("Mahabharata Legends"));
        Ok(())
    }

    #[test]
    fn valid_form_replaces_current_record() -> Result<(), ValidationError> {
        let mut state = SessionState::new("kannada")?;
        state.load_prebuilt(3)?;
        let form = GameForm::new("Warli Walk", "Puzzle", "Art - Warli", "");
        let mut stages = 0;
        state.submit_form(&form, |_| stages += 1)?;
        assert_eq!(stages, GenerationStage::ALL.len());
        let current = state.current().expect("record after submit");
        assert_eq!(current.title, "Warli Walk");
        assert_eq!(current.language, "kannada");

        state.clear();
        assert!(state.current().is_none());
        Ok(())
    }
}
