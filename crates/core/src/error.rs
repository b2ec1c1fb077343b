//! Validation errors raised at the input boundary.

use std::fmt;

use thiserror::Error;

/// Required fields of the custom game form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Game title.
    Title,
    /// Genre label.
    Genre,
    /// Theme label.
    Theme,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Title => "title",
            FormField::Genre => "genre",
            FormField::Theme => "theme",
        };
        f.write_str(label)
    }
}

/// Rejected user input. No state changes when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required form field was empty or blank.
    #[error("please fill in all required fields: {0} is missing")]
    MissingField(FormField),
    /// The language code is not in the catalog.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    /// The pre-built game index is out of range.
    #[error("no pre-built game at index {0}")]
    UnknownPrebuilt(usize),
}
