//! Shared domain models.

/// Static catalog entry describing a ready-to-play game.
///
/// Same shape as [`GameRecord`] minus the language and timestamp, which are
/// attached when the template is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrebuiltGame {
    /// Display title.
    pub title: &'static str,
    /// Lower-case genre label.
    pub genre: &'static str,
    /// Lower-case `category - subtopic` theme label.
    pub theme: &'static str,
    /// One-paragraph pitch.
    pub description: &'static str,
    /// Ordered gameplay mechanics.
    pub mechanics: &'static [&'static str],
    /// Ordered headline features.
    pub features: &'static [&'static str],
}

/// A selected or generated game, the unit handed to the exporter.
///
/// Records are never edited after construction; the host replaces its
/// current record wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Non-empty display title.
    pub title: String,
    /// Genre label.
    pub genre: String,
    /// Theme label.
    pub theme: String,
    /// Pitch shown under the title.
    pub description: String,
    /// Ordered gameplay mechanics.
    pub mechanics: Vec<String>,
    /// Ordered headline features.
    pub features: Vec<String>,
    /// Catalog language code.
    pub language: String,
    /// Local creation time, `%Y-%m-%d %H:%M:%S`.
    pub generated_at: String,
}

impl GameRecord {
    /// Category half of the theme label (`"Festival"` for `"Festival - Holi"`).
    pub fn theme_category(&self) -> &str {
        crate::catalog::theme_category(&self.theme)
    }
}

/// Raw custom-form input as captured by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    /// Required game title.
    pub title: String,
    /// Required genre label.
    pub genre: String,
    /// Required theme label.
    pub theme: String,
    /// Optional free-text pitch.
    pub description: String,
}

impl GameForm {
    /// Convenience constructor mirroring the form field order.
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        theme: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            theme: theme.into(),
            description: description.into(),
        }
    }
}
