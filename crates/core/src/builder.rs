//! Game record construction from catalog templates or form input.

use std::fmt;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::{
    error::{FormField, ValidationError},
    models::{GameForm, GameRecord, PrebuiltGame},
};

/// Format of [`GameRecord::generated_at`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Mechanics attached to every custom game.
pub const DEFAULT_MECHANICS: [&str; 5] = [
    "Turn-based gameplay",
    "Story-driven progression",
    "Cultural quiz elements",
    "Achievement system",
    "Multiplayer support",
];

/// Features attached to every custom game.
pub const DEFAULT_FEATURES: [&str; 5] = [
    "Voice narration in selected language",
    "Authentic cultural graphics",
    "Educational content integration",
    "Leaderboard system",
    "Offline play support",
];

/// Copy a catalog template into a record stamped with the current time.
pub fn from_prebuilt(template: &PrebuiltGame, language: &str) -> GameRecord {
    from_prebuilt_at(template, language, Local::now())
}

/// Copy a catalog template into a record stamped with `now`.
pub fn from_prebuilt_at(
    template: &PrebuiltGame,
    language: &str,
    now: DateTime<Local>,
) -> GameRecord {
    debug!(title = template.title, language, "building record from template");
    GameRecord {
        title: template.title.to_string(),
        genre: template.genre.to_string(),
        theme: template.theme.to_string(),
        description: template.description.to_string(),
        mechanics: to_owned_list(template.mechanics),
        features: to_owned_list(template.features),
        language: language.to_string(),
        generated_at: now.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Validate form fields and build a custom record stamped with the current time.
pub fn from_form(
    title: &str,
    genre: &str,
    theme: &str,
    description: &str,
    language: &str,
) -> Result<GameRecord, ValidationError> {
    from_form_at(title, genre, theme, description, language, Local::now())
}

/// Validate form fields and build a custom record stamped with `now`.
pub fn from_form_at(
    title: &str,
    genre: &str,
    theme: &str,
    description: &str,
    language: &str,
    now: DateTime<Local>,
) -> Result<GameRecord, ValidationError> {
    require(title, FormField::Title)?;
    require(genre, FormField::Genre)?;
    require(theme, FormField::Theme)?;

    let description = if description.trim().is_empty() {
        default_description(genre, theme)
    } else {
        description.to_string()
    };

    Ok(GameRecord {
        title: title.to_string(),
        genre: genre.to_string(),
        theme: theme.to_string(),
        description,
        mechanics: to_owned_list(&DEFAULT_MECHANICS),
        features: to_owned_list(&DEFAULT_FEATURES),
        language: language.to_string(),
        generated_at: now.format(TIMESTAMP_FORMAT).to_string(),
    })
}

/// Sentence used when the form's description is left blank.
pub fn default_description(genre: &str, theme: &str) -> String {
    format!("An immersive {genre} game exploring {theme}")
}

fn require(value: &str, field: FormField) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Step reported while a custom game is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// First step; validation has already passed.
    AnalyzingContext,
    /// Mechanics and features are attached.
    GeneratingMechanics,
    /// Language is attached.
    Translating,
    /// Record is stamped and returned.
    Finalizing,
}

impl GenerationStage {
    /// Every stage in reporting order.
    pub const ALL: [GenerationStage; 4] = [
        GenerationStage::AnalyzingContext,
        GenerationStage::GeneratingMechanics,
        GenerationStage::Translating,
        GenerationStage::Finalizing,
    ];

    /// Stage to display for a progress bar at `percent` (0-100).
    pub fn at(percent: u16) -> Self {
        match percent {
            0..=29 => GenerationStage::AnalyzingContext,
            30..=59 => GenerationStage::GeneratingMechanics,
            60..=89 => GenerationStage::Translating,
            _ => GenerationStage::Finalizing,
        }
    }

    /// Progress value at which this stage begins.
    pub fn start_percent(self) -> u16 {
        match self {
            GenerationStage::AnalyzingContext => 0,
            GenerationStage::GeneratingMechanics => 30,
            GenerationStage::Translating => 60,
            GenerationStage::Finalizing => 90,
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            GenerationStage::AnalyzingContext => "Analyzing cultural context",
            GenerationStage::GeneratingMechanics => "Generating game mechanics",
            GenerationStage::Translating => "Translating to selected language",
            GenerationStage::Finalizing => "Finalizing your game",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate a custom game from form input, reporting each stage to `on_progress`.
///
/// Validation runs before any stage is reported, so a rejected form produces
/// no notifications. The call never sleeps; pacing is left to the caller.
pub fn generate<F>(
    form: &GameForm,
    language: &str,
    mut on_progress: F,
) -> Result<GameRecord, ValidationError>
where
    F: FnMut(GenerationStage),
{
    let record = from_form(
        &form.title,
        &form.genre,
        &form.theme,
        &form.description,
        language,
    )?;
    for stage in GenerationStage::ALL {
        on_progress(stage);
    }
    info!(title = %record.title, language, "custom game generated");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn prebuilt_copies_every_field() {
        for template in catalog::prebuilt_games() {
            for language in catalog::languages() {
                let record = from_prebuilt(template, language.code);
                assert_eq!(record.title, template.title);
                assert_eq!(record.genre, template.genre);
                assert_eq!(record.theme, template.theme);
                assert_eq!(record.description, template.description);
                assert_eq!(record.mechanics, template.mechanics);
                assert_eq!(record.features, template.features);
                assert_eq!(record.language, language.code);
                assert!(!record.generated_at.is_empty());
                assert_eq!(record.theme_category(), catalog::theme_category(template.theme));
            }
        }

        let ramayana = from_prebuilt(&catalog::prebuilt_games()[0], "english");
        assert_eq!(ramayana.theme_category(), "mythology");
    }

    #[test]
    fn timestamp_uses_fixed_format() {
        let template = catalog::prebuilt(0).expect("template");
        let record = from_prebuilt_at(template, "hindi", fixed_time());
        assert_eq!(record.generated_at, "2024-03-09 14:05:07");
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        assert_eq!(
            from_form("", "Puzzle", "Art - Warli", "desc", "english"),
            Err(ValidationError::MissingField(FormField::Title))
        );
        assert_eq!(
            from_form("Title", "", "Art - Warli", "desc", "english"),
            Err(ValidationError::MissingField(FormField::Genre))
        );
        assert_eq!(
            from_form("Title", "Puzzle", "", "desc", "english"),
            Err(ValidationError::MissingField(FormField::Theme))
        );
        assert_eq!(
            from_form("   ", "Puzzle", "Art - Warli", "", "english"),
            Err(ValidationError::MissingField(FormField::Title))
        );
    }

    #[test]
    fn blank_description_gets_default_sentence() -> Result<(), ValidationError> {
        let record = from_form("Arjuna's Quest", "RPG", "Mythology - Mahabharata", "", "tamil")?;
        assert_eq!(
            record.description,
            "An immersive RPG game exploring Mythology - Mahabharata"
        );
        Ok(())
    }

    #[test]
    fn supplied_description_is_kept_verbatim() -> Result<(), ValidationError> {
        let record = from_form("Arjuna's Quest", "RPG", "Art - Warli", "custom desc", "tamil")?;
        assert_eq!(record.description, "custom desc");
        Ok(())
    }

    #[test]
    fn custom_games_get_default_lists() -> Result<(), ValidationError> {
        let first = from_form_at("A", "Quiz", "Art - Warli", "", "urdu", fixed_time())?;
        let second = from_form_at("B", "Action", "Festival - Holi", "x", "odia", fixed_time())?;
        assert_eq!(first.mechanics, DEFAULT_MECHANICS);
        assert_eq!(first.features, DEFAULT_FEATURES);
        assert_eq!(second.mechanics, first.mechanics);
        assert_eq!(second.features, first.features);
        assert_eq!(first.language, "urdu");
        assert_eq!(first.generated_at, "2024-03-09 14:05:07");
        Ok(())
    }

    #[test]
    fn generate_reports_stages_in_order() -> Result<(), ValidationError> {
        let form = GameForm::new("Holi Hop", "Action", "Festival - Holi", "");
        let mut seen = Vec::new();
        let record = generate(&form, "hindi", |stage| seen.push(stage))?;
        assert_eq!(seen, GenerationStage::ALL);
        assert_eq!(record.title, "Holi Hop");
        Ok(())
    }

    #[test]
    fn generate_reports_nothing_on_rejection() {
        let form = GameForm::new("Holi Hop", "", "Festival - Holi", "");
        let mut seen = Vec::new();
        let result = generate(&form, "hindi", |stage| seen.push(stage));
        assert!(result.is_err());
        assert!(seen.is_empty());
    }

    #[test]
    fn stage_for_percent_matches_thresholds() {
        assert_eq!(GenerationStage::at(0), GenerationStage::AnalyzingContext);
        assert_eq!(GenerationStage::at(29), GenerationStage::AnalyzingContext);
        assert_eq!(GenerationStage::at(30), GenerationStage::GeneratingMechanics);
        assert_eq!(GenerationStage::at(89), GenerationStage::Translating);
        assert_eq!(GenerationStage::at(100), GenerationStage::Finalizing);
        for stage in GenerationStage::ALL {
            assert_eq!(GenerationStage::at(stage.start_percent()), stage);
        }
    }
}
