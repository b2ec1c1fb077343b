//! Fixed catalog of languages, genres, themes and ready-to-play games.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::PrebuiltGame;

/// Language selected when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "english";

/// A language the generator can label games with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Stable identifier used in records (e.g. `hindi`).
    pub code: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Name in the language's own script.
    pub native: &'static str,
    /// BCP 47 tag for document `lang` attributes.
    pub tag: &'static str,
}

impl LanguageEntry {
    /// Returns `"Name (Native)"`, or just the name when both match.
    pub fn display_name(&self) -> String {
        if self.name == self.native {
            self.name.to_string()
        } else {
            format!("{} ({})", self.name, self.native)
        }
    }
}

const fn lang(
    code: &'static str,
    name: &'static str,
    native: &'static str,
    tag: &'static str,
) -> LanguageEntry {
    LanguageEntry {
        code,
        name,
        native,
        tag,
    }
}

static LANGUAGES: [LanguageEntry; 14] = [
    lang("english", "English", "English", "en"),
    lang("hindi", "Hindi", "हिंदी", "hi"),
    lang("bengali", "Bengali", "বাংলা", "bn"),
    lang("telugu", "Telugu", "తెలుగు", "te"),
    lang("marathi", "Marathi", "मराठी", "mr"),
    lang("tamil", "Tamil", "தமிழ்", "ta"),
    lang("gujarati", "Gujarati", "ગુજરાતી", "gu"),
    lang("kannada", "Kannada", "ಕನ್ನಡ", "kn"),
    lang("malayalam", "Malayalam", "മലയാളം", "ml"),
    lang("punjabi", "Punjabi", "ਪੰਜਾਬੀ", "pa"),
    lang("odia", "Odia", "ଓଡ଼ିଆ", "or"),
    lang("assamese", "Assamese", "অসমীয়া", "as"),
    lang("urdu", "Urdu", "اردو", "ur"),
    lang("sanskrit", "Sanskrit", "संस्कृत", "sa"),
];

static LANGUAGE_INDEX: Lazy<HashMap<&'static str, &'static LanguageEntry>> =
    Lazy::new(|| LANGUAGES.iter().map(|entry| (entry.code, entry)).collect());

static GENRES: [&str; 10] = [
    "Adventure",
    "Puzzle",
    "Strategy",
    "Educational",
    "RPG",
    "Action",
    "Simulation",
    "Card Game",
    "Board Game",
    "Quiz",
];

static THEMES: [&str; 42] = [
    "Mythology - Ramayana",
    "Mythology - Mahabharata",
    "Mythology - Bhagavad Gita",
    "Mythology - Hanuman Chalisa",
    "Mythology - Krishna Leela",
    "Mythology - Shiva Purana",
    "Historical - Mughal Era",
    "Historical - Maratha Empire",
    "Historical - Chola Dynasty",
    "Historical - Gupta Empire",
    "Historical - Mauryan Empire",
    "Historical - Vijayanagara",
    "Festival - Diwali",
    "Festival - Holi",
    "Festival - Dussehra",
    "Festival - Karva Chauth",
    "Festival - Ganesh Chaturthi",
    "Festival - Navratri",
    "Culture - Classical Dance",
    "Culture - Folk Tales",
    "Culture - Ayurveda",
    "Culture - Yoga Traditions",
    "Culture - Sanskrit Literature",
    "Culture - Vedic Wisdom",
    "Geography - Indian States",
    "Geography - Sacred Rivers",
    "Geography - Mountain Ranges",
    "Literature - Sanskrit Poetry",
    "Literature - Tamil Classics",
    "Literature - Vedic Texts",
    "Architecture - Temples",
    "Architecture - Forts",
    "Architecture - Palaces",
    "Cuisine - Regional Foods",
    "Cuisine - Spices & Herbs",
    "Cuisine - Festival Foods",
    "Music - Classical Ragas",
    "Music - Folk Songs",
    "Music - Devotional Music",
    "Art - Madhubani",
    "Art - Warli",
    "Art - Tanjore Painting",
];

static PREBUILT_GAMES: [PrebuiltGame; 6] = [
    PrebuiltGame {
        title: "Ramayana Quest",
        genre: "adventure",
        theme: "mythology - ramayana",
        description: "Join Prince Rama on his epic journey through exile, the search for Sita, and the battle against Ravana.",
        mechanics: &[
            "Story Progression",
            "Character Development",
            "Battle System",
            "Quest Management",
        ],
        features: &[
            "Voice Narration",
            "Interactive Choices",
            "Cultural Learning",
            "Achievement System",
        ],
    },
    PrebuiltGame {
        title: "Mahabharata Legends",
        genre: "strategy",
        theme: "mythology - mahabharata",
        description: "Experience the great war of Kurukshetra and make crucial decisions that shape the destiny of kingdoms.",
        mechanics: &[
            "Strategic Combat",
            "Diplomatic Choices",
            "Resource Management",
            "Alliance Building",
        ],
        features: &[
            "Multiple Endings",
            "Historical Accuracy",
            "Character Relationships",
            "Moral Dilemmas",
        ],
    },
    PrebuiltGame {
        title: "Festival Celebrations",
        genre: "simulation",
        theme: "festival - diwali",
        description: "Plan and organize traditional Indian festivals, learn customs, and spread joy in the community.",
        mechanics: &[
            "Event Planning",
            "Resource Management",
            "Community Building",
            "Cultural Learning",
        ],
        features: &[
            "Regional Variations",
            "Recipe Collection",
            "Decoration Crafting",
            "Social Sharing",
        ],
    },
    PrebuiltGame {
        title: "Classical Dance Academy",
        genre: "educational",
        theme: "culture - classical dance",
        description: "Learn and master traditional Indian dance forms through interactive gameplay and cultural education.",
        mechanics: &[
            "Rhythm Matching",
            "Pose Recognition",
            "Story Interpretation",
            "Performance Scoring",
        ],
        features: &[
            "Multiple Dance Forms",
            "Cultural Context",
            "Progressive Learning",
            "Performance Mode",
        ],
    },
    PrebuiltGame {
        title: "Spice Route Trader",
        genre: "strategy",
        theme: "cuisine - spices & herbs",
        description: "Navigate ancient trade routes, discover exotic spices, and build your trading empire across India.",
        mechanics: &[
            "Trade Management",
            "Route Planning",
            "Market Analysis",
            "Cultural Exchange",
        ],
        features: &[
            "Historical Accuracy",
            "Recipe Discovery",
            "Economic Strategy",
            "Cultural Learning",
        ],
    },
    PrebuiltGame {
        title: "Temple Architecture Builder",
        genre: "simulation",
        theme: "architecture - temples",
        description: "Design and construct magnificent Indian temples while learning about architectural principles and cultural significance.",
        mechanics: &[
            "Building Design",
            "Resource Management",
            "Historical Accuracy",
            "Cultural Integration",
        ],
        features: &[
            "Authentic Styles",
            "Educational Content",
            "Visual Showcase",
            "Historical Context",
        ],
    },
];

/// All supported languages in display order.
pub fn languages() -> &'static [LanguageEntry] {
    &LANGUAGES
}

/// Look up a language by its code.
pub fn language(code: &str) -> Option<&'static LanguageEntry> {
    LANGUAGE_INDEX.get(code).copied()
}

/// Position of a language code within [`languages`].
pub fn language_position(code: &str) -> Option<usize> {
    LANGUAGES.iter().position(|entry| entry.code == code)
}

/// Genre labels offered by the custom form.
pub fn genres() -> &'static [&'static str] {
    &GENRES
}

/// Theme labels offered by the custom form.
pub fn themes() -> &'static [&'static str] {
    &THEMES
}

/// Ready-to-play game templates.
pub fn prebuilt_games() -> &'static [PrebuiltGame] {
    &PREBUILT_GAMES
}

/// Template at `index`, if any.
pub fn prebuilt(index: usize) -> Option<&'static PrebuiltGame> {
    PREBUILT_GAMES.get(index)
}

/// Category half of a `"Category - Subtopic"` theme label.
pub fn theme_category(theme: &str) -> &str {
    theme.split(" - ").next().unwrap_or(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes_are_fixed() {
        assert_eq!(languages().len(), 14);
        assert_eq!(genres().len(), 10);
        assert_eq!(themes().len(), 42);
        assert_eq!(prebuilt_games().len(), 6);
    }

    #[test]
    fn language_lookup_by_code() {
        let hindi = language("hindi").expect("hindi should be listed");
        assert_eq!(hindi.name, "Hindi");
        assert_eq!(hindi.native, "हिंदी");
        assert_eq!(hindi.tag, "hi");
        assert!(language("klingon").is_none());
        assert_eq!(language_position(DEFAULT_LANGUAGE), Some(0));
    }

    #[test]
    fn language_codes_are_unique() {
        assert_eq!(LANGUAGE_INDEX.len(), languages().len());
    }

    #[test]
    fn display_name_collapses_english() {
        assert_eq!(language("english").map(|l| l.display_name()).as_deref(), Some("English"));
        assert_eq!(
            language("tamil").map(|l| l.display_name()).as_deref(),
            Some("Tamil (தமிழ்)")
        );
    }

    #[test]
    fn themes_follow_category_pattern() {
        for theme in themes() {
            assert!(theme.contains(" - "), "malformed theme {theme}");
        }
        assert_eq!(theme_category("Cuisine - Spices & Herbs"), "Cuisine");
        assert_eq!(theme_category("standalone"), "standalone");
    }

    #[test]
    fn prebuilt_templates_are_complete() {
        for game in prebuilt_games() {
            assert!(!game.title.trim().is_empty());
            assert!(!game.genre.trim().is_empty());
            assert!(!game.theme.trim().is_empty());
            assert_eq!(game.mechanics.len(), 4);
            assert_eq!(game.features.len(), 4);
        }
        assert_eq!(prebuilt(0).map(|g| g.title), Some("Ramayana Quest"));
        assert!(prebuilt(6).is_none());
    }
}
