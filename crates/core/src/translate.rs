//! Interface label translation.
//!
//! Only a handful of Hindi labels are known. Every other language, and every
//! label without an entry, falls back to the English text.

const HINDI: [(&str, &str); 6] = [
    ("Generate Your Game", "अपना गेम बनाएं"),
    ("Generate Game", "गेम बनाएं"),
    ("Play Now", "अभी खेलें"),
    ("Download", "डाउनलोड करें"),
    ("Ready-to-Play Games", "तैयार खेल"),
    ("Custom Game Generator", "कस्टम गेम जेनरेटर"),
];

/// Translate an interface label into `language`, falling back to `text`.
pub fn translate<'a>(text: &'a str, language: &str) -> &'a str {
    let table: &[(&str, &str)] = match language {
        "hindi" => &HINDI,
        _ => return text,
    };
    table
        .iter()
        .find(|(english, _)| *english == text)
        .map(|(_, translated)| *translated)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_identity() {
        assert_eq!(translate("Play Now", "english"), "Play Now");
    }

    #[test]
    fn hindi_labels_are_translated() {
        assert_eq!(translate("Play Now", "hindi"), "अभी खेलें");
        assert_eq!(translate("Download", "hindi"), "डाउनलोड करें");
    }

    #[test]
    fn unknown_labels_and_languages_fall_back() {
        assert_eq!(translate("Quit", "hindi"), "Quit");
        assert_eq!(translate("Play Now", "tamil"), "Play Now");
    }
}
