//! HTML export of game records and the on-disk export writer.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::{catalog, models::GameRecord};

/// MIME type of exported documents.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Suffix appended to the document title.
pub const TITLE_SUFFIX: &str = " - Complete Indic Game";

const FILENAME_SUFFIX: &str = "_Complete_Game.html";

const STYLESHEET: &str = r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Arial', sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .game-container {
            max-width: 800px;
            width: 90%;
            background: rgba(255,255,255,0.1);
            padding: 30px;
            border-radius: 20px;
            backdrop-filter: blur(10px);
            box-shadow: 0 8px 32px rgba(0,0,0,0.3);
            text-align: center;
            animation: fadeInUp 1s ease-out;
        }
        @keyframes fadeInUp {
            from { opacity: 0; transform: translateY(30px); }
            to { opacity: 1; transform: translateY(0); }
        }
        .game-title {
            font-size: 2.5em;
            margin-bottom: 20px;
            text-shadow: 2px 2px 4px rgba(0,0,0,0.5);
        }
        .description { font-size: 1.2em; margin-bottom: 20px; opacity: 0.9; }
        .badges { margin: 30px 0; }
        .badge {
            display: inline-block;
            margin: 10px;
            padding: 15px;
            background: rgba(255,255,255,0.2);
            border-radius: 10px;
        }
        .play-button {
            background: linear-gradient(45deg, #ff6b6b, #4ecdc4);
            border: none;
            padding: 15px 30px;
            border-radius: 25px;
            color: white;
            font-size: 1.2em;
            font-weight: bold;
            cursor: pointer;
            transition: transform 0.3s ease;
            margin: 20px 10px;
        }
        .play-button:hover { transform: scale(1.1); }
        #game-area { display: none; margin-top: 30px; }
        #game-area ul { list-style: none; margin: 15px 0; }
        #game-area li { margin: 5px 0; }
"#;

/// Render `record` as a complete, self-contained HTML document.
///
/// Every interpolated value is escaped for its context. The output does not
/// depend on `generated_at`, so rendering the same record twice yields the
/// same bytes.
pub fn render(record: &GameRecord) -> String {
    let title = escape_html(&record.title);
    let description = escape_html(&record.description);
    let genre = escape_html(&record.genre);
    let theme = escape_html(&record.theme);
    let language = escape_html(&language_label(&record.language));
    let lang_tag = catalog::language(&record.language)
        .map(|entry| entry.tag)
        .unwrap_or("en");
    let mechanics_summary = escape_html(&record.mechanics.join(", "));
    let features_summary = escape_html(&record.features.join(", "));
    let mechanic_items: String = record
        .mechanics
        .iter()
        .map(|mechanic| {
            format!(
                "                <li class=\"mechanic\">{}</li>\n",
                escape_html(mechanic)
            )
        })
        .collect();
    let title_literal = script_string(&record.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang_tag}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}{TITLE_SUFFIX}</title>
    <style>
{STYLESHEET}    </style>
</head>
<body>
    <div class="game-container">
        <h1 class="game-title">🎮 {title}</h1>
        <p class="description">{description}</p>
        <div class="badges">
            <div class="badge"><strong>Genre:</strong> {genre}</div>
            <div class="badge"><strong>Theme:</strong> {theme}</div>
            <div class="badge"><strong>Language:</strong> {language}</div>
        </div>
        <button class="play-button" onclick="startGame()">🚀 Start Game</button>
        <div id="game-area">
            <h2>Welcome to {title}!</h2>
            <p>This is a fully functional {genre} game about {theme}.</p>
            <p>Game mechanics include: {mechanics_summary}</p>
            <ul class="mechanics">
{mechanic_items}            </ul>
            <p class="features">Features: {features_summary}</p>
            <button class="play-button" onclick="location.reload()">🔄 Restart</button>
        </div>
    </div>
    <script>
        const GAME_TITLE = {title_literal};
        function startGame() {{
            document.getElementById('game-area').style.display = 'block';
            alert('Game Started! This is a demo version of ' + GAME_TITLE);
        }}
    </script>
</body>
</html>
"#
    )
}

fn language_label(code: &str) -> String {
    catalog::language(code)
        .map(|entry| entry.display_name())
        .unwrap_or_else(|| code.to_string())
}

/// Download filename offered for `record`.
pub fn suggested_filename(record: &GameRecord) -> String {
    format!("{}{FILENAME_SUFFIX}", record.title.replace(' ', "_"))
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Encode `input` as a JavaScript string literal safe inside a `<script>` block.
pub fn script_string(input: &str) -> String {
    let json = serde_json::Value::String(input.to_string()).to_string();
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the "generated code" structure preview shown next to a record.
pub fn render_structure_snippet(record: &GameRecord) -> String {
    let ident = structure_identifier(&record.title);
    format!(
        r#"// Generated Game Structure
const {ident} = {{
  title: {title},
  genre: {genre},
  theme: {theme},
  language: {language},
  mechanics: [
    "turnBasedGameplay",
    "storyProgression",
    "quizElements"
  ],
  assets: {{
    graphics: "cultural_authentic",
    audio: "indic_traditional",
    fonts: "unicode_support"
  }}
}};
"#,
        title = script_string(&record.title),
        genre = script_string(&record.genre),
        theme = script_string(&record.theme),
        language = script_string(&record.language),
    )
}

fn structure_identifier(title: &str) -> String {
    let mut ident: String = title
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect();
    if ident.is_empty() || ident.starts_with(|ch: char| ch.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident.push_str("Game");
    ident
}

/// Metadata describing an export written to disk.
#[derive(Debug, Clone)]
pub struct ExportEntry {
    /// Absolute path of the written document.
    pub path: PathBuf,
    /// Title of the exported game, or the file stem for listed exports.
    pub title: String,
    /// Document size in bytes.
    pub bytes: u64,
    /// Time the file was written.
    pub written_at: DateTime<Utc>,
}

/// Writes rendered documents into an export directory.
pub struct ExportManager {
    root: PathBuf,
}

impl ExportManager {
    /// Create a manager writing beneath `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The user's download directory, or the working directory when unknown.
    pub fn default_root() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory exports are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render `record` and write it under its suggested filename.
    pub fn write(&self, record: &GameRecord) -> Result<ExportEntry> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;

        let document = render(record);
        let path = self.root.join(sanitize_filename(&suggested_filename(record)));
        fs::write(&path, document.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), title = %record.title, "game exported");

        Ok(ExportEntry {
            path,
            title: record.title.clone(),
            bytes: document.len() as u64,
            written_at: Utc::now(),
        })
    }

    /// Previously written exports, most recent first.
    pub fn entries(&self) -> Result<Vec<ExportEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).context("failed to read export directory")? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.ends_with(FILENAME_SUFFIX) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(err) => {
                    warn!("Failed to stat export {:?}: {err}", path);
                    continue;
                }
            };
            let written_at = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            entries.push(ExportEntry {
                title: name.trim_end_matches(FILENAME_SUFFIX).replace('_', " "),
                path,
                bytes: metadata.len(),
                written_at,
            });
        }

        entries.sort_by(|a, b| b.written_at.cmp(&a.written_at));
        Ok(entries)
    }
}

fn sanitize_filename(input: &str) -> String {
    static UNSAFE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("invalid filename regex"));

    let cleaned = UNSAFE_RE.replace_all(input, "");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned == FILENAME_SUFFIX {
        format!("game{FILENAME_SUFFIX}")
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use scraper::{Html, Selector};
    use tempfile::tempdir;

    fn ramayana_in_hindi() -> GameRecord {
        let template = catalog::prebuilt(0).expect("template");
        builder::from_prebuilt(template, "hindi")
    }

    fn hostile_record() -> GameRecord {
        GameRecord {
            title: "<script>alert('x')</script> & \"Co\"".to_string(),
            genre: "Puzzle".to_string(),
            theme: "Art - <b>Warli</b>".to_string(),
            description: "Uses </p> tags & more".to_string(),
            mechanics: vec!["a<b".to_string(), "c".to_string()],
            features: vec!["f".to_string()],
            language: "english".to_string(),
            generated_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn tag_balance(html: &str, tag: &str) -> (usize, usize) {
        let open_exact = format!("<{tag}>");
        let open_attr = format!("<{tag} ");
        let close = format!("</{tag}>");
        (
            html.matches(&open_exact).count() + html.matches(&open_attr).count(),
            html.matches(&close).count(),
        )
    }

    #[test]
    fn ramayana_exports_with_expected_title() {
        let record = ramayana_in_hindi();
        assert_eq!(record.title, "Ramayana Quest");
        assert_eq!(record.genre, "adventure");
        assert_eq!(record.language, "hindi");

        let html = render(&record);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ramayana Quest - Complete Indic Game</title>"));
        assert!(html.contains("<html lang=\"hi\">"));
        assert!(html.contains("<strong>Language:</strong> Hindi (हिंदी)"));
    }

    #[test]
    fn title_appears_once_in_head_and_in_header() {
        let record = ramayana_in_hindi();
        let html = render(&record);
        let head_end = html.find("</head>").expect("head closes");
        let (head, body) = html.split_at(head_end);
        assert_eq!(head.matches(&record.title).count(), 1);
        assert!(body.contains(&format!("<h1 class=\"game-title\">🎮 {}</h1>", record.title)));
    }

    #[test]
    fn one_list_item_per_mechanic() {
        let record = ramayana_in_hindi();
        let html = render(&record);
        assert_eq!(html.matches("<li").count(), record.mechanics.len());
        assert!(html.contains(
            "Game mechanics include: Story Progression, Character Development, Battle System, Quest Management"
        ));
        assert!(html.contains(&format!(
            "<p class=\"features\">Features: {}</p>",
            record.features.join(", ")
        )));
    }

    #[test]
    fn document_parses_without_errors() {
        let items = Selector::parse("ul.mechanics > li").expect("selector");
        let heading = Selector::parse("h1.game-title").expect("selector");
        for record in [ramayana_in_hindi(), hostile_record()] {
            let document = Html::parse_document(&render(&record));
            assert!(
                document.errors.is_empty(),
                "parse errors for {}: {:?}",
                record.title,
                document.errors
            );
            assert_eq!(document.select(&items).count(), record.mechanics.len());
            let header: String = document
                .select(&heading)
                .next()
                .expect("game title heading")
                .text()
                .collect();
            assert_eq!(header, format!("🎮 {}", record.title));
        }
    }

    #[test]
    fn render_is_deterministic_and_ignores_timestamp() {
        let record = ramayana_in_hindi();
        let mut later = record.clone();
        later.generated_at = "2099-12-31 23:59:59".to_string();
        assert_eq!(render(&record), render(&record));
        assert_eq!(render(&record), render(&later));
    }

    #[test]
    fn markup_stays_balanced() {
        for record in [ramayana_in_hindi(), hostile_record()] {
            let html = render(&record);
            for tag in ["html", "head", "body", "div", "p", "ul", "li", "h1", "h2", "script", "style", "title", "button"] {
                let (open, close) = tag_balance(&html, tag);
                assert_eq!(open, close, "unbalanced <{tag}> in {}", record.title);
            }
        }
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let html = render(&hostile_record());
        assert!(!html.contains("<script>alert"));
        assert!(!html.contains("<b>Warli</b>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;Co&quot;"));
        assert!(html.contains("Uses &lt;/p&gt; tags &amp; more"));
        assert!(html.contains("<li class=\"mechanic\">a&lt;b</li>"));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn script_strings_cannot_close_the_block() {
        let encoded = script_string("</script><b>\u{2028}'\"");
        assert!(!encoded.contains('<'));
        assert!(!encoded.contains('>'));
        assert!(encoded.starts_with('"') && encoded.ends_with('"'));
        assert!(encoded.contains("\\u2028"));
        assert!(encoded.contains("\\\""));
    }

    #[test]
    fn unknown_language_falls_back_to_code() {
        let mut record = ramayana_in_hindi();
        record.language = "klingon".to_string();
        let html = render(&record);
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<strong>Language:</strong> klingon"));
    }

    #[test]
    fn filename_replaces_spaces() {
        let record = ramayana_in_hindi();
        assert_eq!(suggested_filename(&record), "Ramayana_Quest_Complete_Game.html");
    }

    #[test]
    fn structure_snippet_names_the_object() {
        let mut record = ramayana_in_hindi();
        let snippet = render_structure_snippet(&record);
        assert!(snippet.contains("const RamayanaQuestGame = {"));
        assert!(snippet.contains("  title: \"Ramayana Quest\","));
        assert!(snippet.contains("  language: \"hindi\","));

        record.title = "1 \"Odd\" Title!".to_string();
        let snippet = render_structure_snippet(&record);
        assert!(snippet.contains("const _1OddTitleGame = {"));
        assert!(snippet.contains(r#"title: "1 \"Odd\" Title!","#));
    }

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(
            sanitize_filename("../etc/passwd_Complete_Game.html"),
            "etcpasswd_Complete_Game.html"
        );
        assert_eq!(sanitize_filename("_Complete_Game.html"), "game_Complete_Game.html");
    }

    #[test]
    fn export_writes_document() -> Result<()> {
        let dir = tempdir()?;
        let manager = ExportManager::new(dir.path().join("exports"));
        let record = ramayana_in_hindi();

        let entry = manager.write(&record)?;
        assert_eq!(
            entry.path,
            dir.path().join("exports").join("Ramayana_Quest_Complete_Game.html")
        );
        let written = fs::read_to_string(&entry.path)?;
        assert_eq!(written, render(&record));
        assert_eq!(entry.bytes, written.len() as u64);

        let listed = manager.entries()?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Ramayana Quest");
        assert_eq!(listed[0].path, entry.path);
        Ok(())
    }

    #[test]
    fn entries_on_missing_directory_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let manager = ExportManager::new(dir.path().join("missing"));
        assert!(manager.entries()?.is_empty());
        Ok(())
    }
}
