use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use indic_games_core::{
    catalog,
    export::{self, ExportEntry, ExportManager},
    models::{GameForm, GameRecord, PrebuiltGame},
    translate, GenerationStage, SessionState,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const TICK_RATE: Duration = Duration::from_millis(60);
const PROGRESS_STEP: u16 = 4;
const MAX_FIELD_LEN: usize = 120;
const RECENT_EXPORTS: usize = 5;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    accent_alt: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            accent_alt: Color::Magenta,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Browse,
    Form,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    Title,
    Genre,
    Theme,
    Description,
    Submit,
}

impl FormFocus {
    const ORDER: [FormFocus; 5] = [
        FormFocus::Title,
        FormFocus::Genre,
        FormFocus::Theme,
        FormFocus::Description,
        FormFocus::Submit,
    ];

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let index = Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0) as isize;
        Self::ORDER[(index + delta).rem_euclid(len) as usize]
    }
}

/// Single-line editable text with a character cursor.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.char_len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn insert(&mut self, ch: char) {
        if ch.is_control() || self.char_len() >= MAX_FIELD_LEN {
            return;
        }
        let idx = self.byte_index();
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }
}

/// Catalog-backed dropdown whose first position is the blank option.
#[derive(Debug, Clone)]
struct Choice {
    options: &'static [&'static str],
    selected: Option<usize>,
}

impl Choice {
    fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        let total = self.options.len() as isize + 1;
        let current = self.selected.map(|idx| idx as isize + 1).unwrap_or(0);
        let next = (current + delta).rem_euclid(total);
        self.selected = if next == 0 {
            None
        } else {
            Some(next as usize - 1)
        };
    }

    fn value(&self) -> &'static str {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .copied()
            .unwrap_or("")
    }
}

#[derive(Debug, Clone)]
struct FormState {
    title: TextInput,
    genre: Choice,
    theme: Choice,
    description: TextInput,
    focus: FormFocus,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: TextInput::default(),
            genre: Choice::new(catalog::genres()),
            theme: Choice::new(catalog::themes()),
            description: TextInput::default(),
            focus: FormFocus::Title,
        }
    }
}

impl FormState {
    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormFocus::Title => Some(&mut self.title),
            FormFocus::Description => Some(&mut self.description),
            _ => None,
        }
    }

    fn focused_choice(&mut self) -> Option<&mut Choice> {
        match self.focus {
            FormFocus::Genre => Some(&mut self.genre),
            FormFocus::Theme => Some(&mut self.theme),
            _ => None,
        }
    }

    fn to_form(&self) -> GameForm {
        GameForm::new(
            self.title.value.clone(),
            self.genre.value(),
            self.theme.value(),
            self.description.value.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct LanguagePicker {
    cursor: usize,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// High-level application state for the terminal host.
pub struct IndicGamesApp {
    session: SessionState,
    exports: ExportManager,
    animate_generation: bool,
    screen: Screen,
    state: UiState,
    form: FormState,
    picker: Option<LanguagePicker>,
    progress: Option<u16>,
    recent_exports: Vec<ExportEntry>,
    theme: Theme,
}

impl IndicGamesApp {
    pub fn new(session: SessionState, exports: ExportManager, animate_generation: bool) -> Self {
        Self {
            session,
            exports,
            animate_generation,
            screen: Screen::Browse,
            state: UiState::default(),
            form: FormState::default(),
            picker: None,
            progress: None,
            recent_exports: Vec::new(),
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loaded {} ready-to-play games",
            catalog::prebuilt_games().len()
        ));
        self.refresh_exports();

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result: Result<()> = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }
            if self.state.should_quit {
                break Ok(());
            }
            match event_rx.recv().await {
                Some(event) => self.process_app_event(event),
                None => break Ok(()),
            }
            if self.state.should_quit {
                break Ok(());
            }
        };

        restore_terminal(&mut terminal)?;
        result
    }

    fn process_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(event) => {
                if let Err(err) = self.handle_input(event) {
                    error!(?err, "input handling failed");
                    self.state.set_status(format!("Error: {err}"));
                }
            }
            AppEvent::Tick => self.handle_tick(),
        }
    }

    fn handle_tick(&mut self) {
        let Some(percent) = self.progress else {
            return;
        };
        let next = percent.saturating_add(PROGRESS_STEP);
        if next >= 100 {
            self.finish_generation();
        } else {
            self.progress = Some(next);
        }
    }

    fn finish_generation(&mut self) {
        self.progress = None;
        self.screen = Screen::Preview;
        self.state
            .set_status("Your Indic game is ready to play and download!".to_string());
    }

    fn language_label(&self) -> String {
        catalog::language(self.session.language())
            .map(|entry| entry.display_name())
            .unwrap_or_else(|| self.session.language().to_string())
    }

    fn tr<'a>(&self, text: &'a str) -> &'a str {
        translate(text, self.session.language())
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = &event {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                self.state.should_quit = true;
                return Ok(());
            }
        }

        if self.progress.is_some() {
            if let Event::Key(key) = event {
                if key.code == KeyCode::Esc {
                    self.finish_generation();
                }
            }
            return Ok(());
        }

        if self.picker.is_some() {
            if let Event::Key(key) = event {
                self.handle_picker_key(key)?;
            }
            return Ok(());
        }

        match (self.screen, event) {
            (Screen::Form, Event::Key(key)) => self.handle_form_key(key)?,
            (Screen::Form, Event::Paste(text)) => {
                if let Some(input) = self.form.focused_input() {
                    text.chars().for_each(|ch| input.insert(ch));
                }
            }
            (Screen::Browse, Event::Key(key)) => self.handle_browse_key(key)?,
            (Screen::Preview, Event::Key(key)) => self.handle_preview_key(key)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_shared_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('l') => {
                let cursor = catalog::language_position(self.session.language()).unwrap_or(0);
                self.picker = Some(LanguagePicker { cursor });
                self.state.set_status("Choose your language".to_string());
            }
            KeyCode::Char('c') => {
                self.screen = Screen::Form;
                self.state
                    .set_status("Fill in the fields marked with *".to_string());
            }
            KeyCode::Char('p') => self.screen = Screen::Preview,
            KeyCode::Char('b') => self.screen = Screen::Browse,
            _ => return false,
        }
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_shared_key(&key) {
            return Ok(());
        }
        let total = catalog::prebuilt_games().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_browse_cursor(1, total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_browse_cursor(-1, total),
            KeyCode::Home | KeyCode::Char('g') => self.state.browse_cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.state.browse_cursor = total.saturating_sub(1)
            }
            KeyCode::Enter => {
                let title = self.session.load_prebuilt(self.state.browse_cursor)?.title.clone();
                self.screen = Screen::Preview;
                self.state.set_status(format!("{title} loaded successfully!"));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_preview_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_shared_key(&key) {
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::Browse,
            KeyCode::Char('d') => self.export_current()?,
            KeyCode::Char('x') => {
                if self.session.current().is_some() {
                    self.session.clear();
                    self.state.set_status("Preview cleared".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn export_current(&mut self) -> Result<()> {
        let Some(record) = self.session.current() else {
            self.state
                .set_status("Nothing to download yet".to_string());
            return Ok(());
        };
        let entry = self.exports.write(record)?;
        self.state.set_status(format!(
            "Saved {} ({} bytes, {})",
            entry.path.display(),
            entry.bytes,
            export::HTML_CONTENT_TYPE
        ));
        self.refresh_exports();
        Ok(())
    }

    fn refresh_exports(&mut self) {
        match self.exports.entries() {
            Ok(mut entries) => {
                entries.truncate(RECENT_EXPORTS);
                self.recent_exports = entries;
            }
            Err(err) => warn!(?err, "failed to list exports"),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Browse;
                self.state.set_status("Returned to games".to_string());
            }
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.step(1),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.step(-1),
            KeyCode::Enter => self.submit_form(),
            code => {
                if let Some(choice) = self.form.focused_choice() {
                    match code {
                        KeyCode::Left => choice.cycle(-1),
                        KeyCode::Right | KeyCode::Char(' ') => choice.cycle(1),
                        _ => {}
                    }
                } else if let Some(input) = self.form.focused_input() {
                    match code {
                        KeyCode::Left => input.move_cursor(-1),
                        KeyCode::Right => input.move_cursor(1),
                        KeyCode::Home => input.move_home(),
                        KeyCode::End => input.move_end(),
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Char(ch)
                            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
                        {
                            input.insert(ch)
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn submit_form(&mut self) {
        let form = self.form.to_form();
        let result = self
            .session
            .submit_form(&form, |stage| debug!(stage = %stage, "generation progress"));
        match result {
            Ok(record) => {
                info!(title = %record.title, "custom game ready");
                if self.animate_generation {
                    self.progress = Some(0);
                    self.state
                        .set_status(GenerationStage::at(0).label().to_string());
                } else {
                    self.finish_generation();
                }
            }
            Err(err) => {
                self.state.set_status(format!("Rejected: {err}"));
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(picker) = self.picker.as_mut() else {
            return Ok(());
        };
        let total = catalog::languages().len();
        match key.code {
            KeyCode::Esc => {
                self.picker = None;
                self.state.set_status("Language unchanged".to_string());
            }
            KeyCode::Char('j') | KeyCode::Down => picker.cursor = (picker.cursor + 1) % total,
            KeyCode::Char('k') | KeyCode::Up => {
                picker.cursor = (picker.cursor + total - 1) % total
            }
            KeyCode::Enter => {
                let cursor = picker.cursor;
                self.picker = None;
                if let Some(entry) = catalog::languages().get(cursor) {
                    self.session.select_language(entry.code)?;
                    self.state
                        .set_status(format!("Language: {}", entry.display_name()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        match self.screen {
            Screen::Browse => self.draw_browse(frame, chunks[1]),
            Screen::Form => self.draw_form(frame, chunks[1]),
            Screen::Preview => self.draw_preview(frame, chunks[1]),
        }
        self.render_status(frame, chunks[2]);

        if let Some(picker) = self.picker {
            self.render_language_picker(frame, picker);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let tab = |label: &str, screen: Screen| {
            if self.screen == screen {
                Span::styled(
                    format!(" {label} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(self.theme.muted))
            }
        };
        let line = Line::from(vec![
            Span::styled(
                "🎮 Indic Game Generator  ",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            tab("b Games", Screen::Browse),
            tab("c Create", Screen::Form),
            tab("p Preview", Screen::Preview),
            Span::raw("  "),
            Span::styled(
                format!("🌍 {}", self.language_label()),
                Style::default().fg(self.theme.accent_alt),
            ),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_browse(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let games = catalog::prebuilt_games();
        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let marker = if idx == self.state.browse_cursor {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(
                        game.title,
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" · {}", game.genre),
                        Style::default().fg(self.theme.muted),
                    ),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.browse_cursor));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("🎯 {}", self.tr("Ready-to-Play Games"))),
            )
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, columns[0], &mut list_state);

        if let Some(game) = games.get(self.state.browse_cursor) {
            self.render_game_card(frame, columns[1], game);
        }
    }

    fn render_game_card(&self, frame: &mut Frame, area: Rect, game: &PrebuiltGame) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("🎮 {}", game.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                game.description,
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", game.genre),
                    Style::default().fg(Color::Black).bg(self.theme.accent_alt),
                ),
                Span::raw(" "),
                Span::styled(
                    format!(" {} ", catalog::theme_category(game.theme)),
                    Style::default().fg(Color::Black).bg(self.theme.danger),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Mechanics",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(game.mechanics.iter().map(|item| Line::from(format!("  • {item}"))));
        lines.push(Line::from(Span::styled(
            "Features",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(game.features.iter().map(|item| Line::from(format!("  • {item}"))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Enter: {}", self.tr("Play Now")),
            Style::default().fg(self.theme.accent),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Game Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_form(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("🛠 {}", self.tr("Custom Game Generator")));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let focus = self.form.focus;
        self.render_text_field(
            frame,
            rows[0],
            "🎮 Game Title *",
            &self.form.title,
            focus == FormFocus::Title,
        );
        self.render_choice_field(
            frame,
            rows[1],
            "🎯 Genre *",
            &self.form.genre,
            focus == FormFocus::Genre,
        );
        self.render_choice_field(
            frame,
            rows[2],
            "🎨 Cultural Theme *",
            &self.form.theme,
            focus == FormFocus::Theme,
        );
        self.render_text_field(
            frame,
            rows[3],
            "📝 Additional Description",
            &self.form.description,
            focus == FormFocus::Description,
        );

        if let Some(percent) = self.progress {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(self.theme.success))
                .percent(percent)
                .label(GenerationStage::at(percent).label());
            frame.render_widget(gauge, rows[4]);
        } else {
            let style = if focus == FormFocus::Submit {
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.success)
            };
            let button = Paragraph::new(Span::styled(
                format!("✨ {}", self.tr("Generate Game")),
                style,
            ))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(button, rows[4]);
        }

        let help = Paragraph::new(Line::from(Span::styled(
            "Tab/↑↓ move  ←→ change selection  Enter generate  Esc back",
            Style::default().fg(self.theme.muted),
        )));
        frame.render_widget(help, rows[5]);
    }

    fn render_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        input: &TextInput,
        focused: bool,
    ) {
        let paragraph = Paragraph::new(input.value.as_str()).block(self.field_block(label, focused));
        frame.render_widget(paragraph, area);
        if focused && self.picker.is_none() && self.progress.is_none() {
            let cursor_x = (area.x + 1 + input.cursor as u16)
                .min(area.x + area.width.saturating_sub(2));
            frame.set_cursor(cursor_x, area.y + 1);
        }
    }

    fn render_choice_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        choice: &Choice,
        focused: bool,
    ) {
        let text = match choice.selected {
            Some(_) => Span::raw(format!("◀ {} ▶", choice.value())),
            None => Span::styled("◀ select ▶", Style::default().fg(self.theme.muted)),
        };
        let paragraph = Paragraph::new(text).block(self.field_block(label, focused));
        frame.render_widget(paragraph, area);
    }

    fn field_block<'a>(&self, label: &'a str, focused: bool) -> Block<'a> {
        let border = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(label)
    }

    fn draw_preview(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("🎮 Generated Game Preview");
        let Some(record) = self.session.current() else {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Your Generated Game Will Appear Here",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Choose from ready-to-play games or create your custom game",
                    Style::default().fg(self.theme.muted),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        self.render_record(frame, columns[0], record, block);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(RECENT_EXPORTS as u16 + 2),
            ])
            .split(columns[1]);

        let snippet = Paragraph::new(export::render_structure_snippet(record))
            .style(Style::default().fg(self.theme.success))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("💻 Generated Code"),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(snippet, side[0]);
        self.render_recent_exports(frame, side[1]);
    }

    fn render_recent_exports(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💾 Recent Downloads");
        if self.recent_exports.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No games downloaded yet",
                Style::default().fg(self.theme.muted),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .recent_exports
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.title.clone(),
                        Style::default().fg(self.theme.primary_fg),
                    ),
                    Span::styled(
                        format!(
                            " · {} bytes · {} UTC",
                            entry.bytes,
                            entry.written_at.format("%Y-%m-%d %H:%M")
                        ),
                        Style::default().fg(self.theme.muted),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_record(&self, frame: &mut Frame, area: Rect, record: &GameRecord, block: Block) {
        let language = catalog::language(&record.language)
            .map(|entry| entry.display_name())
            .unwrap_or_else(|| record.language.clone());
        let mut lines = vec![
            Line::from(Span::styled(
                format!("🎮 {}", record.title),
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", record.genre),
                    Style::default().fg(Color::Black).bg(self.theme.accent_alt),
                ),
                Span::raw(" "),
                Span::styled(
                    format!(" {} ", record.theme_category()),
                    Style::default().fg(Color::Black).bg(self.theme.danger),
                ),
                Span::raw(" "),
                Span::styled(
                    format!(" {} ", record.theme),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ),
            ]),
            Line::from(record.description.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "🔧 Game Mechanics:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(record.mechanics.iter().map(|item| Line::from(format!("  • {item}"))));
        lines.push(Line::from(Span::styled(
            "✨ Features:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(record.features.iter().map(|item| Line::from(format!("  • {item}"))));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Language: {language}")));
        lines.push(Line::from(format!("Generated: {}", record.generated_at)));
        lines.push(Line::from(format!("File: {}", export::suggested_filename(record))));
        lines.push(Line::from(Span::styled(
            format!("d: 💾 {}  ·  x: clear", self.tr("Download")),
            Style::default().fg(self.theme.accent),
        )));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_language_picker(&self, frame: &mut Frame, picker: LanguagePicker) {
        let languages = catalog::languages();
        let height = (languages.len() as u16 + 2).min(frame.size().height);
        let area = centered_rect(36, height, frame.size());
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = languages
            .iter()
            .map(|entry| ListItem::new(entry.display_name()))
            .collect();
        let mut list_state = ListState::default();
        list_state.select(Some(picker.cursor));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("🌍 Language Selection"),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let secondary = format!(
            "Exports: {}  ·  l language  ·  q quit",
            self.exports.root().display()
        );
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(secondary, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    browse_cursor: usize,
    status: String,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            browse_cursor: 0,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn move_browse_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.browse_cursor = 0;
            return;
        }
        let next = (self.browse_cursor as isize + delta).clamp(0, total as isize - 1);
        self.browse_cursor = next as usize;
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
