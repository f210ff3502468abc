// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use idealog_app::{
    AppCommand, AppEffect, AppEvent, AppState, BUSY_MESSAGE, EMPTY_LIST_MESSAGE, Focus, Idea,
    IdeaId, IdeaListing, NoticeLevel, RowState,
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::time::Duration;

pub const PAGE_TITLE: &str = "Idea Journal with AI ✨";
const ENRICH_TRIGGER: &str = "[enhance]";
const BUSY_TRIGGER: &str = "⏳ working";
const INPUT_PLACEHOLDER: &str = "Write your new idea here, then press enter to save";

/// Store and enrichment access for the page. Implementations block until
/// each call completes.
pub trait AppRuntime {
    fn ensure_schema(&mut self) -> Result<()>;
    fn insert_idea(&mut self, text: &str) -> Result<IdeaId>;
    fn list_ideas(&mut self) -> Result<Vec<Idea>>;
    fn enrich_idea(&mut self, text: &str) -> Result<String>;
}

#[derive(Debug, Default)]
struct ViewData {
    listing: IdeaListing,
    help_visible: bool,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend).context("create terminal") {
        Ok(mut terminal) => event_loop(&mut terminal, state, runtime),
        Err(error) => Err(error),
    };

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<B: Backend, R: AppRuntime>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    runtime: &mut R,
) -> Result<()> {
    let mut view_data = ViewData::default();
    refresh_view_data(state, runtime, &mut view_data);

    let mut redraw = |state: &AppState, view_data: &ViewData| -> Result<()> {
        terminal
            .draw(|frame| render(frame, state, view_data))
            .context("draw frame")?;
        Ok(())
    };

    loop {
        redraw(&*state, &view_data)?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if handle_key_event(state, runtime, &mut view_data, key, &mut redraw)? {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn handle_key_event<R, F>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
    redraw: &mut F,
) -> Result<bool>
where
    R: AppRuntime,
    F: FnMut(&AppState, &ViewData) -> Result<()>,
{
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return Ok(false);
    }

    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        run_pass(state, runtime, view_data, AppCommand::ToggleFocus, redraw)?;
        return Ok(false);
    }

    let command = match state.focus {
        Focus::Input => input_command_for_key(key),
        Focus::Ideas => {
            if key.code == KeyCode::Char('?') {
                view_data.help_visible = true;
                return Ok(false);
            }
            ideas_command_for_key(state, view_data, key)
        }
    };

    if let Some(command) = command {
        run_pass(state, runtime, view_data, command, redraw)?;
    }
    Ok(false)
}

fn input_command_for_key(key: KeyEvent) -> Option<AppCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Some(AppCommand::Save),
        (KeyCode::Backspace, _) => Some(AppCommand::DeleteChar),
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppCommand::ClearInput)
        }
        (KeyCode::Down, _) => Some(AppCommand::ToggleFocus),
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(AppCommand::InsertChar(ch))
        }
        _ => None,
    }
}

fn ideas_command_for_key(
    state: &AppState,
    view_data: &ViewData,
    key: KeyEvent,
) -> Option<AppCommand> {
    let ideas = view_data.listing.ideas();
    let len = isize::try_from(ideas.len()).unwrap_or(isize::MAX);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(AppCommand::MoveSelection(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppCommand::MoveSelection(-1)),
        KeyCode::Char('g') | KeyCode::Home => Some(AppCommand::MoveSelection(-len)),
        KeyCode::Char('G') | KeyCode::End => Some(AppCommand::MoveSelection(len)),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Esc => Some(AppCommand::ToggleFocus),
        KeyCode::Enter | KeyCode::Char('e') => state
            .selected_idea(ideas)
            .map(|idea| AppCommand::Enrich(idea.id)),
        _ => None,
    }
}

/// One render pass: dispatch, draw the busy state if a slow effect is
/// pending, run effects, then reload the listing for save and enrich.
fn run_pass<R, F>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    redraw: &mut F,
) -> Result<()>
where
    R: AppRuntime,
    F: FnMut(&AppState, &ViewData) -> Result<()>,
{
    let effects = state.dispatch(command, view_data.listing.ideas());
    if !effects.is_empty() {
        debug!("event=pass command={command:?} effects={}", effects.len());
    }

    if effects
        .iter()
        .any(|effect| matches!(effect, AppEffect::EnrichIdea { .. }))
    {
        redraw(&*state, &*view_data)?;
    }

    for effect in effects {
        let event = run_effect(runtime, effect);
        state.apply(event);
    }

    if command.starts_pass() {
        refresh_view_data(state, runtime, view_data);
    }
    Ok(())
}

fn run_effect<R: AppRuntime>(runtime: &mut R, effect: AppEffect) -> AppEvent {
    match effect {
        AppEffect::InsertIdea { text } => match runtime.insert_idea(&text) {
            Ok(id) => AppEvent::IdeaSaved(id),
            Err(error) => AppEvent::SaveFailed(error.to_string()),
        },
        AppEffect::EnrichIdea { id, text } => match runtime.enrich_idea(&text) {
            Ok(suggestions) => AppEvent::EnrichmentReady {
                id,
                idea_text: text,
                suggestions,
            },
            Err(error) => AppEvent::EnrichmentFailed {
                id,
                error: error.to_string(),
            },
        },
    }
}

fn refresh_view_data<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) {
    if let Err(error) = runtime.ensure_schema() {
        state.apply(AppEvent::SchemaFailed(error.to_string()));
        view_data.listing = IdeaListing::Unavailable;
        return;
    }

    view_data.listing = match runtime.list_ideas() {
        Ok(ideas) => IdeaListing::Available(ideas),
        Err(error) => {
            state.apply(AppEvent::ListingFailed(error.to_string()));
            IdeaListing::Unavailable
        }
    };
    state.clamp_selection(view_data.listing.len());
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let notice_height = if state.notices.is_empty() {
        0
    } else {
        u16::try_from(state.notices.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    };

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(notice_height),
        Constraint::Min(4),
    ];
    if state.panel.is_some() {
        constraints.push(Constraint::Percentage(40));
    }
    constraints.push(Constraint::Length(3));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let title = Paragraph::new(PAGE_TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    render_input(frame, layout[1], state);

    if !state.notices.is_empty() {
        let notices = Paragraph::new(notice_lines(state))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(notices, layout[2]);
    }

    render_ideas(frame, layout[3], state, view_data);

    let status_index = layout.len() - 1;
    if let Some(panel) = &state.panel {
        let mut text = Text::from(Line::from(Span::styled(
            panel.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::default());
        for line in panel.suggestions.lines() {
            text.push_line(Line::from(line.to_owned()));
        }
        let widget = Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("AI suggestions")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(widget, layout[status_index - 1]);
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[status_index]);

    if view_data.help_visible {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_input(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Input;
    let (content, style) = if state.input.is_empty() {
        (INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        (state.input.as_str(), Style::default())
    };
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let input = Paragraph::new(content).style(style).block(
        Block::default()
            .title("Add a new idea")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);

    if focused {
        let typed = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let x = area.x.saturating_add(1).saturating_add(typed).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_ideas(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let border_style = if state.focus == Focus::Ideas {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(ideas_title(&view_data.listing))
        .borders(Borders::ALL)
        .border_style(border_style);

    let ideas = match &view_data.listing {
        IdeaListing::Unavailable => {
            let widget = Paragraph::new("Ideas could not be loaded for this pass.")
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(widget, area);
            return;
        }
        IdeaListing::Available(ideas) if ideas.is_empty() => {
            let widget = Paragraph::new(EMPTY_LIST_MESSAGE)
                .style(notice_style(NoticeLevel::Info))
                .block(block);
            frame.render_widget(widget, area);
            return;
        }
        IdeaListing::Available(ideas) => ideas,
    };

    let rows = ideas.iter().enumerate().map(|(row_index, idea)| {
        let selected = state.focus == Focus::Ideas && row_index == state.selected_row;
        let row_style = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let trigger_style = match state.row_state(idea.id) {
            RowState::AwaitingEnrichment => Style::default().fg(Color::Yellow),
            RowState::Idle if selected => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            RowState::Idle => Style::default().fg(Color::Cyan),
        };
        Row::new(vec![
            Cell::from(idea_label(idea)),
            Cell::from(row_trigger_label(state, idea.id)).style(trigger_style),
        ])
        .style(row_style)
    });

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(12)])
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn ideas_title(listing: &IdeaListing) -> String {
    match listing {
        IdeaListing::Available(ideas) if !ideas.is_empty() => {
            format!("Your saved ideas ({})", ideas.len())
        }
        _ => "Your saved ideas".to_owned(),
    }
}

fn idea_label(idea: &Idea) -> String {
    format!("{}. {}", idea.id, idea.text)
}

fn row_trigger_label(state: &AppState, id: IdeaId) -> &'static str {
    match state.row_state(id) {
        RowState::Idle => ENRICH_TRIGGER,
        RowState::AwaitingEnrichment => BUSY_TRIGGER,
    }
}

fn notice_lines(state: &AppState) -> Text<'static> {
    state
        .notices
        .iter()
        .map(|notice| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", notice.level.as_str()),
                    notice_style(notice.level).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notice.message.clone()),
            ])
        })
        .collect::<Vec<_>>()
        .into()
}

fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Info => Style::default().fg(Color::Blue),
        NoticeLevel::Warning => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red),
    }
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if state.awaiting.is_some() {
        return BUSY_MESSAGE.to_owned();
    }

    let hints = match state.focus {
        Focus::Input => "enter save | ctrl+u clear | tab ideas | ctrl+q quit",
        Focus::Ideas => "j/k move | enter enhance | tab input | ? help | ctrl+q quit",
    };
    let count = match &view_data.listing {
        IdeaListing::Available(ideas) => format!("{} ideas", ideas.len()),
        IdeaListing::Unavailable => "ideas unavailable".to_owned(),
    };
    format!("{} | {count} | {hints}", state.focus.label().to_uppercase())
}

fn help_overlay_text() -> &'static str {
    "tab        switch between input and ideas\n\
     enter      save the idea (input) or enhance it (ideas)\n\
     e          enhance the selected idea\n\
     j/k        move down/up\n\
     g/G        jump to newest/oldest\n\
     ctrl+u     clear the input\n\
     ctrl+q     quit\n\
     esc or ?   close this help"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, ENRICH_TRIGGER, PAGE_TITLE, ViewData, handle_key_event, refresh_view_data,
        render, row_trigger_label, status_text,
    };
    use anyhow::{Result, anyhow};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use idealog_app::{
        AppState, BUSY_MESSAGE, EMPTY_LIST_MESSAGE, Focus, Idea, IdeaId, IdeaListing, NoticeLevel,
        RowState,
    };
    use idealog_testkit::listed_ideas;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[derive(Debug, Default)]
    struct TestRuntime {
        ideas: Vec<Idea>,
        next_id: i64,
        insert_calls: usize,
        list_calls: usize,
        enrich_calls: Vec<String>,
        enrich_error: Option<String>,
        fail_schema: bool,
        fail_list: bool,
    }

    impl TestRuntime {
        fn with_ideas(texts: &[&str]) -> Self {
            let mut runtime = Self::default();
            for text in texts {
                runtime.push(text);
            }
            runtime
        }

        fn push(&mut self, text: &str) -> IdeaId {
            self.next_id += 1;
            let id = IdeaId::new(self.next_id);
            self.ideas.push(Idea {
                id,
                text: text.to_owned(),
            });
            id
        }
    }

    impl AppRuntime for TestRuntime {
        fn ensure_schema(&mut self) -> Result<()> {
            if self.fail_schema {
                return Err(anyhow!("disk I/O error"));
            }
            Ok(())
        }

        fn insert_idea(&mut self, text: &str) -> Result<IdeaId> {
            self.insert_calls += 1;
            Ok(self.push(text))
        }

        fn list_ideas(&mut self) -> Result<Vec<Idea>> {
            self.list_calls += 1;
            if self.fail_list {
                return Err(anyhow!("list ideas: no such table: ideas"));
            }
            let mut ideas = self.ideas.clone();
            ideas.reverse();
            Ok(ideas)
        }

        fn enrich_idea(&mut self, text: &str) -> Result<String> {
            self.enrich_calls.push(text.to_owned());
            match &self.enrich_error {
                Some(error) => Err(anyhow!(error.clone())),
                None => Ok(format!("1. Headline about {text}")),
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        event: KeyEvent,
    ) -> bool {
        let mut redraw = |_: &AppState, _: &ViewData| -> Result<()> { Ok(()) };
        handle_key_event(state, runtime, view_data, event, &mut redraw)
            .expect("key handling should succeed")
    }

    fn type_text(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        text: &str,
    ) {
        for ch in text.chars() {
            press(state, runtime, view_data, key(KeyCode::Char(ch)));
        }
    }

    fn loaded(runtime: &mut TestRuntime) -> (AppState, ViewData) {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        refresh_view_data(&mut state, runtime, &mut view_data);
        (state, view_data)
    }

    fn rendered(state: &AppState, view_data: &ViewData) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, state, view_data))
            .expect("draw should succeed");
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn blank_save_never_inserts() {
        let mut runtime = TestRuntime::with_ideas(&["A"]);
        let (mut state, mut view_data) = loaded(&mut runtime);

        type_text(&mut state, &mut runtime, &mut view_data, "   ");
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));

        assert_eq!(runtime.insert_calls, 0);
        assert_eq!(view_data.listing.len(), 1);
        assert_eq!(state.notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn save_inserts_clears_input_and_lists_newest_first() {
        let mut runtime = TestRuntime::with_ideas(&["Older"]);
        let (mut state, mut view_data) = loaded(&mut runtime);

        type_text(&mut state, &mut runtime, &mut view_data, "  Launch a podcast ");
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));

        assert_eq!(runtime.insert_calls, 1);
        assert!(state.input.is_empty());
        assert_eq!(state.notices[0].level, NoticeLevel::Success);
        let texts = view_data
            .listing
            .ideas()
            .iter()
            .map(|idea| idea.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["Launch a podcast", "Older"]);
    }

    #[test]
    fn typing_does_not_clear_notices_or_requery() {
        let mut runtime = TestRuntime::default();
        let (mut state, mut view_data) = loaded(&mut runtime);

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));
        let lists_after_save = runtime.list_calls;
        type_text(&mut state, &mut runtime, &mut view_data, "x");
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.input, "x");
        assert_eq!(runtime.list_calls, lists_after_save);
    }

    #[test]
    fn enrich_draws_busy_row_before_calling_runtime() -> Result<()> {
        let mut runtime = TestRuntime::with_ideas(&["A", "B"]);
        let (mut state, mut view_data) = loaded(&mut runtime);
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));

        let mut busy_frames = Vec::new();
        handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            key(KeyCode::Enter),
            &mut |state: &AppState, view_data: &ViewData| -> Result<()> {
                let selected = view_data.listing.ideas()[state.selected_row].id;
                busy_frames.push(state.row_state(selected));
                assert_eq!(status_text(state, view_data), BUSY_MESSAGE);
                Ok(())
            },
        )?;

        assert_eq!(busy_frames, vec![RowState::AwaitingEnrichment]);
        assert_eq!(runtime.enrich_calls, vec!["B".to_owned()]);
        let panel = state.panel.as_ref().ok_or_else(|| anyhow!("panel expected"))?;
        assert_eq!(panel.title(), "Suggestions for 'B':");
        assert_eq!(panel.suggestions, "1. Headline about B");
        assert_eq!(state.awaiting, None);
        Ok(())
    }

    #[test]
    fn enrich_failure_shows_error_and_leaves_store_alone() {
        let mut runtime = TestRuntime::with_ideas(&["A"]);
        runtime.enrich_error = Some("server error (401): Incorrect API key provided".to_owned());
        let (mut state, mut view_data) = loaded(&mut runtime);

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('e')));

        assert!(state.panel.is_none());
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
        assert!(state.notices[0].message.contains("Incorrect API key"));
        assert_eq!(runtime.insert_calls, 0);
        assert_eq!(runtime.ideas.len(), 1);
        assert_eq!(row_trigger_label(&state, IdeaId::new(1)), ENRICH_TRIGGER);
    }

    #[test]
    fn enrich_on_empty_list_does_nothing() {
        let mut runtime = TestRuntime::default();
        let (mut state, mut view_data) = loaded(&mut runtime);

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));
        assert!(runtime.enrich_calls.is_empty());
        assert!(state.notices.is_empty());
    }

    #[test]
    fn listing_failure_marks_listing_unavailable() {
        let mut runtime = TestRuntime::with_ideas(&["A"]);
        runtime.fail_list = true;
        let (state, view_data) = loaded(&mut runtime);

        assert_eq!(view_data.listing, IdeaListing::Unavailable);
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
        assert!(state.notices[0].message.contains("no such table"));
        assert!(status_text(&state, &view_data).contains("ideas unavailable"));
    }

    #[test]
    fn schema_failure_skips_listing() {
        let mut runtime = TestRuntime::with_ideas(&["A"]);
        runtime.fail_schema = true;
        let (state, view_data) = loaded(&mut runtime);

        assert_eq!(view_data.listing, IdeaListing::Unavailable);
        assert!(state.notices[0].message.contains("disk I/O error"));
    }

    #[test]
    fn keys_route_by_focus() {
        let mut runtime = TestRuntime::with_ideas(&["A", "B", "C"]);
        let (mut state, mut view_data) = loaded(&mut runtime);

        type_text(&mut state, &mut runtime, &mut view_data, "jk");
        assert_eq!(state.input, "jk");
        assert_eq!(state.selected_row, 0);

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        assert_eq!(state.focus, Focus::Ideas);
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('j')));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('j')));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('j')));
        assert_eq!(state.selected_row, 2);
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('g')));
        assert_eq!(state.selected_row, 0);
        assert_eq!(state.input, "jk");

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Esc));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut runtime = TestRuntime::with_ideas(&["A"]);
        let (mut state, mut view_data) = loaded(&mut runtime);

        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Char('?')));
        assert!(view_data.help_visible);
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));
        assert!(runtime.enrich_calls.is_empty());
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Esc));
        assert!(!view_data.help_visible);
        assert_eq!(state.focus, Focus::Ideas);
    }

    #[test]
    fn ctrl_q_quits_from_any_focus() {
        let mut runtime = TestRuntime::default();
        let (mut state, mut view_data) = loaded(&mut runtime);
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);

        assert!(press(&mut state, &mut runtime, &mut view_data, quit));
        assert!(state.input.is_empty());
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        assert!(press(&mut state, &mut runtime, &mut view_data, quit));
    }

    #[test]
    fn render_shows_placeholder_for_empty_journal() {
        let mut runtime = TestRuntime::default();
        let (state, view_data) = loaded(&mut runtime);

        let screen = rendered(&state, &view_data);
        assert!(screen.contains("Idea Journal with AI"));
        assert!(screen.contains("Add a new idea"));
        assert!(screen.contains("Your saved ideas"));
        assert!(screen.contains(EMPTY_LIST_MESSAGE));
        assert!(PAGE_TITLE.starts_with("Idea Journal"));
    }

    #[test]
    fn render_lists_rows_with_triggers_and_panel() {
        let mut runtime = TestRuntime::with_ideas(&["Write an ebook", "Launch a podcast"]);
        let (mut state, mut view_data) = loaded(&mut runtime);
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Tab));
        press(&mut state, &mut runtime, &mut view_data, key(KeyCode::Enter));

        let screen = rendered(&state, &view_data);
        assert!(screen.contains("2. Launch a podcast"));
        assert!(screen.contains("1. Write an ebook"));
        assert!(screen.contains(ENRICH_TRIGGER));
        assert!(!screen.contains("working"));
        assert!(screen.contains("Suggestions for 'Launch a podcast':"));
        assert!(screen.contains("1. Headline about Launch a podcast"));
    }

    #[test]
    fn render_marks_awaiting_row_busy() {
        let ideas = listed_ideas(&["Write an ebook", "Launch a podcast"]);
        let view_data = ViewData {
            listing: IdeaListing::Available(ideas),
            help_visible: false,
        };
        let state = AppState {
            awaiting: Some(IdeaId::new(1)),
            ..AppState::default()
        };

        assert_eq!(row_trigger_label(&state, IdeaId::new(2)), ENRICH_TRIGGER);
        let screen = rendered(&state, &view_data);
        assert!(screen.contains("working"));
        assert!(screen.contains(BUSY_MESSAGE));
        assert!(screen.contains("Your saved ideas (2)"));
    }
}
