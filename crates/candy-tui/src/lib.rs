// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod display;

pub use display::*;

use anyhow::{Context, Result};
use candy_app::{AppCommand, AppEvent, AppState, Dataset};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const KEY_HINTS: &str = "tab/shift-tab move  enter activate  l legend  q quit";

pub trait AppRuntime {
    fn load_dataset(&mut self) -> Result<Dataset>;

    /// Runs the dataset load and reports the outcome on `tx`. Runtimes that
    /// can move their loader to another thread should override this so the
    /// first frame is drawn before the response arrives.
    fn spawn_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let event = match self.load_dataset() {
            Ok(dataset) => InternalEvent::DatasetLoaded(dataset),
            Err(error) => InternalEvent::DatasetFailed(format!("{error:#}")),
        };
        tx.send(event)
            .map_err(|_| anyhow::anyhow!("load event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    DatasetLoaded(Dataset),
    DatasetFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ViewData {
    focus: usize,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    let (internal_tx, internal_rx) = mpsc::channel();
    if let Err(error) = runtime.spawn_load(internal_tx.clone()) {
        warn!("dataset load could not start: {error:#}");
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(state, view_data, tx, event);
    }
}

fn handle_internal_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    event: InternalEvent,
) {
    match event {
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            state.dispatch(AppCommand::ClearStatus);
        }
        InternalEvent::ClearStatus { .. } => {}
        InternalEvent::DatasetLoaded(dataset) => {
            info!(
                lines = dataset.rows.len(),
                columns = dataset.headers.len(),
                "dataset loaded"
            );
            dispatch(state, view_data, tx, AppCommand::DataLoaded(dataset));
            let shown = state.visible_rows().len();
            emit_status(state, view_data, tx, format!("loaded {shown} rows"));
        }
        InternalEvent::DatasetFailed(error) => {
            // The table stays empty; failures are only logged.
            warn!(%error, "dataset fetch failed");
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    clamp_focus(state, view_data);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => {
            move_focus(state, view_data, 1);
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => {
            move_focus(state, view_data, -1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(intent) = focused_intent(state, view_data) {
                debug!(?intent, "activate");
                dispatch(state, view_data, internal_tx, intent.command());
            }
        }
        KeyCode::Char('l') => {
            dispatch(state, view_data, internal_tx, Intent::ToggleLegend.command());
        }
        _ => {}
    }
    false
}

fn focused_intent(state: &AppState, view_data: &ViewData) -> Option<Intent> {
    let screen = present(state);
    screen
        .targets()
        .get(view_data.focus)
        .map(|target| target.intent.clone())
}

fn move_focus(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let len = present(state).targets().len() as isize;
    if len == 0 {
        view_data.focus = 0;
        return;
    }
    view_data.focus = (view_data.focus as isize + delta).rem_euclid(len) as usize;
}

fn clamp_focus(state: &AppState, view_data: &mut ViewData) {
    let len = present(state).targets().len();
    if view_data.focus >= len {
        view_data.focus = len.saturating_sub(1);
    }
}

/// Identity, not equality: a CSV may repeat a header name, and only the
/// focused cell may light up.
fn is_focused_target(focused: Option<&Target>, target: &Target) -> bool {
    focused.is_some_and(|focused| std::ptr::eq(focused, target))
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let screen = present(state);
    let targets = screen.targets();
    let focused = targets.get(view_data.focus).copied();
    let is_focused = |target: &Target| is_focused_target(focused, target);

    let legend_height = screen
        .legend
        .as_ref()
        .map_or(1, |entries| entries.len() as u16 + 1);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(legend_height),
            Constraint::Length(screen.filters.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let intro = Paragraph::new(vec![
        Line::from(screen.blurb.text),
        Line::from(vec![
            Span::raw(screen.blurb.link.label),
            Span::raw(": "),
            Span::styled(
                screen.blurb.link.url,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().title(screen.title).borders(Borders::ALL));
    frame.render_widget(intro, layout[0]);

    render_legend(frame, layout[1], &screen, &is_focused);
    render_filters(frame, layout[2], &screen, &is_focused);
    frame.render_widget(Paragraph::new(hidden_headers_line(&screen, &is_focused)), layout[3]);
    render_table(frame, layout[4], &screen, &is_focused);

    let status = screen.status.as_deref().unwrap_or(KEY_HINTS);
    let status_widget = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[5]);
}

fn target_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_legend(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    is_focused: &dyn Fn(&Target) -> bool,
) {
    let toggle = &screen.legend_toggle;
    let marker = if screen.legend.is_some() { "▼" } else { "▶" };
    let mut lines = vec![Line::from(Span::styled(
        format!("{marker} {}", toggle.label),
        target_style(is_focused(toggle)),
    ))];
    if let Some(entries) = &screen.legend {
        lines.extend(entries.iter().map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<18}", entry.column),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.meaning),
            ])
        }));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_filters(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    is_focused: &dyn Fn(&Target) -> bool,
) {
    let rows = screen.filters.iter().map(|group| {
        let mut cells = vec![Cell::from(group.column.clone())];
        cells.extend(group.chips.iter().map(|chip| {
            let mark = if chip.active { "[x]" } else { "[ ]" };
            let mut style = target_style(is_focused(&chip.target));
            if chip.active {
                style = style.add_modifier(Modifier::BOLD);
                if !is_focused(&chip.target) {
                    style = style.fg(Color::Cyan);
                }
            }
            Cell::from(format!("{mark} {}", chip.target.label)).style(style)
        }));
        Row::new(cells)
    });

    let widths = [
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .column_spacing(1)
        .block(Block::default().title("filters").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Sort targets for columns that are not displayed. They stay addressable but
/// are drawn with the hidden modifier unless focused.
fn hidden_headers_line<'a>(screen: &'a Screen, is_focused: &dyn Fn(&Target) -> bool) -> Line<'a> {
    let mut spans = Vec::new();
    for header in screen.table.hidden_headers() {
        let focused = is_focused(&header.target);
        let style = if focused {
            target_style(true)
        } else {
            Style::default().add_modifier(Modifier::HIDDEN)
        };
        spans.push(Span::styled(header.target.label.as_str(), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &Screen,
    is_focused: &dyn Fn(&Target) -> bool,
) {
    let table_view = &screen.table;
    let header_cells = table_view.columns.iter().map(|column| {
        let Some(header) = table_view.header(column) else {
            return Cell::from(*column).style(Style::default().fg(Color::DarkGray));
        };
        let style = if is_focused(&header.target) {
            target_style(true)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        Cell::from(header.target.label.clone()).style(style)
    });
    let header = Row::new(header_cells);

    let rows = table_view
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(|value| Cell::from(value.as_str()))));

    let widths = [
        Constraint::Min(24),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(table_view))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn table_title(table_view: &TableView) -> String {
    let sorted = table_view
        .headers
        .iter()
        .find_map(|header| header.sort.map(|direction| (&header.column, direction)));
    match sorted {
        Some((column, direction)) => format!(
            "{} rows · sorted by {column} {}",
            table_view.rows.len(),
            direction.as_str()
        ),
        None => format!("{} rows", table_view.rows.len()),
    }
}
