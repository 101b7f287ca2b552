use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Route;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatSession;
use crate::domain::services::ListLineKind;
use crate::domain::services::Screen;
use crate::domain::services::ThreadList;

fn render_thread_list<B: Backend>(frame: &mut Frame<B>, list: &ThreadList) {
    let mut title = "threadchat".to_string();
    if list.is_creating() {
        title = "threadchat - starting a new chat...".to_string();
    }

    let lines = list
        .as_lines()
        .into_iter()
        .map(|line| {
            let style = match line.kind {
                ListLineKind::Heading => Style::default().add_modifier(Modifier::BOLD),
                ListLineKind::Entry { selected: true } => {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                }
                ListLineKind::Entry { selected: false } => Style::default(),
                ListLineKind::Notice | ListLineKind::Spacer => Style::default().fg(Color::DarkGray),
            };

            let prefix = match line.kind {
                ListLineKind::Entry { selected: true } => "> ",
                ListLineKind::Entry { selected: false } => "  ",
                _ => "",
            };

            return Line::from(Span::styled(format!("{prefix}{}", line.text), style));
        })
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title)
                .padding(Padding::new(1, 1, 1, 0)),
        ),
        frame.size(),
    );
}

fn render_chat_session<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState<'_>,
    session_sending: bool,
    title: String,
) {
    let loading = Loading::new("Sending...");
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Max(4),
        ])
        .split(frame.size());

    if layout[1].width != app_state.last_known_width
        || layout[1].height != app_state.last_known_height
    {
        app_state.set_rect(layout[1]);
    }

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("  (esc: threads)", Style::default().fg(Color::DarkGray)),
        ])),
        layout[0],
    );

    app_state
        .bubble_list
        .render(frame, layout[1], app_state.scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[1].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );

    if session_sending {
        loading.render(frame, layout[2]);
    } else {
        frame.render_widget(app_state.textarea.widget(), layout[2]);
    }
}

fn session_header(session: &ChatSession) -> (bool, String) {
    return (
        session.is_sending(),
        format!("Chat {}", session.chat_id()),
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let header = match &app_state.screen {
                Screen::ThreadList(list) => {
                    render_thread_list(frame, list);
                    None
                }
                Screen::ChatSession(session) => Some(session_header(session)),
            };

            if let Some((sending, title)) = header {
                render_chat_session(frame, app_state, sending, title);
            }
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    route: Route,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut events = EventsService::new(rx);
    let mut app_state = AppState::new(route, &tx)?;
    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
