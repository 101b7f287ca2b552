use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use super::Screen;
use crate::domain::models::Action;
use crate::domain::models::ChatId;
use crate::domain::models::Event;
use crate::domain::models::FetchError;
use crate::domain::models::Message;
use crate::domain::models::MessagePair;
use crate::domain::models::Route;
use crate::domain::models::Sender;
use crate::domain::models::Thread;
use crate::domain::models::User;
use crate::domain::services::ThreadListState;

fn message(id: i64, sender: Sender, text: &str) -> Message {
    return Message {
        id,
        chat_id: Some(ChatId::new("7")),
        sender,
        text: text.to_string(),
        timestamp: "2024-01-01 10:00:00".to_string(),
    };
}

fn pair(user_id: i64, text: &str, reply: &str) -> MessagePair {
    return MessagePair {
        user_message: message(user_id, Sender::User, text),
        bot_message: message(user_id + 1, Sender::Bot, reply),
    };
}

fn char_input(char: char) -> Event {
    return Event::KeyboardCharInput(Input {
        key: Key::Char(char),
        ctrl: false,
        alt: false,
    });
}

fn type_text(
    app_state: &mut AppState<'_>,
    tx: &mpsc::UnboundedSender<Action>,
    text: &str,
) -> Result<()> {
    for char in text.chars() {
        app_state.handle_event(char_input(char), tx)?;
    }

    return Ok(());
}

fn ready_list(app_state: &mut AppState<'_>, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
    let view_id = app_state.view_id;
    app_state.handle_event(
        Event::CurrentUserResolved(
            view_id,
            Ok(User {
                id: 1,
                name: "Ada".to_string(),
            }),
        ),
        tx,
    )?;
    app_state.handle_event(
        Event::ThreadsListed(
            view_id,
            Some(vec![Thread {
                chat_id: ChatId::new("7"),
                created_at: "2024-01-01 09:30:00".to_string(),
                user_id: 1,
            }]),
        ),
        tx,
    )?;

    return Ok(());
}

fn transcript_len(app_state: &AppState<'_>) -> usize {
    match &app_state.screen {
        Screen::ChatSession(session) => return session.transcript().len(),
        Screen::ThreadList(_) => return 0,
    }
}

mod navigation {
    use super::*;

    #[test]
    fn it_requests_thread_list_on_start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let app_state = AppState::new(Route::ThreadList, &tx)?;

        assert_eq!(rx.try_recv()?, Action::LoadThreadList(app_state.view_id));
        assert_eq!(app_state.route(), Route::ThreadList);

        return Ok(());
    }

    #[test]
    fn it_requests_messages_when_opening_chat() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let app_state = AppState::new(Route::ChatSession(ChatId::new("7")), &tx)?;

        match rx.try_recv()? {
            Action::LoadMessages(view_id, ticket) => {
                assert_eq!(view_id, app_state.view_id);
                assert_eq!(ticket.chat_id, ChatId::new("7"));
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_opens_selected_thread() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ThreadList, &tx)?;
        rx.try_recv()?;
        ready_list(&mut app_state, &tx)?;

        app_state.handle_event(Event::UIScrollDown(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(app_state.route(), Route::ChatSession(ChatId::new("7")));
        assert!(matches!(rx.try_recv()?, Action::LoadMessages(_, _)));

        return Ok(());
    }

    #[test]
    fn it_returns_to_list_on_esc() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ChatSession(ChatId::new("7")), &tx)?;
        rx.try_recv()?;

        app_state.handle_event(Event::KeyboardEsc(), &tx)?;

        assert_eq!(app_state.route(), Route::ThreadList);
        assert_eq!(rx.try_recv()?, Action::LoadThreadList(app_state.view_id));

        return Ok(());
    }

    #[test]
    fn it_drops_results_for_closed_views() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ChatSession(ChatId::new("7")), &tx)?;
        let old_view = app_state.view_id;

        app_state.handle_event(Event::KeyboardEsc(), &tx)?;
        app_state.handle_event(Event::KeyboardEsc(), &tx)?;
        app_state.navigate(Route::ChatSession(ChatId::new("7")), &tx)?;
        assert_ne!(app_state.view_id, old_view);

        let ticket = match &app_state.screen {
            Screen::ChatSession(session) => session.begin_load(),
            Screen::ThreadList(_) => bail!("Wrong screen"),
        };
        app_state.handle_event(
            Event::MessagesLoaded(old_view, ticket, Ok(vec![message(1, Sender::User, "old")])),
            &tx,
        )?;

        assert_eq!(transcript_len(&app_state), 0);

        return Ok(());
    }

    #[test]
    fn it_quits_on_q_only_from_list() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut list = AppState::new(Route::ThreadList, &tx)?;
        assert!(list.handle_event(char_input('q'), &tx)?);

        let mut chat = AppState::new(Route::ChatSession(ChatId::new("7")), &tx)?;
        assert!(!chat.handle_event(char_input('q'), &tx)?);
        assert_eq!(chat.textarea.lines().join("\n"), "q");

        assert!(chat.handle_event(Event::KeyboardCTRLC(), &tx)?);

        return Ok(());
    }
}

mod thread_list {
    use super::*;

    #[test]
    fn it_applies_user_and_threads() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ThreadList, &tx)?;
        ready_list(&mut app_state, &tx)?;

        match &app_state.screen {
            Screen::ThreadList(list) => {
                assert!(matches!(list.state(), ThreadListState::Ready { .. }));
                assert_eq!(list.threads().len(), 1);
            }
            Screen::ChatSession(_) => bail!("Wrong screen"),
        }

        return Ok(());
    }

    #[test]
    fn it_creates_thread_once_and_opens_it() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ThreadList, &tx)?;
        rx.try_recv()?;
        ready_list(&mut app_state, &tx)?;
        let view_id = app_state.view_id;

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(rx.try_recv()?, Action::CreateThread(view_id, 1));
        assert!(rx.try_recv().is_err());

        app_state.handle_event(
            Event::ThreadCreated(view_id, Ok(Route::ChatSession(ChatId::new("12")))),
            &tx,
        )?;

        assert_eq!(app_state.route(), Route::ChatSession(ChatId::new("12")));
        assert!(matches!(rx.try_recv()?, Action::LoadMessages(_, _)));

        return Ok(());
    }

    #[test]
    fn it_stays_on_list_when_creation_fails() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(Route::ThreadList, &tx)?;
        rx.try_recv()?;
        ready_list(&mut app_state, &tx)?;
        let view_id = app_state.view_id;

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        rx.try_recv()?;
        app_state.handle_event(
            Event::ThreadCreated(view_id, Err(FetchError::Network("refused".to_string()))),
            &tx,
        )?;

        assert_eq!(app_state.route(), Route::ThreadList);

        // Retry is allowed once the failure came back.
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        assert_eq!(rx.try_recv()?, Action::CreateThread(view_id, 1));

        return Ok(());
    }
}

mod chat_session {
    use super::*;

    fn open_chat(tx: &mpsc::UnboundedSender<Action>) -> Result<AppState<'static>> {
        let mut app_state = AppState::new(Route::ChatSession(ChatId::new("7")), tx)?;
        app_state.set_rect(ratatui::prelude::Rect::new(0, 0, 60, 20));

        return Ok(app_state);
    }

    #[test]
    fn it_sends_typed_draft() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "hi")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        match rx.try_recv()? {
            Action::SendMessage(view_id, ticket) => {
                assert_eq!(view_id, app_state.view_id);
                assert_eq!(ticket.text, "hi");
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_ignores_blank_draft() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "   ")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_locks_input_while_sending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "hi")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "more")?;
        app_state.handle_event(Event::KeyboardPaste("pasted".to_string()), &tx)?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;

        assert_eq!(app_state.textarea.lines().join("\n"), "hi");
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_appends_pair_and_clears_input() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "hi")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        let ticket = match rx.try_recv()? {
            Action::SendMessage(_, ticket) => ticket,
            _ => bail!("Wrong enum"),
        };

        let view_id = app_state.view_id;
        app_state.handle_event(Event::MessageSent(view_id, ticket, Ok(pair(1, "hi", "hello!"))), &tx)?;

        assert_eq!(transcript_len(&app_state), 2);
        assert_eq!(app_state.textarea.lines().join("\n"), "");
        assert_ne!(app_state.bubble_list.len(), 0);

        return Ok(());
    }

    #[test]
    fn it_keeps_draft_when_send_fails() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        rx.try_recv()?;

        type_text(&mut app_state, &tx, "hi")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        let ticket = match rx.try_recv()? {
            Action::SendMessage(_, ticket) => ticket,
            _ => bail!("Wrong enum"),
        };

        let view_id = app_state.view_id;
        app_state.handle_event(
            Event::MessageSent(view_id, ticket, Err(FetchError::Network("timeout".to_string()))),
            &tx,
        )?;

        assert_eq!(transcript_len(&app_state), 0);
        assert_eq!(app_state.textarea.lines().join("\n"), "hi");

        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        assert!(matches!(rx.try_recv()?, Action::SendMessage(_, _)));

        return Ok(());
    }

    #[test]
    fn it_keeps_sent_pair_when_earlier_load_lands() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        let load_ticket = match rx.try_recv()? {
            Action::LoadMessages(_, ticket) => ticket,
            _ => bail!("Wrong enum"),
        };

        type_text(&mut app_state, &tx, "hi")?;
        app_state.handle_event(Event::KeyboardEnter(), &tx)?;
        let send_ticket = match rx.try_recv()? {
            Action::SendMessage(_, ticket) => ticket,
            _ => bail!("Wrong enum"),
        };

        let view_id = app_state.view_id;
        app_state.handle_event(
            Event::MessageSent(view_id, send_ticket, Ok(pair(10, "hi", "hello!"))),
            &tx,
        )?;
        app_state.handle_event(
            Event::MessagesLoaded(
                view_id,
                load_ticket,
                Ok(vec![
                    message(1, Sender::User, "earlier"),
                    message(2, Sender::Bot, "reply"),
                ]),
            ),
            &tx,
        )?;

        assert_eq!(transcript_len(&app_state), 4);

        return Ok(());
    }

    #[test]
    fn it_scrolls_transcript_instead_of_selecting() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        let view_id = app_state.view_id;
        let ticket = match &app_state.screen {
            Screen::ChatSession(session) => session.begin_load(),
            Screen::ThreadList(_) => bail!("Wrong screen"),
        };

        let messages = (0..20)
            .map(|id| return message(id, Sender::Bot, "line"))
            .collect::<Vec<Message>>();
        app_state.handle_event(Event::MessagesLoaded(view_id, ticket, Ok(messages)), &tx)?;

        let bottom = app_state.scroll.position;
        assert!(bottom > 0);

        app_state.handle_event(Event::UIScrollUp(), &tx)?;
        assert_eq!(app_state.scroll.position, bottom - 1);

        return Ok(());
    }

    #[test]
    fn it_saturates_scroll_for_huge_transcripts() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = open_chat(&tx)?;
        let view_id = app_state.view_id;
        let ticket = match &app_state.screen {
            Screen::ChatSession(session) => session.begin_load(),
            Screen::ThreadList(_) => bail!("Wrong screen"),
        };

        // Four rendered lines per message, past what a u16 can count.
        let messages = (0..16_400)
            .map(|id| return message(id, Sender::Bot, "line"))
            .collect::<Vec<Message>>();
        app_state.handle_event(Event::MessagesLoaded(view_id, ticket, Ok(messages)), &tx)?;

        assert!(app_state.bubble_list.len() > usize::from(u16::MAX));
        assert_eq!(app_state.scroll.position, u16::MAX - app_state.last_known_height);

        return Ok(());
    }
}
