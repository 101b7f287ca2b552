#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::BubbleList;
use super::ChatSession;
use super::Scroll;
use super::ThreadList;
use super::ThreadListEntry;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Route;
use crate::domain::models::TextArea;
use crate::domain::models::ViewId;

pub enum Screen {
    ThreadList(ThreadList),
    ChatSession(ChatSession),
}

/// Everything the UI draws, plus the id of the current navigation. Results
/// tagged with any other id belong to a screen that is gone and are dropped.
pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub screen: Screen,
    pub scroll: Scroll,
    pub textarea: tui_textarea::TextArea<'a>,
    pub view_id: ViewId,
}

impl<'a> AppState<'a> {
    pub fn new(route: Route, tx: &mpsc::UnboundedSender<Action>) -> Result<AppState<'a>> {
        let mut app_state = AppState {
            bubble_list: BubbleList::default(),
            last_known_height: 0,
            last_known_width: 0,
            screen: Screen::ThreadList(ThreadList::default()),
            scroll: Scroll::default(),
            textarea: TextArea::default(),
            view_id: ViewId::default(),
        };

        app_state.navigate(route, tx)?;

        return Ok(app_state);
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::ThreadList(_) => return Route::ThreadList,
            Screen::ChatSession(session) => return Route::ChatSession(session.chat_id().clone()),
        }
    }

    /// Mounts the screen for `route` and requests its data.
    pub fn navigate(&mut self, route: Route, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tracing::debug!(route = ?route, "Navigating");

        self.view_id = self.view_id.next();
        self.bubble_list = BubbleList::default();
        self.scroll = Scroll::default();
        self.textarea = TextArea::default();

        match route {
            Route::ThreadList => {
                self.screen = Screen::ThreadList(ThreadList::default());
                tx.send(Action::LoadThreadList(self.view_id))?;
            }
            Route::ChatSession(chat_id) => {
                let ticket = match &mut self.screen {
                    Screen::ChatSession(session) => session.open(chat_id),
                    Screen::ThreadList(_) => {
                        let session = ChatSession::new(chat_id);
                        let ticket = session.begin_load();
                        self.screen = Screen::ChatSession(session);
                        ticket
                    }
                };
                tx.send(Action::LoadMessages(self.view_id, ticket))?;
            }
        }

        self.sync_dependants();

        return Ok(());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn is_current(&self, view_id: ViewId) -> bool {
        if view_id != self.view_id {
            tracing::debug!(
                view_id = ?view_id,
                current = ?self.view_id,
                route = ?self.route(),
                "Dropping result for a closed view"
            );
            return false;
        }

        return true;
    }

    fn sync_dependants(&mut self) {
        if let Screen::ChatSession(session) = &self.screen {
            self.bubble_list
                .set_messages(session.transcript(), self.last_known_width as usize);
            let line_count = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
            self.scroll.set_state(line_count, self.last_known_height);
        }
    }

    fn sync_draft(&mut self) {
        let contents = TextArea::contents(&self.textarea);
        if let Screen::ChatSession(session) = &mut self.screen {
            session.set_draft(&contents);
        }
    }

    fn handle_enter(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let view_id = self.view_id;
        self.sync_draft();

        let entry = match &mut self.screen {
            Screen::ThreadList(list) => list.selected_entry(),
            Screen::ChatSession(session) => {
                if let Some(ticket) = session.begin_send() {
                    tx.send(Action::SendMessage(view_id, ticket))?;
                }
                return Ok(());
            }
        };

        match entry {
            Some(ThreadListEntry::NewThread) => {
                if let Screen::ThreadList(list) = &mut self.screen {
                    if let Some(user_id) = list.begin_create() {
                        tx.send(Action::CreateThread(view_id, user_id))?;
                    }
                }
            }
            Some(ThreadListEntry::Existing(chat_id)) => {
                self.navigate(Route::ChatSession(chat_id), tx)?;
            }
            None => {}
        }

        return Ok(());
    }

    fn handle_scroll(&mut self, step: i8) {
        match &mut self.screen {
            Screen::ThreadList(list) => {
                if step < 0 {
                    list.select_previous();
                } else {
                    list.select_next();
                }
            }
            Screen::ChatSession(_) => match step {
                -1 => self.scroll.up(),
                1 => self.scroll.down(),
                step if step < 0 => self.scroll.up_page(),
                _ => self.scroll.down_page(),
            },
        }
    }

    /// Applies one event. Returns true when the app should exit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::CurrentUserResolved(view_id, res) => {
                if let (true, Screen::ThreadList(list)) = (self.is_current(view_id), &mut self.screen) {
                    list.apply_user(res);
                }
            }
            Event::ThreadsListed(view_id, threads) => {
                if let (true, Screen::ThreadList(list)) = (self.is_current(view_id), &mut self.screen) {
                    list.apply_threads(threads);
                }
            }
            Event::ThreadCreated(view_id, res) => {
                if !self.is_current(view_id) {
                    return Ok(false);
                }
                if let Screen::ThreadList(list) = &mut self.screen {
                    list.finish_create();
                }
                // Failures were logged already; the user can retry.
                if let Ok(route) = res {
                    self.navigate(route, tx)?;
                }
            }
            Event::MessagesLoaded(view_id, ticket, res) => {
                if let (true, Screen::ChatSession(session)) = (self.is_current(view_id), &mut self.screen) {
                    if session.apply_load(ticket, res) {
                        self.sync_dependants();
                    }
                }
            }
            Event::MessageSent(view_id, ticket, res) => {
                if let (true, Screen::ChatSession(session)) = (self.is_current(view_id), &mut self.screen) {
                    if session.apply_send(ticket, res) {
                        if session.draft().is_empty() {
                            self.textarea = TextArea::default();
                        }
                        self.sync_dependants();
                        self.scroll.last();
                    }
                }
            }
            Event::KeyboardCTRLC() => {
                return Ok(true);
            }
            Event::KeyboardEnter() => {
                self.handle_enter(tx)?;
            }
            Event::KeyboardEsc() => {
                if let Screen::ChatSession(_) = self.screen {
                    self.navigate(Route::ThreadList, tx)?;
                }
            }
            Event::KeyboardCharInput(input) => match &self.screen {
                Screen::ThreadList(_) => {
                    if let Input {
                        key: Key::Char('q'),
                        ctrl: false,
                        alt: false,
                    } = input
                    {
                        return Ok(true);
                    }
                }
                Screen::ChatSession(session) => {
                    if !session.is_sending() {
                        self.textarea.input(input);
                        self.sync_draft();
                    }
                }
            },
            Event::KeyboardPaste(text) => {
                if let Screen::ChatSession(session) = &self.screen {
                    if !session.is_sending() {
                        for char in text.chars() {
                            if char == '\n' {
                                self.textarea.insert_newline();
                            } else if char != '\r' {
                                self.textarea.insert_char(char);
                            }
                        }
                        self.sync_draft();
                    }
                }
            }
            Event::UIScrollUp() => self.handle_scroll(-1),
            Event::UIScrollDown() => self.handle_scroll(1),
            Event::UIScrollPageUp() => self.handle_scroll(-2),
            Event::UIScrollPageDown() => self.handle_scroll(2),
            Event::UIResize() | Event::UITick() => {}
        }

        return Ok(false);
    }
}
