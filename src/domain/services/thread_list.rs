#[cfg(test)]
#[path = "thread_list_test.rs"]
mod tests;

use crate::domain::models::ChatId;
use crate::domain::models::ChatTransport;
use crate::domain::models::FetchError;
use crate::domain::models::Thread;
use crate::domain::models::User;

/// Displayed both when the user has no threads and when listing them failed.
pub const EMPTY_THREADS_TEXT: &str = "You don't have any existing threads...";
pub const NEW_THREAD_TEXT: &str = "Start a new chat";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThreadListState {
    LoadingUser,
    LoadingThreads { user: User },
    Ready { user: User, threads: Vec<Thread> },
    Unavailable { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThreadListEntry {
    NewThread,
    Existing(ChatId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListLineKind {
    Heading,
    Entry { selected: bool },
    Notice,
    Spacer,
}

pub struct ListLine {
    pub text: String,
    pub kind: ListLineKind,
}

impl ListLine {
    fn new(text: &str, kind: ListLineKind) -> ListLine {
        return ListLine {
            text: text.to_string(),
            kind,
        };
    }
}

pub struct ThreadList {
    state: ThreadListState,
    selected: usize,
    creating: bool,
}

impl Default for ThreadList {
    fn default() -> ThreadList {
        return ThreadList {
            state: ThreadListState::LoadingUser,
            selected: 0,
            creating: false,
        };
    }
}

impl ThreadList {
    pub fn state(&self) -> &ThreadListState {
        return &self.state;
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            ThreadListState::LoadingThreads { user } => return Some(user),
            ThreadListState::Ready { user, .. } => return Some(user),
            _ => return None,
        }
    }

    pub fn threads(&self) -> &[Thread] {
        if let ThreadListState::Ready { threads, .. } = &self.state {
            return threads;
        }

        return &[];
    }

    pub fn apply_user(&mut self, res: Result<User, FetchError>) {
        if self.state != ThreadListState::LoadingUser {
            return;
        }

        match res {
            Ok(user) => {
                self.state = ThreadListState::LoadingThreads { user };
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to resolve the current user");
                self.state = ThreadListState::Unavailable {
                    reason: err.to_string(),
                };
            }
        }
    }

    /// `None` means listing failed. It lands in the same state as an empty
    /// list.
    pub fn apply_threads(&mut self, threads: Option<Vec<Thread>>) {
        let user = match &self.state {
            ThreadListState::LoadingThreads { user } => user.clone(),
            _ => return,
        };

        self.state = ThreadListState::Ready {
            user,
            threads: threads.unwrap_or_default(),
        };
        self.selected = 0;
    }

    /// Runs the whole load to completion against `transport`.
    pub async fn load(&mut self, transport: &dyn ChatTransport) {
        self.apply_user(transport.get_current_user().await);

        if let Some(user_id) = self.user().map(|user| return user.id) {
            let threads = transport.list_threads(user_id).await;
            self.apply_threads(threads);
        }
    }

    fn entries_len(&self) -> usize {
        return self.threads().len() + 1;
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        return self.selected;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries_len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<ThreadListEntry> {
        if !matches!(self.state, ThreadListState::Ready { .. }) {
            return None;
        }

        if self.selected == 0 {
            return Some(ThreadListEntry::NewThread);
        }

        return self
            .threads()
            .get(self.selected - 1)
            .map(|thread| return ThreadListEntry::Existing(thread.chat_id.clone()));
    }

    /// Marks a thread creation as in flight and returns the user to create it
    /// for. Returns `None` while one is already pending or no user is known.
    pub fn begin_create(&mut self) -> Option<i64> {
        if self.creating {
            return None;
        }

        let user_id = self.user().map(|user| return user.id)?;
        self.creating = true;

        return Some(user_id);
    }

    pub fn finish_create(&mut self) {
        self.creating = false;
    }

    pub fn is_creating(&self) -> bool {
        return self.creating;
    }

    pub fn as_lines(&self) -> Vec<ListLine> {
        let user = match &self.state {
            ThreadListState::LoadingUser => {
                return vec![ListLine::new("Loading...", ListLineKind::Notice)];
            }
            ThreadListState::Unavailable { reason } => {
                return vec![
                    ListLine::new("Unable to reach the chat backend.", ListLineKind::Heading),
                    ListLine::new("", ListLineKind::Spacer),
                    ListLine::new(reason, ListLineKind::Notice),
                ];
            }
            ThreadListState::LoadingThreads { user } => user,
            ThreadListState::Ready { user, .. } => user,
        };

        let mut lines = vec![
            ListLine::new(&format!("Hello, {}", user.name), ListLineKind::Heading),
            ListLine::new("", ListLineKind::Spacer),
        ];

        if matches!(self.state, ThreadListState::LoadingThreads { .. }) {
            lines.push(ListLine::new("Loading threads...", ListLineKind::Notice));
            return lines;
        }

        let mut new_thread_text = NEW_THREAD_TEXT.to_string();
        if self.creating {
            new_thread_text = format!("{NEW_THREAD_TEXT} (creating...)");
        }
        lines.push(ListLine::new(
            &new_thread_text,
            ListLineKind::Entry {
                selected: self.selected == 0,
            },
        ));
        lines.push(ListLine::new("", ListLineKind::Spacer));
        lines.push(ListLine::new("Existing chat threads", ListLineKind::Heading));

        if self.threads().is_empty() {
            lines.push(ListLine::new(EMPTY_THREADS_TEXT, ListLineKind::Notice));
            return lines;
        }

        for (idx, thread) in self.threads().iter().enumerate() {
            lines.push(ListLine::new(
                &thread.summary(),
                ListLineKind::Entry {
                    selected: self.selected == idx + 1,
                },
            ));
        }

        return lines;
    }
}
