#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

/// Vertical scroll position over the transcript. Sticks to the bottom while
/// the user hasn't scrolled up, so new replies stay in view.
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    follow: bool,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Default for Scroll {
    fn default() -> Scroll {
        return Scroll {
            list_length: 0,
            viewport_length: 0,
            follow: true,
            position: 0,
            scrollbar_state: ScrollbarState::default(),
        };
    }
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn page(&self) -> u16 {
        return (self.viewport_length / 2).max(1);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self.scrollbar_state.position(self.position);
        self.follow = self.position == self.max_position();
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.page());
        self.sync_scrollbar();
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn down_page(&mut self) {
        self.position = self
            .position
            .saturating_add(self.page())
            .min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.sync_scrollbar();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);

        if self.follow {
            self.last();
        } else {
            self.position = self.position.min(self.max_position());
            self.sync_scrollbar();
        }
    }
}
