use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use crate::domain::models::Message;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

pub const EMPTY_TRANSCRIPT_TEXT: &str = "No messages yet.";

struct BubbleCacheEntry<'a> {
    text_len: usize,
    lines: Vec<Line<'a>>,
}

/// Renders a transcript as bubbles, caching each message's lines by id until
/// the window width changes.
pub struct BubbleList<'a> {
    cache: HashMap<i64, BubbleCacheEntry<'a>>,
    line_width: usize,
    lines: Vec<Line<'a>>,
}

impl<'a> Default for BubbleList<'a> {
    fn default() -> BubbleList<'a> {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines: vec![],
        };
    }
}

impl<'a> BubbleList<'a> {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        if messages.is_empty() {
            self.lines = vec![Line::from(Span::styled(
                EMPTY_TRANSCRIPT_TEXT,
                Style {
                    fg: Some(Color::DarkGray),
                    ..Style::default()
                },
            ))];
            return;
        }

        let mut lines = vec![];
        for message in messages {
            let cached = self
                .cache
                .get(&message.id)
                .filter(|entry| return entry.text_len == message.text.len());

            if let Some(entry) = cached {
                lines.extend(entry.lines.iter().cloned());
                continue;
            }

            let bubble_lines = Bubble::new(message, line_width).as_lines();
            lines.extend(bubble_lines.iter().cloned());
            self.cache.insert(
                message.id,
                BubbleCacheEntry {
                    text_len: message.text.len(),
                    lines: bubble_lines,
                },
            );
        }

        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
