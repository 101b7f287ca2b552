#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Sender;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

impl BubbleAlignment {
    pub fn for_sender(sender: Sender) -> BubbleAlignment {
        if sender == Sender::User {
            return BubbleAlignment::Right;
        }

        return BubbleAlignment::Left;
    }
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, total: usize, subtractions: &[usize]) -> String {
    let count = subtractions
        .iter()
        .fold(total, |acc, e| return acc.saturating_sub(*e));

    return text.repeat(count);
}

fn text_len(text: &str) -> usize {
    return text.chars().count();
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment: BubbleAlignment::for_sender(message.sender),
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();

        let mut lines = self
            .message
            .as_string_lines(max_line_length)
            .into_iter()
            .map(|line| {
                return self.text_to_line(line, Style::default(), max_line_length);
            })
            .collect::<Vec<Line<'static>>>();

        if !self.message.timestamp.is_empty() {
            lines.push(self.text_to_line(
                self.message.timestamp.to_string(),
                Style {
                    fg: Some(Color::DarkGray),
                    ..Style::default()
                },
                max_line_length,
            ));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn text_to_line(&self, text: String, style: Style, max_line_length: usize) -> Line<'static> {
        let fill = repeat_from_subtractions(" ", max_line_length, &[text_len(&text)]);
        let outer_bubble_padding = repeat_from_subtractions(
            " ",
            self.window_max_width,
            &[max_line_length, Bubble::style_config().bubble_padding],
        );

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::styled(text, style),
            self.highlight_span(format!("{fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_bubble_padding));
            return Line::from(spans);
        }

        spans.insert(0, Span::from(outer_bubble_padding));
        return Line::from(spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width);

        let mut max_line_length = self
            .message
            .text
            .replace('\t', "  ")
            .lines()
            .map(text_len)
            .max()
            .unwrap_or(0)
            .max(text_len(&self.message.timestamp));

        if max_line_length > available {
            max_line_length = available;
        }

        let title_len = text_len(self.message.sender.title());
        if max_line_length < title_len {
            max_line_length = title_len;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let title = self.message.sender.title();
        // Add 2 for the inner padding, minus what the title takes up.
        let top_bar = format!(
            "╭{title}{}╮",
            "─".repeat((max_line_length + 2).saturating_sub(text_len(title)))
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            self.window_max_width,
            &[max_line_length, Bubble::style_config().bubble_padding],
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.sender == Sender::User {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Blue),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
