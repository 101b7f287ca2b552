use super::Bubble;
use crate::domain::models::Message;
use crate::domain::models::Sender;

fn message(sender: Sender, text: &str, timestamp: &str) -> Message {
    return Message {
        id: 1,
        chat_id: None,
        sender,
        text: text.to_string(),
        timestamp: timestamp.to_string(),
    };
}

fn create_lines(message: &Message, width: usize) -> Vec<String> {
    return Bubble::new(message, width)
        .as_lines()
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("");
        })
        .collect::<Vec<String>>();
}

#[test]
fn it_creates_bot_bubble_on_the_left() {
    let msg = message(Sender::Bot, "Hi there!", "2024-01-01 10:00:00");
    let lines = create_lines(&msg, 50);
    let padding = " ".repeat(23);

    assert_eq!(
        lines,
        vec![
            format!("╭Bot{}╮{padding}", "─".repeat(18)),
            format!("│ Hi there!{} │{padding}", " ".repeat(10)),
            format!("│ 2024-01-01 10:00:00 │{padding}"),
            format!("╰{}╯{padding}", "─".repeat(21)),
        ]
    );
}

#[test]
fn it_creates_user_bubble_on_the_right() {
    let msg = message(Sender::User, "hi", "2024-01-01 10:00:00");
    let lines = create_lines(&msg, 50);
    let padding = " ".repeat(23);

    assert_eq!(
        lines,
        vec![
            format!("{padding}╭You{}╮", "─".repeat(18)),
            format!("{padding}│ hi{} │", " ".repeat(17)),
            format!("{padding}│ 2024-01-01 10:00:00 │"),
            format!("{padding}╰{}╯", "─".repeat(21)),
        ]
    );
}

#[test]
fn it_fits_the_title_for_tiny_messages() {
    let msg = message(Sender::Bot, "k", "");
    let lines = create_lines(&msg, 20);

    assert_eq!(lines[0].trim_end(), "╭Bot──╮");
    assert_eq!(lines[1].trim_end(), "│ k   │");
    assert_eq!(lines.len(), 3);
}

#[test]
fn it_wraps_long_text_within_the_window() {
    let msg = message(
        Sender::Bot,
        "This is a rather long reply from the bot that wraps",
        "",
    );
    let lines = create_lines(&msg, 40);

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("│ This is a rather long reply from "));
    assert!(lines[2].starts_with("│ the bot that wraps "));
    for line in lines {
        assert_eq!(line.chars().count(), 37);
    }
}
