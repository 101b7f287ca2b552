/// Thread list body as returned by `GET /users/{user_id}/chats/`.
pub fn threads_fixture() -> &'static str {
    return r#"
[
    { "chat_id": 1, "user_id": 1, "created_at": "2024-01-01 09:30:00.123456" },
    { "chat_id": 2, "user_id": 1, "created_at": "2024-02-14 18:02:11" }
]
"#
    .trim();
}

/// Transcript body as returned by `GET /chats/{chat_id}/messages/`. Uses the
/// backend's `message_id` naming and upper case bot sender.
pub fn messages_fixture() -> &'static str {
    return r#"
[
    { "message_id": 1, "chat_id": 7, "sender": "user", "text": "Hello there", "timestamp": "2024-01-01 09:31:00" },
    { "message_id": 2, "chat_id": 7, "sender": "BOT", "text": "Hello!", "timestamp": "2024-01-01 09:31:00" },
    { "message_id": 3, "chat_id": 7, "sender": "user", "text": "How are you?", "timestamp": "2024-01-01 09:32:00" },
    { "message_id": 4, "chat_id": 7, "sender": "BOT", "text": "Tell me more!", "timestamp": "2024-01-01 09:32:00" }
]
"#
    .trim();
}

/// Body returned by `POST /messages/` for the text "hi".
pub fn message_pair_fixture() -> &'static str {
    return r#"
{
    "user_message": { "id": 1, "chat_id": 7, "sender": "user", "text": "hi", "timestamp": "2024-01-01 10:00:00" },
    "bot_message": { "id": 2, "chat_id": 7, "sender": "bot", "text": "hello!", "timestamp": "2024-01-01 10:00:00" }
}
"#
    .trim();
}
