use super::ChatId;

/// Screen the UI can navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    ThreadList,
    ChatSession(ChatId),
}

/// Identifies one navigation to a screen. Results of requests issued by an
/// earlier navigation carry an older id and are discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn next(&self) -> ViewId {
        return ViewId(self.0 + 1);
    }
}
