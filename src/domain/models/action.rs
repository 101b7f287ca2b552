use super::LoadTicket;
use super::SendTicket;
use super::ViewId;

/// Requests from the UI to the background actions service.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    LoadThreadList(ViewId),
    CreateThread(ViewId, i64),
    LoadMessages(ViewId, LoadTicket),
    SendMessage(ViewId, SendTicket),
}
