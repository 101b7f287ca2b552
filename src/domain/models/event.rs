use tui_textarea::Input;

use super::FetchError;
use super::LoadTicket;
use super::Message;
use super::MessagePair;
use super::Route;
use super::SendTicket;
use super::Thread;
use super::User;
use super::ViewId;

pub enum Event {
    CurrentUserResolved(ViewId, Result<User, FetchError>),
    ThreadsListed(ViewId, Option<Vec<Thread>>),
    ThreadCreated(ViewId, Result<Route, FetchError>),
    MessagesLoaded(ViewId, LoadTicket, Result<Vec<Message>, FetchError>),
    MessageSent(ViewId, SendTicket, Result<MessagePair, FetchError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
