pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod chat_session;
pub mod events;
mod scroll;
mod thread_creation;
mod thread_list;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_session::*;
pub use scroll::*;
pub use thread_creation::*;
pub use thread_list::*;
