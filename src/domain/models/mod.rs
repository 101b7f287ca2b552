mod action;
mod event;
mod fetch_error;
mod loading;
mod message;
mod route;
mod sender;
mod session;
mod textarea;
mod thread;
mod transport;
mod user;

pub use action::*;
pub use event::*;
pub use fetch_error::*;
pub use loading::*;
pub use message::*;
pub use route::*;
pub use sender::*;
pub use session::*;
pub use textarea::*;
pub use thread::*;
pub use transport::*;
pub use user::*;
