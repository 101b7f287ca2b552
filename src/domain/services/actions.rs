#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ThreadCreation;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::LoadTicket;
use crate::domain::models::SendTicket;
use crate::domain::models::Sender;
use crate::domain::models::TransportArc;
use crate::domain::models::ViewId;

async fn load_thread_list(
    transport: TransportArc,
    tx: mpsc::UnboundedSender<Event>,
    view_id: ViewId,
) -> Result<()> {
    let user = transport.get_current_user().await;
    let user_id = user.as_ref().ok().map(|user| {
        return user.id;
    });
    tx.send(Event::CurrentUserResolved(view_id, user))?;

    // Without a user there is nothing to list.
    if let Some(user_id) = user_id {
        let threads = transport.list_threads(user_id).await;
        tx.send(Event::ThreadsListed(view_id, threads))?;
    }

    return Ok(());
}

async fn create_thread(
    transport: TransportArc,
    tx: mpsc::UnboundedSender<Event>,
    view_id: ViewId,
    user_id: i64,
) -> Result<()> {
    let res = ThreadCreation::create_and_open(transport.as_ref(), user_id).await;
    tx.send(Event::ThreadCreated(view_id, res))?;

    return Ok(());
}

async fn load_messages(
    transport: TransportArc,
    tx: mpsc::UnboundedSender<Event>,
    view_id: ViewId,
    ticket: LoadTicket,
) -> Result<()> {
    let res = transport.get_messages(&ticket.chat_id).await;
    tx.send(Event::MessagesLoaded(view_id, ticket, res))?;

    return Ok(());
}

async fn send_message(
    transport: TransportArc,
    tx: mpsc::UnboundedSender<Event>,
    view_id: ViewId,
    ticket: SendTicket,
) -> Result<()> {
    let res = transport
        .send_message(&ticket.chat_id, Sender::User, &ticket.text)
        .await;
    tx.send(Event::MessageSent(view_id, ticket, res))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every action as its own task so a slow send never blocks a load
    /// issued after it. Returns once the UI drops its end of the channel.
    pub async fn start(
        transport: TransportArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(action = ?action, "Received action");

            let worker_transport = transport.clone();
            let worker_tx = tx.clone();
            tokio::spawn(async move {
                let res = match action {
                    Action::LoadThreadList(view_id) => {
                        load_thread_list(worker_transport, worker_tx, view_id).await
                    }
                    Action::CreateThread(view_id, user_id) => {
                        create_thread(worker_transport, worker_tx, view_id, user_id).await
                    }
                    Action::LoadMessages(view_id, ticket) => {
                        load_messages(worker_transport, worker_tx, view_id, ticket).await
                    }
                    Action::SendMessage(view_id, ticket) => {
                        send_message(worker_transport, worker_tx, view_id, ticket).await
                    }
                };

                // The UI has gone away, nobody is left to tell.
                if let Err(err) = res {
                    tracing::debug!(error = ?err, "Dropped action result");
                }
            });
        }

        return Ok(());
    }
}
