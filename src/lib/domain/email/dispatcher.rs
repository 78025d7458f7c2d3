//! Asynchronous send lifecycle

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::domain::email::{
    builder::MessageBuilder,
    config::ServerConfig,
    errors::DispatchError,
    message::AssembledMessage,
    outcome::{Completion, SendOutcome},
    request::EmailRequest,
    transport::Transport,
};

/// Capacity of the outcome broadcast buffer; slow subscribers that lag past
/// this many records miss the oldest ones
const OUTCOME_BUFFER: usize = 64;

/// Fire-and-forget email dispatcher
///
/// A send call returns as soon as the transport accepts the submission;
/// "returned" means submitted, not delivered. The terminal outcome of every
/// accepted submission arrives later as exactly one [`Completion`], logged
/// under its correlation token and forwarded to [`Dispatcher::outcomes`]
/// subscribers.
#[derive(Debug)]
pub struct Dispatcher<T: Transport> {
    config: ServerConfig,
    transport: Arc<T>,
    completions: mpsc::UnboundedSender<Completion>,
    outcomes: broadcast::Sender<Completion>,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher over the given transport
    ///
    /// Spawns the completion loop that turns transport completion records
    /// into log events and broadcast notifications.
    pub fn new(config: ServerConfig, transport: T) -> Self {
        let (completions, rx) = mpsc::unbounded_channel();
        let (outcomes, _) = broadcast::channel(OUTCOME_BUFFER);

        tokio::spawn(Self::completion_loop(rx, outcomes.clone()));

        Self {
            config,
            transport: Arc::new(transport),
            completions,
            outcomes,
        }
    }

    /// Subscribe to completion records for all subsequent sends
    pub fn outcomes(&self) -> broadcast::Receiver<Completion> {
        self.outcomes.subscribe()
    }

    /// Assemble and submit one email
    ///
    /// Assembly and submission errors are logged and returned unchanged;
    /// nothing has been handed to the network when they occur. On [`Ok`], the
    /// message has been accepted by the transport and its outcome will be
    /// reported asynchronously under `request.state_id`.
    ///
    /// # Arguments
    /// * `request` - The send request.
    ///
    /// # Returns
    /// A [`Result`] with the [`AssembledMessage`] that was submitted, or a
    /// [`DispatchError`] if assembly or submission failed.
    pub async fn send(&self, request: &EmailRequest) -> Result<AssembledMessage, DispatchError> {
        debug!(token = %request.state_id, "assembling email");

        let message = MessageBuilder::build(&self.config, request).map_err(|e| {
            error!(token = %request.state_id, error = %e, "message assembly failed");
            e
        })?;

        self.transport
            .submit(
                message.clone(),
                request.state_id.clone(),
                self.completions.clone(),
            )
            .await
            .map_err(|e| {
                error!(token = %request.state_id, error = %e, "submission failed");
                e
            })?;

        debug!(token = %request.state_id, message_id = %message.message_id, "email submitted");

        Ok(message)
    }

    /// Send with template mode forced on
    ///
    /// Convenience over [`Dispatcher::send`] for callers holding a request
    /// with a template source.
    pub async fn send_template(
        &self,
        request: &EmailRequest,
    ) -> Result<AssembledMessage, DispatchError> {
        let mut request = request.clone();
        request.use_template = true;

        self.send(&request).await
    }

    /// One log event per completion record, then fan out to subscribers
    async fn completion_loop(
        mut rx: mpsc::UnboundedReceiver<Completion>,
        outcomes: broadcast::Sender<Completion>,
    ) {
        while let Some(completion) = rx.recv().await {
            match &completion.outcome {
                SendOutcome::Cancelled => {
                    warn!(token = %completion.token, "email send cancelled");
                }
                SendOutcome::Failed(detail) => {
                    error!(token = %completion.token, detail = %detail, "email send failed");
                }
                SendOutcome::Sent => {
                    info!(token = %completion.token, "email sent");
                }
            }

            // send fails only when no subscriber is listening
            let _ = outcomes.send(completion);
        }
    }
}
