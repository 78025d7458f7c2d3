//! Transport capability

use async_trait::async_trait;
use tokio::sync::mpsc;

#[cfg(test)]
use mockall::mock;

use crate::domain::email::{
    errors::SubmitError, message::AssembledMessage, outcome::Completion,
};

/// Delivery transport for assembled messages
///
/// `submit` returns once the submission is accepted; delivery continues on the
/// transport's own execution context. The transport sends exactly one
/// [`Completion`] carrying `token` on `completions`, strictly after `submit`
/// has returned. No ordering holds between completions of distinct
/// submissions.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Hand a message to the transport for delivery
    ///
    /// # Arguments
    /// * `message` - The assembled message to deliver.
    /// * `token` - Opaque correlation token echoed in the completion record.
    /// * `completions` - Channel the completion record is delivered on.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the submission is accepted, or an
    /// [`Err`] containing a [`SubmitError`] if the transport could not be
    /// configured or refused the handoff.
    async fn submit(
        &self,
        message: AssembledMessage,
        token: String,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Result<(), SubmitError>;
}

#[cfg(test)]
mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn submit(
            &self,
            message: AssembledMessage,
            token: String,
            completions: mpsc::UnboundedSender<Completion>,
        ) -> Result<(), SubmitError>;
    }
}
