//! Error types for assembly and dispatch

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::email::addresses::AddressError;

/// An error raised while assembling a message, before any transport activity
#[derive(Debug, Error)]
pub enum BuildError {
    /// Template mode was selected but no template source was supplied
    #[error("template mode selected without a template source")]
    MissingTemplate,

    /// The template file could not be read
    #[error("template not found: {path}")]
    TemplateNotFound {
        /// Path that failed to resolve
        path: PathBuf,

        /// Underlying filesystem error
        #[source]
        source: io::Error,
    },

    /// A configured or requested address is malformed
    #[error(transparent)]
    Address(#[from] AddressError),
}

/// An error raised while configuring the transport or handing a message over
///
/// Always caller-visible; logged and re-raised unchanged.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The transport could not be configured or connected
    #[error("transport configuration failed")]
    Connect(#[source] anyhow::Error),

    /// The transport refused the submission
    #[error("submission rejected")]
    Rejected(#[source] anyhow::Error),
}

/// An error returned synchronously from a dispatch call
///
/// Failures occurring after the transport has accepted the submission are
/// never surfaced here; they arrive as completion records instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Message assembly failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Submission to the transport failed
    #[error(transparent)]
    Submit(#[from] SubmitError),
}
