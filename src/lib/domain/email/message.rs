//! Assembled, ready-to-send message

use std::path::PathBuf;

use crate::domain::email::{
    addresses::Address, priority::TransportPriority, request::LinkedResource,
};

/// Body representation kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// `text/plain`, UTF-8
    Plain,

    /// `text/html`, UTF-8
    Html,
}

/// One alternate body representation of a message
#[derive(Clone, Debug)]
pub struct AlternateView {
    /// Content kind of this view
    pub kind: ViewKind,

    /// Body text
    pub content: String,

    /// Inline resources attached to this view
    pub resources: Vec<LinkedResource>,
}

impl AlternateView {
    /// A plain-text view with no inline resources
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: ViewKind::Plain,
            content: content.into(),
            resources: Vec::new(),
        }
    }

    /// An HTML view with the given inline resources
    pub fn html(content: impl Into<String>, resources: Vec<LinkedResource>) -> Self {
        Self {
            kind: ViewKind::Html,
            content: content.into(),
            resources,
        }
    }
}

/// The fully resolved output of message assembly
///
/// Owned by the call that produced it; each send gets its own instance and a
/// freshly generated `message_id`.
#[derive(Clone, Debug)]
pub struct AssembledMessage {
    /// Generated globally-unique Message-ID header value
    pub message_id: String,

    /// Resolved sender identity
    pub from: Address,

    /// Reply-To, present only when configured
    pub reply_to: Option<Address>,

    /// Disposition-Notification-To header value, present only when a
    /// reply-to address is configured
    pub disposition_notification_to: Option<String>,

    /// Primary recipients, in request order
    pub to: Vec<Address>,

    /// Carbon-copy recipients, in request order
    pub cc: Vec<Address>,

    /// Blind-carbon-copy recipients, in request order
    pub bcc: Vec<Address>,

    /// Subject line
    pub subject: String,

    /// Priority mapped to the transport's levels
    pub priority: TransportPriority,

    /// Alternate body representations
    pub views: Vec<AlternateView>,

    /// File attachments by path
    pub attachments: Vec<PathBuf>,
}

impl AssembledMessage {
    /// The HTML view, if the message carries one
    pub fn html_view(&self) -> Option<&AlternateView> {
        self.views.iter().find(|v| v.kind == ViewKind::Html)
    }

    /// The plain-text view, if the message carries one
    pub fn plain_view(&self) -> Option<&AlternateView> {
        self.views.iter().find(|v| v.kind == ViewKind::Plain)
    }
}
