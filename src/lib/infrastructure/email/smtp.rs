//! SMTP transport implementation over lettre

use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{
        header::{ContentType, Header, HeaderName, HeaderValue},
        Attachment, Body, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::email::{
    addresses::Address,
    config::ServerConfig,
    errors::SubmitError,
    message::{AlternateView, AssembledMessage, ViewKind},
    outcome::{Completion, SendOutcome},
    transport::Transport,
};

/// `X-Priority` header
#[derive(Clone)]
struct XPriority(String);

impl Header for XPriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Priority")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// `Disposition-Notification-To` header
#[derive(Clone)]
struct DispositionNotificationTo(String);

impl Header for DispositionNotificationTo {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Disposition-Notification-To")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.to_string()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// SMTP transport
///
/// Submissions are accepted immediately; each delivery runs on its own tokio
/// task and reports exactly one completion. After [`SmtpTransport::shutdown`],
/// deliveries that have not started report [`SendOutcome::Cancelled`].
#[derive(Clone)]
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    shutdown: Arc<AtomicBool>,
}

impl std::fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("shutdown", &self.shutdown.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SmtpTransport {
    /// Create a transport from the server configuration
    ///
    /// With `use_ssl`, the connection is upgraded via STARTTLS; otherwise it
    /// stays plaintext. Without explicit credentials the transport uses the
    /// ambient identity of the environment and attempts no AUTH. A configured
    /// `target_name` replaces the host as the expected TLS peer name.
    pub fn new(config: &ServerConfig) -> Result<Self, SubmitError> {
        let mut builder = if config.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| SubmitError::Connect(e.into()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);

        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone().unwrap_or_default(),
                config.password.clone().unwrap_or_default(),
            ));
        }

        if config.use_ssl {
            if let Some(target) = config.target_name.as_deref().filter(|t| !t.is_empty()) {
                let params = TlsParameters::new(target.to_string())
                    .map_err(|e| SubmitError::Connect(e.into()))?;
                builder = builder.tls(Tls::Required(params));
            }
        }

        Ok(Self {
            mailer: builder.build(),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Cancel deliveries that have not yet started
    ///
    /// In-flight SMTP exchanges run to completion; pending tasks report
    /// [`SendOutcome::Cancelled`].
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn submit(
        &self,
        message: AssembledMessage,
        token: String,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Result<(), SubmitError> {
        let mailer = self.mailer.clone();
        let shutdown = Arc::clone(&self.shutdown);

        debug!(token = %token, message_id = %message.message_id, "submission accepted");

        tokio::spawn(async move {
            let outcome = if shutdown.load(Ordering::SeqCst) {
                SendOutcome::Cancelled
            } else {
                match deliver(&mailer, &message).await {
                    Ok(()) => SendOutcome::Sent,
                    Err(e) => SendOutcome::Failed(format!("{e:#}")),
                }
            };

            // the dispatcher may already be gone during teardown
            let _ = completions.send(Completion::new(token, outcome));
        });

        Ok(())
    }
}

async fn deliver(
    mailer: &AsyncSmtpTransport<Tokio1Executor>,
    message: &AssembledMessage,
) -> anyhow::Result<()> {
    let email = render(message).await?;
    mailer.send(email).await.context("smtp delivery failed")?;

    Ok(())
}

/// Render the assembled message into a MIME message
async fn render(message: &AssembledMessage) -> anyhow::Result<Message> {
    let mut builder = Message::builder()
        .message_id(Some(message.message_id.clone()))
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone())
        .header(XPriority(message.priority.x_priority().to_string()));

    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    if let Some(target) = &message.disposition_notification_to {
        builder = builder.header(DispositionNotificationTo(target.clone()));
    }

    for address in &message.to {
        builder = builder.to(mailbox(address)?);
    }

    for address in &message.cc {
        builder = builder.cc(mailbox(address)?);
    }

    for address in &message.bcc {
        builder = builder.bcc(mailbox(address)?);
    }

    Ok(builder.multipart(body(message).await?)?)
}

/// Alternates nested under multipart/mixed when attachments are present
async fn body(message: &AssembledMessage) -> anyhow::Result<MultiPart> {
    let mut alternative = MultiPart::alternative().build();

    for view in &message.views {
        alternative = attach_view(alternative, view).await?;
    }

    if message.attachments.is_empty() {
        return Ok(alternative);
    }

    let mut mixed = MultiPart::mixed().multipart(alternative);

    for path in &message.attachments {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("attachment not readable: {}", path.display()))?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        mixed = mixed.singlepart(
            Attachment::new(filename).body(Body::new(bytes), content_type(path)?),
        );
    }

    Ok(mixed)
}

/// One alternate view; linked resources nest the view under multipart/related
async fn attach_view(alternative: MultiPart, view: &AlternateView) -> anyhow::Result<MultiPart> {
    let part = match view.kind {
        ViewKind::Html => SinglePart::html(view.content.clone()),
        ViewKind::Plain => SinglePart::plain(view.content.clone()),
    };

    if view.resources.is_empty() {
        return Ok(alternative.singlepart(part));
    }

    let mut related = MultiPart::related().singlepart(part);

    for resource in &view.resources {
        let bytes = tokio::fs::read(&resource.path)
            .await
            .with_context(|| {
                format!("linked resource not readable: {}", resource.path.display())
            })?;

        related = related.singlepart(
            Attachment::new_inline(resource.content_id.clone())
                .body(Body::new(bytes), content_type(&resource.path)?),
        );
    }

    Ok(alternative.multipart(related))
}

fn mailbox(address: &Address) -> anyhow::Result<Mailbox> {
    let parsed = address
        .address()
        .parse::<lettre::Address>()
        .with_context(|| format!("malformed address: {}", address.address()))?;

    Ok(Mailbox::new(Some(address.display_name().to_string()), parsed))
}

fn content_type(path: &Path) -> anyhow::Result<ContentType> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("htm" | "html") => "text/html",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    };

    ContentType::parse(mime).map_err(|e| anyhow::anyhow!("invalid content type {mime}: {e}"))
}
