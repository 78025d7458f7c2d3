//! Message assembly

use uuid::Uuid;

use crate::domain::email::{
    addresses::Address,
    config::ServerConfig,
    errors::BuildError,
    message::{AlternateView, AssembledMessage},
    request::EmailRequest,
    template,
};

/// Assembles an [`AssembledMessage`] from a [`ServerConfig`] and an
/// [`EmailRequest`]
///
/// Pure apart from generating a fresh Message-ID per call. All failures here
/// occur before any transport activity.
#[derive(Debug)]
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a ready-to-send message
    ///
    /// # Arguments
    /// * `config` - The shared server configuration, supplying the default
    ///   sender identity and reply-to.
    /// * `request` - The send request.
    ///
    /// # Returns
    /// A [`Result`] with the [`AssembledMessage`], or a [`BuildError`] if an
    /// address is malformed or the template cannot be resolved.
    pub fn build(
        config: &ServerConfig,
        request: &EmailRequest,
    ) -> Result<AssembledMessage, BuildError> {
        let from = match &request.from {
            Some(from) => from.clone(),
            None => Address::new(config.from_name.as_deref(), &config.from_address)?,
        };

        let reply_to = config
            .reply_to
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(Address::parse)
            .transpose()?;

        // notification requests ride on the reply-to address
        let disposition_notification_to =
            reply_to.as_ref().map(|r| r.address().to_string());

        Ok(AssembledMessage {
            message_id: Uuid::new_v4().to_string(),
            from,
            reply_to,
            disposition_notification_to,
            to: request.to.clone(),
            cc: request.cc.clone(),
            bcc: request.bcc.clone(),
            subject: request.subject.clone(),
            priority: request.priority.into(),
            views: Self::build_views(request)?,
            attachments: request.attachments.clone(),
        })
    }

    /// Produce the body views for the two modes
    ///
    /// Raw mode wraps the request body as a single alternate view, HTML or
    /// plain per the request flag, with any linked resources attached to the
    /// HTML view. Template mode resolves and renders the template; the result
    /// is always HTML.
    fn build_views(request: &EmailRequest) -> Result<Vec<AlternateView>, BuildError> {
        if !request.use_template {
            let view = if request.is_html {
                AlternateView::html(request.body.clone(), request.resources.clone())
            } else {
                AlternateView::plain(request.body.clone())
            };

            return Ok(vec![view]);
        }

        let source = request.template.as_ref().ok_or(BuildError::MissingTemplate)?;
        let text = template::resolve(source)?;
        let rendered = template::render(&text, &request.variables);

        Ok(vec![AlternateView::html(rendered, request.resources.clone())])
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use super::*;
    use crate::domain::email::{
        message::ViewKind,
        priority::{Priority, TransportPriority},
        request::{TemplateSource, TemplateVariable},
    };

    fn config() -> ServerConfig {
        ServerConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            use_ssl: true,
            from_address: "noreply@example.com".to_string(),
            from_name: Some("Notifier".to_string()),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_raw_html_request_assembles_single_html_view() -> TestResult {
        let request = EmailRequest {
            to: vec![Address::parse("a@b.com")?],
            subject: "Hi".to_string(),
            body: "<p>hello</p>".to_string(),
            is_html: true,
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        assert_eq!(format!("{}", message.from), "Notifier <noreply@example.com>");
        assert_eq!(message.views.len(), 1);

        let view = message.html_view().expect("html view");
        assert_eq!(view.content, "<p>hello</p>");
        assert_eq!(message.priority, TransportPriority::High);

        Ok(())
    }

    #[test]
    fn test_request_from_overrides_config_default() -> TestResult {
        let request = EmailRequest {
            from: Some(Address::new(Some("Override"), "me@else.com")?),
            to: vec![Address::parse("a@b.com")?],
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        assert_eq!(message.from.address(), "me@else.com");
        assert_eq!(message.from.display_name(), "Override");

        Ok(())
    }

    #[test]
    fn test_absent_from_uses_config_identity() -> TestResult {
        let message = MessageBuilder::build(&config(), &EmailRequest::default())?;

        assert_eq!(message.from.address(), "noreply@example.com");
        assert_eq!(message.from.display_name(), "Notifier");

        Ok(())
    }

    #[test]
    fn test_message_ids_are_unique_per_build() -> TestResult {
        let first = MessageBuilder::build(&config(), &EmailRequest::default())?;
        let second = MessageBuilder::build(&config(), &EmailRequest::default())?;

        assert_ne!(first.message_id, second.message_id);

        Ok(())
    }

    #[test]
    fn test_notification_headers_only_with_reply_to() -> TestResult {
        let without = MessageBuilder::build(&config(), &EmailRequest::default())?;
        assert!(without.reply_to.is_none());
        assert!(without.disposition_notification_to.is_none());

        let mut with_reply_to = config();
        with_reply_to.reply_to = Some("replies@example.com".to_string());

        let with = MessageBuilder::build(&with_reply_to, &EmailRequest::default())?;
        assert_eq!(
            with.reply_to.as_ref().map(Address::address),
            Some("replies@example.com")
        );
        assert_eq!(
            with.disposition_notification_to.as_deref(),
            Some("replies@example.com")
        );

        Ok(())
    }

    #[test]
    fn test_recipients_copied_in_order() -> TestResult {
        let request = EmailRequest {
            to: vec![Address::parse("a@b.com")?, Address::parse("c@d.com")?],
            cc: vec![Address::parse("e@f.com")?],
            bcc: vec![Address::parse("g@h.com")?],
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        assert_eq!(message.to, request.to);
        assert_eq!(message.cc, request.cc);
        assert_eq!(message.bcc, request.bcc);

        Ok(())
    }

    #[test]
    fn test_plain_body_becomes_plain_view() -> TestResult {
        let request = EmailRequest {
            body: "hello".to_string(),
            is_html: false,
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        let view = message.plain_view().expect("plain view");
        assert_eq!(view.kind, ViewKind::Plain);
        assert_eq!(view.content, "hello");
        assert!(message.html_view().is_none());

        Ok(())
    }

    #[test]
    fn test_low_priority_maps_to_low() -> TestResult {
        let request = EmailRequest {
            priority: Priority::Low,
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        assert_eq!(message.priority, TransportPriority::Low);

        Ok(())
    }

    #[test]
    fn test_template_mode_renders_inline_template() -> TestResult {
        let request = EmailRequest {
            use_template: true,
            template: Some(TemplateSource::Inline(
                "Hello {{name}}, your code is {{code}}".to_string(),
            )),
            variables: vec![
                TemplateVariable::new("name", "Sam"),
                TemplateVariable::new("code", "42"),
            ],
            ..EmailRequest::default()
        };

        let message = MessageBuilder::build(&config(), &request)?;

        let view = message.html_view().expect("template output is html");
        assert_eq!(view.content, "Hello Sam, your code is 42");

        Ok(())
    }

    #[test]
    fn test_template_mode_without_source_fails() {
        let request = EmailRequest {
            use_template: true,
            ..EmailRequest::default()
        };

        let result = MessageBuilder::build(&config(), &request);

        assert!(matches!(result, Err(BuildError::MissingTemplate)));
    }

    #[test]
    fn test_template_mode_with_missing_file_fails() {
        let request = EmailRequest {
            use_template: true,
            template: Some(TemplateSource::File(PathBuf::from(
                "/nonexistent/welcome.html",
            ))),
            ..EmailRequest::default()
        };

        let result = MessageBuilder::build(&config(), &request);

        assert!(matches!(result, Err(BuildError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_attachments_carried_without_validation() -> TestResult {
        let request = EmailRequest {
            attachments: vec![PathBuf::from("/nonexistent/report.pdf")],
            ..EmailRequest::default()
        };

        // existence is the transport's concern, not the builder's
        let message = MessageBuilder::build(&config(), &request)?;

        assert_eq!(message.attachments, request.attachments);

        Ok(())
    }
}
