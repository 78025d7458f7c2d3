#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line email sender

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use mail_courier::{
    domain::email::{
        addresses::Address,
        config::ServerConfig,
        dispatcher::Dispatcher,
        outcome::SendOutcome,
        request::{EmailRequest, TemplateSource, TemplateVariable},
    },
    infrastructure::email::smtp::SmtpTransport,
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The SMTP server configuration
    #[clap(flatten)]
    pub config: ServerConfig,

    /// Recipient address, repeatable
    #[clap(long, required = true)]
    pub to: Vec<String>,

    /// Subject line
    #[clap(long)]
    pub subject: String,

    /// HTML body, ignored when a template is given
    #[clap(long, default_value = "")]
    pub body: String,

    /// Template file; selects template mode
    #[clap(long)]
    pub template: Option<PathBuf>,

    /// Template variable as name=value, repeatable
    #[clap(long = "var")]
    pub variables: Vec<String>,

    /// Correlation token for the send
    #[clap(long, default_value = "cli")]
    pub state_id: String,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let to = args
        .to
        .iter()
        .map(|a| Address::parse(a))
        .collect::<Result<Vec<_>, _>>()?;

    let variables = args
        .variables
        .iter()
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
            TemplateVariable::new(name, value)
        })
        .collect();

    let request = EmailRequest {
        to,
        subject: args.subject,
        body: args.body,
        state_id: args.state_id,
        use_template: args.template.is_some(),
        template: args.template.map(TemplateSource::File),
        variables,
        ..EmailRequest::default()
    };

    let transport = SmtpTransport::new(&args.config)?;
    let dispatcher = Dispatcher::new(args.config, transport);
    let mut outcomes = dispatcher.outcomes();

    let message = dispatcher.send(&request).await?;
    tracing::info!(message_id = %message.message_id, "submitted");

    match outcomes.recv().await?.outcome {
        SendOutcome::Sent => Ok(()),
        SendOutcome::Failed(detail) => Err(anyhow!("delivery failed: {detail}")),
        SendOutcome::Cancelled => Err(anyhow!("delivery cancelled")),
    }
}
