//! SMTP server configuration

use clap::Parser;

/// SMTP server configuration
///
/// Loaded once at startup and shared read-only by every send.
#[derive(Clone, Default, Debug, Parser)]
pub struct ServerConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT", default_value = "25")]
    pub port: u16,

    /// The SMTP username; when absent, the transport authenticates with the
    /// ambient identity of the environment (no AUTH)
    #[clap(long, env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// Enable TLS upgrade on connection (STARTTLS)
    #[clap(long, env = "SMTP_USE_SSL", default_value = "true")]
    pub use_ssl: bool,

    /// Overrides the TLS peer name expected from the server, for
    /// authenticated-relay setups where it differs from the host
    #[clap(long, env = "SMTP_TARGET_NAME")]
    pub target_name: Option<String>,

    /// Default sender address, used when a request carries no From
    #[clap(long, env = "SMTP_FROM_ADDRESS")]
    pub from_address: String,

    /// Default sender display name
    #[clap(long, env = "SMTP_FROM_NAME")]
    pub from_name: Option<String>,

    /// Reply-To address; when set, it is also advertised as the
    /// disposition-notification target
    #[clap(long, env = "SMTP_REPLY_TO")]
    pub reply_to: Option<String>,
}

impl ServerConfig {
    /// Whether explicit credentials were configured
    pub fn has_credentials(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
    }
}
