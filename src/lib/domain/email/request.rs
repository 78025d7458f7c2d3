//! Send request DTO

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::email::{addresses::Address, priority::Priority};

/// A single `{{name}}` substitution pair for template rendering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Placeholder name, matched as `{{name}}`
    pub name: String,

    /// Replacement value
    pub value: String,
}

impl TemplateVariable {
    /// Create a new template variable
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Where a template body comes from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSource {
    /// Template text supplied inline
    Inline(String),

    /// Template read from a file at build time
    File(PathBuf),
}

/// An inline asset embedded within an HTML body, referenced by content id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedResource {
    /// Content id the HTML references (`cid:` URI)
    pub content_id: String,

    /// Path to the asset on disk; read at send time
    pub path: PathBuf,
}

/// A request to send one email
///
/// Recipient lists may be empty but are never absent. `state_id` is the
/// caller's correlation token: the completion record for this send carries it
/// back, and it is the only way to match an outcome to a request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Sender override; when absent, the configured default identity is used
    pub from: Option<Address>,

    /// Primary recipients
    pub to: Vec<Address>,

    /// Carbon-copy recipients
    pub cc: Vec<Address>,

    /// Blind-carbon-copy recipients
    pub bcc: Vec<Address>,

    /// Subject line
    pub subject: String,

    /// Raw body text, used when not in template mode
    pub body: String,

    /// Whether the raw body is HTML
    pub is_html: bool,

    /// Requested priority
    pub priority: Priority,

    /// Caller-supplied correlation token
    pub state_id: String,

    /// File attachments by path; existence is checked at send time
    pub attachments: Vec<PathBuf>,

    /// Inline resources for the HTML body
    pub resources: Vec<LinkedResource>,

    /// Substitution variables for template mode
    pub variables: Vec<TemplateVariable>,

    /// Template source; required when `use_template` is set
    pub template: Option<TemplateSource>,

    /// Selects template mode over raw-body mode
    pub use_template: bool,
}

impl Default for EmailRequest {
    fn default() -> Self {
        Self {
            from: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: String::new(),
            body: String::new(),
            is_html: true,
            priority: Priority::default(),
            state_id: String::new(),
            attachments: Vec::new(),
            resources: Vec::new(),
            variables: Vec::new(),
            template: None,
            use_template: false,
        }
    }
}
