//! Template resolution and placeholder substitution

use std::fs;

use crate::domain::email::{
    errors::BuildError,
    request::{TemplateSource, TemplateVariable},
};

/// Resolve a template source to its text
///
/// A file source is read eagerly; a missing or unreadable file is a
/// [`BuildError::TemplateNotFound`], raised before any transport activity.
pub fn resolve(source: &TemplateSource) -> Result<String, BuildError> {
    match source {
        TemplateSource::Inline(text) => Ok(text.clone()),
        TemplateSource::File(path) => {
            fs::read_to_string(path).map_err(|source| BuildError::TemplateNotFound {
                path: path.clone(),
                source,
            })
        }
    }
}

/// Substitute `{{name}}` placeholders in one pass over the variable list
///
/// Each variable replaces every remaining occurrence of its placeholder.
/// Substitution is not recursive; unmatched placeholders are left untouched.
/// With duplicate names, the earlier variable consumes the occurrences first.
pub fn render(template: &str, variables: &[TemplateVariable]) -> String {
    let mut rendered = template.to_string();

    for variable in variables {
        let placeholder = format!("{{{{{}}}}}", variable.name);
        rendered = rendered.replace(&placeholder, &variable.value);
    }

    rendered
}
