//! `{name}` placeholder templates for provider keys and URLs.

use crate::error::{MapError, MapResult};

/// List the placeholder names in a template, in order of appearance.
pub fn placeholders(template: &str) -> MapResult<Vec<&str>> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| MapError::UnterminatedPlaceholder(template.to_string()))?;
        names.push(&after[..close]);
        rest = &after[close + 1..];
    }

    Ok(names)
}

/// Replace every `{name}` with `lookup(name)`.
///
/// Fails on the first placeholder the lookup does not know.
pub fn fill<F>(template: &str, lookup: F) -> MapResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| MapError::UnterminatedPlaceholder(template.to_string()))?;
        let name = &after[..close];
        let value = lookup(name).ok_or_else(|| MapError::UnknownPlaceholder(name.to_string()))?;
        out.push_str(&value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
