//! `{placeholder}` tokens in configuration values.
//!
//! Values like `coastDat2_de_{year}.h5` are deferred-substitution
//! templates. The loader never fills them in; consuming code calls
//! [`render`] with explicit substitutions at use time.

use crate::error::{EndatError, EndatResult};

/// The placeholder names of a value, in order of first appearance.
///
/// Unbalanced braces and empty token names are errors.
pub fn placeholders(value: &str) -> EndatResult<Vec<String>> {
    let mut tokens: Vec<String> = Vec::new();
    let mut rest = value;
    loop {
        match rest.find(['{', '}']) {
            None => break,
            Some(idx) if rest.as_bytes()[idx] == b'}' => {
                return Err(EndatError::Template(format!(
                    "unbalanced \"}}\" in \"{value}\""
                )));
            }
            Some(idx) => {
                let after = &rest[idx + 1..];
                let end = after.find('}').ok_or_else(|| {
                    EndatError::Template(format!("unbalanced \"{{\" in \"{value}\""))
                })?;
                let name = &after[..end];
                if name.is_empty() || name.contains('{') {
                    return Err(EndatError::Template(format!(
                        "malformed placeholder in \"{value}\""
                    )));
                }
                if !tokens.iter().any(|t| t == name) {
                    tokens.push(name.to_string());
                }
                rest = &after[end + 1..];
            }
        }
    }
    Ok(tokens)
}

/// Fill every placeholder of `value` from `substitutions`.
///
/// A placeholder without a substitution is an error; the loader-side
/// guarantee that tokens are preserved verbatim makes this the single
/// place where substitution happens.
pub fn render(value: &str, substitutions: &[(&str, &str)]) -> EndatResult<String> {
    let tokens = placeholders(value)?;
    let mut out = value.to_string();
    for token in tokens {
        let substitution = substitutions
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, sub)| *sub)
            .ok_or_else(|| {
                EndatError::Template(format!("no substitution for placeholder \"{{{token}}}\""))
            })?;
        out = out.replace(&format!("{{{token}}}"), substitution);
    }
    Ok(out)
}
