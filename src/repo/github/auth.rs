use crate::error::{Error, Result};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Resolve the bearer token from `GITHUB_TOKEN`.
///
/// `lookup` stands in for the process environment so callers decide where
/// values come from.
pub fn resolve_github_token(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let Some(raw) = lookup(TOKEN_ENV) else {
        return Err(Error::Config(format!("{TOKEN_ENV} is required")));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Config(format!(
            "{TOKEN_ENV} is empty after trimming; please re-export"
        )));
    }
    Ok(trimmed.to_string())
}
