//! Domain name validation.
//!
//! # Responsibilities
//! - Reject input that cannot be used as a filesystem path segment
//! - Enforce a restrictive hostname grammar
//! - Normalize accepted input (trim, lowercase)
//!
//! # Design Decisions
//! - Path traversal characters are checked before the grammar so the
//!   caller can distinguish hostile input from merely malformed input
//! - Whole-string grammar only; per-label DNS rules are the resolver's
//!   problem, not ours

use serde::Serialize;
use thiserror::Error;

/// Standard hostname length ceiling.
const MAX_DOMAIN_LEN: usize = 253;

/// A validated, normalized hostname.
///
/// Safe to interpolate into paths and config files. Construct via
/// [`validate`] only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors for rejected domain input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty after trimming.
    #[error("domain is empty")]
    Empty,

    /// Input violates the hostname grammar.
    #[error("domain {0:?} is not a valid hostname")]
    InvalidFormat(String),

    /// Input contains characters that would escape the target directory.
    #[error("domain {0:?} contains path separators")]
    PathTraversal(String),
}

/// Validate an operator-supplied domain string.
///
/// Returns the trimmed, lowercased domain on success. This is the single
/// trust boundary for everything downstream that builds paths or config
/// content from the domain.
pub fn validate(raw: &str) -> Result<Domain, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    if trimmed.contains(['/', '\\', '\0']) {
        return Err(ValidationError::PathTraversal(trimmed.to_string()));
    }

    let well_formed = trimmed.len() <= MAX_DOMAIN_LEN
        && !trimmed.starts_with(['.', '-'])
        && !trimmed.ends_with(['.', '-'])
        && !trimmed.contains("..")
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if !well_formed {
        return Err(ValidationError::InvalidFormat(trimmed.to_string()));
    }

    Ok(Domain(trimmed.to_ascii_lowercase()))
}
