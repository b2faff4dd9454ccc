//! Designator grammar and group-name validation.
//!
//! A designator packs an optional short flag and a mandatory long name into
//! one string: `"v,verbose"` declares short `v` and long `verbose`, whilst
//! `"verbose"` declares the long name alone. The short part, when present,
//! is exactly one ASCII alphanumeric character; long names and group names
//! share the pattern `[a-zA-Z][a-zA-Z0-9_-]*`.

use crate::error::DeclarationError;

/// A designator split into its short-flag and long-name parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designator {
    /// Optional single-character short flag.
    pub short: Option<char>,
    /// Mandatory long name.
    pub long: String,
}

/// Parse `designator` per the grammar above.
///
/// # Errors
///
/// Returns [`DeclarationError::EmptyDesignator`] for an empty string and
/// [`DeclarationError::MalformedDesignator`] for anything that violates the
/// grammar.
pub fn parse(designator: &str) -> Result<Designator, DeclarationError> {
    if designator.is_empty() {
        return Err(DeclarationError::EmptyDesignator);
    }

    let malformed = || DeclarationError::MalformedDesignator {
        designator: designator.to_owned(),
    };

    let (short, long) = match designator.split_once(',') {
        Some((short_part, long_part)) => {
            let mut chars = short_part.chars();
            let flag = chars.next().ok_or_else(malformed)?;
            if chars.next().is_some() || !flag.is_ascii_alphanumeric() {
                return Err(malformed());
            }
            (Some(flag), long_part)
        }
        None => (None, designator),
    };

    if !is_valid_name(long) {
        return Err(malformed());
    }

    Ok(Designator {
        short,
        long: long.to_owned(),
    })
}

/// Whether `name` matches `[a-zA-Z][a-zA-Z0-9_-]*`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
