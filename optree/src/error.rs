//! Error types raised during declaration and value parsing.
//!
//! The two enums are deliberately disjoint: [`DeclarationError`] reports
//! programmer mistakes made while registering groups and options, and is not
//! recoverable at runtime; [`ParseError`] reports end-user input that cannot
//! be converted to an option's declared type, and is meant to be surfaced
//! verbatim.

use thiserror::Error;

/// Errors raised while declaring groups and options.
///
/// These are setup-time mistakes: the fix is to change the declaration, not
/// to retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// An option was declared with an empty description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// An option was declared with an empty designator.
    #[error("designator cannot be empty")]
    EmptyDesignator,

    /// The designator did not match the `short,long` grammar.
    #[error("malformed designator '{designator}'")]
    MalformedDesignator {
        /// The designator as supplied by the caller.
        designator: String,
    },

    /// A group name did not match `[a-zA-Z][a-zA-Z0-9_-]*`.
    #[error("invalid name '{name}'")]
    InvalidName {
        /// The rejected group name.
        name: String,
    },

    /// A sibling subgroup with the same name already exists.
    #[error("group '{name}' already exists")]
    DuplicateGroup {
        /// The duplicated subgroup name.
        name: String,
    },

    /// The long name is already taken within the declaring group.
    #[error("option '{full_name}' already specified")]
    DuplicateOption {
        /// Dotted full name of the conflicting option.
        full_name: String,
    },

    /// The short flag is already registered elsewhere in the tree.
    #[error("short flag '{flag}' already used by option '{owner}'")]
    ShortFlagInUse {
        /// The duplicated short flag.
        flag: char,
        /// Dotted full name of the option that owns the flag.
        owner: String,
    },
}

/// Errors raised while converting textual input into a typed option value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An option with non-zero arity received no value.
    #[error("missing value for option '{option}'")]
    MissingValue {
        /// Long name of the option.
        option: String,
    },

    /// The text could not be converted to the option's declared type.
    #[error("could not parse {option}='{value}'")]
    Invalid {
        /// Long name of the option.
        option: String,
        /// The offending text.
        value: String,
    },

    /// The text matched none of an enumerated type's variant names.
    #[error("could not parse {option}='{value}': possible enum values are [{}]", quote_list(.variants))]
    InvalidEnum {
        /// Long name of the option.
        option: String,
        /// The offending text.
        value: String,
        /// Every valid variant name, in declaration order.
        variants: &'static [&'static str],
    },
}

impl ParseError {
    /// Build a [`ParseError::MissingValue`] for `option`.
    #[must_use]
    pub fn missing(option: &str) -> Self {
        Self::MissingValue {
            option: option.to_owned(),
        }
    }

    /// Build a [`ParseError::Invalid`] for `option` and the rejected `value`.
    #[must_use]
    pub fn invalid(option: &str, value: &str) -> Self {
        Self::Invalid {
            option: option.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Build a [`ParseError::InvalidEnum`] listing every valid variant name.
    #[must_use]
    pub fn invalid_enum(option: &str, value: &str, variants: &'static [&'static str]) -> Self {
        Self::InvalidEnum {
            option: option.to_owned(),
            value: value.to_owned(),
            variants,
        }
    }
}

fn quote_list(variants: &[&str]) -> String {
    variants
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
