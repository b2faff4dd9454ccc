//! Option shapes: scalar and repeatable declarations over a [`Value`] type.

use std::any::Any;
use std::fmt;

use crate::error::ParseError;
use crate::value::Value;

/// Identity and metadata shared by every option shape.
#[derive(Debug, Clone)]
pub struct OptionMeta {
    short: Option<char>,
    name: String,
    description: String,
    num_args: usize,
    required: bool,
    repeatable: bool,
}

impl OptionMeta {
    /// Optional single-character short flag.
    #[must_use]
    pub const fn short_flag(&self) -> Option<char> {
        self.short
    }

    /// Long name, unique within the declaring group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of textual arguments the option consumes (0 or 1).
    #[must_use]
    pub const fn num_args(&self) -> usize {
        self.num_args
    }

    /// Whether the option must be supplied by the end user.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Whether the option accumulates repeated occurrences.
    #[must_use]
    pub const fn repeatable(&self) -> bool {
        self.repeatable
    }
}

/// The uniform contract a group stores its options behind: parse a textual
/// occurrence, format the current value(s), and expose metadata.
pub trait OptionEntry: Any + fmt::Debug {
    /// Identity and metadata for this option.
    fn meta(&self) -> &OptionMeta;

    /// Consume one occurrence of the option.
    ///
    /// `raw` is the textual value that followed the flag, or `None` when the
    /// flag appeared bare. A failing parse leaves the stored value untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingValue`] when the option's arity is
    /// non-zero and `raw` is absent, or a conversion error from the value
    /// type.
    fn parse(&mut self, raw: Option<&str>) -> Result<(), ParseError>;

    /// Write the current value(s) in canonical textual form.
    ///
    /// # Errors
    ///
    /// Propagates errors from the sink; formatting itself cannot fail.
    fn format(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Upcast for typed access through [`crate::OptionTree::scalar`] and
    /// [`crate::OptionTree::repeatable`].
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`OptionEntry::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Render the current value(s) to a fresh `String`.
    fn formatted(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }
}

/// An option holding exactly one typed value.
///
/// Booleans are declared with arity 0 and start optional; every other type
/// starts required until [`ScalarOption::set_default`] installs a default.
#[derive(Debug)]
pub struct ScalarOption<T: Value> {
    meta: OptionMeta,
    value: T,
}

impl<T: Value> ScalarOption<T> {
    pub(crate) fn new(short: Option<char>, name: String, description: String) -> Self {
        Self {
            meta: OptionMeta {
                short,
                name,
                description,
                num_args: T::NUM_ARGS,
                required: T::NUM_ARGS != 0,
                repeatable: false,
            },
            value: T::initial(),
        }
    }

    /// The current value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Install `value` as the default and mark the option optional.
    pub fn set_default(&mut self, value: T) {
        self.meta.required = false;
        self.value = value;
    }
}

impl<T: Value> OptionEntry for ScalarOption<T> {
    fn meta(&self) -> &OptionMeta {
        &self.meta
    }

    fn parse(&mut self, raw: Option<&str>) -> Result<(), ParseError> {
        let raw = require_value(&self.meta, raw)?;
        // Convert first, commit second: a failed parse must not disturb the
        // stored value.
        self.value = T::parse(&self.meta.name, raw)?;
        Ok(())
    }

    fn format(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.value.write(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An option accumulating an ordered sequence of typed values across
/// repeated occurrences. Never required.
#[derive(Debug)]
pub struct RepeatableOption<T: Value> {
    meta: OptionMeta,
    values: Vec<T>,
}

impl<T: Value> RepeatableOption<T> {
    pub(crate) fn new(short: Option<char>, name: String, description: String) -> Self {
        Self {
            meta: OptionMeta {
                short,
                name,
                description,
                num_args: T::NUM_ARGS,
                required: false,
                repeatable: true,
            },
            values: Vec::new(),
        }
    }

    /// The accumulated values, in occurrence order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Replace the whole sequence with `values`.
    pub fn set_default(&mut self, values: Vec<T>) {
        self.meta.required = false;
        self.values = values;
    }
}

impl<T: Value> OptionEntry for RepeatableOption<T> {
    fn meta(&self) -> &OptionMeta {
        &self.meta
    }

    fn parse(&mut self, raw: Option<&str>) -> Result<(), ParseError> {
        let raw = require_value(&self.meta, raw)?;
        let value = T::parse(&self.meta.name, raw)?;
        self.values.push(value);
        Ok(())
    }

    fn format(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("[")?;
        let mut sep = "";
        for value in &self.values {
            out.write_str(sep)?;
            value.write(out)?;
            sep = ", ";
        }
        out.write_str("]")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn require_value<'a>(meta: &OptionMeta, raw: Option<&'a str>) -> Result<&'a str, ParseError> {
    match raw {
        Some(text) => Ok(text),
        None if meta.num_args == 0 => Ok(""),
        None => Err(ParseError::missing(&meta.name)),
    }
}
