//! The typed value contract shared by every option.
//!
//! [`Value`] covers parsing textual input into a typed slot and writing the
//! slot back out in canonical form. The crate implements it for `String`,
//! `bool`, the integer and floating-point primitives, and, via
//! [`Enumerable`], for consumer-declared enums. The [`enumerable!`](crate::enumerable)
//! macro declares an enum together with both implementations.

use std::fmt;

use crate::error::ParseError;

/// A type that can back an option: parseable from text, formattable back to
/// text, and constructible in a neutral initial state.
pub trait Value: Sized + fmt::Debug + 'static {
    /// Number of textual arguments the option consumes: `0` for boolean
    /// presence flags, `1` for everything else.
    const NUM_ARGS: usize = 1;

    /// The value an option holds before any parse or default: zero for
    /// numerics, `false` for booleans, empty for text, the first declared
    /// variant for enums.
    fn initial() -> Self;

    /// Convert `raw` into a value. `option` is the declaring option's long
    /// name, used only for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when `raw` cannot be converted.
    fn parse(option: &str, raw: &str) -> Result<Self, ParseError>;

    /// Write the canonical textual form of the value to `out`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the sink; writing itself cannot fail.
    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

impl Value for String {
    fn initial() -> Self {
        Self::new()
    }

    fn parse(_option: &str, raw: &str) -> Result<Self, ParseError> {
        Ok(raw.to_owned())
    }

    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(self)
    }
}

impl Value for bool {
    // Presence alone implies true.
    const NUM_ARGS: usize = 0;

    fn initial() -> Self {
        false
    }

    fn parse(option: &str, raw: &str) -> Result<Self, ParseError> {
        match raw {
            "" | "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ParseError::invalid(option, other)),
        }
    }

    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(if *self { "true" } else { "false" })
    }
}

macro_rules! numeric_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Value for $ty {
                fn initial() -> Self {
                    <$ty>::default()
                }

                fn parse(option: &str, raw: &str) -> Result<Self, ParseError> {
                    raw.parse().map_err(|_| ParseError::invalid(option, raw))
                }

                fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    write!(out, "{self}")
                }
            }
        )+
    };
}

numeric_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Enum introspection supplied by the consumer.
///
/// The library never assumes global enum reflection; a consumer either
/// implements this trait by hand or declares the enum through
/// [`enumerable!`](crate::enumerable), which also derives [`Value`].
pub trait Enumerable: Copy + PartialEq + Sized + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The symbolic name of every variant, in the same order as
    /// [`Self::VARIANTS`].
    const NAMES: &'static [&'static str];

    /// The symbolic name of this variant.
    fn name(self) -> &'static str;

    /// Look a variant up by its exact symbolic name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .zip(Self::NAMES)
            .find_map(|(variant, candidate)| (*candidate == name).then_some(*variant))
    }
}

/// Parse an enumerated value by exact variant-name match.
///
/// # Errors
///
/// Returns [`ParseError::InvalidEnum`] listing every valid name when `raw`
/// matches none of them.
pub fn parse_enum<T: Enumerable>(option: &str, raw: &str) -> Result<T, ParseError> {
    T::from_name(raw).ok_or_else(|| ParseError::invalid_enum(option, raw, T::NAMES))
}

/// Declare an enum implementing both [`Enumerable`] and [`Value`].
///
/// The first declared variant becomes the enum's initial value, matching the
/// behaviour of every other [`Value`] type.
///
/// # Examples
///
/// ```
/// optree::enumerable! {
///     /// Output verbosity.
///     pub enum Level { Quiet, Normal, Loud }
/// }
///
/// use optree::Enumerable;
/// assert_eq!(Level::from_name("Loud"), Some(Level::Loud));
/// assert_eq!(Level::Quiet.name(), "Quiet");
/// ```
#[macro_export]
macro_rules! enumerable {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::Enumerable for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl $crate::Value for $name {
            fn initial() -> Self {
                <Self as $crate::Enumerable>::VARIANTS[0]
            }

            fn parse(option: &str, raw: &str) -> ::core::result::Result<Self, $crate::ParseError> {
                $crate::parse_enum(option, raw)
            }

            fn write(&self, out: &mut dyn ::core::fmt::Write) -> ::core::fmt::Result {
                out.write_str($crate::Enumerable::name(*self))
            }
        }
    };
}
