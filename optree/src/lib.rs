//! Hierarchical declaration and validation of typed command-line options.
//!
//! Callers build an [`OptionTree`] of named groups, then register scalar or
//! repeatable options on any group. Registration validates as it stores:
//! long names must be unique within their group, short flags must be unique
//! across the whole tree, and group names must match
//! `[a-zA-Z][a-zA-Z0-9_-]*`. An external tokenizer later looks options up by
//! long or short name and drives [`OptionEntry::parse`]; this crate is the
//! declaration and value-storage layer beneath such a parser, not the parser
//! itself.
//!
//! A designator encodes an option's identity in one string: `"v,verbose"`
//! declares short flag `v` and long name `verbose`, whilst `"verbose"`
//! declares the long name alone.
//!
//! ```
//! use optree::OptionTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = OptionTree::new();
//! let root = tree.root();
//! let net = tree.add_subgroup(root, "net", "networking")?;
//!
//! tree.add_option_with_default::<u16>(net, "p,port", "listen port", 8080)?;
//! tree.add_option::<bool>(root, "v,verbose", "chatty output")?;
//!
//! // Driven by the external tokenizer:
//! if let Some(option) = tree.option_mut(net, "port") {
//!     option.parse(Some("9090"))?;
//! }
//!
//! let port = tree.scalar::<u16>(net, "port").map(|opt| *opt.value());
//! assert_eq!(port, Some(9090));
//! # Ok(())
//! # }
//! ```

pub mod designator;
mod error;
mod option;
mod tree;
mod value;

pub use error::{DeclarationError, ParseError};
pub use option::{OptionEntry, OptionMeta, RepeatableOption, ScalarOption};
pub use tree::{Group, GroupId, OptionTree};
pub use value::{Enumerable, Value, parse_enum};
