//! Hierarchical names.
//!
//! A [`Name`](domain::Name) is an ordered sequence of components joined by a
//! single delimiter character; components may contain the delimiter or the
//! escape character `\` when masked. Two representations share one contract:
//!
//! - [`StringName`](domain::StringName) keeps one escaped, delimited string;
//! - [`StringArrayName`](domain::StringArrayName) keeps the logical components.
//!
//! Both are immutable: `set_component`, `insert`, `append`, `remove` and
//! `concat` return new names. Equality and hashing look at logical components
//! only, never at the delimiter.
//!
//! ```
//! use hiername::domain::{Name, StringArrayName, StringName};
//!
//! let s = StringName::new(r"oss\#cs#fau#de", Some("#")).unwrap();
//! let a = StringArrayName::new(["oss#cs", "fau", "de"], Some("#")).unwrap();
//! assert!(s.is_equal(&a));
//! assert_eq!(s.as_string(Some(".")).unwrap(), "oss#cs.fau.de");
//! ```
//!
//! The [`files`] module is a small file system tree that builds full path
//! names from these values.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod files;
pub mod util;

pub use domain::{ErrorKind, Name, NameError, NameResult, StringArrayName, StringName};
