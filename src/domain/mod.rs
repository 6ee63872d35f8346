//! Domain layer: hierarchical names and their contract errors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod escape;
pub mod name;
pub mod string_array_name;
pub mod string_name;

pub use error::{ErrorKind, NameError, NameResult};
pub use escape::{DEFAULT_DELIMITER, ESCAPE_CHARACTER};
pub use name::{Name, Representation};
pub use string_array_name::StringArrayName;
pub use string_name::StringName;
