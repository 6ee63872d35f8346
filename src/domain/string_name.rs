//! String backed name: one escaped, delimiter-joined string.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::domain::error::{NameError, NameResult};
use crate::domain::escape::{
    delimiter_or_default, join_escaped, split_components, DEFAULT_DELIMITER,
};
use crate::domain::name::{Name, Representation};
use crate::domain::string_array_name::StringArrayName;

/// Name stored as a single escaped string plus a cached component count.
///
/// A string always parses into at least one component, so a name without
/// components is stored as an empty string with a count of zero. The count is
/// part of the invariant: it must match a fresh parse of the string.
#[derive(Debug, Clone)]
pub struct StringName {
    delimiter: char,
    name: String,
    no_components: usize,
}

impl StringName {
    /// Build a name from an escaped, delimited string.
    ///
    /// `"oss.cs"` has two components, `""` has one (empty) component.
    ///
    /// # Errors
    /// `IllegalArgument` if `delimiter` is not a single character or is the
    /// escape character.
    pub fn new(source: &str, delimiter: Option<&str>) -> NameResult<Self> {
        let delimiter = delimiter_or_default(delimiter)?;
        let no_components = split_components(source, delimiter).len();
        Self::from_raw_parts(source.to_string(), delimiter, no_components)
    }

    /// Build a name from logical (unescaped) components.
    pub fn from_components<I, S>(source: I, delimiter: Option<&str>) -> NameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiter = delimiter_or_default(delimiter)?;
        let components: Vec<String> = source.into_iter().map(Into::into).collect();
        Self::from_parts(&components, delimiter)
    }

    /// The escaped backing string.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    fn from_parts(components: &[String], delimiter: char) -> NameResult<Self> {
        Self::from_raw_parts(join_escaped(components, delimiter), delimiter, components.len())
    }

    pub(crate) fn from_raw_parts(
        name: String,
        delimiter: char,
        no_components: usize,
    ) -> NameResult<Self> {
        let result = Self {
            delimiter,
            name,
            no_components,
        };
        result.assert_invariant()?;
        debug!(name = %result.name, %delimiter, count = no_components, "created string name");
        Ok(result)
    }

    fn split(&self) -> Vec<String> {
        if self.no_components == 0 {
            Vec::new()
        } else {
            split_components(&self.name, self.delimiter)
        }
    }
}

impl Name for StringName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn components_snapshot(&self) -> Vec<String> {
        self.split()
    }

    fn with_components(&self, components: Vec<String>) -> NameResult<Box<dyn Name>> {
        Ok(Box::new(Self::from_parts(&components, self.delimiter)?))
    }

    fn check_representation(&self) -> NameResult<()> {
        if self.no_components == 0 {
            return NameError::ensure_state(
                self.name.is_empty(),
                "name without components must have an empty backing string",
            );
        }
        let parsed = split_components(&self.name, self.delimiter).len();
        NameError::ensure_state(
            parsed == self.no_components,
            format!(
                "component count mismatch: cached {}, parsed {}",
                self.no_components, parsed
            ),
        )
    }

    fn representation(&self) -> Representation {
        Representation::String
    }

    fn no_components(&self) -> NameResult<usize> {
        self.assert_invariant()?;
        Ok(self.no_components)
    }
}

impl PartialEq for StringName {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for StringName {}

impl PartialEq<StringArrayName> for StringName {
    fn eq(&self, other: &StringArrayName) -> bool {
        self.is_equal(other)
    }
}

impl Hash for StringName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        join_escaped(&self.split(), DEFAULT_DELIMITER).hash(state);
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_escaped(&self.split(), self.delimiter))
    }
}
