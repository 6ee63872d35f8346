//! List backed name: logical components are stored as they are.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::domain::error::NameResult;
use crate::domain::escape::{
    delimiter_or_default, join_escaped, split_components, DEFAULT_DELIMITER,
};
use crate::domain::name::{Name, Representation};
use crate::domain::string_name::StringName;

/// Name stored as a list of logical components.
///
/// Escaping is only applied when the name is rendered.
#[derive(Debug, Clone)]
pub struct StringArrayName {
    delimiter: char,
    components: Vec<String>,
}

impl StringArrayName {
    /// Build a name from logical (unescaped) components.
    ///
    /// # Errors
    /// `IllegalArgument` if `delimiter` is not a single character or is the
    /// escape character.
    pub fn new<I, S>(source: I, delimiter: Option<&str>) -> NameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiter = delimiter_or_default(delimiter)?;
        Self::from_parts(source.into_iter().map(Into::into).collect(), delimiter)
    }

    /// Build a name from an escaped, delimited string.
    pub fn parse(source: &str, delimiter: Option<&str>) -> NameResult<Self> {
        let delimiter = delimiter_or_default(delimiter)?;
        Self::from_parts(split_components(source, delimiter), delimiter)
    }

    pub(crate) fn from_parts(components: Vec<String>, delimiter: char) -> NameResult<Self> {
        let name = Self {
            delimiter,
            components,
        };
        name.assert_invariant()?;
        debug!(count = name.components.len(), %delimiter, "created array name");
        Ok(name)
    }
}

impl Name for StringArrayName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn components_snapshot(&self) -> Vec<String> {
        self.components.clone()
    }

    fn with_components(&self, components: Vec<String>) -> NameResult<Box<dyn Name>> {
        Ok(Box::new(Self::from_parts(components, self.delimiter)?))
    }

    fn check_representation(&self) -> NameResult<()> {
        // owned Strings: no component can be absent
        Ok(())
    }

    fn representation(&self) -> Representation {
        Representation::Array
    }

    fn no_components(&self) -> NameResult<usize> {
        self.assert_invariant()?;
        Ok(self.components.len())
    }
}

impl PartialEq for StringArrayName {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for StringArrayName {}

impl PartialEq<StringName> for StringArrayName {
    fn eq(&self, other: &StringName) -> bool {
        self.is_equal(other)
    }
}

impl Hash for StringArrayName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        join_escaped(&self.components, DEFAULT_DELIMITER).hash(state);
    }
}

impl fmt::Display for StringArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_escaped(&self.components, self.delimiter))
    }
}
