//! Structured view of a name, as printed by `hiername inspect`.

use std::fmt;

use itertools::Itertools;

use crate::domain::{Name, NameResult, Representation};

/// Everything the public contract reveals about one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameReport {
    pub representation: Representation,
    pub delimiter: char,
    pub components: Vec<String>,
    pub display: String,
    pub data_string: String,
    pub canonical: String,
    pub hash_code: i32,
}

impl NameReport {
    pub fn from_name(name: &dyn Name) -> NameResult<Self> {
        let count = name.no_components()?;
        let components = (0..count)
            .map(|i| name.component(i))
            .collect::<NameResult<Vec<_>>>()?;
        Ok(Self {
            representation: name.representation(),
            delimiter: name.delimiter_character()?,
            components,
            display: name.as_string(None)?,
            data_string: name.as_data_string()?,
            canonical: name.canonical_data_string()?,
            hash_code: name.hash_code()?,
        })
    }
}

impl fmt::Display for NameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "representation: {}", self.representation)?;
        writeln!(f, "delimiter:      {:?}", self.delimiter)?;
        writeln!(
            f,
            "components:     {} [{}]",
            self.components.len(),
            self.components.iter().map(|c| format!("{:?}", c)).join(", ")
        )?;
        writeln!(f, "as string:      {}", self.display)?;
        writeln!(f, "data string:    {}", self.data_string)?;
        writeln!(f, "canonical:      {}", self.canonical)?;
        write!(f, "hash code:      {}", self.hash_code)
    }
}
