//! The `Name` contract shared by all representations.
//!
//! A name is a sequence of string components separated by a delimiter
//! character. Components may contain the delimiter or the escape character if
//! they are masked in the rendered form. The escape character is fixed, the
//! delimiter is chosen per instance.
//!
//! ```text
//! "oss.cs.fau.de"   four components, delimiter '.'
//! "///"             four empty components, delimiter '/'
//! "Oh\.\.\."        one component "Oh...", delimiter '.'
//! ```
//!
//! Names are immutable values: every structural operation returns a new
//! instance and leaves the receiver untouched.
//!
//! Representations implement three primitives (`components_snapshot`,
//! `with_components`, `check_representation`); everything else is provided
//! here once, on top of the escaping codec.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::error::{NameError, NameResult};
use crate::domain::escape::{
    is_valid_delimiter, join_escaped, parse_delimiter, unescape, DEFAULT_DELIMITER,
};
use crate::domain::string_array_name::StringArrayName;
use crate::domain::string_name::StringName;

/// Storage strategy of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// One escaped, delimiter-joined string ([`StringName`]).
    #[default]
    String,
    /// A list of logical components ([`StringArrayName`]).
    Array,
}

impl Representation {
    /// Parse `source` into a name backed by this representation.
    pub fn parse(self, source: &str, delimiter: Option<&str>) -> NameResult<Box<dyn Name>> {
        let name: Box<dyn Name> = match self {
            Representation::String => Box::new(StringName::new(source, delimiter)?),
            Representation::Array => Box::new(StringArrayName::parse(source, delimiter)?),
        };
        Ok(name)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::String => f.write_str("string"),
            Representation::Array => f.write_str("array"),
        }
    }
}

pub trait Name: fmt::Debug + Send + Sync {
    /// Instance delimiter, read without checking the invariant.
    fn delimiter(&self) -> char;

    /// Independent copy of the logical component sequence.
    fn components_snapshot(&self) -> Vec<String>;

    /// New instance of the same representation and delimiter holding
    /// `components`.
    fn with_components(&self, components: Vec<String>) -> NameResult<Box<dyn Name>>;

    /// Representation specific part of the type invariant.
    fn check_representation(&self) -> NameResult<()>;

    fn representation(&self) -> Representation;

    fn assert_invariant(&self) -> NameResult<()> {
        NameError::ensure_state(
            is_valid_delimiter(self.delimiter()),
            "delimiter must not be the escape character",
        )?;
        self.check_representation()
    }

    fn delimiter_character(&self) -> NameResult<char> {
        self.assert_invariant()?;
        Ok(self.delimiter())
    }

    /// True if the name has no components.
    fn is_empty(&self) -> NameResult<bool> {
        Ok(self.no_components()? == 0)
    }

    fn no_components(&self) -> NameResult<usize> {
        self.assert_invariant()?;
        Ok(self.components_snapshot().len())
    }

    /// Logical (unescaped) component `i`.
    fn component(&self, i: usize) -> NameResult<String> {
        self.assert_invariant()?;
        let mut components = self.components_snapshot();
        check_index(i, components.len())?;
        Ok(components.swap_remove(i))
    }

    /// Human readable rendering joined with `delimiter` (default: the
    /// instance delimiter).
    ///
    /// Escaped instance delimiters inside components are shown as
    /// `delimiter`, escaped escape characters as a single one. Components are
    /// not re-escaped for `delimiter`, so the result is not guaranteed to
    /// parse back; use [`Name::as_data_string`] for that.
    fn as_string(&self, delimiter: Option<&str>) -> NameResult<String> {
        self.assert_invariant()?;
        let own = self.delimiter();
        let render = match delimiter {
            Some(d) => parse_delimiter(d)?,
            None => own,
        };
        let rendered: Vec<String> = self
            .components_snapshot()
            .iter()
            .map(|c| unescape(c, own, render))
            .collect();
        let separator = render.to_string();
        Ok(rendered.join(separator.as_str()))
    }

    /// Components escaped against the instance delimiter and joined with it.
    ///
    /// `StringName::new(&n.as_data_string()?, Some(d))` with the instance
    /// delimiter `d` yields a name equal to `n`, except for the empty name:
    /// its data string is `""`, which parses as one empty component.
    fn as_data_string(&self) -> NameResult<String> {
        self.assert_invariant()?;
        Ok(join_escaped(&self.components_snapshot(), self.delimiter()))
    }

    /// Components escaped against [`DEFAULT_DELIMITER`] and joined with it.
    ///
    /// Equal names have equal canonical data strings whatever their
    /// delimiters are.
    fn canonical_data_string(&self) -> NameResult<String> {
        self.assert_invariant()?;
        Ok(join_escaped(&self.components_snapshot(), DEFAULT_DELIMITER))
    }

    /// Equality of the logical component sequences. Delimiters and
    /// representations do not matter.
    ///
    /// Does not check the invariant of either name, so it cannot fail.
    fn is_equal(&self, other: &dyn Name) -> bool {
        let mine = self.components_snapshot();
        let theirs = other.components_snapshot();
        mine.len() == theirs.len() && mine == theirs
    }

    /// 32 bit hash of the canonical data string, consistent with
    /// [`Name::is_equal`].
    fn hash_code(&self) -> NameResult<i32> {
        Ok(string_hash(&self.canonical_data_string()?))
    }

    /// Deep copy sharing no storage with `self`.
    fn clone_name(&self) -> NameResult<Box<dyn Name>> {
        self.assert_invariant()?;
        let snapshot = self.components_snapshot();
        let cloned = self.with_components(snapshot.clone())?;
        NameError::ensure_method(cloned.components_snapshot() == snapshot, "clone failed")?;
        Ok(cloned)
    }

    /// Replace component `i` with `c`.
    fn set_component(&self, i: usize, c: &str) -> NameResult<Box<dyn Name>> {
        self.assert_invariant()?;
        let mut components = self.components_snapshot();
        check_index(i, components.len())?;
        let expected = components.len();
        components[i] = c.to_string();
        rebuild(self, components, expected, Some((i, c)), "set_component")
    }

    /// Insert `c` before position `i`; `i` may equal the component count.
    fn insert(&self, i: usize, c: &str) -> NameResult<Box<dyn Name>> {
        self.assert_invariant()?;
        let mut components = self.components_snapshot();
        check_insert_index(i, components.len())?;
        let expected = components.len() + 1;
        components.insert(i, c.to_string());
        rebuild(self, components, expected, Some((i, c)), "insert")
    }

    fn append(&self, c: &str) -> NameResult<Box<dyn Name>> {
        self.assert_invariant()?;
        let mut components = self.components_snapshot();
        let expected = components.len() + 1;
        components.push(c.to_string());
        rebuild(self, components, expected, Some((expected - 1, c)), "append")
    }

    fn remove(&self, i: usize) -> NameResult<Box<dyn Name>> {
        self.assert_invariant()?;
        let mut components = self.components_snapshot();
        check_index(i, components.len())?;
        let expected = components.len() - 1;
        components.remove(i);
        rebuild(self, components, expected, None, "remove")
    }

    /// Append every component of `other`, in order.
    fn concat(&self, other: Option<&dyn Name>) -> NameResult<Box<dyn Name>> {
        let other = other.ok_or_else(|| NameError::illegal_argument("other must not be absent"))?;
        self.assert_invariant()?;
        other.assert_invariant()?;
        let mut components = self.components_snapshot();
        let extra = other.components_snapshot();
        let expected = components.len() + extra.len();
        components.extend(extra);
        rebuild(self, components, expected, None, "concat")
    }
}

/// `i` must address an existing component.
pub(crate) fn check_index(i: usize, len: usize) -> NameResult<()> {
    if i < len {
        Ok(())
    } else {
        Err(NameError::IndexOutOfBounds { index: i, len })
    }
}

/// Like [`check_index`], but `i == len` (insert at the end) is allowed.
pub(crate) fn check_insert_index(i: usize, len: usize) -> NameResult<()> {
    if i <= len {
        Ok(())
    } else {
        Err(NameError::IndexOutOfBounds { index: i, len })
    }
}

/// Build the result of a structural operation and check its postconditions.
///
/// A result that breaks its own invariant, whether detected while building
/// or afterwards, is reported as `MethodFailed` with the invariant violation
/// as trigger. `touched` is the written position and the component that must
/// read back there.
fn rebuild<N: Name + ?Sized>(
    name: &N,
    components: Vec<String>,
    expected: usize,
    touched: Option<(usize, &str)>,
    operation: &str,
) -> NameResult<Box<dyn Name>> {
    trace!(operation, count = components.len(), "rebuilding name");
    let invalid_result = |e: NameError| {
        NameError::method_failed(format!("{operation} produced an invalid name")).with_trigger(e)
    };
    let result = name.with_components(components).map_err(invalid_result)?;
    result.assert_invariant().map_err(invalid_result)?;
    let actual = result.components_snapshot().len();
    NameError::ensure_method(
        actual == expected,
        format!("{operation}: expected {expected} components, found {actual}"),
    )?;
    if let Some((i, c)) = touched {
        NameError::ensure_method(
            result.component(i)? == c,
            format!("{operation}: component {i} does not read back as written"),
        )?;
    }
    Ok(result)
}

/// `h = 31 * h + c` over UTF-16 code units, wrapping at 32 bits.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

impl PartialEq for dyn Name {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for dyn Name {}

impl Hash for dyn Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        join_escaped(&self.components_snapshot(), DEFAULT_DELIMITER).hash(state);
    }
}

impl fmt::Display for dyn Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_escaped(&self.components_snapshot(), self.delimiter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;
    use std::collections::hash_map::DefaultHasher;

    #[test]
    fn given_known_strings_when_hashing_then_matches_31_multiplier_hash() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
        // long input wraps instead of overflowing
        let _ = string_hash(&"z".repeat(1000));
    }

    #[test]
    fn given_names_with_different_delimiters_when_std_hashing_then_hashes_agree() {
        let dotted: Box<dyn Name> = Representation::String.parse("a.b.c", None).unwrap();
        let hashed: Box<dyn Name> = Representation::Array.parse("a#b#c", Some("#")).unwrap();

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        dotted.hash(&mut h1);
        hashed.hash(&mut h2);

        assert!(*dotted == *hashed);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn given_representation_when_parsing_then_builds_matching_storage() {
        let s = Representation::String.parse(r"oss\#cs#fau", Some("#")).unwrap();
        let a = Representation::Array.parse(r"oss\#cs#fau", Some("#")).unwrap();

        assert_eq!(s.representation(), Representation::String);
        assert_eq!(a.representation(), Representation::Array);
        assert!(s.is_equal(a.as_ref()));
        assert_eq!(a.component(0).unwrap(), "oss#cs");
    }

    #[test]
    fn given_index_helpers_when_out_of_range_then_precondition_errors() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(check_index(1, 1).unwrap_err().kind(), ErrorKind::IllegalArgument);
        assert!(check_insert_index(1, 1).is_ok());
        assert!(check_insert_index(2, 1).is_err());
    }

    /// Keeps the component count of every result but loses the values.
    #[derive(Debug)]
    struct Mangling {
        components: Vec<String>,
    }

    impl Name for Mangling {
        fn delimiter(&self) -> char {
            DEFAULT_DELIMITER
        }

        fn components_snapshot(&self) -> Vec<String> {
            self.components.clone()
        }

        fn with_components(&self, components: Vec<String>) -> NameResult<Box<dyn Name>> {
            Ok(Box::new(Mangling {
                components: vec!["garbage".to_string(); components.len()],
            }))
        }

        fn check_representation(&self) -> NameResult<()> {
            Ok(())
        }

        fn representation(&self) -> Representation {
            Representation::Array
        }
    }

    /// A component `"forbidden"` breaks the invariant. With `checked` the
    /// constructor used by `with_components` reports that itself.
    #[derive(Debug)]
    struct Guarded {
        checked: bool,
        components: Vec<String>,
    }

    impl Name for Guarded {
        fn delimiter(&self) -> char {
            DEFAULT_DELIMITER
        }

        fn components_snapshot(&self) -> Vec<String> {
            self.components.clone()
        }

        fn with_components(&self, components: Vec<String>) -> NameResult<Box<dyn Name>> {
            let result = Guarded {
                checked: self.checked,
                components,
            };
            if result.checked {
                result.assert_invariant()?;
            }
            Ok(Box::new(result))
        }

        fn check_representation(&self) -> NameResult<()> {
            NameError::ensure_state(
                !self.components.iter().any(|c| c == "forbidden"),
                "forbidden component",
            )
        }

        fn representation(&self) -> Representation {
            Representation::Array
        }
    }

    #[test]
    fn given_result_with_wrong_values_when_editing_then_method_failed() {
        let n = Mangling {
            components: vec!["a".into(), "b".into()],
        };

        assert_eq!(n.set_component(0, "x").unwrap_err().kind(), ErrorKind::MethodFailed);
        assert_eq!(n.insert(1, "x").unwrap_err().kind(), ErrorKind::MethodFailed);
        assert_eq!(n.append("x").unwrap_err().kind(), ErrorKind::MethodFailed);
        // remove writes no component, so only the count is checked
        assert_eq!(n.remove(0).unwrap().no_components().unwrap(), 1);
    }

    #[test]
    fn given_invalid_result_when_editing_then_method_failed_triggered_by_invalid_state() {
        for checked in [true, false] {
            let n = Guarded {
                checked,
                components: vec!["a".into()],
            };

            let err = n.append("forbidden").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MethodFailed, "checked: {checked}");
            assert_eq!(err.trigger().unwrap().kind(), ErrorKind::InvalidState);

            let err = n.set_component(0, "forbidden").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MethodFailed);
            assert!(n.append("b").is_ok());
        }
    }

    #[test]
    fn given_name_when_displayed_then_renders_data_string() {
        let n = Representation::Array.parse(r"oss\#cs#fau", Some("#")).unwrap();
        assert_eq!(n.to_string(), r"oss\#cs#fau");
    }
}
