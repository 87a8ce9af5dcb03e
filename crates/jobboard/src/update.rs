//! Partial-update `SET` clause building.
//!
//! A [`Patch`] mirrors the shape of a PATCH payload: only the fields present
//! in it are assigned, in the order they were set, each bound through a `$n`
//! placeholder. The row-identifier predicate belongs to the caller at index
//! `len() + 1`.

use crate::error::{ModelError, ModelResult};
use crate::fragment::{Fragment, FragmentBuilder};
use crate::value::Value;

/// A closed set of updatable fields for one entity.
///
/// Implemented by per-entity field enums, so a patch can only ever address a
/// compile-time-known, pre-approved column.
pub trait Column: Copy {
    /// Physical column name for this field.
    fn column(self) -> &'static str;
}

/// An ordered partial-update payload.
#[derive(Debug, Clone)]
pub struct Patch<C: Column> {
    entries: Vec<(C, Value)>,
}

impl<C: Column> Patch<C> {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind a field to a new value.
    ///
    /// Entries keep insertion order, which determines placeholder numbering.
    pub fn set(mut self, field: C, value: impl Into<Value>) -> Self {
        self.entries.push((field, value.into()));
        self
    }

    /// Bind a field only when a value is present (`None` leaves the field
    /// untouched).
    pub fn set_opt<T: Into<Value>>(self, field: C, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the `SET` clause body: `"col_a"=$1, "col_b"=$2, ...`.
    ///
    /// The caller prefixes `SET` and appends the row-identifier predicate at
    /// placeholder index `fragment.len() + 1`.
    ///
    /// Fails with [`ModelError::Validation`] when the patch is empty.
    pub fn into_set_clause(self) -> ModelResult<Fragment> {
        if self.entries.is_empty() {
            return Err(ModelError::validation("no data to update"));
        }

        let mut assignments = FragmentBuilder::new();
        for (field, value) in self.entries {
            assignments.push(&format!("\"{}\"=", field.column()), value);
        }
        Ok(assignments.join(", "))
    }
}

impl<C: Column> Default for Patch<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    enum TestField {
        FirstName,
        Age,
    }

    impl Column for TestField {
        fn column(self) -> &'static str {
            match self {
                TestField::FirstName => "first_name",
                TestField::Age => "age",
            }
        }
    }

    #[test]
    fn renders_assignments_in_insertion_order() {
        let set = Patch::new()
            .set(TestField::FirstName, "Aliya")
            .set(TestField::Age, 32)
            .into_set_clause()
            .unwrap();

        assert_eq!(set.text(), "\"first_name\"=$1, \"age\"=$2");
        assert_eq!(
            set.values(),
            &[Value::Text("Aliya".to_owned()), Value::Int(32)]
        );
    }

    #[test]
    fn single_entry_numbers_from_one() {
        let set = Patch::new()
            .set(TestField::Age, 32)
            .into_set_clause()
            .unwrap();

        assert_eq!(set.text(), "\"age\"=$1");
        assert_eq!(set.values(), &[Value::Int(32)]);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = Patch::<TestField>::new().into_set_clause().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let patch = Patch::new()
            .set_opt(TestField::FirstName, None::<&str>)
            .set_opt(TestField::Age, Some(32));

        assert_eq!(patch.len(), 1);
        let set = patch.into_set_clause().unwrap();
        assert_eq!(set.text(), "\"age\"=$1");
    }

    #[test]
    fn null_values_bind_as_placeholders() {
        let set = Patch::new()
            .set(TestField::FirstName, Value::Null)
            .into_set_clause()
            .unwrap();

        assert_eq!(set.text(), "\"first_name\"=$1");
        assert_eq!(set.values(), &[Value::Null]);
    }

    #[test]
    fn identical_input_is_byte_identical() {
        let build = || {
            Patch::new()
                .set(TestField::FirstName, "Aliya")
                .set(TestField::Age, 32)
                .into_set_clause()
                .unwrap()
        };
        assert_eq!(build(), build());
    }
}
