//! Student record stored in the search index.
//!
//! Serialised with the field names `id`, `name`, `age`, and `average_score`.
//! The identifier is assigned by the store; every other field is supplied by
//! the caller and stored without validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Indexed student document.
///
/// # Examples
/// ```
/// use student_search::domain::{Student, StudentDraft};
///
/// let student = StudentDraft::new("Ann", 21, 3.5).with_id("x1");
/// assert_eq!(student.id(), "x1");
/// assert_eq!(student.age(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: String,
    name: String,
    age: i64,
    average_score: f64,
}

impl Student {
    /// Store-assigned identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Name as supplied by the caller.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Age in whole years.
    pub fn age(&self) -> i64 {
        self.age
    }

    /// Average score, kept exactly as stored.
    pub fn average_score(&self) -> f64 {
        self.average_score
    }
}

/// Student fields awaiting a store-assigned identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDraft {
    name: String,
    age: i64,
    average_score: f64,
}

impl StudentDraft {
    /// Build a draft from caller-supplied values.
    pub fn new(name: impl Into<String>, age: i64, average_score: f64) -> Self {
        Self {
            name: name.into(),
            age,
            average_score,
        }
    }

    /// Read whatever student fields an arbitrary JSON document carries.
    ///
    /// Keys that are absent or hold an incompatible type fall back to their
    /// zero value. Fractional ages are truncated toward zero.
    pub fn from_document(document: &Value) -> Self {
        let name = document
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let age = document
            .get("age")
            .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(truncate_age)))
            .unwrap_or_default();
        let average_score = document
            .get("average_score")
            .and_then(Value::as_f64)
            .unwrap_or_default();
        Self::new(name, age, average_score)
    }

    /// Attach the identifier, producing an immutable [`Student`].
    pub fn with_id(self, id: impl Into<String>) -> Student {
        Student {
            id: id.into(),
            name: self.name,
            age: self.age,
            average_score: self.average_score,
        }
    }
}

/// Convert a wire age to an integer, dropping the fractional part.
///
/// Out-of-range values saturate at the `i64` bounds; NaN becomes zero.
pub(crate) fn truncate_age(raw: f64) -> i64 {
    raw.trunc() as i64
}
