//! Tuple record type
//!
//! The (key, value1, value2, value3) unit stored by the system.

/// Maximum length of `value1` in bytes. Longer strings are truncated
/// silently on every path (wire receive, storage write, storage read).
pub const VALUE1_MAX_LEN: usize = 255;

/// A stored record: one 32-bit key plus three typed values
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// Unique identifier within the store
    pub key: i32,

    /// Text attribute, at most [`VALUE1_MAX_LEN`] bytes
    pub value1: String,

    /// Integer attribute
    pub value2: i32,

    /// Float attribute
    pub value3: f32,
}

impl Tuple {
    /// Build a tuple, truncating `value1` to its maximum length
    pub fn new(key: i32, value1: impl Into<String>, value2: i32, value3: f32) -> Self {
        let mut value1 = value1.into();
        truncate_value1(&mut value1);
        Self {
            key,
            value1,
            value2,
            value3,
        }
    }
}

/// Truncate a string to at most [`VALUE1_MAX_LEN`] bytes, landing on a
/// character boundary so the result stays valid UTF-8. Silent: truncation
/// is never an error anywhere in the system.
pub fn truncate_value1(value1: &mut String) {
    if value1.len() <= VALUE1_MAX_LEN {
        return;
    }
    let mut end = VALUE1_MAX_LEN;
    while !value1.is_char_boundary(end) {
        end -= 1;
    }
    value1.truncate(end);
}
