//! Cursor-based pagination primitives for the AuthZ list endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque pagination token issued by the service.
///
/// The empty cursor marks the beginning of a list; list responses carry the
/// token for the following page in `next`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Beginning-of-list cursor.
    pub fn begin() -> Self {
        Self(String::new())
    }

    pub fn is_begin(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cursor_is_empty() {
        let cursor = Cursor::begin();
        assert!(cursor.is_begin());
        assert_eq!(cursor.as_str(), "");
    }

    #[test]
    fn test_cursor_round_trips_token() {
        let cursor = Cursor::from("id:01890a5d-ac96-774b-bcce-b302099a8057");
        assert!(!cursor.is_begin());
        assert_eq!(cursor.to_string(), "id:01890a5d-ac96-774b-bcce-b302099a8057");
    }
}
