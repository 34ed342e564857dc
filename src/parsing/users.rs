//! `users.json` parsing.
//!
//! The identity file is an array of person objects:
//! ```json
//! [{"id": "U01ABCDEF", "deleted": false, "profile": {"real_name": "Alice"}}]
//! ```
//! Entries are decoded one at a time so a single bad entry never prevents the
//! rest from loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SlackpackError};

/// Raw person entry for deserialization.
#[derive(Debug, Deserialize)]
pub struct SlackRawPerson {
    pub id: Option<String>,
    /// Deactivated account; does not affect inclusion
    #[serde(default)]
    pub deleted: bool,
    pub profile: Option<SlackRawProfile>,
}

#[derive(Debug, Deserialize)]
pub struct SlackRawProfile {
    pub real_name: Option<String>,
}

/// A usable identity: identifier and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackPerson {
    pub id: String,
    pub real_name: String,
    pub deleted: bool,
}

/// Decodes one entry of the identity file.
///
/// Fails with [`SlackpackError::MalformedIdentityRecord`] when the entry is not
/// an object of the expected shape or lacks `id` or a non-empty
/// `profile.real_name`.
pub fn parse_person(entry: &Value, index: usize) -> Result<SlackPerson> {
    let raw = SlackRawPerson::deserialize(entry)
        .map_err(|e| SlackpackError::malformed_identity(index, e.to_string()))?;

    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SlackpackError::malformed_identity(index, "missing 'id'"))?;
    let real_name = raw
        .profile
        .and_then(|p| p.real_name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            SlackpackError::malformed_identity(index, format!("'{id}' has no profile.real_name"))
        })?;

    Ok(SlackPerson {
        id,
        real_name,
        deleted: raw.deleted,
    })
}

/// Reads the identity file as a list of undecoded entries.
pub fn load_users_file(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| SlackpackError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_active_person() {
        let person = parse_person(
            &json!({"id": "U1", "deleted": false, "profile": {"real_name": "Alice"}}),
            0,
        )
        .unwrap();
        assert_eq!(person.id, "U1");
        assert_eq!(person.real_name, "Alice");
        assert!(!person.deleted);
    }

    #[test]
    fn test_parse_deleted_person() {
        let person = parse_person(
            &json!({"id": "U9", "deleted": true, "profile": {"real_name": "Gone"}}),
            0,
        )
        .unwrap();
        assert!(person.deleted);
        assert_eq!(person.real_name, "Gone");
    }

    #[test]
    fn test_missing_id() {
        let err = parse_person(&json!({"profile": {"real_name": "Alice"}}), 2).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_missing_real_name() {
        let err = parse_person(&json!({"id": "U1", "profile": {}}), 0).unwrap_err();
        assert!(err.to_string().contains("U1"));

        let err = parse_person(&json!({"id": "U1"}), 0).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_empty_real_name_rejected() {
        assert!(parse_person(&json!({"id": "U1", "profile": {"real_name": ""}}), 0).is_err());
    }

    #[test]
    fn test_non_object_entry() {
        let err = parse_person(&json!("U1"), 5).unwrap_err();
        assert!(err.is_recoverable());
    }
}
