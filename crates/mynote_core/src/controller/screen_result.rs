//! Typed outcome reported by the add/update screen.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};

/// What the edit screen did before returning to the list.
///
/// Each variant carries exactly the data the list needs to patch itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenResult {
    /// A new note was stored and should be appended.
    Added { note: Note },
    /// The note shown at `position` was changed.
    Updated { note: Note, position: usize },
    /// The note shown at `position` was deleted.
    Deleted { position: usize },
}

#[cfg(test)]
mod tests {
    use super::ScreenResult;
    use crate::model::note::Note;

    #[test]
    fn json_shape_is_tagged_by_kind() {
        let raw = r#"{"kind":"deleted","position":3}"#;
        let parsed: ScreenResult = serde_json::from_str(raw).expect("valid payload");
        assert_eq!(parsed, ScreenResult::Deleted { position: 3 });

        let updated = ScreenResult::Updated {
            note: Note::new(4, "t", "d", "2024/01/01 10:00:00"),
            position: 0,
        };
        let json = serde_json::to_string(&updated).expect("serialize");
        assert!(json.contains(r#""kind":"updated""#));
    }

    #[test]
    fn payload_without_required_fields_is_rejected() {
        let raw = r#"{"kind":"updated","position":1}"#;
        assert!(serde_json::from_str::<ScreenResult>(raw).is_err());
    }
}
