//! Persisted unit of family tree state.
//!
//! # Invariants
//! - A snapshot is always written and read as a whole.
//! - Missing sections decode as empty rather than failing.

use crate::model::registry::MemberRegistry;
use crate::model::relation::RelationStore;
use serde::{Deserialize, Serialize};

/// All members plus all relation sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub members: MemberRegistry,
    #[serde(default)]
    pub relations: RelationStore,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.relations.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::model::member::MemberId;
    use crate::model::relation::RelationKind;

    #[test]
    fn decodes_browser_shaped_payload() {
        let payload = r#"{
            "members": [
                {"id": "1", "firstName": "John", "lastName": "Doe", "birthDate": "1980-01-01"},
                {"id": "2", "firstName": "Jane", "lastName": "Doe"}
            ],
            "relations": {
                "1": {"spouses": ["2"], "children": [], "parents": [], "siblings": []},
                "2": {"spouses": ["1"]}
            }
        }"#;

        let snapshot = Snapshot::from_json(payload).unwrap();
        assert_eq!(snapshot.members.len(), 2);
        let jane = snapshot.relations.relations_of(&MemberId::from("2"));
        assert_eq!(jane.get(RelationKind::Spouse), &[MemberId::from("1")]);
        assert!(jane.children.is_empty());
    }

    #[test]
    fn empty_object_decodes_as_empty_snapshot() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
