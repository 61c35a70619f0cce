//! Ordered member registry.
//!
//! # Invariants
//! - Insertion order is preserved and is the default display order.
//! - No two members share an id, including registries decoded from storage.

use crate::model::member::{Member, MemberId};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemberRegistry {
    members: Vec<Member>,
}

impl<'de> Deserialize<'de> for MemberRegistry {
    /// Decodes a member list, keeping the first record for each id.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let decoded = Vec::<Member>::deserialize(deserializer)?;
        let mut registry = Self::new();
        for member in decoded {
            let id = member.id.clone();
            if !registry.insert(member) {
                warn!(
                    "event=snapshot_load module=model status=recovered error_code=duplicate_member member={id}"
                );
            }
        }
        Ok(registry)
    }
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `member` unless its id is already registered.
    ///
    /// Returns `false` and leaves the registry untouched on duplicates.
    pub fn insert(&mut self, member: Member) -> bool {
        if self.contains(&member.id) {
            return false;
        }
        self.members.push(member);
        true
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|member| &member.id == id)
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.get(id).is_some()
    }

    /// Removes and returns the member with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &MemberId) -> Option<Member> {
        let index = self.members.iter().position(|member| &member.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn as_slice(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
