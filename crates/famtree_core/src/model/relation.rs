//! Relation kinds, per-member relation sets and the symmetric relation store.
//!
//! # Responsibility
//! - Map every relation kind to its reciprocal.
//! - Maintain forward and reciprocal edges together on every insert.
//!
//! # Invariants
//! - An id appears at most once within a single relation list.
//! - If A lists B under kind `k`, B lists A under `k.reciprocal()`.
//! - The store never checks parent/child contradictions or cycles.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the four family relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Spouse,
    Child,
    Parent,
    Sibling,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Spouse,
        RelationKind::Child,
        RelationKind::Parent,
        RelationKind::Sibling,
    ];

    /// Kind recorded on the other party when `self` is added.
    pub fn reciprocal(self) -> Self {
        match self {
            Self::Spouse => Self::Spouse,
            Self::Child => Self::Parent,
            Self::Parent => Self::Child,
            Self::Sibling => Self::Sibling,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spouse => "spouse",
            Self::Child => "child",
            Self::Parent => "parent",
            Self::Sibling => "sibling",
        }
    }

    /// Section heading used by card views.
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Spouse => "Spouses",
            Self::Child => "Children",
            Self::Parent => "Parents",
            Self::Sibling => "Siblings",
        }
    }
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a relation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRelationKindError(pub String);

impl Display for ParseRelationKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown relation kind `{}`; expected spouse|child|parent|sibling",
            self.0
        )
    }
}

impl std::error::Error for ParseRelationKindError {}

impl FromStr for RelationKind {
    type Err = ParseRelationKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spouse" | "spouses" => Ok(Self::Spouse),
            "child" | "children" => Ok(Self::Child),
            "parent" | "parents" => Ok(Self::Parent),
            "sibling" | "siblings" => Ok(Self::Sibling),
            _ => Err(ParseRelationKindError(value.to_string())),
        }
    }
}

/// Ordered related-member ids for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSet {
    #[serde(default)]
    pub spouses: Vec<MemberId>,
    #[serde(default)]
    pub children: Vec<MemberId>,
    #[serde(default)]
    pub parents: Vec<MemberId>,
    #[serde(default)]
    pub siblings: Vec<MemberId>,
}

impl RelationSet {
    pub fn get(&self, kind: RelationKind) -> &[MemberId] {
        match kind {
            RelationKind::Spouse => &self.spouses,
            RelationKind::Child => &self.children,
            RelationKind::Parent => &self.parents,
            RelationKind::Sibling => &self.siblings,
        }
    }

    fn list_mut(&mut self, kind: RelationKind) -> &mut Vec<MemberId> {
        match kind {
            RelationKind::Spouse => &mut self.spouses,
            RelationKind::Child => &mut self.children,
            RelationKind::Parent => &mut self.parents,
            RelationKind::Sibling => &mut self.siblings,
        }
    }

    /// Appends `id` under `kind` unless already present.
    ///
    /// Returns `true` when the list changed.
    pub fn insert(&mut self, kind: RelationKind, id: MemberId) -> bool {
        let list = self.list_mut(kind);
        if list.contains(&id) {
            return false;
        }
        list.push(id);
        true
    }

    /// Removes `id` from every list. Returns `true` when anything changed.
    pub fn remove_everywhere(&mut self, id: &MemberId) -> bool {
        let mut changed = false;
        for kind in RelationKind::ALL {
            let list = self.list_mut(kind);
            let before = list.len();
            list.retain(|existing| existing != id);
            changed |= list.len() != before;
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        RelationKind::ALL
            .iter()
            .all(|kind| self.get(*kind).is_empty())
    }
}

/// Relation sets for every member, keyed by member id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationStore {
    sets: BTreeMap<MemberId, RelationSet>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the relation set for `id`, or `None` if nothing was recorded.
    pub fn get(&self, id: &MemberId) -> Option<&RelationSet> {
        self.sets.get(id)
    }

    /// Returns the relation set for `id`, all-empty when absent.
    pub fn relations_of(&self, id: &MemberId) -> RelationSet {
        self.sets.get(id).cloned().unwrap_or_default()
    }

    /// Records `member -kind-> other` and the reciprocal edge.
    ///
    /// Returns `true` when either side changed; repeating the same call is a
    /// no-op.
    pub fn add_relation(&mut self, member: &MemberId, kind: RelationKind, other: &MemberId) -> bool {
        let forward = self
            .sets
            .entry(member.clone())
            .or_default()
            .insert(kind, other.clone());
        let backward = self
            .sets
            .entry(other.clone())
            .or_default()
            .insert(kind.reciprocal(), member.clone());
        forward || backward
    }

    /// Drops the set owned by `id` and prunes `id` from every other set.
    pub fn remove_member(&mut self, id: &MemberId) -> bool {
        let mut changed = self.sets.remove(id).is_some();
        for set in self.sets.values_mut() {
            changed |= set.remove_everywhere(id);
        }
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &RelationSet)> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
