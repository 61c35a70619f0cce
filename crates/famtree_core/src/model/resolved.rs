//! Read-side projection of a relation set into full member records.
//!
//! # Invariants
//! - Stored order of each relation list is preserved.
//! - Ids with no registered member are skipped, never fabricated.

use crate::model::member::{Member, MemberId};
use crate::model::registry::MemberRegistry;
use crate::model::relation::{RelationKind, RelationSet};
use log::warn;

/// Relation lists of one member, expanded to member records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRelations {
    pub spouses: Vec<Member>,
    pub children: Vec<Member>,
    pub parents: Vec<Member>,
    pub siblings: Vec<Member>,
}

impl ResolvedRelations {
    /// Resolves every id in `set` against `registry`.
    ///
    /// Dangling ids are dropped with a `relation_resolve` warning.
    pub fn resolve(owner: &MemberId, set: &RelationSet, registry: &MemberRegistry) -> Self {
        let mut resolved = Self::default();
        for kind in RelationKind::ALL {
            let target = resolved.list_mut(kind);
            for id in set.get(kind) {
                match registry.get(id) {
                    Some(member) => target.push(member.clone()),
                    None => warn!(
                        "event=relation_resolve module=model status=skipped error_code=dangling_member owner={owner} kind={kind} missing={id}"
                    ),
                }
            }
        }
        resolved
    }

    pub fn get(&self, kind: RelationKind) -> &[Member] {
        match kind {
            RelationKind::Spouse => &self.spouses,
            RelationKind::Child => &self.children,
            RelationKind::Parent => &self.parents,
            RelationKind::Sibling => &self.siblings,
        }
    }

    fn list_mut(&mut self, kind: RelationKind) -> &mut Vec<Member> {
        match kind {
            RelationKind::Spouse => &mut self.spouses,
            RelationKind::Child => &mut self.children,
            RelationKind::Parent => &mut self.parents,
            RelationKind::Sibling => &mut self.siblings,
        }
    }

    pub fn is_empty(&self) -> bool {
        RelationKind::ALL
            .iter()
            .all(|kind| self.get(*kind).is_empty())
    }
}
