//! Family tree use-case service.
//!
//! # Responsibility
//! - Own the member registry and relation store for one session.
//! - Apply member/relation mutations and persist the full snapshot after each.
//! - Expose read paths: relation resolution, search, and card composition.
//!
//! # Invariants
//! - Relations are only recorded between registered members.
//! - A failed save leaves in-memory state unchanged.
//! - Removing a member prunes it from every relation set.

use crate::model::member::{Member, MemberId, MemberValidationError};
use crate::model::relation::RelationKind;
use crate::model::resolved::ResolvedRelations;
use crate::model::snapshot::Snapshot;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::search::filter::filter_members;
use crate::service::notifier::Notifier;
use crate::view::card::MemberCard;
use chrono::NaiveDate;
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from family tree service operations.
#[derive(Debug)]
pub enum FamilyServiceError {
    /// Referenced member is not registered.
    MemberNotFound(MemberId),
    /// A member cannot be related to itself.
    SelfRelation(MemberId),
    /// Member record failed presence checks.
    Validation(MemberValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for FamilyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::SelfRelation(id) => write!(f, "member cannot be related to itself: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FamilyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FamilyServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<MemberValidationError> for FamilyServiceError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type FamilyResult<T> = Result<T, FamilyServiceError>;

/// Request model for adding one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    /// `Some((anchor, kind))` records the new member as `anchor`'s `kind`.
    pub relation_to: Option<(MemberId, RelationKind)>,
}

impl NewMember {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            relation_to: None,
        }
    }

    pub fn born(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn related_to(mut self, anchor: MemberId, kind: RelationKind) -> Self {
        self.relation_to = Some((anchor, kind));
        self
    }
}

/// Session facade over a snapshot repository.
pub struct FamilyService<R: SnapshotRepository, N: Notifier> {
    repo: R,
    notifier: N,
    snapshot: Snapshot,
}

impl<R: SnapshotRepository, N: Notifier> FamilyService<R, N> {
    /// Reads the stored snapshot once and starts a session on it.
    pub fn load(repo: R, notifier: N) -> FamilyResult<Self> {
        let snapshot = repo.load()?;
        Ok(Self {
            repo,
            notifier,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Members in registry (insertion) order.
    pub fn members(&self) -> &[Member] {
        self.snapshot.members.as_slice()
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.snapshot.members.get(id)
    }

    /// Registers a new member with a generated id.
    ///
    /// When `request.relation_to` is set, the relation is recorded in the
    /// same write and a notification is sent.
    pub fn add_member(&mut self, request: NewMember) -> FamilyResult<Member> {
        let member = Member::new(request.first_name, request.last_name, request.birth_date);
        member.validate()?;

        let mut next = self.snapshot.clone();
        next.members.insert(member.clone());
        if let Some((anchor, kind)) = &request.relation_to {
            if !next.members.contains(anchor) {
                return Err(FamilyServiceError::MemberNotFound(anchor.clone()));
            }
            next.relations.add_relation(anchor, *kind, &member.id);
        }
        self.commit(next)?;

        info!(
            "event=member_add module=service status=ok member={} has_birth_date={} with_relation={}",
            member.id,
            member.birth_date.is_some(),
            request.relation_to.is_some()
        );
        if let Some((anchor, kind)) = &request.relation_to {
            self.notify_relation(anchor, *kind, &member);
        }
        Ok(member)
    }

    /// Records `other` as `member_id`'s `kind`, plus the reciprocal edge.
    ///
    /// `other` is registered first when its id is unknown. Repeating the same
    /// call leaves the relation sets unchanged.
    pub fn add_relation(
        &mut self,
        member_id: &MemberId,
        kind: RelationKind,
        other: &Member,
    ) -> FamilyResult<()> {
        if !self.snapshot.members.contains(member_id) {
            return Err(FamilyServiceError::MemberNotFound(member_id.clone()));
        }
        if member_id == &other.id {
            return Err(FamilyServiceError::SelfRelation(member_id.clone()));
        }

        let mut next = self.snapshot.clone();
        let registered = if next.members.contains(&other.id) {
            false
        } else {
            other.validate()?;
            next.members.insert(other.clone())
        };
        next.relations.add_relation(member_id, kind, &other.id);
        self.commit(next)?;

        info!(
            "event=relation_add module=service status=ok member={member_id} kind={kind} other={} registered_other={registered}",
            other.id
        );
        let other = self.member(&other.id).cloned().unwrap_or_else(|| other.clone());
        self.notify_relation(member_id, kind, &other);
        Ok(())
    }

    /// Same as [`FamilyService::add_relation`] for two registered members.
    pub fn link_members(
        &mut self,
        member_id: &MemberId,
        kind: RelationKind,
        other_id: &MemberId,
    ) -> FamilyResult<()> {
        let other = self
            .member(other_id)
            .cloned()
            .ok_or_else(|| FamilyServiceError::MemberNotFound(other_id.clone()))?;
        self.add_relation(member_id, kind, &other)
    }

    /// Removes a member and every relation that references it.
    pub fn remove_member(&mut self, id: &MemberId) -> FamilyResult<Member> {
        let mut next = self.snapshot.clone();
        let removed = next
            .members
            .remove(id)
            .ok_or_else(|| FamilyServiceError::MemberNotFound(id.clone()))?;
        let pruned = next.relations.remove_member(id);
        self.commit(next)?;

        info!("event=member_remove module=service status=ok member={id} pruned_relations={pruned}");
        Ok(removed)
    }

    /// Resolves the relation lists of a registered member.
    ///
    /// Members with no recorded relations get all-empty lists.
    pub fn relations(&self, id: &MemberId) -> FamilyResult<ResolvedRelations> {
        if !self.snapshot.members.contains(id) {
            return Err(FamilyServiceError::MemberNotFound(id.clone()));
        }
        let set = self.snapshot.relations.relations_of(id);
        Ok(ResolvedRelations::resolve(id, &set, &self.snapshot.members))
    }

    /// Members whose full name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Member> {
        filter_members(self.members(), query)
    }

    /// Builds the display list for `query`; ids in `expanded` get relations.
    pub fn cards(
        &self,
        query: &str,
        expanded: &HashSet<MemberId>,
        today: NaiveDate,
    ) -> Vec<MemberCard> {
        self.search(query)
            .into_iter()
            .map(|member| {
                if expanded.contains(&member.id) {
                    let set = self.snapshot.relations.relations_of(&member.id);
                    let relations =
                        ResolvedRelations::resolve(&member.id, &set, &self.snapshot.members);
                    MemberCard::expanded(member, relations, today)
                } else {
                    MemberCard::collapsed(member, today)
                }
            })
            .collect()
    }

    fn commit(&mut self, next: Snapshot) -> FamilyResult<()> {
        self.repo.save(&next)?;
        self.snapshot = next;
        Ok(())
    }

    fn notify_relation(&self, member_id: &MemberId, kind: RelationKind, other: &Member) {
        let member_name = self
            .member(member_id)
            .map(Member::full_name)
            .unwrap_or_else(|| member_id.to_string());
        self.notifier.notify(&format!(
            "Relation added: {} is now {}'s {}",
            other.full_name(),
            member_name,
            kind
        ));
    }
}
