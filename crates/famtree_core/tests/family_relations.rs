use chrono::NaiveDate;
use famtree_core::{
    FamilyService, FamilyServiceError, KeyValueStore, KvSnapshotRepository, Member, MemberId,
    MemoryKeyValueStore, NewMember, RecordingNotifier, RelationKind, StoreError, StoreResult,
};
use std::collections::HashSet;

type MemoryService = FamilyService<KvSnapshotRepository<MemoryKeyValueStore>, RecordingNotifier>;

fn setup() -> MemoryService {
    FamilyService::load(
        KvSnapshotRepository::new(MemoryKeyValueStore::new()),
        RecordingNotifier::new(),
    )
    .unwrap()
}

fn add_john_and_jane(service: &mut MemoryService) -> (Member, Member) {
    let john = service
        .add_member(NewMember::new("John", "Doe").born(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()))
        .unwrap();
    let jane = service.add_member(NewMember::new("Jane", "Doe")).unwrap();
    (john, jane)
}

#[test]
fn spouse_relation_is_recorded_on_both_sides() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);

    service
        .link_members(&john.id, RelationKind::Spouse, &jane.id)
        .unwrap();

    assert_eq!(service.relations(&john.id).unwrap().spouses, vec![jane.clone()]);
    assert_eq!(service.relations(&jane.id).unwrap().spouses, vec![john]);
}

#[test]
fn child_relation_records_parent_on_other_side() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);

    service
        .link_members(&john.id, RelationKind::Child, &jane.id)
        .unwrap();

    let john_rel = service.relations(&john.id).unwrap();
    let jane_rel = service.relations(&jane.id).unwrap();
    assert_eq!(john_rel.children, vec![jane]);
    assert_eq!(jane_rel.parents, vec![john]);
    assert!(jane_rel.siblings.is_empty());
    assert!(jane_rel.spouses.is_empty());
    assert!(jane_rel.children.is_empty());
}

#[test]
fn every_kind_is_visible_from_both_sides() {
    for kind in RelationKind::ALL {
        let mut service = setup();
        let (a, b) = add_john_and_jane(&mut service);

        service.link_members(&a.id, kind, &b.id).unwrap();

        assert!(service.relations(&a.id).unwrap().get(kind).contains(&b));
        assert!(service
            .relations(&b.id)
            .unwrap()
            .get(kind.reciprocal())
            .contains(&a));
    }
}

#[test]
fn repeating_a_relation_does_not_duplicate_entries() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);

    service
        .link_members(&john.id, RelationKind::Sibling, &jane.id)
        .unwrap();
    let once = service.snapshot().relations.clone();
    service
        .link_members(&john.id, RelationKind::Sibling, &jane.id)
        .unwrap();

    assert_eq!(service.snapshot().relations, once);
    assert_eq!(service.relations(&jane.id).unwrap().siblings.len(), 1);
}

#[test]
fn add_relation_registers_unknown_other_member() {
    let mut service = setup();
    let (john, _) = add_john_and_jane(&mut service);
    let baby = Member::new("Baby", "Doe", None);

    service
        .add_relation(&john.id, RelationKind::Child, &baby)
        .unwrap();

    assert_eq!(service.members().len(), 3);
    assert_eq!(service.members()[2], baby);
    assert_eq!(service.relations(&baby.id).unwrap().parents, vec![john]);
}

#[test]
fn add_relation_rejects_unknown_member_and_self_links() {
    let mut service = setup();
    let (john, _) = add_john_and_jane(&mut service);

    let err = service
        .link_members(&MemberId::from("ghost"), RelationKind::Spouse, &john.id)
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::MemberNotFound(id) if id.as_str() == "ghost"));

    let err = service
        .link_members(&john.id, RelationKind::Spouse, &MemberId::from("ghost"))
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::MemberNotFound(_)));

    let err = service
        .link_members(&john.id, RelationKind::Sibling, &john.id)
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::SelfRelation(_)));
    assert!(service.relations(&john.id).unwrap().is_empty());
}

#[test]
fn add_relation_rejects_invalid_new_member() {
    let mut service = setup();
    let (john, _) = add_john_and_jane(&mut service);
    let nameless = Member::new("", "Doe", None);

    let err = service
        .add_relation(&john.id, RelationKind::Child, &nameless)
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::Validation(_)));
    assert_eq!(service.members().len(), 2);
}

#[test]
fn relation_add_sends_one_notification_per_call() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);
    assert!(service.notifier().messages().is_empty());

    service
        .link_members(&john.id, RelationKind::Spouse, &jane.id)
        .unwrap();

    let messages = service.notifier().drain();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Jane Doe"));
    assert!(messages[0].contains("John Doe"));
    assert!(messages[0].contains("spouse"));
}

#[test]
fn add_member_with_relation_context_links_new_member() {
    let mut service = setup();
    let (john, _) = add_john_and_jane(&mut service);

    let kid = service
        .add_member(NewMember::new("Jim", "Doe").related_to(john.id.clone(), RelationKind::Child))
        .unwrap();

    assert_eq!(service.relations(&john.id).unwrap().children, vec![kid.clone()]);
    assert_eq!(service.relations(&kid.id).unwrap().parents, vec![john]);
    assert_eq!(service.notifier().messages().len(), 1);
}

#[test]
fn add_member_with_unknown_anchor_changes_nothing() {
    let mut service = setup();

    let err = service
        .add_member(NewMember::new("Jim", "Doe").related_to(MemberId::from("nope"), RelationKind::Child))
        .unwrap_err();

    assert!(matches!(err, FamilyServiceError::MemberNotFound(_)));
    assert!(service.members().is_empty());
}

#[test]
fn add_member_rejects_blank_names() {
    let mut service = setup();
    let err = service.add_member(NewMember::new("  ", "Doe")).unwrap_err();
    assert!(matches!(err, FamilyServiceError::Validation(_)));
}

#[test]
fn member_without_relations_resolves_to_empty_lists() {
    let mut service = setup();
    let (john, _) = add_john_and_jane(&mut service);
    assert!(service.relations(&john.id).unwrap().is_empty());

    let err = service.relations(&MemberId::from("ghost")).unwrap_err();
    assert!(matches!(err, FamilyServiceError::MemberNotFound(_)));
}

#[test]
fn remove_member_prunes_every_reference() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);
    let kid = service.add_member(NewMember::new("Jim", "Doe")).unwrap();
    service
        .link_members(&john.id, RelationKind::Spouse, &jane.id)
        .unwrap();
    service
        .link_members(&john.id, RelationKind::Child, &kid.id)
        .unwrap();
    service
        .link_members(&jane.id, RelationKind::Child, &kid.id)
        .unwrap();

    let removed = service.remove_member(&john.id).unwrap();
    assert_eq!(removed.id, john.id);

    assert!(service.member(&john.id).is_none());
    assert!(service.relations(&jane.id).unwrap().spouses.is_empty());
    assert_eq!(service.relations(&kid.id).unwrap().parents, vec![jane]);
    for (_, set) in service.snapshot().relations.iter() {
        for kind in RelationKind::ALL {
            assert!(!set.get(kind).contains(&john.id));
        }
    }

    let err = service.remove_member(&john.id).unwrap_err();
    assert!(matches!(err, FamilyServiceError::MemberNotFound(_)));
}

#[test]
fn search_and_cards_follow_registry_order() {
    let mut service = setup();
    let (john, jane) = add_john_and_jane(&mut service);
    let alice = service.add_member(NewMember::new("Alice", "Johnson")).unwrap();
    service
        .link_members(&john.id, RelationKind::Spouse, &jane.id)
        .unwrap();

    let all: Vec<_> = service.search("").into_iter().map(|m| m.id.clone()).collect();
    assert_eq!(all, vec![john.id.clone(), jane.id.clone(), alice.id.clone()]);

    let hits: Vec<_> = service.search("JO").into_iter().map(|m| m.id.clone()).collect();
    assert_eq!(hits, vec![john.id.clone(), alice.id.clone()]);

    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let expanded: HashSet<_> = [john.id.clone()].into_iter().collect();
    let cards = service.cards("doe", &expanded, today);
    assert_eq!(cards.len(), 2);
    assert!(cards[0].is_expanded());
    assert_eq!(cards[0].age, Some(46));
    assert_eq!(cards[0].relations.as_ref().unwrap().spouses, vec![jane]);
    assert!(!cards[1].is_expanded());
    assert_eq!(cards[1].age, None);
}

/// Serves a fixed payload and rejects every write.
struct ReadOnlyStore {
    payload: Option<String>,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(self.payload.clone())
    }

    fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::from(rusqlite::Error::ExecuteReturnedResults))
    }
}

#[test]
fn failed_save_leaves_state_unchanged_and_sends_nothing() {
    let payload = r#"{
        "members": [
            {"id": "1", "firstName": "John", "lastName": "Doe"},
            {"id": "2", "firstName": "Jane", "lastName": "Doe"}
        ],
        "relations": {}
    }"#;
    let store = ReadOnlyStore {
        payload: Some(payload.to_string()),
    };
    let mut service =
        FamilyService::load(KvSnapshotRepository::new(store), RecordingNotifier::new()).unwrap();
    let before = service.snapshot().clone();
    let john = MemberId::from("1");
    let jane = MemberId::from("2");

    let err = service
        .add_member(NewMember::new("Jim", "Doe").related_to(john.clone(), RelationKind::Child))
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::Repo(_)));

    let err = service
        .link_members(&john, RelationKind::Spouse, &jane)
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::Repo(_)));

    let newcomer = Member::new("Baby", "Doe", None);
    let err = service
        .add_relation(&jane, RelationKind::Child, &newcomer)
        .unwrap_err();
    assert!(matches!(err, FamilyServiceError::Repo(_)));

    let err = service.remove_member(&john).unwrap_err();
    assert!(matches!(err, FamilyServiceError::Repo(_)));

    assert_eq!(service.snapshot(), &before);
    assert_eq!(service.members().len(), 2);
    assert!(service.relations(&john).unwrap().is_empty());
    assert!(service.member(&newcomer.id).is_none());
    assert!(service.notifier().messages().is_empty());
}
