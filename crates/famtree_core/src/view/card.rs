//! Member card projection and plain-text rendering.
//!
//! # Responsibility
//! - Derive display fields (full name, age, formatted birth date).
//! - Render collapsed and expanded cards for text front ends.
//!
//! # Invariants
//! - Only expanded cards carry resolved relations.
//! - Relation sections are rendered only when non-empty.

use crate::model::member::Member;
use crate::model::relation::RelationKind;
use crate::model::resolved::ResolvedRelations;
use crate::view::dates::{age_in_years, format_birth_date};
use chrono::NaiveDate;
use std::fmt::Write;

/// Display projection of one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCard {
    pub member: Member,
    pub full_name: String,
    /// `None` when no birth date is recorded.
    pub age: Option<u32>,
    /// `MMM d, yyyy`; `None` when no birth date is recorded.
    pub birth_date_label: Option<String>,
    /// `Some` only for expanded cards.
    pub relations: Option<ResolvedRelations>,
}

impl MemberCard {
    pub fn collapsed(member: &Member, today: NaiveDate) -> Self {
        Self {
            member: member.clone(),
            full_name: member.full_name(),
            age: member.birth_date.map(|birth| age_in_years(birth, today)),
            birth_date_label: member.birth_date.map(format_birth_date),
            relations: None,
        }
    }

    pub fn expanded(member: &Member, relations: ResolvedRelations, today: NaiveDate) -> Self {
        Self {
            relations: Some(relations),
            ..Self::collapsed(member, today)
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.relations.is_some()
    }
}

/// Renders a card as indented plain text.
pub fn render_card(card: &MemberCard) -> String {
    let marker = if card.is_expanded() { "v" } else { ">" };
    let mut out = format!("{marker} {} [{}]\n", card.full_name, card.member.id);
    if let Some(age) = card.age {
        let _ = writeln!(out, "    {age} years old");
    }

    let Some(relations) = &card.relations else {
        return out;
    };

    if let Some(label) = &card.birth_date_label {
        let _ = writeln!(out, "    Birth Date");
        let _ = writeln!(out, "      {label}");
    }
    for kind in RelationKind::ALL {
        let members = relations.get(kind);
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "    {}", kind.plural_label());
        for member in members {
            let _ = writeln!(out, "      {}", member.full_name());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_card, MemberCard};
    use crate::model::member::{Member, MemberId};
    use crate::model::resolved::ResolvedRelations;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn john() -> Member {
        Member::with_id(
            MemberId::from("1"),
            "John",
            "Doe",
            NaiveDate::from_ymd_opt(1980, 1, 1),
        )
    }

    #[test]
    fn collapsed_card_shows_name_and_age_only() {
        let card = MemberCard::collapsed(&john(), today());
        assert_eq!(card.age, Some(46));
        assert_eq!(card.birth_date_label.as_deref(), Some("Jan 1, 1980"));

        let text = render_card(&card);
        assert_eq!(text, "> John Doe [1]\n    46 years old\n");
    }

    #[test]
    fn member_without_birth_date_omits_age_lines() {
        let jane = Member::with_id(MemberId::from("2"), "Jane", "Doe", None);
        let card = MemberCard::expanded(&jane, ResolvedRelations::default(), today());
        assert_eq!(card.age, None);
        assert_eq!(render_card(&card), "v Jane Doe [2]\n");
    }

    #[test]
    fn expanded_card_lists_non_empty_sections_in_fixed_order() {
        let jane = Member::with_id(MemberId::from("2"), "Jane", "Doe", None);
        let kid = Member::with_id(MemberId::from("3"), "Jim", "Doe", None);
        let relations = ResolvedRelations {
            spouses: vec![jane],
            children: vec![kid],
            ..ResolvedRelations::default()
        };
        let card = MemberCard::expanded(&john(), relations, today());

        let text = render_card(&card);
        let expected = "v John Doe [1]\n    46 years old\n    Birth Date\n      Jan 1, 1980\n    Spouses\n      Jane Doe\n    Children\n      Jim Doe\n";
        assert_eq!(text, expected);
        assert!(!text.contains("Parents"));
    }
}
