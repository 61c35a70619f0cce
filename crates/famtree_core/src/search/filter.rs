//! Name search over the member registry.
//!
//! # Invariants
//! - Result order is registry order; there is no ranking.
//! - Only the empty query returns every member; whitespace is matched as-is.

use crate::model::member::Member;

/// Returns members whose `"first last"` name contains `query`,
/// ignoring case.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    if query.is_empty() {
        return members.iter().collect();
    }
    let needle = query.to_lowercase();

    members
        .iter()
        .filter(|member| member.full_name().to_lowercase().contains(&needle))
        .collect()
}
