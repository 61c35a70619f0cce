//! Read-only display projections for front ends.
//!
//! # Responsibility
//! - Turn members and resolved relations into cards.
//! - Keep date presentation pure and stateless.

pub mod card;
pub mod dates;
