//! Search entry points.
//!
//! # Responsibility
//! - Filter members for type-as-you-search views.

pub mod filter;
