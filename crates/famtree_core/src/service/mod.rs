//! Core use-case services.
//!
//! # Responsibility
//! - Own session state and route every mutation through persistence.
//! - Keep front ends decoupled from storage details.

pub mod family_service;
pub mod notifier;
